impl Scene for RpgScene {
    fn load(&mut self) {
        let (grid, npcs, movement) = build_session_state(&self.document);
        self.grid = grid;
        self.npcs = npcs;
        self.movement = movement;
        self.dialogue = DialogueController::new();
        info!(
            project = %self.project_name,
            width = self.grid.map().width(),
            height = self.grid.map().height(),
            npc_count = self.npcs.len(),
            "scene_loaded"
        );
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        if input.quit_requested() {
            return SceneCommand::Quit;
        }

        self.movement.tick(fixed_dt_seconds);
        self.dialogue.tick(fixed_dt_seconds);

        // An open dialogue is modal: only the dismiss edge gets through.
        if self.dialogue.is_active() {
            if input.dismiss_pressed() {
                self.dialogue.advance_or_dismiss();
            }
            return SceneCommand::None;
        }

        if self.movement.has_path() && !self.movement.is_moving() {
            self.movement.advance_path(&self.npcs, &mut self.dialogue);
        } else if input.interact_pressed() {
            interact(
                self.movement.position(),
                self.movement.facing(),
                &self.npcs,
                &mut self.dialogue,
            );
        } else if let Some(facing) = held_direction(input) {
            if !self.movement.is_moving() {
                self.movement.request_step(facing, &self.grid);
            }
        }

        if input.pointer_pressed() {
            if let Some(point) = input.pointer_position_px() {
                self.handle_pointer(point);
            }
        }

        SceneCommand::None
    }

    fn frame(&self) -> FrameSnapshot {
        self.build_frame()
    }

    fn unload(&mut self) {
        info!(project = %self.project_name, "scene_unload");
        self.movement.set_path(Vec::new(), None);
        self.dialogue = DialogueController::new();
    }
}
