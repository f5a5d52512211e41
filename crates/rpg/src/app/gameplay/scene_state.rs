/// Play-mode scene: the authoritative grid/NPC/player/dialogue state for one
/// session, composed into the host runtime through the `Scene` contract.
struct RpgScene {
    project_name: String,
    document: ProjectDoc,
    grid: GridWorld,
    npcs: NpcRegistry,
    movement: MovementController,
    dialogue: DialogueController,
}

impl RpgScene {
    fn new(document: ProjectDoc) -> Self {
        let (grid, npcs, movement) = build_session_state(&document);
        Self {
            project_name: document.name.clone(),
            document,
            grid,
            npcs,
            movement,
            dialogue: DialogueController::new(),
        }
    }

    /// Turns a pointer tap into a movement command. A tap on an NPC walks to
    /// the nearest adjacent tile and then talks; a tap on open ground walks
    /// there; an unreachable target leaves the current state alone.
    fn handle_pointer(&mut self, point_px: Vec2) {
        let Some(tile) = self.grid.map().point_to_tile(point_px) else {
            return;
        };
        if let Some(index) = self.npcs.index_at(tile) {
            match find_path_to_adjacent(&self.grid, self.movement.position(), tile) {
                Ok(path) if path.is_empty() => {
                    // Already standing next to the NPC: arrival has happened,
                    // so talk right away.
                    self.movement.set_path(Vec::new(), None);
                    if let Some(facing) = Facing::between(self.movement.position(), tile) {
                        self.movement.face(facing);
                    }
                    if let Some(npc) = self.npcs.get(index) {
                        self.dialogue.reveal(&npc.message);
                    }
                }
                Ok(path) => self.movement.set_path(path, Some(index)),
                Err(Unreachable) => {
                    debug!(x = tile.x, y = tile.y, "npc_unreachable");
                }
            }
        } else {
            match find_path(&self.grid, self.movement.position(), tile) {
                Ok(path) => self.movement.set_path(path, None),
                Err(Unreachable) => {
                    debug!(x = tile.x, y = tile.y, "tile_unreachable");
                }
            }
        }
    }

    fn build_frame(&self) -> FrameSnapshot {
        let map = self.grid.map();
        let grid_pos = self.movement.position();
        let progress = self.movement.transition_progress();
        let resting_px = map.tile_center_px(grid_pos);
        let position_px = match self.movement.transition_from() {
            Some(from) => lerp_px(map.tile_center_px(from), resting_px, progress),
            None => resting_px,
        };

        let dialogue = self.dialogue.visible_text().map(|text| DialogueFrame {
            visible_text: text.to_string(),
            fully_shown: matches!(self.dialogue.state(), DialogueState::FullyShown { .. }),
        });

        let npcs = self
            .npcs
            .iter()
            .map(|npc| NpcFrame {
                id: npc.id.clone(),
                name: npc.name.clone(),
                grid: npc.position,
                position_px: map.tile_center_px(npc.position),
                color: npc.color,
            })
            .collect();

        FrameSnapshot {
            map_width: map.width(),
            map_height: map.height(),
            tile_size_px: map.tile_size_px(),
            player: PlayerFrame {
                grid: grid_pos,
                position_px,
                facing: self.movement.facing(),
                step_progress: progress,
            },
            dialogue,
            npcs,
        }
    }
}
