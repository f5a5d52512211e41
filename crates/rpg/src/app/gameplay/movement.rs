#[derive(Debug, Clone, Copy, PartialEq)]
struct StepTransition {
    from: GridPos,
    elapsed_seconds: f32,
}

/// Owns the player's grid position, facing, the single in-flight step
/// transition, and the queued path. The grid position commits at the start
/// of a step; the transition only paces command acceptance and gives the
/// renderer something to interpolate.
#[derive(Debug, Clone, PartialEq)]
struct MovementController {
    position: GridPos,
    facing: Facing,
    transition: Option<StepTransition>,
    path: VecDeque<GridPos>,
    target_npc: Option<NpcIndex>,
}

impl MovementController {
    fn new(position: GridPos, facing: Facing) -> Self {
        Self {
            position,
            facing,
            transition: None,
            path: VecDeque::new(),
            target_npc: None,
        }
    }

    fn position(&self) -> GridPos {
        self.position
    }

    fn facing(&self) -> Facing {
        self.facing
    }

    fn is_moving(&self) -> bool {
        self.transition.is_some()
    }

    fn face(&mut self, facing: Facing) {
        self.facing = facing;
    }

    fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    fn transition_from(&self) -> Option<GridPos> {
        self.transition.map(|transition| transition.from)
    }

    fn transition_progress(&self) -> f32 {
        match &self.transition {
            Some(transition) => {
                (transition.elapsed_seconds / STEP_DURATION_SECONDS).clamp(0.0, 1.0)
            }
            None => 1.0,
        }
    }

    fn tick(&mut self, dt: f32) {
        if let Some(transition) = &mut self.transition {
            transition.elapsed_seconds += dt;
            if transition.elapsed_seconds >= STEP_DURATION_SECONDS {
                self.transition = None;
            }
        }
    }

    /// Discrete one-tile step. Facing turns toward `facing` even when the
    /// destination is blocked (the bump); the position only changes when the
    /// destination is passable. Ignored entirely while a step is in flight.
    fn request_step(&mut self, facing: Facing, world: &GridWorld) {
        if self.transition.is_some() {
            return;
        }
        self.facing = facing;
        let destination = self.position.step(facing);
        if !world.is_passable(destination) {
            return;
        }
        self.begin_step(destination);
    }

    /// Replaces the queued path and target wholesale; the last request wins.
    /// An in-flight transition keeps running and the new queue is consumed
    /// once it completes.
    fn set_path(&mut self, waypoints: Vec<GridPos>, target_npc: Option<NpcIndex>) {
        self.path = waypoints.into();
        self.target_npc = target_npc;
    }

    /// Consumes the next queued waypoint as a step. Passability was settled
    /// when the path was computed and is not re-checked here. Popping the
    /// final waypoint of an NPC-approach path starts that NPC's dialogue.
    fn advance_path(&mut self, npcs: &NpcRegistry, dialogue: &mut DialogueController) {
        if self.transition.is_some() {
            return;
        }
        let Some(next) = self.path.pop_front() else {
            return;
        };
        let Some(facing) = Facing::between(self.position, next) else {
            debug!(
                x = next.x,
                y = next.y,
                "discarding path waypoint that is not adjacent to the player"
            );
            self.path.clear();
            self.target_npc = None;
            return;
        };
        self.facing = facing;
        self.begin_step(next);
        if self.path.is_empty() {
            if let Some(index) = self.target_npc.take() {
                if let Some(npc) = npcs.get(index) {
                    dialogue.reveal(&npc.message);
                }
            }
        }
    }

    fn begin_step(&mut self, destination: GridPos) {
        self.transition = Some(StepTransition {
            from: self.position,
            elapsed_seconds: 0.0,
        });
        self.position = destination;
    }
}
