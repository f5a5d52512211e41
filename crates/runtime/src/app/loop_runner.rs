use thiserror::Error;
use tracing::debug;

use super::scene::{FrameSnapshot, InputSnapshot, Scene, SceneCommand};

pub const DEFAULT_FIXED_DT_SECONDS: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    pub fixed_dt_seconds: f32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            fixed_dt_seconds: DEFAULT_FIXED_DT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AppError {
    #[error("fixed_dt_seconds must be positive and finite, got {0}")]
    InvalidFixedDt(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub ticks_run: u64,
    pub quit_requested: bool,
}

/// Drives a scene through a fixed-step session: one `update` per scripted
/// input snapshot, handing each tick's `FrameSnapshot` to `on_frame` in place
/// of a renderer. Timers inside the scene advance only through
/// `fixed_dt_seconds`, so a session is fully deterministic.
pub fn run_session<I, F>(
    scene: &mut dyn Scene,
    config: LoopConfig,
    inputs: I,
    mut on_frame: F,
) -> Result<SessionSummary, AppError>
where
    I: IntoIterator<Item = InputSnapshot>,
    F: FnMut(u64, &FrameSnapshot),
{
    if !config.fixed_dt_seconds.is_finite() || config.fixed_dt_seconds <= 0.0 {
        return Err(AppError::InvalidFixedDt(config.fixed_dt_seconds));
    }

    scene.load();

    let mut ticks_run = 0u64;
    let mut quit_requested = false;
    for input in inputs {
        let command = scene.update(config.fixed_dt_seconds, &input);
        ticks_run = ticks_run.saturating_add(1);
        on_frame(ticks_run, &scene.frame());
        if command == SceneCommand::Quit {
            quit_requested = true;
            break;
        }
    }

    scene.unload();
    debug!(ticks = ticks_run, quit = quit_requested, "session_finished");

    Ok(SessionSummary {
        ticks_run,
        quit_requested,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::scene::{Facing, GridPos, PlayerFrame, Vec2};

    struct CountingScene {
        loaded: bool,
        unloaded: bool,
        updates: u64,
        quit_after: Option<u64>,
    }

    impl CountingScene {
        fn new(quit_after: Option<u64>) -> Self {
            Self {
                loaded: false,
                unloaded: false,
                updates: 0,
                quit_after,
            }
        }
    }

    impl Scene for CountingScene {
        fn load(&mut self) {
            self.loaded = true;
        }

        fn update(&mut self, _fixed_dt_seconds: f32, _input: &InputSnapshot) -> SceneCommand {
            self.updates += 1;
            match self.quit_after {
                Some(limit) if self.updates >= limit => SceneCommand::Quit,
                _ => SceneCommand::None,
            }
        }

        fn frame(&self) -> FrameSnapshot {
            FrameSnapshot {
                map_width: 1,
                map_height: 1,
                tile_size_px: 32,
                player: PlayerFrame {
                    grid: GridPos::new(0, 0),
                    position_px: Vec2 { x: 16.0, y: 16.0 },
                    facing: Facing::Down,
                    step_progress: 0.0,
                },
                dialogue: None,
                npcs: Vec::new(),
            }
        }

        fn unload(&mut self) {
            self.unloaded = true;
        }
    }

    #[test]
    fn session_runs_every_scripted_tick() {
        let mut scene = CountingScene::new(None);
        let inputs = vec![InputSnapshot::empty(); 5];
        let mut frames_seen = 0u64;
        let summary = run_session(&mut scene, LoopConfig::default(), inputs, |_, _| {
            frames_seen += 1;
        })
        .expect("session");
        assert!(scene.loaded);
        assert!(scene.unloaded);
        assert_eq!(summary.ticks_run, 5);
        assert_eq!(frames_seen, 5);
        assert!(!summary.quit_requested);
    }

    #[test]
    fn quit_command_stops_the_session_early() {
        let mut scene = CountingScene::new(Some(3));
        let inputs = vec![InputSnapshot::empty(); 10];
        let summary = run_session(&mut scene, LoopConfig::default(), inputs, |_, _| {})
            .expect("session");
        assert_eq!(summary.ticks_run, 3);
        assert!(summary.quit_requested);
        assert!(scene.unloaded);
    }

    #[test]
    fn non_positive_dt_is_rejected() {
        let mut scene = CountingScene::new(None);
        let config = LoopConfig {
            fixed_dt_seconds: 0.0,
        };
        let result = run_session(&mut scene, config, Vec::new(), |_, _| {});
        assert_eq!(result, Err(AppError::InvalidFixedDt(0.0)));
        assert!(!scene.loaded);
    }
}
