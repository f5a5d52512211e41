use std::process::ExitCode;

use runtime::{run_session, InputAction, InputSnapshot, Vec2};
use tracing::{error, info};

use super::bootstrap::AppWiring;

const FRAME_LOG_INTERVAL_TICKS: u64 = 30;

pub(crate) fn run(app: AppWiring) -> ExitCode {
    let mut scene = app.scene;
    let script = demo_script();

    let result = run_session(scene.as_mut(), app.config, script, |tick, frame| {
        if tick % FRAME_LOG_INTERVAL_TICKS == 0 {
            info!(
                tick,
                x = frame.player.grid.x,
                y = frame.player.grid.y,
                facing = ?frame.player.facing,
                dialogue = frame.dialogue.is_some(),
                "frame"
            );
        }
    });

    match result {
        Ok(summary) => {
            info!(ticks = summary.ticks_run, "session_complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "startup_failed");
            ExitCode::FAILURE
        }
    }
}

/// Scripted input sequence for the headless demo session: walk a short L
/// shape, try to talk to whatever is ahead, dismiss any dialogue, then tap a
/// tile and let path-following finish.
fn demo_script() -> Vec<InputSnapshot> {
    let mut script = Vec::new();
    for _ in 0..36 {
        script.push(InputSnapshot::empty().with_action_down(InputAction::MoveRight, true));
    }
    for _ in 0..18 {
        script.push(InputSnapshot::empty().with_action_down(InputAction::MoveDown, true));
    }
    script.push(InputSnapshot::empty().with_interact_pressed(true));
    for _ in 0..60 {
        script.push(InputSnapshot::empty());
    }
    script.push(InputSnapshot::empty().with_dismiss_pressed(true));
    script.push(InputSnapshot::empty());
    script.push(InputSnapshot::empty().with_dismiss_pressed(true));
    script.push(
        InputSnapshot::empty()
            .with_pointer_pressed(true)
            .with_pointer_position_px(Some(Vec2 { x: 400.0, y: 300.0 })),
    );
    for _ in 0..180 {
        script.push(InputSnapshot::empty());
    }
    script
}
