mod input;
mod loop_runner;
mod scene;

pub use input::InputAction;
pub use loop_runner::{run_session, AppError, LoopConfig, SessionSummary};
pub use scene::{
    DialogueFrame, Facing, FrameSnapshot, GridPos, InputSnapshot, MapGrid, MapGridError, NpcFrame,
    PlayerFrame, Scene, SceneCommand, Vec2,
};
