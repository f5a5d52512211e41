pub mod app;

pub use app::{
    run_session, AppError, DialogueFrame, Facing, FrameSnapshot, GridPos, InputAction,
    InputSnapshot, LoopConfig, MapGrid, MapGridError, NpcFrame, PlayerFrame, Scene, SceneCommand,
    SessionSummary, Vec2,
};
