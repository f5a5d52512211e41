use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::Path;

use runtime::{
    DialogueFrame, Facing, FrameSnapshot, GridPos, InputAction, InputSnapshot, MapGrid, NpcFrame,
    PlayerFrame, Scene, SceneCommand, Vec2,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

const STEP_DURATION_SECONDS: f32 = 0.15;
const CHAR_REVEAL_SECONDS: f32 = 0.05;
const PATHFIND_VISITED_CAP: usize = 200;
const DEFAULT_MAP_WIDTH: u32 = 25;
const DEFAULT_MAP_HEIGHT: u32 = 19;
const DEFAULT_TILE_SIZE_PX: u32 = 32;
const DEFAULT_PLAYER_START: GridPos = GridPos::new(5, 5);
const DEFAULT_PROJECT_NAME: &str = "default";

include!("types.rs");
include!("project.rs");
include!("grid.rs");
include!("nav.rs");
include!("dialogue.rs");
include!("movement.rs");
include!("interaction.rs");
include!("scene_state.rs");
include!("scene_impl.rs");
include!("util.rs");

pub(crate) fn build_scene(project_file: Option<&Path>) -> Box<dyn Scene> {
    let document = load_project_document(project_file);
    Box::new(RpgScene::new(document))
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
