use super::input::{ActionStates, InputAction};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Grid coordinate convention:
/// - `(0, 0)` is the top-left tile; `x` grows rightward, `y` grows downward.
/// - Rows of the tile matrix are `y`, so the matrix is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, facing: Facing) -> Self {
        let (dx, dy) = facing.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    /// Fixed enumeration order shared by every direction scan in the core.
    pub const ORDER: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Facing::Up => (0, -1),
            Facing::Down => (0, 1),
            Facing::Left => (-1, 0),
            Facing::Right => (1, 0),
        }
    }

    /// Facing that moves one step from `from` to `to`, if the tiles are
    /// orthogonally adjacent.
    pub fn between(from: GridPos, to: GridPos) -> Option<Facing> {
        let delta = (to.x - from.x, to.y - from.y);
        Facing::ORDER
            .into_iter()
            .find(|facing| facing.delta() == delta)
    }
}

/// Pixel convention:
/// - Tile `(0, 0)` occupies the pixel rect from `(0, 0)` to
///   `(tile_size_px, tile_size_px)`.
/// - The center of tile `(x, y)` is `((x + 0.5), (y + 0.5)) * tile_size_px`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapGrid {
    width: u32,
    height: u32,
    tile_size_px: u32,
    tiles: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapGridError {
    #[error("map dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },
    #[error("tile size must be non-zero")]
    ZeroTileSize,
    #[error("tile count mismatch: expected {expected}, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },
}

impl MapGrid {
    pub fn new(
        width: u32,
        height: u32,
        tile_size_px: u32,
        tiles: Vec<u8>,
    ) -> Result<Self, MapGridError> {
        if width == 0 || height == 0 {
            return Err(MapGridError::EmptyDimensions { width, height });
        }
        if tile_size_px == 0 {
            return Err(MapGridError::ZeroTileSize);
        }
        let expected = width as usize * height as usize;
        let actual = tiles.len();
        if expected != actual {
            return Err(MapGridError::TileCountMismatch { expected, actual });
        }
        Ok(Self {
            width,
            height,
            tile_size_px,
            tiles,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size_px(&self) -> u32 {
        self.tile_size_px
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    pub fn index_of(&self, pos: GridPos) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some(pos.y as usize * self.width as usize + pos.x as usize)
    }

    pub fn tile_at(&self, pos: GridPos) -> Option<u8> {
        self.index_of(pos)
            .and_then(|index| self.tiles.get(index).copied())
    }

    pub fn tile_center_px(&self, pos: GridPos) -> Vec2 {
        let size = self.tile_size_px as f32;
        Vec2 {
            x: (pos.x as f32 + 0.5) * size,
            y: (pos.y as f32 + 0.5) * size,
        }
    }

    pub fn point_to_tile(&self, point: Vec2) -> Option<GridPos> {
        let size = self.tile_size_px as f32;
        let tile_x = (point.x / size).floor() as i32;
        let tile_y = (point.y / size).floor() as i32;
        let pos = GridPos {
            x: tile_x,
            y: tile_y,
        };
        if !self.contains(pos) {
            return None;
        }
        Some(pos)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    actions: ActionStates,
    interact_pressed: bool,
    dismiss_pressed: bool,
    pointer_pressed: bool,
    pointer_position_px: Option<Vec2>,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_interact_pressed(mut self, interact_pressed: bool) -> Self {
        self.interact_pressed = interact_pressed;
        self
    }

    pub fn with_dismiss_pressed(mut self, dismiss_pressed: bool) -> Self {
        self.dismiss_pressed = dismiss_pressed;
        self
    }

    pub fn with_pointer_pressed(mut self, pointer_pressed: bool) -> Self {
        self.pointer_pressed = pointer_pressed;
        self
    }

    pub fn with_pointer_position_px(mut self, pointer_position_px: Option<Vec2>) -> Self {
        self.pointer_position_px = pointer_position_px;
        self
    }

    pub fn interact_pressed(&self) -> bool {
        self.interact_pressed
    }

    pub fn dismiss_pressed(&self) -> bool {
        self.dismiss_pressed
    }

    pub fn pointer_pressed(&self) -> bool {
        self.pointer_pressed
    }

    pub fn pointer_position_px(&self) -> Option<Vec2> {
        self.pointer_position_px
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerFrame {
    pub grid: GridPos,
    pub position_px: Vec2,
    pub facing: Facing,
    pub step_progress: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogueFrame {
    pub visible_text: String,
    pub fully_shown: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NpcFrame {
    pub id: String,
    pub name: String,
    pub grid: GridPos,
    pub position_px: Vec2,
    pub color: u32,
}

/// Authoritative per-tick state handed to the rendering provider. The core
/// computes positions and dialogue text; it draws nothing itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub map_width: u32,
    pub map_height: u32,
    pub tile_size_px: u32,
    pub player: PlayerFrame,
    pub dialogue: Option<DialogueFrame>,
    pub npcs: Vec<NpcFrame>,
}

pub trait Scene {
    fn load(&mut self);
    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand;
    fn frame(&self) -> FrameSnapshot;
    fn unload(&mut self);
}
