// Built-in fallback map: tree border, two road loops, a house footprint and
// a pond, matching the default project the editor ships with.
#[rustfmt::skip]
const DEFAULT_MAP_ROWS: [[u8; DEFAULT_MAP_WIDTH as usize]; DEFAULT_MAP_HEIGHT as usize] = [
    [2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
    [2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 1, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 3, 3, 3, 0, 0, 2],
    [2, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 3, 3, 3, 0, 0, 2],
    [2, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 3, 3, 3, 0, 0, 2],
    [2, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
];

fn default_map_rows() -> Vec<Vec<u8>> {
    DEFAULT_MAP_ROWS.iter().map(|row| row.to_vec()).collect()
}

fn default_map_tiles() -> Vec<u8> {
    DEFAULT_MAP_ROWS.iter().flatten().copied().collect()
}

fn default_project_doc() -> ProjectDoc {
    ProjectDoc {
        name: DEFAULT_PROJECT_NAME.to_string(),
        version: "1.0.0".to_string(),
        map: MapDoc {
            width: DEFAULT_MAP_WIDTH,
            height: DEFAULT_MAP_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE_PX,
            tiles: default_map_rows(),
        },
        player: PlayerDoc {
            x: DEFAULT_PLAYER_START.x,
            y: DEFAULT_PLAYER_START.y,
            direction: FacingDoc::Down,
        },
        npcs: Vec::new(),
    }
}

/// First held direction in the fixed up/down/left/right scan order.
fn held_direction(input: &InputSnapshot) -> Option<Facing> {
    Facing::ORDER
        .into_iter()
        .find(|facing| input.is_down(action_for(*facing)))
}

fn action_for(facing: Facing) -> InputAction {
    match facing {
        Facing::Up => InputAction::MoveUp,
        Facing::Down => InputAction::MoveDown,
        Facing::Left => InputAction::MoveLeft,
        Facing::Right => InputAction::MoveRight,
    }
}

fn lerp_px(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    Vec2 {
        x: from.x + (to.x - from.x) * t,
        y: from.y + (to.y - from.y) * t,
    }
}
