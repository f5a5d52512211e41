#[derive(Debug, Clone, PartialEq, Deserialize)]
struct ProjectDoc {
    name: String,
    version: String,
    map: MapDoc,
    player: PlayerDoc,
    #[serde(default)]
    npcs: Vec<NpcDoc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct MapDoc {
    width: u32,
    height: u32,
    // The backend writes `tile_size`, the editor frontend `tileSize`.
    #[serde(alias = "tileSize")]
    tile_size: u32,
    tiles: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct PlayerDoc {
    x: i32,
    y: i32,
    direction: FacingDoc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum FacingDoc {
    Up,
    Down,
    Left,
    Right,
}

impl FacingDoc {
    fn to_facing(self) -> Facing {
        match self {
            FacingDoc::Up => Facing::Up,
            FacingDoc::Down => Facing::Down,
            FacingDoc::Left => Facing::Left,
            FacingDoc::Right => Facing::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct NpcDoc {
    id: String,
    #[serde(default)]
    name: String,
    x: i32,
    y: i32,
    message: String,
    color: u32,
}

type LoadResult<T> = Result<T, String>;

fn parse_project_json(raw: &str) -> LoadResult<ProjectDoc> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, ProjectDoc>(&mut deserializer) {
        Ok(document) => Ok(document),
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                Err(format!("parse project json: {source}"))
            } else {
                Err(format!("parse project json at {path}: {source}"))
            }
        }
    }
}

fn validation_err(path: &str, message: impl Into<String>) -> String {
    format!("validation failed at {path}: {}", message.into())
}

fn validate_project(document: &ProjectDoc) -> LoadResult<()> {
    let map = &document.map;
    if map.width == 0 || map.height == 0 {
        return Err(validation_err(
            "map",
            format!("dimensions must be non-zero, got {}x{}", map.width, map.height),
        ));
    }
    if map.tile_size == 0 {
        return Err(validation_err("map.tile_size", "must be non-zero"));
    }
    if map.tiles.len() != map.height as usize {
        return Err(validation_err(
            "map.tiles",
            format!("expected {} rows, got {}", map.height, map.tiles.len()),
        ));
    }
    for (row_index, row) in map.tiles.iter().enumerate() {
        if row.len() != map.width as usize {
            return Err(validation_err(
                &format!("map.tiles[{row_index}]"),
                format!("expected {} tiles, got {}", map.width, row.len()),
            ));
        }
        for (column_index, &tile_id) in row.iter().enumerate() {
            if TileKind::from_id(tile_id).is_none() {
                return Err(validation_err(
                    &format!("map.tiles[{row_index}][{column_index}]"),
                    format!("unknown tile id {tile_id}"),
                ));
            }
        }
    }

    let player = GridPos::new(document.player.x, document.player.y);
    let player_kind = tile_kind_in_doc(map, player).ok_or_else(|| {
        validation_err(
            "player",
            format!("start ({}, {}) is outside the map", player.x, player.y),
        )
    })?;
    if !player_kind.is_passable() {
        return Err(validation_err(
            "player",
            format!("start ({}, {}) is on a blocking tile", player.x, player.y),
        ));
    }

    for (npc_index, npc) in document.npcs.iter().enumerate() {
        let pos = GridPos::new(npc.x, npc.y);
        if tile_kind_in_doc(map, pos).is_none() {
            return Err(validation_err(
                &format!("npcs[{npc_index}]"),
                format!("'{}' at ({}, {}) is outside the map", npc.id, pos.x, pos.y),
            ));
        }
        if pos == player {
            return Err(validation_err(
                &format!("npcs[{npc_index}]"),
                format!("'{}' occupies the player start tile", npc.id),
            ));
        }
    }

    Ok(())
}

fn tile_kind_in_doc(map: &MapDoc, pos: GridPos) -> Option<TileKind> {
    if pos.x < 0 || pos.y < 0 {
        return None;
    }
    let row = map.tiles.get(pos.y as usize)?;
    let tile_id = row.get(pos.x as usize).copied()?;
    TileKind::from_id(tile_id)
}

fn read_project_document(path: &Path) -> LoadResult<ProjectDoc> {
    let raw = fs::read_to_string(path)
        .map_err(|error| format!("read project '{}': {error}", path.display()))?;
    let document = parse_project_json(&raw)?;
    validate_project(&document)?;
    Ok(document)
}

/// Resolves the project document for a scene session. Any failure along the
/// way (missing file, broken JSON, failed validation) falls back to the
/// built-in default document instead of surfacing an error.
fn load_project_document(project_file: Option<&Path>) -> ProjectDoc {
    let Some(path) = project_file else {
        info!("no project file configured, using built-in default map");
        return default_project_doc();
    };
    match read_project_document(path) {
        Ok(document) => {
            info!(
                path = %path.display(),
                project = %document.name,
                npc_count = document.npcs.len(),
                "project_document_loaded"
            );
            document
        }
        Err(error) => {
            warn!(
                path = %path.display(),
                error = %error,
                "project_document_load_failed"
            );
            default_project_doc()
        }
    }
}

fn try_build_session_state(
    document: &ProjectDoc,
) -> LoadResult<(GridWorld, NpcRegistry, MovementController)> {
    let tiles: Vec<u8> = document.map.tiles.iter().flatten().copied().collect();
    let map = MapGrid::new(
        document.map.width,
        document.map.height,
        document.map.tile_size,
        tiles,
    )
    .map_err(|error| format!("build map grid: {error}"))?;

    let npcs = NpcRegistry::from_npcs(
        document
            .npcs
            .iter()
            .map(|npc| Npc {
                id: npc.id.clone(),
                name: npc.name.clone(),
                position: GridPos::new(npc.x, npc.y),
                message: npc.message.clone(),
                color: npc.color,
            })
            .collect(),
    );

    let grid = GridWorld::new(map, &npcs);
    let movement = MovementController::new(
        GridPos::new(document.player.x, document.player.y),
        document.player.direction.to_facing(),
    );
    Ok((grid, npcs, movement))
}

fn build_session_state(document: &ProjectDoc) -> (GridWorld, NpcRegistry, MovementController) {
    match try_build_session_state(document) {
        Ok(state) => state,
        Err(error) => {
            warn!(error = %error, "project_document_rejected");
            default_session_state()
        }
    }
}

fn default_session_state() -> (GridWorld, NpcRegistry, MovementController) {
    let map = MapGrid::new(
        DEFAULT_MAP_WIDTH,
        DEFAULT_MAP_HEIGHT,
        DEFAULT_TILE_SIZE_PX,
        default_map_tiles(),
    )
    .expect("built-in map shape is valid");
    let npcs = NpcRegistry::default();
    let grid = GridWorld::new(map, &npcs);
    let movement = MovementController::new(DEFAULT_PLAYER_START, Facing::Down);
    (grid, npcs, movement)
}
