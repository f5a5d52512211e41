/// Tile matrix plus NPC occupancy, fixed for the lifetime of a scene session.
#[derive(Debug, Clone, PartialEq)]
struct GridWorld {
    map: MapGrid,
    npc_tiles: HashSet<GridPos>,
}

impl GridWorld {
    fn new(map: MapGrid, npcs: &NpcRegistry) -> Self {
        Self {
            map,
            npc_tiles: npcs.occupied_tiles().collect(),
        }
    }

    fn map(&self) -> &MapGrid {
        &self.map
    }

    /// A tile can be entered iff it is inside the map, its kind is passable,
    /// and no NPC stands on it.
    fn is_passable(&self, pos: GridPos) -> bool {
        let Some(tile_id) = self.map.tile_at(pos) else {
            return false;
        };
        let Some(kind) = TileKind::from_id(tile_id) else {
            return false;
        };
        kind.is_passable() && !self.npc_tiles.contains(&pos)
    }
}
