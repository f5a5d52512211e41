/// Tile kinds as stored in the project document's tile matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TileKind {
    Grass,
    Road,
    Tree,
    Water,
}

impl TileKind {
    fn from_id(id: u8) -> Option<TileKind> {
        match id {
            0 => Some(TileKind::Grass),
            1 => Some(TileKind::Road),
            2 => Some(TileKind::Tree),
            3 => Some(TileKind::Water),
            _ => None,
        }
    }

    fn is_passable(self) -> bool {
        matches!(self, TileKind::Grass | TileKind::Road)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NpcIndex(usize);

#[derive(Debug, Clone, PartialEq)]
struct Npc {
    id: String,
    name: String,
    position: GridPos,
    message: String,
    color: u32,
}

/// NPC lookup built once from the project document. Positions never change
/// during a scene session, so the tile index is never rebuilt.
#[derive(Debug, Clone, Default, PartialEq)]
struct NpcRegistry {
    npcs: Vec<Npc>,
    index_by_tile: HashMap<GridPos, NpcIndex>,
}

impl NpcRegistry {
    fn from_npcs(npcs: Vec<Npc>) -> Self {
        let mut index_by_tile = HashMap::new();
        for (index, npc) in npcs.iter().enumerate() {
            index_by_tile.insert(npc.position, NpcIndex(index));
        }
        Self {
            npcs,
            index_by_tile,
        }
    }

    fn get(&self, index: NpcIndex) -> Option<&Npc> {
        self.npcs.get(index.0)
    }

    fn index_at(&self, pos: GridPos) -> Option<NpcIndex> {
        self.index_by_tile.get(&pos).copied()
    }

    fn npc_at(&self, pos: GridPos) -> Option<&Npc> {
        self.index_at(pos).and_then(|index| self.get(index))
    }

    fn iter(&self) -> impl Iterator<Item = &Npc> {
        self.npcs.iter()
    }

    fn occupied_tiles(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.npcs.iter().map(|npc| npc.position)
    }

    fn len(&self) -> usize {
        self.npcs.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DialogueState {
    Hidden,
    Revealing { shown_chars: usize, text: String },
    FullyShown { text: String },
}
