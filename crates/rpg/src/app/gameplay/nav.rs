#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no reachable route to the requested goal")]
struct Unreachable;

/// Breadth-first search for the shortest 4-directional route. Neighbors are
/// explored in the fixed up/down/left/right order, which is the tie-break
/// between equal-length routes. Returns the waypoints from (exclusive)
/// `start` to (inclusive) `goal`; `start == goal` yields no waypoints.
///
/// The search gives up once more than `PATHFIND_VISITED_CAP` tiles have been
/// visited, so a route that exists past the cap is still `Unreachable`.
fn find_path(world: &GridWorld, start: GridPos, goal: GridPos) -> Result<Vec<GridPos>, Unreachable> {
    if !world.is_passable(goal) {
        return Err(Unreachable);
    }
    if start == goal {
        return Ok(Vec::new());
    }
    let map = world.map();
    let Some(start_index) = map.index_of(start) else {
        return Err(Unreachable);
    };

    let node_count = map.width() as usize * map.height() as usize;
    let mut visited = vec![false; node_count];
    let mut parent = vec![None::<usize>; node_count];
    let mut queue = VecDeque::new();

    visited[start_index] = true;
    let mut visited_count = 1usize;
    queue.push_back((start, start_index));

    while let Some((current, current_index)) = queue.pop_front() {
        for facing in Facing::ORDER {
            let neighbor = current.step(facing);
            if !world.is_passable(neighbor) {
                continue;
            }
            let Some(neighbor_index) = map.index_of(neighbor) else {
                continue;
            };
            if visited[neighbor_index] {
                continue;
            }
            visited[neighbor_index] = true;
            visited_count += 1;
            parent[neighbor_index] = Some(current_index);
            if neighbor == goal {
                return reconstruct_path(&parent, map.width(), start_index, neighbor_index)
                    .ok_or(Unreachable);
            }
            if visited_count > PATHFIND_VISITED_CAP {
                return Err(Unreachable);
            }
            queue.push_back((neighbor, neighbor_index));
        }
    }

    Err(Unreachable)
}

/// Shortest route to any tile orthogonally adjacent to `npc_pos`, for
/// walking up to an NPC. Candidate tiles are tried in the same
/// up/down/left/right order; the first strictly shortest route wins.
fn find_path_to_adjacent(
    world: &GridWorld,
    start: GridPos,
    npc_pos: GridPos,
) -> Result<Vec<GridPos>, Unreachable> {
    let mut best: Option<Vec<GridPos>> = None;
    for facing in Facing::ORDER {
        let neighbor = npc_pos.step(facing);
        if !world.is_passable(neighbor) {
            continue;
        }
        if let Ok(path) = find_path(world, start, neighbor) {
            let shorter = best
                .as_ref()
                .map_or(true, |current| path.len() < current.len());
            if shorter {
                best = Some(path);
            }
        }
    }
    best.ok_or(Unreachable)
}

fn reconstruct_path(
    parent: &[Option<usize>],
    width: u32,
    start_index: usize,
    goal_index: usize,
) -> Option<Vec<GridPos>> {
    let mut cursor = goal_index;
    let mut indices = vec![cursor];

    while cursor != start_index {
        let next = parent.get(cursor).and_then(|value| *value)?;
        cursor = next;
        indices.push(cursor);
    }
    // The last pushed index is the start tile, which is not a waypoint.
    indices.pop();
    indices.reverse();
    Some(
        indices
            .into_iter()
            .map(|index| GridPos {
                x: (index % width as usize) as i32,
                y: (index / width as usize) as i32,
            })
            .collect(),
    )
}

#[cfg(test)]
mod nav_tests {
    use super::*;

    fn open_world(width: u32, height: u32) -> GridWorld {
        let tiles = vec![0u8; (width * height) as usize];
        let map = MapGrid::new(width, height, 32, tiles).expect("map");
        GridWorld::new(map, &NpcRegistry::default())
    }

    fn world_from_tiles(width: u32, height: u32, tiles: Vec<u8>) -> GridWorld {
        let map = MapGrid::new(width, height, 32, tiles).expect("map");
        GridWorld::new(map, &NpcRegistry::default())
    }

    #[test]
    fn open_grid_path_length_equals_manhattan_distance() {
        let world = open_world(10, 10);
        let start = GridPos::new(1, 1);
        let goal = GridPos::new(4, 6);
        let path = find_path(&world, start, goal).expect("path");
        assert_eq!(path.len(), 8);
        assert_eq!(path.last().copied(), Some(goal));
        let mut previous = start;
        for waypoint in path {
            assert!(Facing::between(previous, waypoint).is_some());
            previous = waypoint;
        }
    }

    #[test]
    fn start_equals_goal_yields_no_waypoints() {
        let world = open_world(5, 5);
        let start = GridPos::new(2, 2);
        assert_eq!(find_path(&world, start, start), Ok(Vec::new()));
    }

    #[test]
    fn blocked_goal_is_unreachable() {
        let mut tiles = vec![0u8; 25];
        tiles[2 * 5 + 3] = 2;
        let world = world_from_tiles(5, 5, tiles);
        assert_eq!(
            find_path(&world, GridPos::new(0, 0), GridPos::new(3, 2)),
            Err(Unreachable)
        );
    }

    #[test]
    fn walled_off_goal_is_unreachable() {
        // Water column splits the map in two.
        let mut tiles = vec![0u8; 5 * 5];
        for y in 0..5 {
            tiles[y * 5 + 2] = 3;
        }
        let world = world_from_tiles(5, 5, tiles);
        assert_eq!(
            find_path(&world, GridPos::new(0, 2), GridPos::new(4, 2)),
            Err(Unreachable)
        );
    }

    #[test]
    fn path_routes_around_obstacles() {
        // Tree wall with a gap on the bottom row.
        let width = 7u32;
        let height = 5u32;
        let mut tiles = vec![0u8; (width * height) as usize];
        for y in 0..4 {
            tiles[(y * width + 3) as usize] = 2;
        }
        let world = world_from_tiles(width, height, tiles);
        let path = find_path(&world, GridPos::new(1, 2), GridPos::new(5, 2)).expect("path");
        assert_eq!(path.last().copied(), Some(GridPos::new(5, 2)));
        for waypoint in &path {
            assert!(world.is_passable(*waypoint), "stepped onto blocked tile");
        }
        assert!(path.contains(&GridPos::new(3, 4)), "must use the gap");
    }

    #[test]
    fn equal_length_routes_resolve_the_same_way_every_run() {
        let mut tiles = vec![0u8; 5 * 5];
        tiles[2 * 5 + 2] = 2;
        let world = world_from_tiles(5, 5, tiles);
        let first = find_path(&world, GridPos::new(0, 2), GridPos::new(4, 2)).expect("first");
        let second = find_path(&world, GridPos::new(0, 2), GridPos::new(4, 2)).expect("second");
        assert_eq!(first, second);
        // Up is enumerated before down, so the detour goes over the block.
        assert!(first.contains(&GridPos::new(2, 1)));
    }

    #[test]
    fn visited_cap_reports_long_routes_as_unreachable() {
        // A single corridor 250 tiles long: the route exists but needs more
        // visits than the cap allows.
        let world = open_world(250, 1);
        assert_eq!(
            find_path(&world, GridPos::new(0, 0), GridPos::new(249, 0)),
            Err(Unreachable)
        );
        // A short hop on the same map stays under the cap.
        let path = find_path(&world, GridPos::new(0, 0), GridPos::new(10, 0)).expect("path");
        assert_eq!(path.len(), 10);
    }

    #[test]
    fn adjacent_query_ends_next_to_the_npc_never_on_it() {
        let npc_pos = GridPos::new(10, 7);
        let npcs = NpcRegistry::from_npcs(vec![Npc {
            id: "npc1".to_string(),
            name: String::new(),
            position: npc_pos,
            message: "hi".to_string(),
            color: 0xff6b6b,
        }]);
        let map = MapGrid::new(25, 19, 32, vec![0u8; 25 * 19]).expect("map");
        let world = GridWorld::new(map, &npcs);

        let path = find_path_to_adjacent(&world, GridPos::new(5, 4), npc_pos).expect("path");
        let end = path.last().copied().expect("non-empty");
        assert_ne!(end, npc_pos);
        assert!(Facing::between(end, npc_pos).is_some());
        // (10, 6) and (9, 7) tie at distance 7; up is enumerated first.
        assert_eq!(end, GridPos::new(10, 6));
        assert_eq!(path.len(), 7);
    }

    #[test]
    fn adjacent_query_with_player_already_adjacent_is_empty() {
        let npc_pos = GridPos::new(3, 3);
        let npcs = NpcRegistry::from_npcs(vec![Npc {
            id: "npc1".to_string(),
            name: String::new(),
            position: npc_pos,
            message: "hi".to_string(),
            color: 0xff6b6b,
        }]);
        let map = MapGrid::new(8, 8, 32, vec![0u8; 64]).expect("map");
        let world = GridWorld::new(map, &npcs);

        let path = find_path_to_adjacent(&world, GridPos::new(3, 2), npc_pos).expect("path");
        assert!(path.is_empty());
    }

    #[test]
    fn adjacent_query_fails_when_the_npc_is_boxed_in() {
        // NPC surrounded by water on all four sides.
        let mut tiles = vec![0u8; 5 * 5];
        for (x, y) in [(2, 1), (2, 3), (1, 2), (3, 2)] {
            tiles[y * 5 + x] = 3;
        }
        let npc_pos = GridPos::new(2, 2);
        let npcs = NpcRegistry::from_npcs(vec![Npc {
            id: "npc1".to_string(),
            name: String::new(),
            position: npc_pos,
            message: "hi".to_string(),
            color: 0xff6b6b,
        }]);
        let map = MapGrid::new(5, 5, 32, tiles).expect("map");
        let world = GridWorld::new(map, &npcs);

        assert_eq!(
            find_path_to_adjacent(&world, GridPos::new(0, 0), npc_pos),
            Err(Unreachable)
        );
    }
}
