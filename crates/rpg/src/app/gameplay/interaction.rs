fn facing_tile(position: GridPos, facing: Facing) -> GridPos {
    position.step(facing)
}

/// Talks to the NPC on the tile directly ahead of the player. Facing an
/// empty or blocked tile is not an error; nothing happens.
fn interact(
    position: GridPos,
    facing: Facing,
    npcs: &NpcRegistry,
    dialogue: &mut DialogueController,
) {
    let target = facing_tile(position, facing);
    if let Some(npc) = npcs.npc_at(target) {
        debug!(npc = %npc.id, "npc_dialogue_started");
        dialogue.reveal(&npc.message);
    }
}

#[cfg(test)]
mod interaction_tests {
    use super::*;

    fn villager_at(position: GridPos) -> NpcRegistry {
        NpcRegistry::from_npcs(vec![Npc {
            id: "npc1".to_string(),
            name: "Villager".to_string(),
            position,
            message: "いい天気だね。".to_string(),
            color: 0xff6b6b,
        }])
    }

    #[test]
    fn interacting_while_facing_an_npc_reveals_its_message() {
        let npcs = villager_at(GridPos::new(5, 4));
        let mut dialogue = DialogueController::new();
        interact(GridPos::new(5, 5), Facing::Up, &npcs, &mut dialogue);
        assert!(dialogue.is_active());
        dialogue.advance_or_dismiss();
        assert_eq!(dialogue.visible_text(), Some("いい天気だね。"));
    }

    #[test]
    fn interacting_with_an_empty_tile_does_nothing() {
        let npcs = villager_at(GridPos::new(5, 4));
        let mut dialogue = DialogueController::new();
        // Facing away from the NPC.
        interact(GridPos::new(5, 5), Facing::Down, &npcs, &mut dialogue);
        assert!(!dialogue.is_active());
    }
}
