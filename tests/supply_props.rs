//! Property tests - bag fairness and placement invariants over random games

use std::collections::HashSet;

use proptest::prelude::*;

use blockfall::core::{EngineConfig, GameEngine, PieceSupply};
use blockfall::types::{GameCommand, PieceKind};

fn command_strategy() -> impl Strategy<Value = GameCommand> {
    prop_oneof![
        Just(GameCommand::MoveLeft),
        Just(GameCommand::MoveRight),
        Just(GameCommand::SoftDrop),
        Just(GameCommand::HardDrop),
        Just(GameCommand::Rotate),
        Just(GameCommand::Hold),
    ]
}

proptest! {
    #[test]
    fn every_bag_is_a_permutation(seed in any::<u32>(), bags in 1usize..20) {
        let mut supply = PieceSupply::new(seed);
        for _ in 0..bags {
            let bag: HashSet<PieceKind> = (0..7).map(|_| supply.next()).collect();
            prop_assert_eq!(bag.len(), 7);
        }
    }

    #[test]
    fn peek_agrees_with_next(seed in any::<u32>(), count in 0usize..30) {
        let mut supply = PieceSupply::new(seed);
        let peeked = supply.peek(count);
        let drawn: Vec<PieceKind> = (0..count).map(|_| supply.next()).collect();
        prop_assert_eq!(peeked, drawn);
    }

    #[test]
    fn random_play_keeps_invariants(
        seed in any::<u32>(),
        commands in prop::collection::vec(command_strategy(), 1..200),
    ) {
        let mut engine = GameEngine::new(EngineConfig { seed, ..EngineConfig::default() }).unwrap();
        let mut last_score = 0;
        let mut last_lines = 0;

        for command in commands {
            engine.apply_command(command);
            engine.tick(16, false);

            prop_assert!(engine.score() >= last_score);
            prop_assert!(engine.lines_cleared() >= last_lines);
            prop_assert!(engine.max_combo() >= engine.combo());
            last_score = engine.score();
            last_lines = engine.lines_cleared();

            let field = engine.field();
            for y in 0..field.height() {
                prop_assert!(!field.is_row_full(y));
            }
            if !engine.is_game_over() {
                let piece = engine.current();
                prop_assert!(field.is_valid_placement(&piece, piece.x, piece.y));
                prop_assert!(engine.ghost_row() >= piece.y);
            } else {
                break;
            }
        }
    }
}
