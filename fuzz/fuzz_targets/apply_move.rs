#![no_main]

use arbitrary::Arbitrary;
use chess_rules::{attacks, Game, Role, Square};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Attempt {
    from: Square,
    to: Square,
    promotion: Option<Role>,
}

fuzz_target!(|attempts: Vec<Attempt>| {
    let mut game = Game::new();

    for attempt in attempts {
        let before = game.clone();
        let legal = game
            .legal_moves_from(attempt.from)
            .iter()
            .any(|m| m.to() == attempt.to);

        match game.apply_move(attempt.from, attempt.to, attempt.promotion) {
            Ok(record) => {
                assert!(legal);
                assert_eq!(game.ply(), before.ply() + 1);
                assert_eq!(game.turn(), !before.turn());
                assert!(!attacks::is_in_check(game.board(), before.turn()));
                assert_eq!(record.status, game.status());
            }
            Err(_) => {
                assert_eq!(game.fen(), before.fen());
                assert_eq!(game.history().len(), before.history().len());
            }
        }
    }
});
