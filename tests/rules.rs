use chess_rules::{attacks, Color, Game, Move, Outcome, PlayError, Role, Square, Status};

fn sq(name: &str) -> Square {
    name.parse().expect("valid square")
}

fn play(game: &mut Game, from: &str, to: &str) {
    if let Err(err) = game.apply_move(sq(from), sq(to), None) {
        panic!("{from}-{to}: {err}");
    }
}

#[test]
fn test_fools_mate() {
    let mut game = Game::new();
    for (from, to) in [((6, 5), (5, 5)), ((1, 4), (3, 4)), ((6, 6), (4, 6))] {
        game.apply_move_at(from, to, None).expect("legal move");
        assert!(!game.is_game_over());
    }

    let record = game.apply_move_at((0, 3), (4, 7), None).expect("legal move");
    assert_eq!(record.piece, Color::Black.queen());
    assert_eq!(record.to_string(), "Qd8-h4#");

    assert_eq!(game.status(), Status::Checkmate(Color::White));
    assert_eq!(game.outcome(), Some(Outcome::Decisive { winner: Color::Black }));
    assert!(game.legal_moves().is_empty());
    assert!(game.is_check());
    assert_eq!(
        game.apply_move(sq("e2"), sq("e3"), None),
        Err(PlayError::GameAlreadyOver {
            status: Status::Checkmate(Color::White)
        })
    );
}

#[test]
fn test_en_passant_window() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4");
    play(&mut game, "a7", "a6");
    play(&mut game, "e4", "e5");
    play(&mut game, "d7", "d5");
    assert_eq!(game.ep_square(), Some(sq("d6")));

    // Available right away.
    let mut now = game.clone();
    now.apply_move(sq("e5"), sq("d6"), None).expect("en passant");
    assert!(now.board().is_empty(sq("d5")));
    assert_eq!(now.captured(Color::White), [Color::Black.pawn()]);
    assert_eq!(now.history().last().map(|r| r.m.is_en_passant()), Some(true));

    // Gone one ply later.
    play(&mut game, "h2", "h3");
    play(&mut game, "h7", "h6");
    assert_eq!(game.ep_square(), None);
    assert_eq!(
        game.apply_move(sq("e5"), sq("d6"), None),
        Err(PlayError::IllegalDestination {
            from: sq("e5"),
            to: sq("d6")
        })
    );
}

#[test]
fn test_castling() {
    let mut game = Game::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1")
        .expect("legal");
    play(&mut game, "e1", "g1");
    assert_eq!(game.board().piece_at(sq("g1")), Some(Color::White.king()));
    assert_eq!(game.board().piece_at(sq("f1")), Some(Color::White.rook()));
    assert!(game.board().is_empty(sq("h1")));
    assert!(game.history()[0].m.is_castle());

    play(&mut game, "e8", "c8");
    assert_eq!(game.board().piece_at(sq("d8")), Some(Color::Black.rook()));
    assert_eq!(game.fen(), "2kr3r/pppppppp/8/8/8/8/PPPPPPPP/R4RK1 w - - 2 2");
}

#[test]
fn test_castling_through_check() {
    // The black bishop on a6 covers f1.
    let game = Game::from_fen("4k3/8/b7/8/8/8/8/R3K2R w KQ - 0 1").expect("legal");
    let castles: Vec<Move> = game
        .legal_moves_from(sq("e1"))
        .into_iter()
        .filter(|m| m.is_castle())
        .collect();
    assert_eq!(castles.len(), 1);
    assert_eq!(castles[0].to(), sq("c1"));

    let mut game = game;
    assert!(game.apply_move(sq("e1"), sq("g1"), None).is_err());
    assert!(game.apply_move(sq("e1"), sq("c1"), None).is_ok());
}

#[test]
fn test_castling_rights_lost() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("legal");
    play(&mut game, "h1", "h2");
    play(&mut game, "a8", "a7");
    play(&mut game, "h2", "h1");
    play(&mut game, "a7", "a8");
    assert_eq!(game.fen(), "r3k2r/8/8/8/8/8/8/R3K2R w Qk - 4 3");
    assert!(game.apply_move(sq("e1"), sq("g1"), None).is_err());
    assert!(game.apply_move(sq("e1"), sq("c1"), None).is_ok());
}

#[test]
fn test_stalemate_is_not_checkmate() {
    let mut game = Game::from_fen("k7/8/1Q6/8/8/8/8/4K3 w - - 0 1").expect("legal");
    assert_eq!(game.status(), Status::InProgress);

    play(&mut game, "b6", "c7");
    assert_eq!(game.status(), Status::Stalemate);
    assert!(!game.is_check());
    assert_eq!(game.outcome(), Some(Outcome::Draw));
}

#[test]
fn test_checkmate_is_not_stalemate() {
    let mut game = Game::from_fen("k7/8/1K6/8/8/8/7Q/8 w - - 0 1").expect("legal");
    play(&mut game, "h2", "h8");
    assert_eq!(game.status(), Status::Checkmate(Color::Black));
    assert!(!game.is_stalemate());
}

#[test]
fn test_promotion() {
    let mut game = Game::from_fen("1r5k/P7/8/8/8/8/8/K7 w - - 0 1").expect("legal");
    assert_eq!(game.legal_moves_from(sq("a7")).len(), 8);

    let record = game
        .apply_move(sq("a7"), sq("b8"), Some(Role::Knight))
        .expect("underpromotion");
    assert_eq!(record.to_string(), "a7xb8=N");
    assert_eq!(record.captured, Some(Color::Black.rook()));
    assert_eq!(game.board().piece_at(sq("b8")), Some(Color::White.knight()));
}

#[test]
fn test_rejected_moves_leave_game_unchanged() {
    let mut game = Game::from_fen("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1").expect("legal");
    let before = game.fen();

    // Pinned rook.
    assert!(matches!(
        game.apply_move(sq("e2"), sq("d2"), None),
        Err(PlayError::IllegalDestination { .. })
    ));
    assert!(matches!(
        game.apply_move(sq("g8"), sq("h8"), None),
        Err(PlayError::WrongSideToMove { .. })
    ));
    assert!(matches!(
        game.apply_move(sq("a3"), sq("a4"), None),
        Err(PlayError::NoPieceAtSource { .. })
    ));
    assert!(matches!(
        game.apply_move_at((7, 4), (7, 8), None),
        Err(PlayError::InvalidSquare(_))
    ));
    assert!(game.history().is_empty());
    assert_eq!(game.fen(), before);
}

#[test]
fn test_round_trip() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4");
    play(&mut game, "d7", "d5");

    let record = game.apply_move(sq("e4"), sq("d5"), None).expect("capture");
    assert!(game.board().is_empty(sq("e4")));
    assert_eq!(game.board().piece_at(sq("d5")), Some(Color::White.pawn()));
    assert_eq!(record.captured, Some(Color::Black.pawn()));
    assert_eq!(game.board().occupants_of(Color::Black).count(), 15);
}

#[test]
fn test_legal_moves_keep_king_safe() {
    // Walks a few deterministic pseudo-random games and checks every legal
    // move of every visited position.
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };

    for _ in 0..8 {
        let mut game = Game::new();
        for _ in 0..60 {
            let moves = game.legal_moves();
            let turn = game.turn();
            for &m in &moves {
                let mut board = game.board().clone();
                board.play_unchecked(m);
                assert!(!attacks::is_in_check(&board, turn), "{m} in {}", game.fen());
            }

            let Some(&m) = moves.get((next() % moves.len().max(1) as u64) as usize) else {
                assert!(game.is_game_over());
                break;
            };
            let promotion = m.promotion();
            game.apply_move(m.from(), m.to(), promotion).expect("legal move");
        }
    }
}
