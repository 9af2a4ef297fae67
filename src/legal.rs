// This file is part of the chess-rules library.
// Copyright (C) 2026 The chess-rules developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Legal move generation.
//!
//! A pseudo-legal move is legal if it does not leave the mover's own king
//! attacked. Every candidate is played on a copy of the board and the king
//! square is tested on the copy, so the original board is never touched.
//! Castling additionally requires that the king does not start on or pass
//! through an attacked square.
//!
//! # Examples
//!
//! ```
//! use chess_rules::{legal, Board, Square};
//!
//! // The black rook on e8 pins the white rook on e2 to its king.
//! let board = Board::from_board_fen("4r1k1/8/8/8/8/8/4R3/4K3").expect("valid");
//! let e2 = Square::new(6, 4)?;
//! let moves = legal::legal_moves_for(&board, None, e2);
//! assert!(moves.iter().all(|m| m.to().col() == 4));
//! # Ok::<_, chess_rules::InvalidSquare>(())
//! ```

use crate::{
    attacks,
    board::Board,
    color::Color,
    m::{Move, MoveList},
    movegen,
    square::Square,
};

/// Legal moves of the piece on `sq`. Nothing is generated for an empty
/// square.
pub fn legal_moves_for(board: &Board, ep_square: Option<Square>, sq: Square) -> MoveList {
    let mut moves = MoveList::new();
    movegen::pseudo_legal_moves(board, sq, ep_square, &mut moves);
    moves.retain(|m| is_safe(board, *m));
    moves
}

/// Legal moves of all pieces of the given color.
///
/// # Panics
///
/// Panics if the legal moves do not fit into a [`MoveList`]. That takes
/// more material than [`Game::from_setup()`](crate::Game::from_setup)
/// accepts.
pub fn legal_moves(board: &Board, ep_square: Option<Square>, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    for occupant in board.occupants_of(color) {
        moves.extend(legal_moves_for(board, ep_square, occupant.square));
    }
    moves
}

/// Tests if a move is legal on the given board.
///
/// The move must match one generated for its origin square exactly,
/// including the captured role and the promotion.
pub fn is_legal(board: &Board, ep_square: Option<Square>, m: Move) -> bool {
    legal_moves_for(board, ep_square, m.from()).contains(&m)
}

/// Tests if the given color has at least one legal move. Stops at the
/// first one found.
pub fn has_legal_move(board: &Board, ep_square: Option<Square>, color: Color) -> bool {
    board.occupants_of(color).any(|occupant| {
        let mut moves = MoveList::new();
        movegen::pseudo_legal_moves(board, occupant.square, ep_square, &mut moves);
        moves.into_iter().any(|m| is_safe(board, m))
    })
}

/// Tests if a pseudo-legal move keeps the mover's king safe.
fn is_safe(board: &Board, m: Move) -> bool {
    let Some(color) = board.color_at(m.from()) else {
        return false;
    };
    let them = !color;

    if let Move::Castle { king, .. } = m {
        if attacks::is_square_attacked(board, king, them) {
            return false;
        }
        let transit = king.offset(0, (m.to().col() - king.col()).signum());
        if transit.is_some_and(|sq| attacks::is_square_attacked(board, sq, them)) {
            return false;
        }
    }

    let mut after = board.clone();
    after.play_unchecked(m);
    !attacks::is_in_check(&after, color)
}
