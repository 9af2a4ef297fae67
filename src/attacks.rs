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

//! Movement geometry and attack detection.
//!
//! Attacks only depend on reachability: whose turn it is and whether the
//! attacker's own king is safe do not matter. Kings attack their eight
//! neighbours and never castle onto a square, so detecting an attack never
//! recurses into another attack detection.
//!
//! # Examples
//!
//! ```
//! use chess_rules::{attacks, Board, Color, Square};
//!
//! let board = Board::from_board_fen("4k3/8/8/8/8/8/8/R3K3").expect("valid");
//! // . . . . k . . .
//! // . . . . . . . .
//! // . . . . . . . .
//! // . . . . . . . .
//! // . . . . . . . .
//! // . . . . . . . .
//! // . . . . . . . .
//! // R . . . K . . .
//!
//! let a8 = Square::new(0, 0)?;
//! let c1 = Square::new(7, 2)?;
//! assert!(attacks::is_square_attacked(&board, a8, Color::White));
//! assert!(attacks::is_square_attacked(&board, c1, Color::White));
//! assert!(!attacks::is_in_check(&board, Color::Black));
//! # Ok::<_, chess_rules::InvalidSquare>(())
//! ```

use arrayvec::ArrayVec;

use crate::{board::Board, color::Color, role::Role, square::Square, types::Occupant};

/// A list of squares that can be stored inline on the stack.
pub type SquareList = ArrayVec<Square, 64>;

/// Row and column deltas.
pub type Delta = (i8, i8);

pub const ROOK_DIRECTIONS: [Delta; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub const BISHOP_DIRECTIONS: [Delta; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub const QUEEN_DIRECTIONS: [Delta; 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

pub const KING_OFFSETS: [Delta; 8] = QUEEN_DIRECTIONS;

pub const KNIGHT_OFFSETS: [Delta; 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Squares along one direction, up to and including the first occupied
/// square or the edge of the board.
#[derive(Clone, Debug)]
pub struct Ray<'a> {
    board: &'a Board,
    next: Option<Square>,
    direction: Delta,
}

impl Iterator for Ray<'_> {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let sq = self.next?;
        let (drow, dcol) = self.direction;
        self.next = if self.board.is_empty(sq) {
            sq.offset(drow, dcol)
        } else {
            None
        };
        Some(sq)
    }
}

impl std::iter::FusedIterator for Ray<'_> {}

/// Casts a ray from `from` (exclusive) in the given direction.
///
/// The ray never jumps: it ends on the first occupied square, whatever the
/// color of its occupant.
pub fn ray(board: &Board, from: Square, direction: Delta) -> Ray<'_> {
    let (drow, dcol) = direction;
    Ray {
        board,
        next: from.offset(drow, dcol),
        direction,
    }
}

/// The (at most two) squares a pawn of the given color attacks. These are
/// attacked whether or not they are occupied.
pub fn pawn_attacks(color: Color, sq: Square) -> impl Iterator<Item = Square> {
    [-1, 1]
        .into_iter()
        .filter_map(move |dcol| sq.offset(color.forward(), dcol))
}

pub(crate) fn slider_directions(role: Role) -> &'static [Delta] {
    match role {
        Role::Bishop => &BISHOP_DIRECTIONS,
        Role::Rook => &ROOK_DIRECTIONS,
        Role::Queen => &QUEEN_DIRECTIONS,
        _ => &[],
    }
}

/// All squares attacked by the occupant, including squares occupied by its
/// own side (they are defended).
pub fn attacks(board: &Board, occupant: Occupant) -> SquareList {
    let from = occupant.square;
    let mut squares = SquareList::new();
    match occupant.role() {
        Role::Pawn => squares.extend(pawn_attacks(occupant.color(), from)),
        Role::Knight => squares.extend(steps(from, &KNIGHT_OFFSETS)),
        Role::King => squares.extend(steps(from, &KING_OFFSETS)),
        role => {
            for &direction in slider_directions(role) {
                squares.extend(ray(board, from, direction));
            }
        }
    }
    squares
}

fn steps(from: Square, offsets: &'static [Delta]) -> impl Iterator<Item = Square> {
    offsets
        .iter()
        .filter_map(move |&(drow, dcol)| from.offset(drow, dcol))
}

/// Tests if the occupant attacks `target`.
///
/// Equivalent to `attacks(board, occupant).contains(&target)`, but sliders
/// only cast the one ray that could reach the target.
pub fn attacks_square(board: &Board, occupant: Occupant, target: Square) -> bool {
    let from = occupant.square;
    let drow = target.row() - from.row();
    let dcol = target.col() - from.col();
    if drow == 0 && dcol == 0 {
        return false;
    }

    match occupant.role() {
        Role::Pawn => drow == occupant.color().forward() && dcol.abs() == 1,
        Role::Knight => KNIGHT_OFFSETS.contains(&(drow, dcol)),
        Role::King => from.distance(target) == 1,
        role => {
            let straight = drow == 0 || dcol == 0;
            let diagonal = drow.abs() == dcol.abs();
            let aligned = match role {
                Role::Rook => straight,
                Role::Bishop => diagonal,
                _ => straight || diagonal,
            };
            aligned
                && ray(board, from, (drow.signum(), dcol.signum())).any(|sq| sq == target)
        }
    }
}

/// Tests if any piece of `by_color` attacks `target`.
pub fn is_square_attacked(board: &Board, target: Square, by_color: Color) -> bool {
    board
        .occupants_of(by_color)
        .any(|occupant| attacks_square(board, occupant, target))
}

/// Squares of all pieces of `by_color` that attack `target`.
pub fn attackers(board: &Board, target: Square, by_color: Color) -> SquareList {
    board
        .occupants_of(by_color)
        .filter(|&occupant| attacks_square(board, occupant, target))
        .map(|occupant| occupant.square)
        .collect()
}

/// Tests if the king of the given color is attacked. A side without a king
/// is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .king_of(color)
        .is_some_and(|king| is_square_attacked(board, king, !color))
}

/// Squares of the pieces giving check to the king of the given color.
pub fn checkers(board: &Board, color: Color) -> SquareList {
    board
        .king_of(color)
        .map(|king| attackers(board, king, !color))
        .unwrap_or_default()
}
