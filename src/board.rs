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

//! Piece positions on a board.
//!
//! # Examples
//!
//! ```
//! use chess_rules::{Board, Color, Square};
//!
//! let board = Board::new();
//! // r n b q k b n r
//! // p p p p p p p p
//! // . . . . . . . .
//! // . . . . . . . .
//! // . . . . . . . .
//! // . . . . . . . .
//! // P P P P P P P P
//! // R N B Q K B N R
//!
//! let e1 = Square::new(7, 4)?;
//! assert_eq!(board.piece_at(e1), Some(Color::White.king()));
//! # Ok::<_, chess_rules::InvalidSquare>(())
//! ```

use std::fmt::{self, Write as _};

use crate::{
    castling_side::CastlingSide,
    color::Color,
    fen::ParseFenError,
    m::Move,
    role::Role,
    square::Square,
    types::{Occupant, Piece},
};

const BACKRANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// An 8×8 grid where each cell holds at most one [`Occupant`].
///
/// The board does not know whose turn it is and does not check legality:
/// [`Board::place()`] and [`Board::remove()`] mutate the grid directly.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [[Option<Occupant>; 8]; 8],
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (col, role) in (0..).zip(BACKRANK) {
                board.place(role.of(color), Square::from_coords(color.backrank(), col));
                board.place(color.pawn(), Square::from_coords(color.pawn_row(), col));
            }
        }
        board
    }

    pub const fn empty() -> Board {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// Removes all pieces.
    pub fn clear(&mut self) {
        self.cells = [[None; 8]; 8];
    }

    #[inline]
    pub fn occupant_at(&self, sq: Square) -> Option<Occupant> {
        self.cells[sq.row() as usize][sq.col() as usize]
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.occupant_at(sq).map(|o| o.piece)
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|p| p.color)
    }

    #[inline]
    pub fn role_at(&self, sq: Square) -> Option<Role> {
        self.piece_at(sq).map(|p| p.role)
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.occupant_at(sq).is_none()
    }

    #[inline]
    pub fn is_occupied_by_color(&self, sq: Square, color: Color) -> bool {
        self.color_at(sq) == Some(color)
    }

    /// Places an unmoved piece, replacing and returning any previous
    /// occupant.
    pub fn place(&mut self, piece: Piece, sq: Square) -> Option<Occupant> {
        self.place_occupant(Occupant::new(piece, sq))
    }

    /// Places an occupant on its own square, replacing and returning any
    /// previous occupant.
    pub fn place_occupant(&mut self, occupant: Occupant) -> Option<Occupant> {
        let sq = occupant.square;
        self.cells[sq.row() as usize][sq.col() as usize].replace(occupant)
    }

    pub fn remove(&mut self, sq: Square) -> Option<Occupant> {
        self.cells[sq.row() as usize][sq.col() as usize].take()
    }

    /// Moves the occupant of `from` to `to`, marking it as moved. Returns
    /// whatever stood on `to` before.
    fn relocate(&mut self, from: Square, to: Square) -> Option<Occupant> {
        let mut occupant = self.remove(from)?;
        occupant.square = to;
        occupant.moved = true;
        self.place_occupant(occupant)
    }

    /// All occupants, row by row.
    pub fn occupants(&self) -> impl Iterator<Item = Occupant> + '_ {
        self.cells.iter().flatten().flatten().copied()
    }

    pub fn occupants_of(&self, color: Color) -> impl Iterator<Item = Occupant> + '_ {
        self.occupants().filter(move |o| o.color() == color)
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.occupants().filter(|o| o.is(piece)).count()
    }

    /// Square of the king of the given color. If there are several, the
    /// first one row by row.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.occupants()
            .find(|o| o.is(color.king()))
            .map(|o| o.square)
    }

    /// Tests if the given side may still castle towards `side`: its king
    /// and the rook in that corner are both on their home squares and have
    /// never moved. Says nothing about the path between them.
    pub fn has_castling_right(&self, color: Color, side: CastlingSide) -> bool {
        let unmoved = |sq: Square, piece: Piece| {
            self.occupant_at(sq)
                .is_some_and(|o| o.is(piece) && !o.moved)
        };
        unmoved(side.king_from(color), color.king()) && unmoved(side.rook_from(color), color.rook())
    }

    /// Applies a move without any legality checks and returns the captured
    /// occupant, if any.
    ///
    /// The move is expected to come from the move generator for this board.
    /// Moved pieces are marked as moved. Castling also relocates the rook
    /// and en passant removes the pawn beside the origin square.
    pub fn play_unchecked(&mut self, m: Move) -> Option<Occupant> {
        match m {
            Move::Normal {
                from,
                to,
                promotion,
                ..
            } => {
                let captured = self.relocate(from, to);
                if let Some(role) = promotion {
                    if let Some(pawn) = self.remove(to) {
                        self.place_occupant(Occupant {
                            piece: role.of(pawn.color()),
                            ..pawn
                        });
                    }
                }
                captured
            }
            Move::EnPassant { from, to } => {
                let captured = self.remove(from.with_col_of(to));
                self.relocate(from, to);
                captured
            }
            Move::Castle { king, rook } => {
                let side = CastlingSide::from_king_side(king < rook);
                let king_to = king.with_col_of(Square::from_coords(0, side.king_to_col()));
                let rook_to = king.with_col_of(Square::from_coords(0, side.rook_to_col()));
                self.relocate(rook, rook_to);
                self.relocate(king, king_to);
                None
            }
        }
    }

    /// Parses the piece placement part of a FEN. All pieces are placed
    /// unmoved.
    pub fn from_board_fen(board_fen: &str) -> Result<Board, ParseFenError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_fen.split('/').collect();
        if rows.len() != 8 {
            return Err(ParseFenError::InvalidBoard);
        }

        for (row, part) in (0..).zip(rows) {
            let mut col = 0i8;
            for ch in part.chars() {
                if let Some(empty) = ch.to_digit(10) {
                    if !(1..=8).contains(&empty) {
                        return Err(ParseFenError::InvalidBoard);
                    }
                    col += empty as i8;
                } else {
                    let piece = Piece::from_char(ch).ok_or(ParseFenError::InvalidBoard)?;
                    let sq = Square::new(row, col).map_err(|_| ParseFenError::InvalidBoard)?;
                    board.place(piece, sq);
                    col += 1;
                }
                if col > 8 {
                    return Err(ParseFenError::InvalidBoard);
                }
            }
            if col != 8 {
                return Err(ParseFenError::InvalidBoard);
            }
        }

        Ok(board)
    }

    /// Renders the piece placement part of a FEN.
    pub fn board_fen(&self) -> String {
        let mut fen = String::with_capacity(15);

        for (row, cells) in self.cells.iter().enumerate() {
            let mut empty = 0u8;
            for cell in cells {
                match cell {
                    Some(occupant) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(occupant.piece.char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }
            if row < 7 {
                fen.push('/');
            }
        }

        fen
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}


impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cells in &self.cells {
            for (col, cell) in cells.iter().enumerate() {
                f.write_char(cell.map_or('.', |o| o.piece.char()))?;
                f.write_char(if col < 7 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.board_fen())
    }
}
