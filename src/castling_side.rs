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

use crate::{color::Color, square::Square};

/// Column of both kings in the initial position.
const KING_COL: i8 = 4;

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    #[inline]
    pub const fn is_queen_side(self) -> bool {
        matches!(self, CastlingSide::QueenSide)
    }

    #[inline]
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    #[inline]
    pub const fn from_king_side(king_side: bool) -> CastlingSide {
        if king_side {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }

    /// Column delta of one king step towards the rook.
    pub const fn direction(self) -> i8 {
        match self {
            CastlingSide::KingSide => 1,
            CastlingSide::QueenSide => -1,
        }
    }

    pub const fn rook_from_col(self) -> i8 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    pub const fn king_to_col(self) -> i8 {
        KING_COL + 2 * self.direction()
    }

    pub const fn rook_to_col(self) -> i8 {
        KING_COL + self.direction()
    }

    pub fn king_from(self, color: Color) -> Square {
        backrank_square(color, KING_COL)
    }

    pub fn king_to(self, color: Color) -> Square {
        backrank_square(color, self.king_to_col())
    }

    pub fn rook_from(self, color: Color) -> Square {
        backrank_square(color, self.rook_from_col())
    }

    pub fn rook_to(self, color: Color) -> Square {
        backrank_square(color, self.rook_to_col())
    }

    /// Squares strictly between king and rook, all of which must be empty.
    pub fn path(self, color: Color) -> impl Iterator<Item = Square> {
        let (lo, hi) = match self {
            CastlingSide::KingSide => (KING_COL + 1, 7),
            CastlingSide::QueenSide => (1, KING_COL),
        };
        (lo..hi).map(move |col| backrank_square(color, col))
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

const fn backrank_square(color: Color, col: i8) -> Square {
    Square::from_coords(color.backrank(), col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squares() {
        let side = CastlingSide::KingSide;
        assert_eq!(side.king_to(Color::White).to_string(), "g1");
        assert_eq!(side.rook_to(Color::White).to_string(), "f1");
        assert_eq!(side.rook_from(Color::Black).to_string(), "h8");

        let side = CastlingSide::QueenSide;
        assert_eq!(side.king_to(Color::Black).to_string(), "c8");
        assert_eq!(side.rook_to(Color::Black).to_string(), "d8");
        assert_eq!(side.king_from(Color::Black).to_string(), "e8");
    }

    #[test]
    fn test_path() {
        let names = |side: CastlingSide| {
            side.path(Color::White)
                .map(|sq| sq.to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(CastlingSide::KingSide), ["f1", "g1"]);
        assert_eq!(names(CastlingSide::QueenSide), ["b1", "c1", "d1"]);
    }
}
