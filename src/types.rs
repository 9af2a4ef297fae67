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

use std::fmt;

use crate::{color::Color, role::Role, square::Square};

/// A piece with [`Color`] and [`Role`].
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn char(self) -> char {
        self.color.fold_wb(self.role.upper_char(), self.role.char())
    }

    pub fn from_char(ch: char) -> Option<Piece> {
        Role::from_char(ch).map(|role| role.of(Color::from_white(ch.is_ascii_uppercase())))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.role {
            Role::Pawn => "pawn",
            Role::Knight => "knight",
            Role::Bishop => "bishop",
            Role::Rook => "rook",
            Role::Queen => "queen",
            Role::King => "king",
        };
        write!(f, "{} {}", self.color, name)
    }
}

/// A piece standing on the board.
///
/// Besides the piece itself, an occupant knows its square and whether it
/// has moved since it was placed. The flag decides castling rights.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Occupant {
    pub piece: Piece,
    pub square: Square,
    pub moved: bool,
}

impl Occupant {
    /// An occupant that has not moved yet.
    pub const fn new(piece: Piece, square: Square) -> Occupant {
        Occupant {
            piece,
            square,
            moved: false,
        }
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.piece.color
    }

    #[inline]
    pub const fn role(&self) -> Role {
        self.piece.role
    }

    #[inline]
    pub fn is(&self, piece: Piece) -> bool {
        self.piece == piece
    }
}

/// Outcome of a finished game.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Decisive { winner: Color },
    Draw,
}

impl Outcome {
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Color::Black,
            } => "0-1",
            Outcome::Draw => "1/2-1/2",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_char() {
        assert_eq!(Color::White.queen().char(), 'Q');
        assert_eq!(Color::Black.knight().char(), 'n');
        assert_eq!(Piece::from_char('K'), Some(Color::White.king()));
        assert_eq!(Piece::from_char('p'), Some(Color::Black.pawn()));
        assert_eq!(Piece::from_char('x'), None);
    }

    #[test]
    fn test_outcome() {
        let outcome = Outcome::Decisive {
            winner: Color::Black,
        };
        assert_eq!(outcome.to_string(), "0-1");
        assert_eq!(outcome.winner(), Some(Color::Black));
        assert_eq!(Outcome::Draw.winner(), None);
    }
}
