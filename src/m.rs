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

use std::fmt::{self, Write as _};

use arrayvec::ArrayVec;

use crate::{castling_side::CastlingSide, role::Role, square::Square};

/// Information about a move.
///
/// # Display
///
/// `Move` implements [`Display`](fmt::Display) using long algebraic
/// notation, e.g. `Ng1-f3`, `e5xd6` or `O-O`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Move {
    /// A normal move, e.g., `Bd3xh7`.
    Normal {
        role: Role,
        from: Square,
        capture: Option<Role>,
        to: Square,
        promotion: Option<Role>,
    },
    /// An en passant capture, e.g., `e5xd6`. The captured pawn stands
    /// beside `from`, not on `to`.
    EnPassant { from: Square, to: Square },
    /// A castling move, `O-O` or `O-O-O`. The king moves two squares
    /// towards `rook`, which jumps over it.
    Castle { king: Square, rook: Square },
}

impl Move {
    /// Gets the role of the moved piece.
    pub const fn role(self) -> Role {
        match self {
            Move::Normal { role, .. } => role,
            Move::EnPassant { .. } => Role::Pawn,
            Move::Castle { .. } => Role::King,
        }
    }

    /// Gets the origin square. For castling moves this is the king square.
    pub const fn from(self) -> Square {
        match self {
            Move::Normal { from, .. } | Move::EnPassant { from, .. } => from,
            Move::Castle { king, .. } => king,
        }
    }

    /// Gets the destination square. For castling moves this is where the
    /// king lands, two squares towards the rook.
    pub fn to(self) -> Square {
        match self {
            Move::Normal { to, .. } | Move::EnPassant { to, .. } => to,
            Move::Castle { king, rook } => king
                .offset(0, 2 * (rook.col() - king.col()).signum())
                .unwrap_or(king),
        }
    }

    /// Gets the role of the captured piece or `None`.
    pub const fn capture(self) -> Option<Role> {
        match self {
            Move::Normal { capture, .. } => capture,
            Move::EnPassant { .. } => Some(Role::Pawn),
            Move::Castle { .. } => None,
        }
    }

    /// Square of the captured piece, if any. Differs from [`Move::to()`]
    /// only for en passant.
    pub fn capture_square(self) -> Option<Square> {
        match self {
            Move::Normal {
                capture: Some(_),
                to,
                ..
            } => Some(to),
            Move::EnPassant { from, to } => Some(from.with_col_of(to)),
            _ => None,
        }
    }

    /// Checks if the move is a capture.
    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            Move::Normal {
                capture: Some(_),
                ..
            } | Move::EnPassant { .. }
        )
    }

    /// Checks if the move is en passant.
    pub const fn is_en_passant(self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }

    /// Checks if the move zeros the half-move clock.
    pub const fn is_zeroing(self) -> bool {
        matches!(
            self,
            Move::Normal {
                role: Role::Pawn,
                ..
            } | Move::Normal {
                capture: Some(_),
                ..
            } | Move::EnPassant { .. }
        )
    }

    /// Gets the castling side.
    pub fn castling_side(self) -> Option<CastlingSide> {
        match self {
            Move::Castle { king, rook } => Some(CastlingSide::from_king_side(king < rook)),
            _ => None,
        }
    }

    /// Checks if the move is a castling move.
    pub const fn is_castle(self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    /// Gets the promotion role.
    pub const fn promotion(self) -> Option<Role> {
        match self {
            Move::Normal { promotion, .. } => promotion,
            _ => None,
        }
    }

    /// Checks if the move is a promotion.
    pub const fn is_promotion(self) -> bool {
        matches!(
            self,
            Move::Normal {
                promotion: Some(_),
                ..
            }
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                if role != Role::Pawn {
                    f.write_char(role.upper_char())?;
                }

                write!(
                    f,
                    "{}{}{}",
                    from,
                    if capture.is_some() { 'x' } else { '-' },
                    to
                )?;

                if let Some(p) = promotion {
                    write!(f, "={}", p.upper_char())?;
                }

                Ok(())
            }
            Move::EnPassant { from, to } => write!(f, "{from}x{to}"),
            Move::Castle { king, rook } => f.write_str(if king < rook { "O-O" } else { "O-O-O" }),
        }
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is enough to hold the legal moves of any position accepted
/// by [`Game::from_setup()`](crate::Game::from_setup). The most legal moves
/// known in a chess position is 218.
///
/// # Example
///
/// ```
/// use chess_rules::{Game, Role};
///
/// let game = Game::new();
/// let mut moves = game.legal_moves();
/// moves.retain(|m| m.role() == Role::Pawn);
/// assert_eq!(moves.len(), 16);
/// ```
pub type MoveList = ArrayVec<Move, 256>;

#[cfg(test)]
mod tests {
    use std::mem;

    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    #[test]
    fn test_move_size() {
        assert!(mem::size_of::<Move>() <= 8);
    }

    #[test]
    fn test_castle_destination() {
        let short = Move::Castle {
            king: sq("e1"),
            rook: sq("h1"),
        };
        assert_eq!(short.to(), sq("g1"));
        assert_eq!(short.castling_side(), Some(CastlingSide::KingSide));
        assert_eq!(short.to_string(), "O-O");

        let long = Move::Castle {
            king: sq("e8"),
            rook: sq("a8"),
        };
        assert_eq!(long.to(), sq("c8"));
        assert_eq!(long.to_string(), "O-O-O");
    }

    #[test]
    fn test_en_passant_capture_square() {
        let m = Move::EnPassant {
            from: sq("e5"),
            to: sq("d6"),
        };
        assert_eq!(m.capture_square(), Some(sq("d5")));
        assert_eq!(m.capture(), Some(Role::Pawn));
        assert_eq!(m.to_string(), "e5xd6");
    }

    #[test]
    fn test_display() {
        let m = Move::Normal {
            role: Role::Pawn,
            from: sq("b7"),
            capture: Some(Role::Rook),
            to: sq("a8"),
            promotion: Some(Role::Queen),
        };
        assert_eq!(m.to_string(), "b7xa8=Q");
        assert!(m.is_zeroing());
    }
}
