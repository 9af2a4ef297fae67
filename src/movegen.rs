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

//! Pseudo-legal move generation.
//!
//! Pseudo-legal moves follow the movement geometry of each piece but may
//! leave the mover's own king in check. See [`crate::legal`] for the
//! filter that removes those.

use crate::{
    attacks::{self, Delta},
    board::Board,
    castling_side::CastlingSide,
    color::Color,
    m::{Move, MoveList},
    role::Role,
    square::Square,
    types::Occupant,
};

/// Generates the pseudo-legal moves of the piece on `from`. Nothing is
/// generated for an empty square.
///
/// `ep_square` is the square a pawn skipped with a two-square advance on
/// the immediately preceding move, if any.
pub fn pseudo_legal_moves(
    board: &Board,
    from: Square,
    ep_square: Option<Square>,
    moves: &mut MoveList,
) {
    let Some(occupant) = board.occupant_at(from) else {
        return;
    };

    match occupant.role() {
        Role::Pawn => gen_pawn_moves(board, occupant, ep_square, moves),
        Role::Knight => KnightTag::gen_moves(board, occupant, moves),
        Role::Bishop => BishopTag::gen_moves(board, occupant, moves),
        Role::Rook => RookTag::gen_moves(board, occupant, moves),
        Role::Queen => QueenTag::gen_moves(board, occupant, moves),
        Role::King => {
            KingTag::gen_moves(board, occupant, moves);
            gen_castling_moves(board, occupant, moves);
        }
    }
}

/// Generates the pseudo-legal moves of every piece of the given color.
///
/// Unlike the moves of a single piece, these do not necessarily fit into a
/// [`MoveList`] on boards with more material than a game can have.
pub fn pseudo_legal_moves_of(board: &Board, color: Color, ep_square: Option<Square>) -> Vec<Move> {
    let mut all = Vec::new();
    for occupant in board.occupants_of(color) {
        let mut moves = MoveList::new();
        pseudo_legal_moves(board, occupant.square, ep_square, &mut moves);
        all.extend(moves);
    }
    all
}

fn push_normal(board: &Board, moves: &mut MoveList, role: Role, from: Square, to: Square) {
    moves.push(Move::Normal {
        role,
        from,
        capture: board.role_at(to),
        to,
        promotion: None,
    });
}

trait Stepper {
    const ROLE: Role;
    const OFFSETS: &'static [Delta];

    fn gen_moves(board: &Board, occupant: Occupant, moves: &mut MoveList) {
        let from = occupant.square;
        for &(drow, dcol) in Self::OFFSETS {
            if let Some(to) = from.offset(drow, dcol) {
                if !board.is_occupied_by_color(to, occupant.color()) {
                    push_normal(board, moves, Self::ROLE, from, to);
                }
            }
        }
    }
}

trait Slider {
    const ROLE: Role;
    const DIRECTIONS: &'static [Delta];

    fn gen_moves(board: &Board, occupant: Occupant, moves: &mut MoveList) {
        let from = occupant.square;
        for &direction in Self::DIRECTIONS {
            for to in attacks::ray(board, from, direction) {
                if !board.is_occupied_by_color(to, occupant.color()) {
                    push_normal(board, moves, Self::ROLE, from, to);
                }
            }
        }
    }
}

enum KingTag {}
enum KnightTag {}
enum BishopTag {}
enum RookTag {}
enum QueenTag {}

impl Stepper for KingTag {
    const ROLE: Role = Role::King;
    const OFFSETS: &'static [Delta] = &attacks::KING_OFFSETS;
}

impl Stepper for KnightTag {
    const ROLE: Role = Role::Knight;
    const OFFSETS: &'static [Delta] = &attacks::KNIGHT_OFFSETS;
}

impl Slider for BishopTag {
    const ROLE: Role = Role::Bishop;
    const DIRECTIONS: &'static [Delta] = &attacks::BISHOP_DIRECTIONS;
}

impl Slider for RookTag {
    const ROLE: Role = Role::Rook;
    const DIRECTIONS: &'static [Delta] = &attacks::ROOK_DIRECTIONS;
}

impl Slider for QueenTag {
    const ROLE: Role = Role::Queen;
    const DIRECTIONS: &'static [Delta] = &attacks::QUEEN_DIRECTIONS;
}

fn push_pawn_moves(
    moves: &mut MoveList,
    color: Color,
    from: Square,
    to: Square,
    capture: Option<Role>,
) {
    if to.row() == color.promotion_row() {
        for promotion in Role::PROMOTIONS {
            moves.push(Move::Normal {
                role: Role::Pawn,
                from,
                capture,
                to,
                promotion: Some(promotion),
            });
        }
    } else {
        moves.push(Move::Normal {
            role: Role::Pawn,
            from,
            capture,
            to,
            promotion: None,
        });
    }
}

fn gen_pawn_moves(
    board: &Board,
    occupant: Occupant,
    ep_square: Option<Square>,
    moves: &mut MoveList,
) {
    let color = occupant.color();
    let from = occupant.square;

    if let Some(single) = from.offset(color.forward(), 0) {
        if board.is_empty(single) {
            push_pawn_moves(moves, color, from, single, None);

            if from.row() == color.pawn_row() {
                if let Some(double) = single.offset(color.forward(), 0) {
                    if board.is_empty(double) {
                        moves.push(Move::Normal {
                            role: Role::Pawn,
                            from,
                            capture: None,
                            to: double,
                            promotion: None,
                        });
                    }
                }
            }
        }
    }

    for to in attacks::pawn_attacks(color, from) {
        if let Some(victim) = board.piece_at(to) {
            if victim.color != color {
                push_pawn_moves(moves, color, from, to, Some(victim.role));
            }
        } else if Some(to) == ep_square
            && board.piece_at(from.with_col_of(to)) == Some((!color).pawn())
        {
            moves.push(Move::EnPassant { from, to });
        }
    }
}

/// Castling candidates: the king stands unmoved on its home square, the
/// rook stands unmoved in the corner and nothing stands between them.
/// Whether the king passes through an attacked square is left to the
/// legality filter.
fn gen_castling_moves(board: &Board, king: Occupant, moves: &mut MoveList) {
    let color = king.color();
    for side in CastlingSide::ALL {
        if king.square == side.king_from(color)
            && board.has_castling_right(color, side)
            && side.path(color).all(|sq| board.is_empty(sq))
        {
            moves.push(Move::Castle {
                king: king.square,
                rook: side.rook_from(color),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    fn setup(fen: &str) -> Board {
        Board::from_board_fen(fen).expect("valid board fen")
    }

    fn destinations(board: &Board, from: &str, ep_square: Option<Square>) -> Vec<String> {
        let mut moves = MoveList::new();
        pseudo_legal_moves(board, sq(from), ep_square, &mut moves);
        let mut names: Vec<String> = moves.iter().map(|m| m.to().to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_initial_position() {
        let board = Board::new();
        assert_eq!(pseudo_legal_moves_of(&board, Color::White, None).len(), 20);
        assert_eq!(destinations(&board, "g1", None), ["f3", "h3"]);
        assert_eq!(destinations(&board, "e2", None), ["e3", "e4"]);
        assert!(destinations(&board, "a1", None).is_empty());
    }

    #[test]
    fn test_empty_square() {
        assert!(destinations(&Board::new(), "e4", None).is_empty());
    }

    #[test]
    fn test_slider_stops_at_pieces() {
        // Rook on d4, own pawn on d6, enemy knight on f4.
        let board = setup("8/8/3P4/8/3R1n2/8/8/8");
        assert_eq!(
            destinations(&board, "d4", None),
            ["a4", "b4", "c4", "d1", "d2", "d3", "d5", "e4", "f4"]
        );
    }

    #[test]
    fn test_bishop_and_queen() {
        let board = setup("8/8/8/8/8/8/1P6/B7");
        assert!(destinations(&board, "a1", None).is_empty());

        let board = setup("8/8/8/8/8/8/8/Q7");
        assert_eq!(destinations(&board, "a1", None).len(), 21);
    }

    #[test]
    fn test_knight_in_corner() {
        let board = setup("8/8/8/8/8/1p6/2P5/N7");
        assert_eq!(destinations(&board, "a1", None), ["b3"]);
    }

    #[test]
    fn test_pawn_captures_and_blocks() {
        let board = setup("8/8/8/8/8/3pn3/4P3/8");
        assert_eq!(destinations(&board, "e2", None), ["d3"]);

        let board = setup("8/8/8/8/4n3/8/4P3/8");
        assert_eq!(destinations(&board, "e2", None), ["e3"]);
    }

    #[test]
    fn test_promotion() {
        let board = setup("1n6/P7/8/8/8/8/8/8");
        let mut moves = MoveList::new();
        pseudo_legal_moves(&board, sq("a7"), None, &mut moves);
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|m| m.is_promotion()));
        assert_eq!(moves.iter().filter(|m| m.is_capture()).count(), 4);
    }

    #[test]
    fn test_en_passant() {
        let board = setup("8/8/8/3pP3/8/8/8/8");
        assert_eq!(destinations(&board, "e5", None), ["e6"]);

        let mut moves = MoveList::new();
        pseudo_legal_moves(&board, sq("e5"), Some(sq("d6")), &mut moves);
        assert!(moves.contains(&Move::EnPassant {
            from: sq("e5"),
            to: sq("d6"),
        }));
    }

    #[test]
    fn test_castling_candidates() {
        let board = setup("r3k2r/8/8/8/8/8/8/R3K2R");
        let mut moves = MoveList::new();
        pseudo_legal_moves(&board, sq("e1"), None, &mut moves);
        assert_eq!(moves.iter().filter(|m| m.is_castle()).count(), 2);

        let board = setup("rn2k2r/8/8/8/8/8/8/4K3");
        let mut moves = MoveList::new();
        pseudo_legal_moves(&board, sq("e8"), None, &mut moves);
        let castles: Vec<_> = moves.iter().filter(|m| m.is_castle()).collect();
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].to(), sq("g8"));
    }

    #[test]
    fn test_no_castling_after_moving() {
        let mut board = setup("4k3/8/8/8/8/8/8/4K2R");
        board.play_unchecked(Move::Normal {
            role: Role::Rook,
            from: sq("h1"),
            capture: None,
            to: sq("h2"),
            promotion: None,
        });
        board.play_unchecked(Move::Normal {
            role: Role::Rook,
            from: sq("h2"),
            capture: None,
            to: sq("h1"),
            promotion: None,
        });
        let mut moves = MoveList::new();
        pseudo_legal_moves(&board, sq("e1"), None, &mut moves);
        assert!(!moves.iter().any(|m| m.is_castle()));
    }

    #[test]
    fn test_more_moves_than_a_move_list_holds() {
        let board = setup("BQQQQQQB/Q6Q/Q6Q/Q6Q/Q6Q/QQ5Q/ppQ4Q/kbQQQQQK");
        let moves = pseudo_legal_moves_of(&board, Color::White, None);
        assert!(moves.len() > MoveList::new().capacity());
    }
}
