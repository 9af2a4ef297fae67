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

use crate::{
    board::Board,
    color::Color,
    game::{skipped_square, Game},
    legal,
    square::Square,
};

/// Counts legal move paths of a given length.
///
/// Paths with mate or stalemate are not counted unless it occurs in the
/// final position. Useful for comparing, testing and debugging move
/// generation correctness and performance.
///
/// # Examples
///
/// ```
/// use chess_rules::{perft, Game};
///
/// let game = Game::new();
/// assert_eq!(perft(&game, 1), 20);
/// assert_eq!(perft(&game, 2), 400);
/// assert_eq!(perft(&game, 3), 8902);
/// ```
pub fn perft(game: &Game, depth: u32) -> u64 {
    perft_inner(game.board(), game.turn(), game.ep_square(), depth)
}

fn perft_inner(board: &Board, turn: Color, ep_square: Option<Square>, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    let moves = legal::legal_moves(board, ep_square, turn);

    if depth == 1 {
        moves.len() as u64
    } else {
        moves
            .into_iter()
            .map(|m| {
                let mut child = board.clone();
                child.play_unchecked(m);
                perft_inner(&child, !turn, skipped_square(m), depth - 1)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_zero() {
        assert_eq!(perft(&Game::new(), 0), 1);
    }

    #[test]
    fn test_small_positions() {
        let game = Game::from_fen("7k/6pp/8/8/8/8/8/R5K1 b - - 0 1").expect("valid");
        assert_eq!(perft(&game, 1), 5);

        let stalemate = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("valid");
        assert_eq!(perft(&stalemate, 1), 0);
        assert_eq!(perft(&stalemate, 3), 0);
    }

    #[test]
    fn test_en_passant() {
        let game = Game::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("valid");
        assert_eq!(perft(&game, 1), 7);
    }
}
