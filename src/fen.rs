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

//! Parse and write Forsyth-Edwards-Notation.
//!
//! Castling rights are not stored separately: a right exists as long as
//! the king and the rook in question have not moved. Parsing a FEN marks
//! rooks without a castling right as moved, and writing a FEN derives the
//! rights from the moved flags.
//!
//! # Examples
//!
//! ```
//! use chess_rules::{fen::Fen, Game};
//!
//! let fen: Fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".parse()?;
//! let game = fen.into_game()?;
//! assert_eq!(game.legal_moves().len(), 20);
//!
//! assert_eq!(Game::new().fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{
    board::Board,
    castling_side::CastlingSide,
    color::Color,
    game::{Game, PositionError},
    square::Square,
};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidFen,
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseFenError::InvalidFen => "invalid fen",
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
            ParseFenError::InvalidHalfmoveClock => "invalid halfmove clock in fen",
            ParseFenError::InvalidFullmoves => "invalid fullmove part in fen",
        })
    }
}

impl Error for ParseFenError {}

/// Error when setting up a [`Game`] from FEN text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FenError {
    /// The text is not a valid FEN.
    Parse(ParseFenError),
    /// The FEN describes an illegal position.
    Position(PositionError),
}

impl From<ParseFenError> for FenError {
    fn from(err: ParseFenError) -> FenError {
        FenError::Parse(err)
    }
}

impl From<PositionError> for FenError {
    fn from(err: PositionError) -> FenError {
        FenError::Position(err)
    }
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::Parse(err) => fmt::Display::fmt(err, f),
            FenError::Position(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl Error for FenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FenError::Parse(err) => Some(err),
            FenError::Position(err) => Some(err),
        }
    }
}

/// A parsed FEN.
///
/// The board carries the castling rights in the moved flags of its kings
/// and rooks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fen {
    pub board: Board,
    pub turn: Color,
    pub ep_square: Option<Square>,
    pub halfmoves: u32,
    pub fullmoves: u32,
}

impl Default for Fen {
    fn default() -> Fen {
        Fen {
            board: Board::default(),
            turn: Color::White,
            ep_square: None,
            halfmoves: 0,
            fullmoves: 1,
        }
    }
}

impl Fen {
    pub fn empty() -> Fen {
        Fen {
            board: Board::empty(),
            ..Fen::default()
        }
    }

    /// Parses a FEN. Missing trailing parts take their default values:
    /// White to move, no castling rights, no en passant square and move
    /// counters `0 1`.
    ///
    /// # Errors
    ///
    /// Errors if the FEN is syntactically invalid. A castling letter is
    /// only accepted if the king and the rook in question stand on their
    /// home squares.
    pub fn from_ascii(fen: &[u8]) -> Result<Fen, ParseFenError> {
        let mut result = Fen::empty();
        let mut parts = fen.split(|ch| *ch == b' ');

        let board_part = parts.next().ok_or(ParseFenError::InvalidFen)?;
        let board_part = std::str::from_utf8(board_part).map_err(|_| ParseFenError::InvalidBoard)?;
        result.board = Board::from_board_fen(board_part)?;

        result.turn = match parts.next() {
            Some(b"w") | None => Color::White,
            Some(b"b") => Color::Black,
            Some(_) => return Err(ParseFenError::InvalidTurn),
        };

        let castling_part = parts.next().unwrap_or(&b"-"[..]);
        apply_castling_rights(&mut result.board, castling_part)?;

        result.ep_square = match parts.next() {
            Some(b"-") | None => None,
            Some(ep_part) => {
                Some(Square::from_ascii(ep_part).map_err(|_| ParseFenError::InvalidEpSquare)?)
            }
        };

        if let Some(halfmoves_part) = parts.next() {
            result.halfmoves =
                btoi::btou(halfmoves_part).map_err(|_| ParseFenError::InvalidHalfmoveClock)?;
        }

        if let Some(fullmoves_part) = parts.next() {
            result.fullmoves = btoi::btou(fullmoves_part)
                .ok()
                .filter(|&n: &u32| n > 0)
                .ok_or(ParseFenError::InvalidFullmoves)?;
        }

        if parts.next().is_some() {
            return Err(ParseFenError::InvalidFen);
        }

        Ok(result)
    }

    pub fn from_game(game: &Game) -> Fen {
        Fen {
            board: game.board().clone(),
            turn: game.turn(),
            ep_square: game.ep_square(),
            halfmoves: game.halfmoves(),
            fullmoves: game.fullmoves(),
        }
    }

    /// Validates the position and sets up a game.
    ///
    /// # Errors
    ///
    /// See [`Game::from_setup()`].
    pub fn into_game(self) -> Result<Game, PositionError> {
        Ok(Game::from_setup(self.board, self.turn, self.ep_square)?
            .with_clocks(self.halfmoves, self.fullmoves))
    }
}

fn castling_char(color: Color, side: CastlingSide) -> char {
    let ch = if side.is_king_side() { 'k' } else { 'q' };
    color.fold_wb(ch.to_ascii_uppercase(), ch)
}

/// Marks rooks without castling rights as moved, so that only the rights
/// listed in the FEN survive.
fn apply_castling_rights(board: &mut Board, castling_part: &[u8]) -> Result<(), ParseFenError> {
    let mut granted = Vec::with_capacity(4);

    if castling_part != b"-" {
        for &ch in castling_part {
            let (color, side) = Color::ALL
                .into_iter()
                .flat_map(|color| CastlingSide::ALL.map(|side| (color, side)))
                .find(|&(color, side)| castling_char(color, side) == char::from(ch))
                .ok_or(ParseFenError::InvalidCastling)?;

            if granted.contains(&(color, side)) || !board.has_castling_right(color, side) {
                return Err(ParseFenError::InvalidCastling);
            }
            granted.push((color, side));
        }
    }

    for color in Color::ALL {
        for side in CastlingSide::ALL {
            if !granted.contains(&(color, side)) {
                let corner = side.rook_from(color);
                if let Some(mut rook) = board.occupant_at(corner) {
                    rook.moved = true;
                    board.place_occupant(rook);
                }
            }
        }
    }

    Ok(())
}

fn castling_fen(board: &Board) -> String {
    let mut fen = String::with_capacity(4);

    for color in Color::ALL {
        for side in CastlingSide::ALL {
            if board.has_castling_right(color, side) {
                fen.push(castling_char(color, side));
            }
        }
    }

    if fen.is_empty() {
        fen.push('-');
    }

    fen
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        Fen::from_ascii(fen.as_bytes())
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            self.board.board_fen(),
            self.turn.char(),
            castling_fen(&self.board)
        )?;

        match self.ep_square {
            Some(sq) => write!(f, "{sq}")?,
            None => f.write_str("-")?,
        }

        write!(f, " {} {}", self.halfmoves, self.fullmoves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_fen() {
        let fen: Fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
            .parse()
            .expect("valid fen");
        assert_eq!(fen, Fen::default());
        assert_eq!(
            Fen::default().to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn test_roundtrip() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w Kq f6 0 3",
        ] {
            let parsed: Fen = fen.parse().expect("valid fen");
            assert_eq!(parsed.to_string(), fen);
        }
    }

    #[test]
    fn test_castling_rights_become_moved_flags() {
        let fen: Fen = "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1"
            .parse()
            .expect("valid fen");
        let occupant = |name: &str| {
            fen.board
                .occupant_at(name.parse().expect("valid square"))
                .expect("occupied")
        };
        assert!(!occupant("h1").moved);
        assert!(occupant("a1").moved);
        assert!(occupant("h8").moved);
        assert!(!occupant("a8").moved);
        assert!(!occupant("e1").moved);
    }

    #[test]
    fn test_defaults() {
        let fen: Fen = "4k3/8/8/8/8/8/8/4K3".parse().expect("valid fen");
        assert_eq!(fen.turn, Color::White);
        assert_eq!(fen.to_string(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    }

    #[test]
    fn test_invalid_fen() {
        let cases = [
            ("", ParseFenError::InvalidBoard),
            ("4k3/8/8/8/8/8/8/4K3 x", ParseFenError::InvalidTurn),
            ("4k3/8/8/8/8/8/8/4K3 w K", ParseFenError::InvalidCastling),
            ("r3k2r/8/8/8/8/8/8/R3K2R w KK", ParseFenError::InvalidCastling),
            ("r3k2r/8/8/8/8/8/8/R3K2R w X", ParseFenError::InvalidCastling),
            ("4k3/8/8/8/8/8/8/4K3 w - e9", ParseFenError::InvalidEpSquare),
            ("4k3/8/8/8/8/8/8/4K3 w - - x", ParseFenError::InvalidHalfmoveClock),
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 0", ParseFenError::InvalidFullmoves),
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 1 x", ParseFenError::InvalidFen),
        ];
        for (fen, err) in cases {
            assert_eq!(fen.parse::<Fen>(), Err(err), "{fen}");
        }
    }

    #[test]
    fn test_into_game() {
        let game = Game::from_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8")
            .expect("legal position");
        assert_eq!(game.fullmoves(), 8);
        assert_eq!(game.halfmoves(), 1);
        assert_eq!(game.legal_moves().len(), 44);

        assert!(matches!(
            Game::from_fen("8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::Position(_))
        ));
        assert!(matches!(
            Game::from_fen("8/8/8 w - - 0 1"),
            Err(FenError::Parse(ParseFenError::InvalidBoard))
        ));
    }
}
