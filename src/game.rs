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

//! Game state: side to move, move history and game end detection.
//!
//! # Examples
//!
//! ```
//! use chess_rules::{Color, Game, Square, Status};
//!
//! let mut game = Game::new();
//!
//! // 1. f3 e5 2. g4 Qh4#
//! for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
//!     game.apply_move(from.parse()?, to.parse()?, None)?;
//! }
//!
//! assert_eq!(game.status(), Status::Checkmate(Color::White));
//! assert!(game.legal_moves().is_empty());
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt};

use bitflags::bitflags;
use tracing::{debug, info, trace};

use crate::{
    attacks,
    board::Board,
    color::{ByColor, Color},
    fen::{Fen, FenError},
    legal,
    m::{Move, MoveList},
    role::Role,
    square::{InvalidSquare, Square},
    types::{Outcome, Piece},
};

/// Whether the game is still running, and if not, how it ended.
///
/// The color is always the side to move: the side that is in check or
/// that has been checkmated.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    InProgress,
    Check(Color),
    Checkmate(Color),
    Stalemate,
}

impl Status {
    /// Checkmate and stalemate end the game.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Status::Checkmate(_) | Status::Stalemate)
    }

    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Status::Checkmate(loser) => Some(Outcome::Decisive {
                winner: loser.other(),
            }),
            Status::Stalemate => Some(Outcome::Draw),
            Status::InProgress | Status::Check(_) => None,
        }
    }

    fn evaluate(board: &Board, turn: Color, ep_square: Option<Square>) -> Status {
        let check = attacks::is_in_check(board, turn);
        let can_move = legal::has_legal_move(board, ep_square, turn);
        match (check, can_move) {
            (true, false) => Status::Checkmate(turn),
            (true, true) => Status::Check(turn),
            (false, false) => Status::Stalemate,
            (false, true) => Status::InProgress,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Status::InProgress => f.write_str("in progress"),
            Status::Check(color) => write!(f, "{color} is in check"),
            Status::Checkmate(color) => write!(f, "{color} is checkmated"),
            Status::Stalemate => f.write_str("stalemate"),
        }
    }
}

/// A committed move, as stored in the history.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct MoveRecord {
    pub m: Move,
    /// The piece that moved, before any promotion.
    pub piece: Piece,
    pub captured: Option<Piece>,
    /// Status right after the move, for the opponent.
    pub status: Status,
    /// Number of moves played in the game including this one.
    pub ply: u32,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.m)?;
        match self.status {
            Status::Checkmate(_) => f.write_str("#"),
            Status::Check(_) => f.write_str("+"),
            _ => Ok(()),
        }
    }
}

/// Error when trying to play an illegal move.
///
/// The game is left unchanged.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PlayError {
    /// A coordinate is off the board.
    InvalidSquare(InvalidSquare),
    NoPieceAtSource {
        square: Square,
    },
    /// The piece on the source square belongs to the side not to move.
    WrongSideToMove {
        square: Square,
        color: Color,
    },
    /// The destination is not among the legal moves of the piece, or the
    /// promotion choice does not fit the move.
    IllegalDestination {
        from: Square,
        to: Square,
    },
    GameAlreadyOver {
        status: Status,
    },
}

impl From<InvalidSquare> for PlayError {
    fn from(err: InvalidSquare) -> PlayError {
        PlayError::InvalidSquare(err)
    }
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PlayError::InvalidSquare(err) => fmt::Display::fmt(&err, f),
            PlayError::NoPieceAtSource { square } => write!(f, "no piece on {square}"),
            PlayError::WrongSideToMove { square, color } => {
                write!(f, "piece on {square} belongs to {color}, not to the side to move")
            }
            PlayError::IllegalDestination { from, to } => {
                write!(f, "illegal move from {from} to {to}")
            }
            PlayError::GameAlreadyOver { status } => write!(f, "game already over ({status})"),
        }
    }
}

impl Error for PlayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlayError::InvalidSquare(err) => Some(err),
            _ => None,
        }
    }
}

bitflags! {
    /// Reasons for a [`Game`] setup to be rejected.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct PositionErrorKinds: u32 {
        /// There are no pieces on the board.
        const EMPTY_BOARD = 1 << 0;

        /// A side has no king.
        const MISSING_KING = 1 << 1;

        /// A side has more than one king.
        const TOO_MANY_KINGS = 1 << 2;

        /// There are pawns on the first or last row.
        const PAWNS_ON_BACKRANK = 1 << 3;

        /// The en passant square is not the square skipped by a pawn that
        /// just advanced two squares.
        const INVALID_EP_SQUARE = 1 << 4;

        /// The side not to move is in check.
        const OPPOSITE_CHECK = 1 << 5;

        /// A side has more than 16 pieces or more than 8 pawns, or more
        /// promoted pieces than it is missing pawns.
        const TOO_MUCH_MATERIAL = 1 << 6;
    }
}

/// Error when trying to create a [`Game`] from an illegal setup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionError {
    kinds: PositionErrorKinds,
}

impl PositionError {
    pub fn kinds(&self) -> PositionErrorKinds {
        self.kinds
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal position: ")?;

        let mut reasons = Vec::new();
        if self.kinds.contains(PositionErrorKinds::EMPTY_BOARD) {
            reasons.push("empty board");
        }
        if self.kinds.contains(PositionErrorKinds::MISSING_KING) {
            reasons.push("missing king");
        }
        if self.kinds.contains(PositionErrorKinds::TOO_MANY_KINGS) {
            reasons.push("too many kings");
        }
        if self.kinds.contains(PositionErrorKinds::PAWNS_ON_BACKRANK) {
            reasons.push("pawns on backrank");
        }
        if self.kinds.contains(PositionErrorKinds::INVALID_EP_SQUARE) {
            reasons.push("invalid en passant square");
        }
        if self.kinds.contains(PositionErrorKinds::OPPOSITE_CHECK) {
            reasons.push("opposite check");
        }
        if self.kinds.contains(PositionErrorKinds::TOO_MUCH_MATERIAL) {
            reasons.push("too much material");
        }

        f.write_str(&reasons.join(", "))
    }
}

impl Error for PositionError {}

/// The square skipped by a two-square pawn advance.
pub(crate) fn skipped_square(m: Move) -> Option<Square> {
    match m {
        Move::Normal {
            role: Role::Pawn,
            from,
            to,
            ..
        } if (to.row() - from.row()).abs() == 2 => {
            from.offset((to.row() - from.row()).signum(), 0)
        }
        _ => None,
    }
}

/// A game of chess.
///
/// [`Game::apply_move()`] is the only way to change the game once it is
/// set up. Every other method is a query.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Color,
    ep_square: Option<Square>,
    halfmoves: u32,
    fullmoves: u32,
    ply: u32,
    status: Status,
    history: Vec<MoveRecord>,
    captured: ByColor<Vec<Piece>>,
}

impl Game {
    /// A game in the standard starting position, White to move.
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            turn: Color::White,
            ep_square: None,
            halfmoves: 0,
            fullmoves: 1,
            ply: 0,
            status: Status::InProgress,
            history: Vec::new(),
            captured: ByColor::default(),
        }
    }

    /// Sets up a game from an arbitrary position.
    ///
    /// `ep_square` is the square skipped by a pawn of the side not to move
    /// that just advanced two squares, if any. Castling rights follow from
    /// the moved flags of the kings and rooks on the board.
    ///
    /// The status is computed right away, so the game may start in check
    /// or even be over already.
    ///
    /// # Errors
    ///
    /// Errors if the position does not have exactly one king per side, has
    /// more material than a game can reach, has pawns on a back rank, has
    /// an impossible en passant square or the side not to move is in check.
    pub fn from_setup(
        board: Board,
        turn: Color,
        ep_square: Option<Square>,
    ) -> Result<Game, PositionError> {
        let mut kinds = PositionErrorKinds::empty();

        if board.occupants().next().is_none() {
            kinds |= PositionErrorKinds::EMPTY_BOARD;
        }

        for color in Color::ALL {
            match board.count(color.king()) {
                0 => kinds |= PositionErrorKinds::MISSING_KING,
                1 => (),
                _ => kinds |= PositionErrorKinds::TOO_MANY_KINGS,
            }
            if has_too_much_material(&board, color) {
                kinds |= PositionErrorKinds::TOO_MUCH_MATERIAL;
            }
        }

        if board
            .occupants()
            .any(|o| o.role() == Role::Pawn && (o.square.row() == 0 || o.square.row() == 7))
        {
            kinds |= PositionErrorKinds::PAWNS_ON_BACKRANK;
        }

        if let Some(ep_square) = ep_square {
            if !is_valid_ep_square(&board, turn, ep_square) {
                kinds |= PositionErrorKinds::INVALID_EP_SQUARE;
            }
        }

        if attacks::is_in_check(&board, !turn) {
            kinds |= PositionErrorKinds::OPPOSITE_CHECK;
        }

        if !kinds.is_empty() {
            return Err(PositionError { kinds });
        }

        let status = Status::evaluate(&board, turn, ep_square);
        Ok(Game {
            board,
            turn,
            ep_square,
            halfmoves: 0,
            fullmoves: 1,
            ply: 0,
            status,
            history: Vec::new(),
            captured: ByColor::default(),
        })
    }

    /// Sets up a game from a FEN.
    ///
    /// # Examples
    ///
    /// ```
    /// use chess_rules::{Color, Game, Status};
    ///
    /// let game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")?;
    /// assert_eq!(game.turn(), Color::Black);
    /// assert_eq!(game.status(), Status::Stalemate);
    /// # Ok::<_, chess_rules::fen::FenError>(())
    /// ```
    pub fn from_fen(fen: &str) -> Result<Game, FenError> {
        let fen: Fen = fen.parse()?;
        Ok(fen.into_game()?)
    }

    /// Renders the current position as a FEN.
    pub fn fen(&self) -> String {
        Fen::from_game(self).to_string()
    }

    pub(crate) fn with_clocks(mut self, halfmoves: u32, fullmoves: u32) -> Game {
        self.halfmoves = halfmoves;
        self.fullmoves = fullmoves;
        self
    }

    /// Goes back to the starting position, forgetting all moves and
    /// captured pieces.
    pub fn reset(&mut self) {
        *self = Game::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Number of moves played since the game was set up.
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// The move number, starting at 1 and incremented after every Black
    /// move.
    pub fn fullmoves(&self) -> u32 {
        self.fullmoves
    }

    /// Number of moves since the last capture or pawn move.
    pub fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    /// The square skipped by a two-square pawn advance on the previous
    /// move. Only valid for exactly one ply.
    pub fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Pieces captured by the given side, in order of capture.
    pub fn captured(&self, color: Color) -> &[Piece] {
        self.captured.get(color)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.status.outcome()
    }

    pub fn is_check(&self) -> bool {
        matches!(self.status, Status::Check(_) | Status::Checkmate(_))
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(self.status, Status::Checkmate(_))
    }

    pub fn is_stalemate(&self) -> bool {
        self.status == Status::Stalemate
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Legal moves of the side to move.
    pub fn legal_moves(&self) -> MoveList {
        legal::legal_moves(&self.board, self.ep_square, self.turn)
    }

    /// Legal moves of the piece on `sq`. Empty unless the square holds a
    /// piece of the side to move.
    pub fn legal_moves_from(&self, sq: Square) -> MoveList {
        if self.board.is_occupied_by_color(sq, self.turn) {
            legal::legal_moves_for(&self.board, self.ep_square, sq)
        } else {
            MoveList::new()
        }
    }

    /// Like [`Game::apply_move()`], but with raw `(row, column)`
    /// coordinates.
    ///
    /// # Errors
    ///
    /// Additionally errors with [`PlayError::InvalidSquare`] if a
    /// coordinate is off the board.
    pub fn apply_move_at(
        &mut self,
        from: (i8, i8),
        to: (i8, i8),
        promotion: Option<Role>,
    ) -> Result<MoveRecord, PlayError> {
        let squares = Square::try_from(from).and_then(|from| Ok((from, Square::try_from(to)?)));
        match squares {
            Ok((from, to)) => self.apply_move(from, to, promotion),
            Err(err) => {
                trace!(?from, ?to, %err, "rejected move");
                Err(PlayError::from(err))
            }
        }
    }

    /// Plays the move of the piece on `from` to `to`.
    ///
    /// Castling is requested by moving the king two squares towards the
    /// rook. A pawn reaching the last row promotes to `promotion`, or to a
    /// queen if `None`.
    ///
    /// # Errors
    ///
    /// Errors if the game is over, if `from` does not hold a piece of the
    /// side to move, or if the move is not legal. Supplying a promotion
    /// role for a move that does not promote is also an error. The game is
    /// unchanged after an error.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<MoveRecord, PlayError> {
        let m = self.select_move(from, to, promotion).inspect_err(|err| {
            trace!(%from, %to, %err, "rejected move");
        })?;
        Ok(self.commit(m))
    }

    fn select_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<Move, PlayError> {
        if self.status.is_terminal() {
            return Err(PlayError::GameAlreadyOver {
                status: self.status,
            });
        }

        let piece = self
            .board
            .piece_at(from)
            .ok_or(PlayError::NoPieceAtSource { square: from })?;
        if piece.color != self.turn {
            return Err(PlayError::WrongSideToMove {
                square: from,
                color: piece.color,
            });
        }

        let illegal = PlayError::IllegalDestination { from, to };
        let mut candidates = legal::legal_moves_for(&self.board, self.ep_square, from);
        candidates.retain(|m| m.to() == to);

        if candidates.iter().any(|m| m.is_promotion()) {
            let role = promotion.unwrap_or(Role::Queen);
            candidates
                .into_iter()
                .find(|m| m.promotion() == Some(role))
                .ok_or(illegal)
        } else if promotion.is_some() {
            Err(illegal)
        } else {
            candidates.first().copied().ok_or(illegal)
        }
    }

    fn commit(&mut self, m: Move) -> MoveRecord {
        let piece = m.role().of(self.turn);
        let captured = self.board.play_unchecked(m).map(|o| o.piece);
        if let Some(victim) = captured {
            self.captured.get_mut(self.turn).push(victim);
        }

        self.ep_square = skipped_square(m);
        self.halfmoves = if m.is_zeroing() {
            0
        } else {
            self.halfmoves.saturating_add(1)
        };
        if self.turn.is_black() {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }
        self.ply += 1;
        self.turn = !self.turn;
        self.status = Status::evaluate(&self.board, self.turn, self.ep_square);

        let record = MoveRecord {
            m,
            piece,
            captured,
            status: self.status,
            ply: self.ply,
        };
        self.history.push(record);

        debug!(%record, ply = self.ply, status = %self.status, "played move");
        if let Some(outcome) = self.status.outcome() {
            info!(%outcome, status = %self.status, "game over");
        }

        record
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

/// Every piece beyond the initial set must have been a pawn.
fn has_too_much_material(board: &Board, color: Color) -> bool {
    let count = |role: Role| board.count(role.of(color));
    let pawns = count(Role::Pawn);
    let promoted = count(Role::Queen).saturating_sub(1)
        + count(Role::Rook).saturating_sub(2)
        + count(Role::Bishop).saturating_sub(2)
        + count(Role::Knight).saturating_sub(2);
    board.occupants_of(color).count() > 16 || pawns + promoted > 8
}

fn is_valid_ep_square(board: &Board, turn: Color, ep_square: Square) -> bool {
    let them = !turn;
    if ep_square.row() != them.pawn_row() + them.forward() || !board.is_empty(ep_square) {
        return false;
    }
    let pawn = ep_square.offset(them.forward(), 0);
    let origin = ep_square.offset(-them.forward(), 0);
    pawn.is_some_and(|sq| board.piece_at(sq) == Some(them.pawn()))
        && origin.is_some_and(|sq| board.is_empty(sq))
}
