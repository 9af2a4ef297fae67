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

//! A chess rules engine: board state, legal move generation, check
//! detection and game end conditions.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use chess_rules::Game;
//!
//! let game = Game::new();
//! let legals = game.legal_moves();
//! assert_eq!(legals.len(), 20);
//! ```
//!
//! Play moves:
//!
//! ```
//! # use chess_rules::Game;
//! use chess_rules::{Color, Square};
//! #
//! # let mut game = Game::new();
//!
//! // 1. e4
//! let record = game.apply_move(Square::new(6, 4)?, Square::new(4, 4)?, None)?;
//! assert_eq!(record.to_string(), "e2-e4");
//! assert_eq!(game.turn(), Color::Black);
//! # Ok::<_, chess_rules::PlayError>(())
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! # use chess_rules::Game;
//! # let game = Game::new();
//! assert!(!game.is_checkmate());
//! assert!(!game.is_stalemate());
//! assert_eq!(game.outcome(), None); // no winner yet
//! ```
//!
//! Squares are `(row, column)` pairs. Row 0 is Black's back rank and
//! column 0 is the a-file, so White's king starts on `(7, 4)`, which is
//! `e1`. Positions can also be set up and inspected as [FEN](fen).
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde`](https://docs.rs/serde/1)
//!   serialization/deserialization for vocabulary types, moves and game
//!   status.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.
//! * `arbitrary`: Implements [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for vocabulary types.
//!
//! # Logging
//!
//! Committed moves are logged with [`tracing`](https://docs.rs/tracing) at
//! debug level, game ends at info level and rejected moves at trace level.
//! The library never installs a subscriber.

#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod castling_side;
mod color;
mod m;
mod perft;
mod role;
mod square;
mod types;

pub mod attacks;
pub mod board;
pub mod fen;
pub mod game;
pub mod legal;
pub mod movegen;

pub use attacks::SquareList;
pub use board::Board;
pub use castling_side::CastlingSide;
pub use color::{ByColor, Color, ParseColorError};
pub use game::{Game, MoveRecord, PlayError, PositionError, PositionErrorKinds, Status};
pub use m::{Move, MoveList};
pub use perft::perft;
pub use role::Role;
pub use square::{InvalidSquare, ParseSquareError, Square};
pub use types::{Occupant, Outcome, Piece};
