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

use std::{
    error::Error,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

/// Error when a row or column is outside of `0..8`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct InvalidSquare {
    pub row: i8,
    pub col: i8,
}

impl fmt::Display for InvalidSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid square (row {}, column {})", self.row, self.col)
    }
}

impl Error for InvalidSquare {}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

/// A square of the board, addressed by row and column.
///
/// Row `0` is Black's back rank (rank 8) and row `7` is White's back rank
/// (rank 1). Column `0` is the a-file.
///
/// # Examples
///
/// ```
/// use chess_rules::Square;
///
/// let sq = Square::new(6, 4)?;
/// assert_eq!(sq.to_string(), "e2");
/// assert_eq!("e2".parse::<Square>(), Ok(sq));
///
/// // Stepping off the board yields `None`.
/// assert_eq!(Square::new(0, 0)?.offset(-1, 0), None);
/// # Ok::<_, chess_rules::InvalidSquare>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(i8, i8)", into = "(i8, i8)"))]
pub struct Square {
    row: i8,
    col: i8,
}

impl Square {
    /// Creates a square, failing if either component is off the board.
    pub const fn new(row: i8, col: i8) -> Result<Square, InvalidSquare> {
        if 0 <= row && row < 8 && 0 <= col && col < 8 {
            Ok(Square { row, col })
        } else {
            Err(InvalidSquare { row, col })
        }
    }

    /// Creates a square from components already known to be on the board,
    /// such as back rank coordinates. Components are masked into range.
    #[inline]
    pub(crate) const fn from_coords(row: i8, col: i8) -> Square {
        debug_assert!(0 <= row && row < 8 && 0 <= col && col < 8);
        Square {
            row: row & 7,
            col: col & 7,
        }
    }

    /// Gets the square with the given index, counting row by row from the
    /// top left corner.
    pub const fn from_index(index: usize) -> Option<Square> {
        if index < 64 {
            Some(Square {
                row: (index / 8) as i8,
                col: (index % 8) as i8,
            })
        } else {
            None
        }
    }

    /// Parses an algebraic square name like `e4`.
    pub fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        match *s {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Ok(Square {
                row: (b'8' - rank) as i8,
                col: (file - b'a') as i8,
            }),
            _ => Err(ParseSquareError),
        }
    }

    #[inline]
    pub const fn row(self) -> i8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> i8 {
        self.col
    }

    #[inline]
    pub const fn index(self) -> usize {
        (self.row * 8 + self.col) as usize
    }

    /// The square `drow` rows and `dcol` columns away, or `None` if that
    /// lies off the board.
    #[inline]
    pub const fn offset(self, drow: i8, dcol: i8) -> Option<Square> {
        match Square::new(self.row + drow, self.col + dcol) {
            Ok(sq) => Some(sq),
            Err(_) => None,
        }
    }

    /// The square on the same row as `self` and the same column as `other`.
    #[inline]
    pub const fn with_col_of(self, other: Square) -> Square {
        Square {
            row: self.row,
            col: other.col,
        }
    }

    /// Chebyshev distance, the number of king steps between two squares.
    pub fn distance(self, other: Square) -> i8 {
        (self.row - other.row)
            .abs()
            .max((self.col - other.col).abs())
    }

    pub fn file_char(self) -> char {
        char::from(b'a' + self.col as u8)
    }

    pub fn rank_char(self) -> char {
        char::from(b'8' - self.row as u8)
    }

    /// All 64 squares, row by row.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_index)
    }
}

impl Hash for Square {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.index() as u8);
    }
}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

impl TryFrom<(i8, i8)> for Square {
    type Error = InvalidSquare;

    fn try_from((row, col): (i8, i8)) -> Result<Square, InvalidSquare> {
        Square::new(row, col)
    }
}

impl From<Square> for (i8, i8) {
    fn from(sq: Square) -> (i8, i8) {
        (sq.row, sq.col)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Square {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Square> {
        Ok(Square {
            row: u.int_in_range(0..=7)?,
            col: u.int_in_range(0..=7)?,
        })
    }

    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (2, Some(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square() {
        for row in 0..8 {
            for col in 0..8 {
                let sq = Square::new(row, col).unwrap();
                assert_eq!(sq.row(), row);
                assert_eq!(sq.col(), col);
                assert_eq!(Square::from_index(sq.index()), Some(sq));
            }
        }
    }

    #[test]
    fn test_invalid_square() {
        assert_eq!(Square::new(8, 0), Err(InvalidSquare { row: 8, col: 0 }));
        assert_eq!(Square::new(0, -1), Err(InvalidSquare { row: 0, col: -1 }));
        assert!(Square::from_index(64).is_none());
    }

    #[test]
    fn test_from_coords() {
        for sq in Square::all() {
            assert_eq!(Square::from_coords(sq.row(), sq.col()), sq);
        }
        assert_eq!(Square::from_coords(7, 4).to_string(), "e1");
    }

    #[test]
    fn test_offset() {
        let sq = Square::new(7, 7).unwrap();
        assert_eq!(sq.offset(-1, -1), Square::new(6, 6).ok());
        assert_eq!(sq.offset(1, 0), None);
        assert_eq!(sq.offset(0, 1), None);
    }

    #[test]
    fn test_algebraic() {
        assert_eq!("a8".parse::<Square>(), Square::new(0, 0).map_err(|_| ParseSquareError));
        assert_eq!("h1".parse::<Square>(), Square::new(7, 7).map_err(|_| ParseSquareError));
        assert_eq!(Square::new(4, 4).unwrap().to_string(), "e4");
        assert!("i1".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
    }

    #[test]
    fn test_distance() {
        let d7 = Square::new(1, 3).unwrap();
        let g6 = Square::new(2, 6).unwrap();
        assert_eq!(d7.distance(g6), 3);
    }
}
