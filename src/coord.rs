use serde::{Deserialize, Serialize};
use std::fmt;

/// A board square as a (file, rank) pair, each in 0..=7.
///
/// (0, 0) is White's queenside rook square; rank 7 is Black's back rank.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Coord {
    pub file: i8,
    pub rank: i8,
}

impl Coord {
    pub fn new(file: i8, rank: i8) -> Self {
        debug_assert!(
            (0..8).contains(&file) && (0..8).contains(&rank),
            "coordinate ({}, {}) is off the board",
            file,
            rank
        );
        Coord { file, rank }
    }

    /// (file delta, rank delta) from `self` to `other`.
    #[inline]
    pub fn delta(self, other: Coord) -> (i8, i8) {
        (other.file - self.file, other.rank - self.rank)
    }

    /// Horizontal or vertical, nonzero length.
    #[inline]
    pub fn is_straight_to(self, other: Coord) -> bool {
        let (df, dr) = self.delta(other);
        (df == 0) != (dr == 0)
    }

    /// Equal-magnitude diagonal, nonzero length.
    #[inline]
    pub fn is_diagonal_to(self, other: Coord) -> bool {
        let (df, dr) = self.delta(other);
        df != 0 && df.abs() == dr.abs()
    }

    #[inline]
    pub fn chebyshev(self, other: Coord) -> i8 {
        let (df, dr) = self.delta(other);
        df.abs().max(dr.abs())
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.file, self.rank)
    }
}
