use crate::coord::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Pawn marching direction, as a rank delta.
    #[inline]
    pub fn forward(&self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// The rank this side's pawns start on.
    #[inline]
    pub fn pawn_rank(&self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }

    /// The rank a pawn of this side promotes on.
    #[inline]
    pub fn last_rank(&self) -> i8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

/// One piece on the board. `has_moved` and `move_count` feed castling,
/// pawn double-step, and en-passant eligibility.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    pub has_moved: bool,
    pub move_count: u32,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Piece {
            kind,
            side,
            has_moved: false,
            move_count: 0,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        let symbol = match self.side {
            Side::White => symbol.to_ascii_uppercase(),
            Side::Black => symbol,
        };
        write!(f, "{}", symbol)
    }
}

/// Raw geometric legality of `start -> end` for this piece, ignoring
/// occupancy, blocking, turn, and check. The only state consulted is the
/// pawn's side (direction and origin rank).
///
/// Castling is not a king shape; the classifier recognizes it separately.
/// A pawn's diagonal step is reported legal here and reconciled with
/// occupancy (ordinary capture vs. en passant) by the classifier.
pub fn shape_is_legal(piece: &Piece, start: Coord, end: Coord) -> bool {
    if start == end {
        return false;
    }
    let (df, dr) = start.delta(end);
    match piece.kind {
        PieceKind::King => start.chebyshev(end) == 1,
        PieceKind::Queen => start.is_straight_to(end) || start.is_diagonal_to(end),
        PieceKind::Bishop => start.is_diagonal_to(end),
        PieceKind::Knight => {
            (df.abs() == 1 && dr.abs() == 2) || (df.abs() == 2 && dr.abs() == 1)
        }
        PieceKind::Rook => start.is_straight_to(end),
        PieceKind::Pawn => {
            let forward = piece.side.forward();
            if df == 0 {
                dr == forward || (dr == 2 * forward && start.rank == piece.side.pawn_rank())
            } else {
                df.abs() == 1 && dr == forward
            }
        }
    }
}
