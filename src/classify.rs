use crate::board::Board;
use crate::coord::Coord;
use crate::piece::{shape_is_legal, Piece, PieceKind, Side};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// What a legal candidate move turns out to be.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveCategory {
    Move,
    Capture,
    Castle,
    EnPassantCapture,
}

/// Why a candidate move was rejected. These are expected, recoverable
/// player-input conditions, never faults; each renders an actionable
/// message for a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    NoOwnPieceAtStart(Coord),
    DestinationOccupiedByOwnPiece(Coord),
    ShapeInvalidForPiece(PieceKind),
    PathBlocked,
    SelfCheckAfterMove,
    InvalidCastlingPreconditions(&'static str),
    InvalidEnPassantPreconditions,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::NoOwnPieceAtStart(coord) => {
                write!(f, "No piece of yours at {} to move.", coord)
            }
            MoveError::DestinationOccupiedByOwnPiece(coord) => {
                write!(f, "Destination {} is occupied by your own piece.", coord)
            }
            MoveError::ShapeInvalidForPiece(kind) => {
                write!(f, "That move is not valid for a {:?}.", kind)
            }
            MoveError::PathBlocked => write!(f, "The path is blocked."),
            MoveError::SelfCheckAfterMove => {
                write!(f, "Illegal move: it would leave your own king in check.")
            }
            MoveError::InvalidCastlingPreconditions(reason) => {
                write!(f, "Invalid castling: {}.", reason)
            }
            MoveError::InvalidEnPassantPreconditions => {
                write!(f, "Invalid pawn capture: no en-passant capture is available there.")
            }
        }
    }
}

impl Error for MoveError {}

impl Board {
    /// Classifies the candidate `start -> end` for `side`, in precedence
    /// order: own piece at start, destination not own, castling pattern,
    /// path blocking for the sliders, raw shape, pawn occupancy rules. A
    /// provisional category is then vetted by trial-applying the move to a
    /// scratch copy; a move that leaves the mover's own king attacked is
    /// rejected whatever its category. `self` is never mutated.
    pub fn classify(
        &self,
        start: Coord,
        end: Coord,
        side: Side,
    ) -> Result<MoveCategory, MoveError> {
        let category = self.classify_shape(start, end, side)?;
        let mut trial = self.clone();
        trial.commit(start, end, category, None);
        if trial.is_in_check(side) {
            return Err(MoveError::SelfCheckAfterMove);
        }
        Ok(category)
    }

    fn classify_shape(
        &self,
        start: Coord,
        end: Coord,
        side: Side,
    ) -> Result<MoveCategory, MoveError> {
        let piece = match self.piece_at(start) {
            Some(p) if p.side == side => *p,
            _ => return Err(MoveError::NoOwnPieceAtStart(start)),
        };
        if let Some(target) = self.piece_at(end) {
            if target.side == side {
                return Err(MoveError::DestinationOccupiedByOwnPiece(end));
            }
        }

        // A king sliding two squares along its rank is a castling attempt;
        // it never matches the king's ordinary shape.
        if piece.kind == PieceKind::King
            && start.rank == end.rank
            && (end.file - start.file).abs() == 2
        {
            return self.classify_castle(&piece, start, end, side);
        }

        if matches!(
            piece.kind,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop
        ) && shape_is_legal(&piece, start, end)
            && self.occupied_between(start, end)
        {
            return Err(MoveError::PathBlocked);
        }

        if piece.kind == PieceKind::Pawn {
            return self.classify_pawn(start, end, side);
        }

        if !shape_is_legal(&piece, start, end) {
            return Err(MoveError::ShapeInvalidForPiece(piece.kind));
        }
        Ok(if self.piece_at(end).is_some() {
            MoveCategory::Capture
        } else {
            MoveCategory::Move
        })
    }

    fn classify_castle(
        &self,
        king: &Piece,
        start: Coord,
        end: Coord,
        side: Side,
    ) -> Result<MoveCategory, MoveError> {
        if king.has_moved {
            return Err(MoveError::InvalidCastlingPreconditions(
                "the king has already moved",
            ));
        }
        let rook_from = if end.file > start.file {
            Coord::new(7, start.rank)
        } else {
            Coord::new(0, start.rank)
        };
        // A rook that ever left its square is ineligible, even if it
        // has since returned.
        let rook_ok = self
            .piece_at(rook_from)
            .map_or(false, |p| {
                p.kind == PieceKind::Rook && p.side == side && p.move_count == 0
            });
        if !rook_ok {
            return Err(MoveError::InvalidCastlingPreconditions(
                "no unmoved rook on that side",
            ));
        }
        if self.occupied_between(start, rook_from) {
            return Err(MoveError::InvalidCastlingPreconditions(
                "pieces stand between king and rook",
            ));
        }
        if self.is_in_check(side) {
            return Err(MoveError::InvalidCastlingPreconditions(
                "the king is in check",
            ));
        }
        // Every square the king transits, destination included, must be safe.
        let passed = Coord::new((start.file + end.file) / 2, start.rank);
        for transit in [passed, end] {
            if self.square_attacked(transit, side.opponent()) {
                return Err(MoveError::InvalidCastlingPreconditions(
                    "the king would pass through an attacked square",
                ));
            }
        }
        Ok(MoveCategory::Castle)
    }

    fn classify_pawn(
        &self,
        start: Coord,
        end: Coord,
        side: Side,
    ) -> Result<MoveCategory, MoveError> {
        let forward = side.forward();
        let (df, dr) = start.delta(end);

        if df == 0 {
            // Pushes never capture.
            if dr == forward {
                return if self.piece_at(end).is_some() {
                    Err(MoveError::PathBlocked)
                } else {
                    Ok(MoveCategory::Move)
                };
            }
            if dr == 2 * forward && start.rank == side.pawn_rank() {
                let skipped = Coord::new(start.file, start.rank + forward);
                return if self.piece_at(skipped).is_some() || self.piece_at(end).is_some() {
                    Err(MoveError::PathBlocked)
                } else {
                    Ok(MoveCategory::Move)
                };
            }
            return Err(MoveError::ShapeInvalidForPiece(PieceKind::Pawn));
        }

        if df.abs() == 1 && dr == forward {
            // Own pieces were already filtered out, so any occupant is an
            // enemy and this is an ordinary capture.
            if self.piece_at(end).is_some() {
                return Ok(MoveCategory::Capture);
            }
            // Diagonal onto an empty square is legal only as en passant:
            // the bypassed pawn sits beside the start square and must have
            // double-stepped on the immediately preceding turn.
            let bypassed = Coord::new(end.file, start.rank);
            let eligible = self.last_double_step() == Some(bypassed)
                && self
                    .piece_at(bypassed)
                    .map_or(false, |p| p.kind == PieceKind::Pawn && p.side != side);
            return if eligible {
                Ok(MoveCategory::EnPassantCapture)
            } else {
                Err(MoveError::InvalidEnPassantPreconditions)
            };
        }

        Err(MoveError::ShapeInvalidForPiece(PieceKind::Pawn))
    }
}
