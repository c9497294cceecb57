//! A two-player chess rules engine on an 8x8 coordinate grid.
//!
//! The engine owns board state, enforces full legal-move semantics for every
//! piece (castling, en passant, and pawn promotion included), and detects
//! check, checkmate, and game termination. Rendering, input parsing, and
//! move-log persistence are thin collaborators on top of [`Game`]; the
//! bundled binary is one such front end.
//!
//! Illegal player input is an expected condition and comes back as a
//! [`MoveError`] value. Caller contract breaches (querying a path for a
//! non-line pair, mutating a finished game) panic instead.

pub mod board;
pub mod check;
pub mod classify;
pub mod coord;
pub mod game;
pub mod piece;

pub use board::Board;
pub use classify::{MoveCategory, MoveError};
pub use coord::Coord;
pub use game::{Game, MoveRecord};
pub use piece::{shape_is_legal, Piece, PieceKind, Side};
