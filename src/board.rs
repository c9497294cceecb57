use crate::classify::MoveCategory;
use crate::coord::Coord;
use crate::piece::{Piece, PieceKind, Side};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

lazy_static! {
    /// The standard 32-piece opening placement, built once.
    static ref OPENING_PLACEMENT: Vec<(Coord, Piece)> = compute_opening_placement();
}

fn compute_opening_placement() -> Vec<(Coord, Piece)> {
    use PieceKind::*;
    let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
    let mut placement = Vec::with_capacity(32);
    for side in [Side::White, Side::Black] {
        let home = if side == Side::White { 0 } else { 7 };
        for (file, kind) in back_rank.into_iter().enumerate() {
            placement.push((Coord::new(file as i8, home), Piece::new(kind, side)));
        }
        for file in 0..8 {
            placement.push((Coord::new(file, side.pawn_rank()), Piece::new(Pawn, side)));
        }
    }
    placement
}

/// The game board: a sparse map from occupied squares to pieces, plus the
/// turn indicator, the winner once decided, and the square of the pawn that
/// double-stepped on the immediately preceding turn (en-passant target).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: HashMap<Coord, Piece>,
    side_to_move: Side,
    winner: Option<Side>,
    last_double_step: Option<Coord>,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// An empty board with White to move. Call [`Board::start`] to set up
    /// the standard opening position.
    pub fn new() -> Self {
        Board {
            squares: HashMap::new(),
            side_to_move: Side::White,
            winner: None,
            last_double_step: None,
        }
    }

    /// Resets to the standard opening position, White to move.
    pub fn start(&mut self) {
        self.squares.clear();
        self.squares.extend(OPENING_PLACEMENT.iter().copied());
        self.side_to_move = Side::White;
        self.winner = None;
        self.last_double_step = None;
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[inline]
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    #[inline]
    pub fn last_double_step(&self) -> Option<Coord> {
        self.last_double_step
    }

    #[inline]
    pub fn piece_at(&self, coord: Coord) -> Option<&Piece> {
        self.squares.get(&coord)
    }

    pub fn place(&mut self, coord: Coord, piece: Piece) {
        self.squares.insert(coord, piece);
    }

    pub fn remove(&mut self, coord: Coord) -> Option<Piece> {
        self.squares.remove(&coord)
    }

    /// Atomic remove-and-place that also marks the piece as moved. Returns
    /// the captured piece, if any. A capture of a king ends the game on the
    /// spot (unreachable when check enforcement is working, kept as a
    /// defensive fallback).
    ///
    /// Panics when `start` is empty; callers classify first.
    pub fn relocate(&mut self, start: Coord, end: Coord) -> Option<Piece> {
        let mut piece = self
            .squares
            .remove(&start)
            .unwrap_or_else(|| panic!("relocate from empty square {}", start));
        piece.has_moved = true;
        piece.move_count += 1;
        let captured = self.squares.insert(end, piece);
        if let Some(taken) = captured {
            if taken.kind == PieceKind::King {
                self.winner = Some(piece.side);
            }
        }
        captured
    }

    pub fn king_coordinate(&self, side: Side) -> Option<Coord> {
        self.squares
            .iter()
            .find(|(_, p)| p.kind == PieceKind::King && p.side == side)
            .map(|(c, _)| *c)
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Coord, &Piece)> + '_ {
        self.squares
            .iter()
            .filter(move |(_, p)| p.side == side)
            .map(|(c, p)| (*c, p))
    }

    /// The ordered squares strictly between `start` and `end` along a
    /// straight or diagonal line.
    ///
    /// Panics on any other pair: callers are expected to have confirmed the
    /// shape already, so a bad pair is a contract breach, not a bad move.
    pub fn between(&self, start: Coord, end: Coord) -> Vec<Coord> {
        assert!(
            start.is_straight_to(end) || start.is_diagonal_to(end),
            "between called on non-line pair {} -> {}",
            start,
            end
        );
        let (df, dr) = start.delta(end);
        let (step_f, step_r) = (df.signum(), dr.signum());
        let mut squares = Vec::new();
        let (mut file, mut rank) = (start.file + step_f, start.rank + step_r);
        while (file, rank) != (end.file, end.rank) {
            squares.push(Coord::new(file, rank));
            file += step_f;
            rank += step_r;
        }
        squares
    }

    /// Whether any intervening square on the line `start -> end` is
    /// occupied. Single source of truth for path blocking: shared by the
    /// sliding pieces, castling, and the attack query.
    pub fn occupied_between(&self, start: Coord, end: Coord) -> bool {
        self.between(start, end)
            .iter()
            .any(|c| self.squares.contains_key(c))
    }

    /// Flips the turn indicator, unless the game is already decided.
    pub fn advance_turn(&mut self) {
        if self.winner.is_none() {
            self.side_to_move = self.side_to_move.opponent();
        }
    }

    pub(crate) fn set_winner(&mut self, side: Side) {
        self.winner = Some(side);
    }

    /// Commits an already-classified move: relocates the mover, performs the
    /// category's side effects (castle rook hop, en-passant pawn removal),
    /// promotes a pawn reaching the last rank (Queen unless a choice is
    /// supplied), and refreshes the en-passant marker. Does not touch the
    /// turn indicator.
    ///
    /// Promotion to a king or pawn is a caller contract breach and panics.
    pub(crate) fn commit(
        &mut self,
        start: Coord,
        end: Coord,
        category: MoveCategory,
        promotion: Option<PieceKind>,
    ) {
        let mover = self
            .piece_at(start)
            .copied()
            .unwrap_or_else(|| panic!("commit with empty start square {}", start));

        match category {
            MoveCategory::Move | MoveCategory::Capture => {
                self.relocate(start, end);
            }
            MoveCategory::Castle => {
                let rank = start.rank;
                let rook_from = if end.file > start.file {
                    Coord::new(7, rank)
                } else {
                    Coord::new(0, rank)
                };
                // The rook lands on the square the king passed over.
                let rook_to = Coord::new((start.file + end.file) / 2, rank);
                self.relocate(start, end);
                self.relocate(rook_from, rook_to);
            }
            MoveCategory::EnPassantCapture => {
                // The bypassed pawn sits beside the start square, not on the
                // destination.
                self.remove(Coord::new(end.file, start.rank));
                self.relocate(start, end);
            }
        }

        if mover.kind == PieceKind::Pawn && end.rank == mover.side.last_rank() {
            let choice = promotion.unwrap_or(PieceKind::Queen);
            assert!(
                !matches!(choice, PieceKind::King | PieceKind::Pawn),
                "promotion to {:?} is not a legal choice",
                choice
            );
            if let Some(promoted) = self.squares.get_mut(&end) {
                promoted.kind = choice;
            }
        }

        // Valid for exactly the one turn that follows a double step.
        self.last_double_step = if mover.kind == PieceKind::Pawn
            && (end.rank - start.rank).abs() == 2
        {
            Some(end)
        } else {
            None
        };
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +-----------------+")?;
        for rank in (0..8).rev() {
            write!(f, "{} | ", rank)?;
            for file in 0..8 {
                match self.piece_at(Coord::new(file, rank)) {
                    Some(piece) => write!(f, "{} ", piece)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +-----------------+")?;
        writeln!(f, "    0 1 2 3 4 5 6 7")?;
        writeln!(f, "Turn: {:?}", self.side_to_move)?;
        if let Some(coord) = self.last_double_step {
            writeln!(f, "En passant target: pawn at {}", coord)?;
        }
        Ok(())
    }
}
