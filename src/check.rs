use crate::board::Board;
use crate::coord::Coord;
use crate::piece::{shape_is_legal, Piece, PieceKind, Side};

impl Board {
    /// True when any piece of `attacker` could capture on `target`, judged
    /// by raw shape and path blocking alone. The "leaves own king in check"
    /// rule is deliberately ignored here; applying it would recurse.
    pub(crate) fn square_attacked(&self, target: Coord, attacker: Side) -> bool {
        self.pieces_of(attacker)
            .any(|(coord, piece)| self.piece_attacks(coord, piece, target))
    }

    fn piece_attacks(&self, from: Coord, piece: &Piece, target: Coord) -> bool {
        if from == target {
            return false;
        }
        match piece.kind {
            // A pawn only ever attacks its two forward diagonals; its
            // pushes threaten nothing.
            PieceKind::Pawn => {
                let (df, dr) = from.delta(target);
                df.abs() == 1 && dr == piece.side.forward()
            }
            PieceKind::Knight | PieceKind::King => shape_is_legal(piece, from, target),
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop => {
                shape_is_legal(piece, from, target) && !self.occupied_between(from, target)
            }
        }
    }

    /// Whether `side`'s king is currently attacked.
    pub fn is_in_check(&self, side: Side) -> bool {
        match self.king_coordinate(side) {
            Some(king) => self.square_attacked(king, side.opponent()),
            // No king left means the game already ended by capture.
            None => false,
        }
    }

    /// Whether `side` is checkmated: in check with no legal response.
    ///
    /// Brute-force enumeration over every own piece and every destination
    /// square, each candidate vetted by the full classifier including the
    /// self-check trial. Bounded by 16 pieces x 64 squares.
    pub fn is_checkmate(&self, side: Side) -> bool {
        if !self.is_in_check(side) {
            return false;
        }
        let own: Vec<Coord> = self.pieces_of(side).map(|(coord, _)| coord).collect();
        for start in own {
            for file in 0..8 {
                for rank in 0..8 {
                    if self.classify(start, Coord::new(file, rank), side).is_ok() {
                        return false;
                    }
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(file: i8, rank: i8) -> Coord {
        Coord::new(file, rank)
    }

    fn kings_only() -> Board {
        let mut board = Board::new();
        board.place(c(4, 0), Piece::new(PieceKind::King, Side::White));
        board.place(c(4, 7), Piece::new(PieceKind::King, Side::Black));
        board
    }

    #[test]
    fn rook_on_the_king_file_gives_check() {
        let mut board = kings_only();
        board.place(c(4, 5), Piece::new(PieceKind::Rook, Side::Black));
        assert!(board.is_in_check(Side::White));
        assert!(!board.is_in_check(Side::Black));
    }

    #[test]
    fn a_blocker_lifts_the_check() {
        let mut board = kings_only();
        board.place(c(4, 5), Piece::new(PieceKind::Rook, Side::Black));
        board.place(c(4, 3), Piece::new(PieceKind::Knight, Side::White));
        assert!(!board.is_in_check(Side::White));
    }

    #[test]
    fn pawns_attack_diagonally_not_forward() {
        let mut board = kings_only();
        board.place(c(4, 1), Piece::new(PieceKind::Pawn, Side::Black));
        assert!(!board.is_in_check(Side::White));
        board.place(c(3, 1), Piece::new(PieceKind::Pawn, Side::Black));
        assert!(board.is_in_check(Side::White));
    }

    #[test]
    fn knights_jump_over_blockers() {
        let mut board = kings_only();
        board.place(c(3, 2), Piece::new(PieceKind::Knight, Side::Black));
        board.place(c(4, 1), Piece::new(PieceKind::Pawn, Side::White));
        assert!(board.is_in_check(Side::White));
    }

    #[test]
    fn check_with_an_escape_is_not_mate() {
        let mut board = kings_only();
        board.place(c(4, 5), Piece::new(PieceKind::Rook, Side::Black));
        assert!(board.is_in_check(Side::White));
        assert!(!board.is_checkmate(Side::White));
    }

    #[test]
    fn back_rank_mate_with_two_rooks() {
        let mut board = kings_only();
        board.place(c(0, 0), Piece::new(PieceKind::Rook, Side::Black));
        board.place(c(7, 1), Piece::new(PieceKind::Rook, Side::Black));
        // King on rank 0, rooks sweeping ranks 0 and 1: nowhere to go.
        assert!(board.is_in_check(Side::White));
        assert!(board.is_checkmate(Side::White));
    }

    #[test]
    fn a_defender_that_can_capture_averts_mate() {
        let mut board = kings_only();
        board.place(c(0, 0), Piece::new(PieceKind::Rook, Side::Black));
        board.place(c(7, 1), Piece::new(PieceKind::Rook, Side::Black));
        board.place(c(0, 5), Piece::new(PieceKind::Rook, Side::White));
        // The white rook takes the checking rook on (0, 0).
        assert!(board.is_in_check(Side::White));
        assert!(!board.is_checkmate(Side::White));
    }

    #[test]
    fn not_in_check_is_never_checkmate() {
        let board = kings_only();
        assert!(!board.is_checkmate(Side::White));
        assert!(!board.is_checkmate(Side::Black));
    }
}
