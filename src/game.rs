use crate::board::Board;
use crate::classify::{MoveCategory, MoveError};
use crate::coord::Coord;
use crate::piece::{PieceKind, Side};
use serde::{Deserialize, Serialize};

/// One applied move, as emitted to the move-history sink. A logging
/// collaborator may persist these; the engine only records them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub kind: PieceKind,
    pub side: Side,
    pub start: Coord,
    pub end: Coord,
    pub category: MoveCategory,
}

/// The game controller: owns the board, orchestrates turn order, commits
/// classified moves, and decides the winner. Front ends drive the game
/// exclusively through this type.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    history: Vec<MoveRecord>,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    /// A fresh game in the standard opening position, White to move.
    pub fn new() -> Self {
        let mut board = Board::new();
        board.start();
        Game {
            board,
            history: Vec::new(),
        }
    }

    /// Adopts an arbitrary position, e.g. for endgame setups and tests.
    pub fn from_board(board: Board) -> Self {
        Game {
            board,
            history: Vec::new(),
        }
    }

    /// Resets to the standard opening position and clears the history.
    pub fn start(&mut self) {
        self.board.start();
        self.history.clear();
    }

    /// Pure legality query for the side to move; never mutates state.
    pub fn legal_move(&self, start: Coord, end: Coord) -> Result<MoveCategory, MoveError> {
        self.board.classify(start, end, self.board.side_to_move())
    }

    /// Classifies and commits a move for the side to move. On rejection the
    /// board is untouched and the specific reason is returned. On success
    /// the category's side effects are applied (castle rook hop, en-passant
    /// removal, promotion with a Queen default), the move is recorded, and
    /// the winner is set if the opponent is now checkmated.
    ///
    /// The turn does not advance here; call [`Game::advance_turn`].
    ///
    /// Panics when called after the game has ended: that is a caller
    /// contract breach, not a bad move.
    pub fn apply_move(
        &mut self,
        start: Coord,
        end: Coord,
        promotion: Option<PieceKind>,
    ) -> Result<MoveCategory, MoveError> {
        assert!(
            self.board.winner().is_none(),
            "apply_move called after the game has ended"
        );
        let side = self.board.side_to_move();
        let category = self.board.classify(start, end, side)?;
        let kind = self
            .board
            .piece_at(start)
            .map(|p| p.kind)
            .expect("a classified move has a mover");

        self.board.commit(start, end, category, promotion);
        self.history.push(MoveRecord {
            kind,
            side,
            start,
            end,
            category,
        });

        // A captured king already decided the game inside the commit;
        // otherwise the opponent may now be checkmated.
        if self.board.winner().is_none() {
            let opponent = side.opponent();
            if self.board.is_in_check(opponent) && self.board.is_checkmate(opponent) {
                self.board.set_winner(side);
            }
        }
        Ok(category)
    }

    /// Hands the move to the other side; a no-op once the game is decided.
    pub fn advance_turn(&mut self) {
        self.board.advance_turn();
    }

    pub fn is_in_check(&self, side: Side) -> bool {
        self.board.is_in_check(side)
    }

    pub fn side_to_move(&self) -> Side {
        self.board.side_to_move()
    }

    pub fn winner(&self) -> Option<Side> {
        self.board.winner()
    }

    /// Read-only view of the position for rendering collaborators.
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    /// Every applied move so far, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;

    fn c(file: i8, rank: i8) -> Coord {
        Coord::new(file, rank)
    }

    #[test]
    fn opening_pawn_push_is_recorded_and_turn_alternates() {
        let mut game = Game::new();
        assert_eq!(game.side_to_move(), Side::White);
        assert_eq!(
            game.apply_move(c(4, 1), c(4, 3), None),
            Ok(MoveCategory::Move)
        );
        game.advance_turn();
        assert_eq!(game.side_to_move(), Side::Black);
        assert_eq!(
            game.history(),
            &[MoveRecord {
                kind: PieceKind::Pawn,
                side: Side::White,
                start: c(4, 1),
                end: c(4, 3),
                category: MoveCategory::Move,
            }]
        );
    }

    #[test]
    fn rejection_leaves_state_untouched_and_turn_in_place() {
        let mut game = Game::new();
        let before = game.snapshot();
        assert!(game.apply_move(c(0, 0), c(0, 5), None).is_err());
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.side_to_move(), Side::White);
        assert!(game.history().is_empty());
    }

    #[test]
    fn moving_the_opponents_piece_is_rejected() {
        let mut game = Game::new();
        assert_eq!(
            game.apply_move(c(4, 6), c(4, 4), None),
            Err(MoveError::NoOwnPieceAtStart(c(4, 6)))
        );
    }

    #[test]
    #[should_panic(expected = "after the game has ended")]
    fn applying_a_move_after_the_game_ended_panics() {
        let mut board = Board::new();
        board.place(c(4, 0), Piece::new(PieceKind::King, Side::White));
        board.place(c(4, 7), Piece::new(PieceKind::King, Side::Black));
        board.place(c(4, 5), Piece::new(PieceKind::Rook, Side::White));
        let mut game = Game::from_board(board);
        game.apply_move(c(4, 5), c(4, 7), None).unwrap();
        assert_eq!(game.winner(), Some(Side::White));
        game.advance_turn();
        let _ = game.apply_move(c(4, 7), c(4, 6), None);
    }

    #[test]
    fn fools_mate_sets_the_winner() {
        let mut game = Game::new();
        for (start, end) in [
            (c(5, 1), c(5, 2)), // f-pawn one forward
            (c(4, 6), c(4, 4)), // e-pawn double step
            (c(6, 1), c(6, 3)), // g-pawn double step
        ] {
            game.apply_move(start, end, None).unwrap();
            game.advance_turn();
        }
        // Queen to the h-file diagonal: mate.
        assert_eq!(
            game.apply_move(c(3, 7), c(7, 3), None),
            Ok(MoveCategory::Move)
        );
        assert_eq!(game.winner(), Some(Side::Black));
        assert!(game.is_in_check(Side::White));
        // The decided game no longer hands the turn over.
        game.advance_turn();
        assert_eq!(game.side_to_move(), Side::Black);
    }
}
