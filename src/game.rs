use tracing::{debug, info};

use crate::board::Board;
use crate::error::CheckersError;
use crate::rules;
use crate::types::{GameState, Move, MoveResult, Position, Side, Status, Tally};

/// First side to move in every match.
pub const STARTING_SIDE: Side = Side::Red;

/// One match: its board, side to move, capture tally and status.
/// `submit_move` is the only mutating operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    board: Board,
    turn: Side,
    captures: Tally,
    status: Status,
    move_count: u32,
}

impl Match {
    pub fn new() -> Self {
        Self::from_board(Board::new(), STARTING_SIDE)
    }

    pub(crate) fn from_board(board: Board, turn: Side) -> Self {
        let mut game = Self {
            board,
            turn,
            captures: Tally::default(),
            status: Status::InProgress,
            move_count: 0,
        };
        game.refresh_status();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn captures(&self) -> Tally {
        self.captures
    }

    /// Validates and applies `from -> to` for the side to move.
    /// On error the match is left untouched.
    pub fn submit_move(&mut self, from: Position, to: Position) -> Result<MoveResult, CheckersError> {
        if self.status.is_terminal() {
            return Err(CheckersError::GameOver);
        }

        let mover = self.turn;
        let verdict = rules::validate(&self.board, from, to, mover)?;
        let applied = rules::apply(&mut self.board, Move { from, to }, verdict);

        if applied.captured.is_some() {
            self.captures.increment(mover);
        }
        self.turn = mover.opponent();
        self.move_count += 1;
        self.refresh_status();

        debug!(
            side = %mover,
            %from,
            %to,
            captured = applied.captured.is_some(),
            promoted = applied.promoted,
            "move applied"
        );
        if let Status::WonBy(winner) = self.status {
            info!(%winner, moves = self.move_count, "match finished");
        }

        Ok(MoveResult {
            state: self.to_game_state(),
            captured_piece: applied.captured.map(|piece| piece.token()),
        })
    }

    /// Moves available to the side to move; empty once the match is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        rules::legal_moves(&self.board, self.turn)
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board.to_tokens(),
            turn: self.turn,
            status: self.status,
            captures: self.captures,
            pieces: self.board.count(),
            move_count: self.move_count,
        }
    }

    fn refresh_status(&mut self) {
        let pieces = self.board.count();
        for side in [Side::Red, Side::Black] {
            if pieces.get(side) == 0 {
                self.status = Status::WonBy(side.opponent());
            }
        }
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}
