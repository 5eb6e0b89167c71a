//! Move validation and application.
//!
//! Men and kings share the same reach: one diagonal step, or a two-square
//! jump over an opponent piece. Men may move backward, captures are never
//! mandatory, and kings do not fly.

use crate::board::Board;
use crate::error::IllegalMove;
use crate::types::{Move, Piece, Position, Side};

const MAX_DISTANCE: u8 = 2;
const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Outcome of a legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Square of the piece jumped over, if the move is a capture.
    pub capture: Option<Position>,
}

/// Changes made to the board by [`apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub captured: Option<Piece>,
    pub promoted: bool,
}

/// Checks `from -> to` for `side`. Fails on the first violated rule.
pub fn validate(
    board: &Board,
    from: Position,
    to: Position,
    side: Side,
) -> Result<Verdict, IllegalMove> {
    let piece = board.at(from).ok_or(IllegalMove::EmptySource { from })?;
    if piece.side != side {
        return Err(IllegalMove::NotYourPiece { from });
    }

    if board.at(to).is_some() {
        return Err(IllegalMove::DestinationOccupied { to });
    }

    let d_row = from.row().abs_diff(to.row());
    let d_col = from.col().abs_diff(to.col());
    if d_row != d_col || d_row == 0 {
        return Err(IllegalMove::NotDiagonal { from, to });
    }
    if d_row > MAX_DISTANCE {
        return Err(IllegalMove::TooFar { from, to });
    }

    if d_row == MAX_DISTANCE {
        let over = from.midpoint(to);
        return match board.at(over) {
            Some(jumped) if jumped.side == side.opponent() => Ok(Verdict {
                capture: Some(over),
            }),
            _ => Err(IllegalMove::NoPieceToCapture { over }),
        };
    }

    Ok(Verdict { capture: None })
}

/// Applies a validated move: relocate, clear the jumped square, then crown
/// if the destination is the mover's promotion row.
pub fn apply(board: &mut Board, mv: Move, verdict: Verdict) -> Applied {
    board.relocate(mv.from, mv.to);
    let captured = verdict.capture.and_then(|over| board.remove(over));

    let promoted = match board.at(mv.to) {
        Some(piece) if !piece.is_king() && mv.to.row() == piece.side.promotion_row() => {
            board.promote(mv.to);
            true
        }
        _ => false,
    };

    Applied { captured, promoted }
}

/// Every move `validate` accepts for `side`, in row-major order of origin.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut moves = Vec::new();
    for (from, piece) in board.pieces() {
        if piece.side != side {
            continue;
        }
        for distance in 1..=MAX_DISTANCE as i8 {
            for (dr, dc) in DIAGONALS {
                let Some(to) = from.offset(dr * distance, dc * distance) else {
                    continue;
                };
                if validate(board, from, to, side).is_ok() {
                    moves.push(Move { from, to });
                }
            }
        }
    }
    moves
}
