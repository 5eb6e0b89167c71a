use crate::types::Position;

/// Reasons the rules engine rejects a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("no piece at {from}")]
    EmptySource { from: Position },

    #[error("piece at {from} does not belong to the side to move")]
    NotYourPiece { from: Position },

    #[error("destination {to} is occupied")]
    DestinationOccupied { to: Position },

    #[error("move {from} -> {to} is not diagonal")]
    NotDiagonal { from: Position, to: Position },

    #[error("move {from} -> {to} covers more than two squares")]
    TooFar { from: Position, to: Position },

    #[error("no opponent piece to capture at {over}")]
    NoPieceToCapture { over: Position },
}

/// Errors returned by the match and registry layers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckersError {
    #[error("coordinates ({row}, {col}) are off the board")]
    OutOfRange { row: i64, col: i64 },

    #[error(transparent)]
    Illegal(#[from] IllegalMove),

    #[error("game is already over")]
    GameOver,

    #[error("match {match_id} not found")]
    NotFound { match_id: String },

    #[error("invalid match id: {reason}")]
    InvalidMatchId { reason: String },

    #[error("registry is full ({capacity} matches)")]
    RegistryFull { capacity: usize },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = CheckersError::from(IllegalMove::DestinationOccupied {
            to: Position::new(4, 3).unwrap(),
        });
        assert_eq!(err.to_string(), "destination [4, 3] is occupied");

        let err = CheckersError::NotFound {
            match_id: "abc".into(),
        };
        assert_eq!(err.to_string(), "match abc not found");
    }

    #[test]
    fn errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CheckersError>();
        assert_send_sync::<IllegalMove>();
    }
}
