use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::CheckersError;

pub const BOARD_SIZE: usize = 8;

/// One of the two players. Red moves first and starts on rows 5..=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "B")]
    Black,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }

    /// Row on which a man of this side is crowned.
    pub fn promotion_row(self) -> u8 {
        match self {
            Self::Red => 0,
            Self::Black => (BOARD_SIZE - 1) as u8,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Red => "R",
            Self::Black => "B",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub rank: Rank,
}

impl Piece {
    pub const fn man(side: Side) -> Self {
        Self {
            side,
            rank: Rank::Man,
        }
    }

    pub const fn king(side: Side) -> Self {
        Self {
            side,
            rank: Rank::King,
        }
    }

    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }

    /// Wire token: `"R"`, `"R*"`, `"B"` or `"B*"`.
    pub fn token(self) -> &'static str {
        match (self.side, self.rank) {
            (Side::Red, Rank::Man) => "R",
            (Side::Red, Rank::King) => "R*",
            (Side::Black, Rank::Man) => "B",
            (Side::Black, Rank::King) => "B*",
        }
    }
}

/// `None` is an empty square.
pub type Cell = Option<Piece>;

/// A board coordinate, always within `0..8` on both axes.
/// Only [`Position::new`] and [`Position::from_pair`] build one from outside the crate.
/// Serializes as `[row, col]`, the same shape the UI submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Result<Self, CheckersError> {
        if row as usize >= BOARD_SIZE || col as usize >= BOARD_SIZE {
            return Err(CheckersError::OutOfRange {
                row: row.into(),
                col: col.into(),
            });
        }
        Ok(Self { row, col })
    }

    /// Builds a position from a `[row, col]` slice as sent by the UI.
    /// Wrong length reports the missing component as `-1`.
    pub fn from_pair(pair: &[i64]) -> Result<Self, CheckersError> {
        let out_of_range = || CheckersError::OutOfRange {
            row: pair.first().copied().unwrap_or(-1),
            col: pair.get(1).copied().unwrap_or(-1),
        };
        match *pair {
            [row, col] => {
                let row = u8::try_from(row).map_err(|_| out_of_range())?;
                let col = u8::try_from(col).map_err(|_| out_of_range())?;
                Self::new(row, col)
            }
            _ => Err(out_of_range()),
        }
    }

    pub(crate) const fn from_index(row: usize, col: usize) -> Self {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Self {
            row: row as u8,
            col: col as u8,
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    pub(crate) fn index(self) -> (usize, usize) {
        (self.row as usize, self.col as usize)
    }

    /// Square halfway between `self` and `other`.
    pub(crate) fn midpoint(self, other: Self) -> Self {
        Self {
            row: (self.row + other.row) / 2,
            col: (self.col + other.col) / 2,
        }
    }

    /// Steps by `(dr, dc)`; `None` when the result leaves the board.
    pub(crate) fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.row, self.col).serialize(serializer)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    InProgress,
    WonBy(Side),
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::WonBy(_))
    }
}

/// Per-side tally, serialized as `{ "R": n, "B": n }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    #[serde(rename = "R")]
    pub red: u8,
    #[serde(rename = "B")]
    pub black: u8,
}

impl Tally {
    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Red => self.red,
            Side::Black => self.black,
        }
    }

    pub(crate) fn increment(&mut self, side: Side) {
        match side {
            Side::Red => self.red += 1,
            Side::Black => self.black += 1,
        }
    }
}

/// Public match snapshot returned from `create_or_fetch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Row-major cell tokens, `None` for empty squares.
    pub board: [[Option<&'static str>; BOARD_SIZE]; BOARD_SIZE],
    pub turn: Side,
    pub status: Status,
    pub captures: Tally,
    pub pieces: Tally,
    pub move_count: u32,
}

/// Snapshot after an accepted move.
/// Contract:
/// - `captured_piece` holds the removed piece's token on a capture.
/// - `captured_piece` is omitted for a plain step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResult {
    #[serde(flatten)]
    pub state: GameState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_piece: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_rejects_out_of_range() {
        assert!(Position::new(7, 7).is_ok());
        assert!(matches!(
            Position::new(8, 0),
            Err(CheckersError::OutOfRange { row: 8, col: 0 })
        ));
        assert!(Position::from_pair(&[1]).is_err());
        assert!(Position::from_pair(&[1, 2, 3]).is_err());
        assert_eq!(Position::from_pair(&[2, 5]).unwrap(), Position::new(2, 5).unwrap());
    }

    #[test]
    fn from_pair_does_not_wrap_large_or_negative_components() {
        assert_eq!(
            Position::from_pair(&[5, 258]),
            Err(CheckersError::OutOfRange { row: 5, col: 258 })
        );
        assert_eq!(
            Position::from_pair(&[-1, 2]),
            Err(CheckersError::OutOfRange { row: -1, col: 2 })
        );
        assert_eq!(
            Position::from_pair(&[3]),
            Err(CheckersError::OutOfRange { row: 3, col: -1 })
        );
    }

    #[test]
    fn piece_tokens() {
        assert_eq!(Piece::man(Side::Red).token(), "R");
        assert_eq!(Piece::king(Side::Red).token(), "R*");
        assert_eq!(Piece::man(Side::Black).token(), "B");
        assert_eq!(Piece::king(Side::Black).token(), "B*");
    }

    #[test]
    fn status_serializes_as_tagged_value() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"inProgress\""
        );
        assert_eq!(
            serde_json::to_string(&Status::WonBy(Side::Black)).unwrap(),
            "{\"wonBy\":\"B\"}"
        );
    }

    #[test]
    fn positions_serialize_as_pairs() {
        let mv = Move {
            from: Position::new(5, 2).unwrap(),
            to: Position::new(4, 3).unwrap(),
        };

        assert_eq!(
            serde_json::to_string(&mv).unwrap(),
            "{\"from\":[5,2],\"to\":[4,3]}"
        );
    }

    #[test]
    fn offset_stays_on_board() {
        let corner = Position::new(0, 0).unwrap();
        assert_eq!(corner.offset(-1, 1), None);
        assert_eq!(corner.offset(1, 1), Some(Position::new(1, 1).unwrap()));
    }
}
