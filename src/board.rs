use crate::error::CheckersError;
use crate::types::{BOARD_SIZE, Cell, Piece, Position, Rank, Side, Tally};

const STARTING_ROWS: usize = 3;

/// 8x8 checkers board, row-major.
/// Pieces only ever stand on dark squares (`(row + col)` odd).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the starting position:
    /// black men on rows 0..=2, red men on rows 5..=7, dark squares only.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for row in 0..BOARD_SIZE {
            let side = if row < STARTING_ROWS {
                Side::Black
            } else if row >= BOARD_SIZE - STARTING_ROWS {
                Side::Red
            } else {
                continue;
            };
            for col in 0..BOARD_SIZE {
                let pos = Position::from_index(row, col);
                if pos.is_dark() {
                    board.place(pos, Piece::man(side));
                }
            }
        }
        board
    }

    pub(crate) fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Returns the cell at `(row, col)`.
    pub fn get(&self, row: u8, col: u8) -> Result<Cell, CheckersError> {
        Position::new(row, col).map(|pos| self.at(pos))
    }

    pub fn at(&self, pos: Position) -> Cell {
        let (r, c) = pos.index();
        self.cells[r][c]
    }

    /// Returns remaining pieces per side.
    pub fn count(&self) -> Tally {
        let mut tally = Tally::default();
        for piece in self.cells.iter().flatten().flatten() {
            tally.increment(piece.side);
        }
        tally
    }

    /// Iterates occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| (Position::from_index(row, col), piece))
            })
        })
    }

    /// Converts the board to wire tokens.
    pub fn to_tokens(&self) -> [[Option<&'static str>; BOARD_SIZE]; BOARD_SIZE] {
        self.cells.map(|line| line.map(|cell| cell.map(Piece::token)))
    }

    // Mutation primitives below are unchecked; legality belongs to `rules`.

    pub(crate) fn place(&mut self, pos: Position, piece: Piece) {
        let (r, c) = pos.index();
        self.cells[r][c] = Some(piece);
    }

    pub(crate) fn remove(&mut self, pos: Position) -> Cell {
        let (r, c) = pos.index();
        self.cells[r][c].take()
    }

    pub(crate) fn relocate(&mut self, from: Position, to: Position) {
        if let Some(piece) = self.remove(from) {
            self.place(to, piece);
        }
    }

    pub(crate) fn promote(&mut self, pos: Position) {
        let (r, c) = pos.index();
        if let Some(piece) = self.cells[r][c].as_mut() {
            piece.rank = Rank::King;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t01_starting_layout_has_twelve_men_per_side_on_dark_squares() {
        let board = Board::new();

        assert_eq!(board.count(), Tally { red: 12, black: 12 });
        for (pos, piece) in board.pieces() {
            assert!(pos.is_dark(), "piece on light square {pos}");
            assert!(!piece.is_king());
            match piece.side {
                Side::Black => assert!(pos.row() <= 2),
                Side::Red => assert!(pos.row() >= 5),
            }
        }
        for row in 3..5 {
            for col in 0..8 {
                assert_eq!(board.get(row, col).unwrap(), None);
            }
        }
    }

    #[test]
    fn get_rejects_out_of_range() {
        let board = Board::new();

        assert!(matches!(
            board.get(0, 8),
            Err(CheckersError::OutOfRange { row: 0, col: 8 })
        ));
        assert_eq!(board.get(0, 1).unwrap(), Some(Piece::man(Side::Black)));
        assert_eq!(board.get(7, 0).unwrap(), Some(Piece::man(Side::Red)));
    }

    #[test]
    fn relocate_remove_and_promote() {
        let mut board = Board::empty();
        let from = Position::new(1, 2).unwrap();
        let to = Position::new(0, 1).unwrap();
        board.place(from, Piece::man(Side::Red));

        board.relocate(from, to);
        board.promote(to);

        assert_eq!(board.at(from), None);
        assert_eq!(board.at(to), Some(Piece::king(Side::Red)));
        assert_eq!(board.remove(to), Some(Piece::king(Side::Red)));
        assert_eq!(board.count(), Tally::default());
    }

    #[test]
    fn tokens_match_cells() {
        let tokens = Board::new().to_tokens();

        assert_eq!(tokens[0][1], Some("B"));
        assert_eq!(tokens[0][0], None);
        assert_eq!(tokens[5][0], Some("R"));
        assert_eq!(tokens[4][1], None);
    }
}
