//! The game board and move generation

use std::fmt;

use crate::{error::EngineError, HEIGHT, WIDTH};

/// One of the two players
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Side {
    Human,
    Computer,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Side::Human => Cell::Human,
            Side::Computer => Cell::Computer,
        }
    }

    /// Wire encoding of a side's pieces
    pub fn code(self) -> i8 {
        self.cell().code()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    Human,
    Computer,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Wire encoding: 0 is empty, -1 a human piece, 1 a computer piece
    pub fn code(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::Human => -1,
            Cell::Computer => 1,
        }
    }

    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            -1 => Some(Cell::Human),
            1 => Some(Cell::Computer),
            _ => None,
        }
    }
}

/// Returns the columns ordered from the middle outwards, left before right,
/// as the middle columns are often better moves
pub const fn move_order() -> [usize; WIDTH] {
    let mut move_order = [0; WIDTH];
    let mut i = 0;
    while i < WIDTH {
        move_order[i] = if i % 2 == 0 {
            WIDTH / 2 + i / 2
        } else {
            WIDTH / 2 - (i / 2 + 1)
        };
        i += 1;
    }
    move_order
}

const MOVE_ORDER: [usize; WIDTH] = move_order();

/// A Connect 4 position
///
/// Row 0 is the top of the board, row `HEIGHT - 1` the bottom. Pieces always
/// rest on the lowest empty row of their column, so a column is full exactly
/// when its top cell is occupied.
///
/// Boards are small `Copy` values: playing a move returns a new board and
/// leaves the original untouched, so sibling branches of a search never alias.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
}

impl Board {
    /// Creates an empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    /// Plays a sequence of 0-indexed columns given as digits, alternating
    /// sides starting with `first`
    pub fn from_moves<S: AsRef<str>>(moves: S, first: Side) -> Result<Self, EngineError> {
        let mut board = Self::new();
        let mut side = first;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10) {
                Some(column) => {
                    board = board.apply_move(column as usize, side)?;
                    side = side.other();
                }
                None => {
                    return Err(EngineError::MalformedBoard(format!(
                        "could not parse '{}' as a valid move",
                        column_char
                    )))
                }
            }
        }
        Ok(board)
    }

    /// Builds a board from rows of wire-encoded cells, top row first
    ///
    /// The rows must form a `HEIGHT` x `WIDTH` grid of known cell codes with
    /// every column bottom-justified.
    pub fn from_rows(rows: &[Vec<i8>]) -> Result<Self, EngineError> {
        if rows.len() != HEIGHT {
            return Err(EngineError::MalformedBoard(format!(
                "expected {} rows, found {}",
                HEIGHT,
                rows.len()
            )));
        }

        let mut board = Self::new();
        for (row, values) in rows.iter().enumerate() {
            if values.len() != WIDTH {
                return Err(EngineError::MalformedBoard(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    values.len(),
                    WIDTH
                )));
            }
            for (column, &code) in values.iter().enumerate() {
                board.cells[row][column] = Cell::from_code(code).ok_or_else(|| {
                    EngineError::MalformedBoard(format!(
                        "unknown cell value {} at ({}, {})",
                        code, row, column
                    ))
                })?;
            }
        }

        // no floating pieces
        for column in 0..WIDTH {
            for row in 1..HEIGHT {
                if !board.cells[row - 1][column].is_empty() && board.cells[row][column].is_empty() {
                    return Err(EngineError::MalformedBoard(format!(
                        "column {} has a gap below row {}",
                        column,
                        row - 1
                    )));
                }
            }
        }
        Ok(board)
    }

    /// Wire-encoded rows, top row first
    pub fn to_rows(&self) -> Vec<Vec<i8>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.code()).collect())
            .collect()
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    /// Whether a piece can be dropped in `column`
    pub fn is_valid_column(&self, column: usize) -> bool {
        column < WIDTH && self.cells[0][column].is_empty()
    }

    /// Whether any cell on the board is still empty
    pub fn has_any_move(&self) -> bool {
        self.cells[0].iter().any(|cell| cell.is_empty())
    }

    /// Returns a new board with `side`'s piece dropped into `column`
    pub fn apply_move(&self, column: usize, side: Side) -> Result<Self, EngineError> {
        if !self.is_valid_column(column) {
            return Err(EngineError::InvalidMove {
                column: column as i64,
            });
        }
        Ok(self.drop_piece(column, side))
    }

    /// Drops a piece without checking the column, for moves taken from
    /// [`legal_moves`](Board::legal_moves)
    pub(crate) fn drop_piece(&self, column: usize, side: Side) -> Self {
        let mut next = *self;
        if let Some(row) = (0..HEIGHT).rev().find(|&row| next.cells[row][column].is_empty()) {
            next.cells[row][column] = side.cell();
        }
        next
    }

    /// The row the next piece dropped into `column` lands on
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        if column >= WIDTH {
            return None;
        }
        (0..HEIGHT).rev().find(|&row| self.cells[row][column].is_empty())
    }

    /// Legal columns, centre first
    pub fn legal_moves(&self) -> LegalMoves<'_> {
        LegalMoves {
            board: self,
            index: 0,
        }
    }

    pub fn num_pieces(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            for cell in row.iter() {
                let c = match cell {
                    Cell::Empty => '.',
                    Cell::Human => 'x',
                    Cell::Computer => 'o',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the playable columns of a board in centre-out order
pub struct LegalMoves<'a> {
    board: &'a Board,
    index: usize,
}

impl<'a> Iterator for LegalMoves<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < WIDTH {
            let column = MOVE_ORDER[self.index];
            self.index += 1;
            if self.board.is_valid_column(column) {
                return Some(column);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(WIDTH - self.index))
    }
}
