//! Four-in-a-row detection
//!
//! Every line of four cells on the board (a "window") is enumerated once at
//! compile time. Win detection and the heuristic evaluator both walk this
//! table, so they agree on which cells make up a line.

use crate::{
    board::{Board, Side},
    CONNECT, HEIGHT, WIDTH,
};

/// A `(row, column)` board coordinate, row 0 at the top
pub type Coord = (usize, usize);

/// The coordinates of four aligned cells
pub type Window = [Coord; CONNECT];

const HORIZONTAL: usize = HEIGHT * (WIDTH - CONNECT + 1);
const VERTICAL: usize = WIDTH * (HEIGHT - CONNECT + 1);
const DIAGONAL: usize = (HEIGHT - CONNECT + 1) * (WIDTH - CONNECT + 1);

/// The number of distinct windows on the board
pub const WINDOW_COUNT: usize = HORIZONTAL + VERTICAL + 2 * DIAGONAL;

/// Builds the window table
///
/// Windows are grouped horizontal, vertical, "/" and "\" in that order, each
/// group scanned top-to-bottom then left-to-right. The first window of the
/// table containing a four-in-a-row is the one reported by [`detect_win`].
pub const fn windows() -> [Window; WINDOW_COUNT] {
    let mut windows = [[(0, 0); CONNECT]; WINDOW_COUNT];
    let mut n = 0;

    // horizontal
    let mut row = 0;
    while row < HEIGHT {
        let mut column = 0;
        while column + CONNECT <= WIDTH {
            let mut i = 0;
            while i < CONNECT {
                windows[n][i] = (row, column + i);
                i += 1;
            }
            n += 1;
            column += 1;
        }
        row += 1;
    }

    // vertical
    let mut column = 0;
    while column < WIDTH {
        let mut row = 0;
        while row + CONNECT <= HEIGHT {
            let mut i = 0;
            while i < CONNECT {
                windows[n][i] = (row + i, column);
                i += 1;
            }
            n += 1;
            row += 1;
        }
        column += 1;
    }

    // diagonal /, running down and to the right from the top row
    let mut row = 0;
    while row + CONNECT <= HEIGHT {
        let mut column = 0;
        while column + CONNECT <= WIDTH {
            let mut i = 0;
            while i < CONNECT {
                windows[n][i] = (row + i, column + i);
                i += 1;
            }
            n += 1;
            column += 1;
        }
        row += 1;
    }

    // diagonal \, running up and to the right from the bottom row
    let mut row = CONNECT - 1;
    while row < HEIGHT {
        let mut column = 0;
        while column + CONNECT <= WIDTH {
            let mut i = 0;
            while i < CONNECT {
                windows[n][i] = (row - i, column + i);
                i += 1;
            }
            n += 1;
            column += 1;
        }
        row += 1;
    }

    windows
}

/// All windows of the board in scan order
pub const WINDOWS: [Window; WINDOW_COUNT] = windows();

/// Returns the first window in which `side` has four pieces
pub fn detect_win(board: &Board, side: Side) -> Option<Window> {
    let cell = side.cell();
    WINDOWS
        .iter()
        .find(|window| window.iter().all(|&(row, column)| board.cell(row, column) == cell))
        .copied()
}

/// Returns the side with four in a row and its winning cells
///
/// The computer side is checked first.
pub fn winner(board: &Board) -> Option<(Side, Window)> {
    [Side::Computer, Side::Human]
        .iter()
        .find_map(|&side| detect_win(board, side).map(|window| (side, window)))
}

/// Whether the game on `board` has ended, by a win or a full board
pub fn game_over(board: &Board) -> bool {
    winner(board).is_some() || !board.has_any_move()
}
