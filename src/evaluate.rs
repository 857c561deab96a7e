//! Static evaluation of positions at the search horizon

use serde::{Deserialize, Serialize};

use crate::{
    board::{Board, Side},
    win::{detect_win, Window, WINDOWS},
    HEIGHT,
};

/// Score of a position won by the evaluated side under [`Evaluator::Terminal`]
pub const TERMINAL_WIN: i32 = 10_000;

/// Column weights of the heuristic's centre bonus
const CENTRE_WEIGHTS: [i32; crate::WIDTH] = [0, 0, 2, 3, 2, 0, 0];

const FOUR: i32 = 100_000;
const OPEN_THREE: i32 = 100;
const OPEN_TWO: i32 = 10;
// opponent threats weigh slightly more so that blocking beats building
const OPPONENT_OPEN_THREE: i32 = -120;
const OPPONENT_OPEN_TWO: i32 = -12;

/// The scoring function applied when the search reaches its depth limit
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Evaluator {
    /// Only distinguishes won, lost and undecided positions
    Terminal,
    /// Centre control plus counting of open lines
    Heuristic,
}

impl Evaluator {
    /// Scores `board` from `side`'s point of view
    pub fn evaluate(self, board: &Board, side: Side) -> i32 {
        match self {
            Evaluator::Terminal => terminal(board, side),
            Evaluator::Heuristic => heuristic(board, side),
        }
    }
}

/// +`TERMINAL_WIN` if `side` has four in a row, -`TERMINAL_WIN` if its
/// opponent does, 0 otherwise
pub fn terminal(board: &Board, side: Side) -> i32 {
    if detect_win(board, side).is_some() {
        TERMINAL_WIN
    } else if detect_win(board, side.other()).is_some() {
        -TERMINAL_WIN
    } else {
        0
    }
}

/// Weighted evaluation of centre control and the open lines of both sides
pub fn heuristic(board: &Board, side: Side) -> i32 {
    let own = side.cell();

    let mut score = 0;
    for row in 0..HEIGHT {
        for (column, weight) in CENTRE_WEIGHTS.iter().enumerate() {
            if board.cell(row, column) == own {
                score += weight;
            }
        }
    }

    score
        + WINDOWS
            .iter()
            .map(|window| score_window(board, window, side))
            .sum::<i32>()
}

/// Scores a single window of four cells for `side`
pub fn score_window(board: &Board, window: &Window, side: Side) -> i32 {
    let (own_cell, opp_cell) = (side.cell(), side.other().cell());
    let (mut own, mut opp, mut empty) = (0, 0, 0);
    for &(row, column) in window.iter() {
        match board.cell(row, column) {
            c if c == own_cell => own += 1,
            c if c == opp_cell => opp += 1,
            _ => empty += 1,
        }
    }

    let mut score = 0;
    if own == 4 {
        score += FOUR;
    } else if own == 3 && empty == 1 {
        score += OPEN_THREE;
    } else if own == 2 && empty == 2 {
        score += OPEN_TWO;
    }

    if opp == 3 && empty == 1 {
        score += OPPONENT_OPEN_THREE;
    } else if opp == 2 && empty == 2 {
        score += OPPONENT_OPEN_TWO;
    }
    score
}
