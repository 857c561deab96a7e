//! A depth-limited minimax agent for Connect 4

use log::debug;
use rayon::prelude::*;

use crate::{
    board::{Board, Side},
    profile::DifficultyProfile,
    win::detect_win,
};

/// Score of a move that wins on the spot
pub const WIN_SCORE: i64 = 1_000_000_000;
/// Score of a move that stops the opponent winning on their next turn
pub const BLOCK_SCORE: i64 = 999_999;
/// Score reported when there is no move to play
pub const NO_MOVE_SCORE: i64 = i64::MIN;

const NEG_INFINITY: i64 = i64::MIN;
const INFINITY: i64 = i64::MAX;

/// The move chosen by a search and its score
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchResult {
    /// The chosen column, `None` if the board is full
    pub column: Option<usize>,
    pub score: i64,
}

/// An agent that picks moves for one side using minimax with alpha-beta
/// pruning
///
/// # Notes
/// The agent looks `depth` plies ahead, alternating between its own moves
/// (maximizing) and the opponent's (minimizing), and scores the positions at
/// the horizon with the profile's evaluator. Moves are tried centre first,
/// which both breaks ties in favour of central columns and lets alpha-beta
/// prune more.
///
/// # Position Scoring
/// Immediate wins score [`WIN_SCORE`] and forced blocks [`BLOCK_SCORE`] when
/// the profile short-circuits; every other score comes from the evaluator,
/// seen from the searching side.
#[derive(Clone, Debug)]
pub struct Searcher {
    profile: DifficultyProfile,
    side: Side,

    /// The number of nodes searched by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl Searcher {
    /// Creates a new `Searcher` playing the computer side
    pub fn new(profile: DifficultyProfile) -> Self {
        Self {
            profile,
            side: Side::Computer,
            node_count: 0,
        }
    }

    /// Makes an existing `Searcher` play for `side` instead
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    /// Picks a move searching to the profile's depth
    pub fn pick_best_move(&mut self, board: &Board) -> SearchResult {
        self.pick_best_move_at(board, self.profile.depth)
    }

    /// Picks a move searching `depth` plies ahead
    ///
    /// A depth of 0 still looks one ply ahead and evaluates each reply
    /// directly.
    pub fn pick_best_move_at(&mut self, board: &Board, depth: u32) -> SearchResult {
        self.node_count += 1;

        if let Some(result) = self.pre_search(board) {
            return result;
        }

        let mut alpha = NEG_INFINITY;
        let beta = INFINITY;
        let mut best = SearchResult {
            column: None,
            score: NEG_INFINITY,
        };

        for column in board.legal_moves() {
            let child = board.drop_piece(column, self.side);
            let score = self.minimax(&child, depth.saturating_sub(1), alpha, beta, false);
            // later columns only replace the best move with a strictly better score
            if best.column.is_none() || score > best.score {
                best = SearchResult {
                    column: Some(column),
                    score,
                };
            }
            alpha = alpha.max(best.score);
            if alpha >= beta {
                break;
            }
        }

        debug!(
            "searched {} nodes at depth {}: column {:?}, score {}",
            self.node_count, depth, best.column, best.score
        );
        best
    }

    /// Picks the same move as [`pick_best_move`](Searcher::pick_best_move),
    /// searching the root moves in parallel
    ///
    /// Every root move is searched with a full window, so more nodes are
    /// visited than in the sequential search.
    pub fn par_pick_best_move(&mut self, board: &Board) -> SearchResult {
        self.node_count += 1;

        if let Some(result) = self.pre_search(board) {
            return result;
        }

        let depth = self.profile.depth;
        let template = Searcher {
            node_count: 0,
            ..self.clone()
        };
        let columns: Vec<usize> = board.legal_moves().collect();
        let scored: Vec<(usize, i64, usize)> = columns
            .par_iter()
            .map(|&column| {
                let mut searcher = template.clone();
                let child = board.drop_piece(column, searcher.side);
                let score = searcher.minimax(
                    &child,
                    depth.saturating_sub(1),
                    NEG_INFINITY,
                    INFINITY,
                    false,
                );
                (column, score, searcher.node_count)
            })
            .collect();

        // combine in move order, not completion order, to keep the tie-break
        let mut best = SearchResult {
            column: None,
            score: NEG_INFINITY,
        };
        for (column, score, nodes) in scored {
            self.node_count += nodes;
            if best.column.is_none() || score > best.score {
                best = SearchResult {
                    column: Some(column),
                    score,
                };
            }
        }

        debug!(
            "searched {} nodes in parallel at depth {}: column {:?}, score {}",
            self.node_count, depth, best.column, best.score
        );
        best
    }

    /// Handles full boards and, when the profile allows it, immediate wins
    /// and forced blocks
    fn pre_search(&self, board: &Board) -> Option<SearchResult> {
        if board.legal_moves().next().is_none() {
            return Some(SearchResult {
                column: None,
                score: NO_MOVE_SCORE,
            });
        }

        if self.profile.short_circuit {
            // check for a win on this move
            for column in board.legal_moves() {
                if detect_win(&board.drop_piece(column, self.side), self.side).is_some() {
                    return Some(SearchResult {
                        column: Some(column),
                        score: WIN_SCORE,
                    });
                }
            }
            // check for an opponent win that has to be blocked
            let opponent = self.side.other();
            for column in board.legal_moves() {
                if detect_win(&board.drop_piece(column, opponent), opponent).is_some() {
                    return Some(SearchResult {
                        column: Some(column),
                        score: BLOCK_SCORE,
                    });
                }
            }
        }
        None
    }

    /// Performs game tree search
    ///
    /// Returns the score of `board` for the searching side, exact when it
    /// lies strictly between `alpha` and `beta`.
    fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
    ) -> i64 {
        self.node_count += 1;

        if depth == 0 || !board.has_any_move() {
            return self.profile.evaluator.evaluate(board, self.side) as i64;
        }

        if maximizing {
            let mut best = NEG_INFINITY;
            for column in board.legal_moves() {
                let child = board.drop_piece(column, self.side);
                let score = self.minimax(&child, depth - 1, alpha, beta, false);
                best = best.max(score);
                alpha = alpha.max(best);
                // beta cutoff, the opponent will avoid this branch
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let opponent = self.side.other();
            let mut best = INFINITY;
            for column in board.legal_moves() {
                let child = board.drop_piece(column, opponent);
                let score = self.minimax(&child, depth - 1, alpha, beta, true);
                best = best.min(score);
                beta = beta.min(best);
                // alpha cutoff, we already have something better elsewhere
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}
