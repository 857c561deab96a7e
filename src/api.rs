//! Stateless request handlers
//!
//! Every request carries the whole board and every response returns it, so
//! nothing is kept between calls. Boards use the wire encoding of
//! [`Cell::code`](crate::board::Cell::code), top row first.

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    board::{Board, Side},
    error::EngineError,
    profile::{Difficulty, DifficultyConfig},
    search::Searcher,
    win::{game_over, winner, Coord},
    WIDTH,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameRequest {
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Overrides the profile's choice of who moves first
    #[serde(rename = "aiStarts", default)]
    pub ai_starts: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub board: Vec<Vec<i8>>,
    pub column: i64,
    #[serde(default)]
    pub difficulty: Difficulty,
}

/// A request of the line-based JSON protocol
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    NewGame(NewGameRequest),
    Move(MoveRequest),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    Player,
    Ai,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateResponse {
    pub board: Vec<Vec<i8>>,
    pub turn: Turn,
    pub over: bool,
    /// Wire code of the winning side
    pub winner: Option<i8>,
    pub winning_pieces: Vec<Coord>,
    #[serde(rename = "aiMove")]
    pub ai_move: Option<usize>,
    #[serde(rename = "legalMoves")]
    pub legal_moves: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

impl From<&EngineError> for ErrorResponse {
    fn from(err: &EngineError) -> Self {
        Self {
            error: err.to_string(),
            status: err.status_code(),
        }
    }
}

impl StateResponse {
    fn from_board(board: &Board, turn: Turn, ai_move: Option<usize>) -> Self {
        let (winner, winning_pieces) = match winner(board) {
            Some((side, cells)) => (Some(side.code()), cells.to_vec()),
            None => (None, Vec::new()),
        };
        Self {
            board: board.to_rows(),
            turn,
            over: game_over(board),
            winner,
            winning_pieces,
            ai_move,
            legal_moves: board.legal_moves().collect(),
        }
    }
}

/// Starts a game, letting the engine open if the request or the profile
/// says so
pub fn new_game(config: &DifficultyConfig, req: &NewGameRequest) -> StateResponse {
    let profile = config.profile(req.difficulty);
    let mut board = Board::new();
    let mut ai_move = None;

    if req.ai_starts.unwrap_or(profile.ai_moves_first) {
        let result = Searcher::new(*profile).pick_best_move(&board);
        if let Some(column) = result.column {
            board = board.drop_piece(column, Side::Computer);
            ai_move = Some(column);
        }
    }

    info!(
        "new {} game, engine opened with {:?}",
        req.difficulty, ai_move
    );
    StateResponse::from_board(&board, Turn::Player, ai_move)
}

/// Plays the human's move and, unless that ended the game, the engine's reply
pub fn play_move(
    config: &DifficultyConfig,
    req: &MoveRequest,
) -> Result<StateResponse, EngineError> {
    let board = Board::from_rows(&req.board)?;

    if req.column < 0 || req.column >= WIDTH as i64 {
        return Err(EngineError::InvalidMove { column: req.column });
    }
    let board = board
        .apply_move(req.column as usize, Side::Human)
        .map_err(|_| EngineError::InvalidMove { column: req.column })?;

    if game_over(&board) {
        info!("human move {} ended the game", req.column);
        let mut state = StateResponse::from_board(&board, Turn::Ai, None);
        state.legal_moves.clear();
        return Ok(state);
    }

    let profile = config.profile(req.difficulty);
    let result = Searcher::new(*profile).pick_best_move(&board);
    let board = match result.column {
        Some(column) => board.apply_move(column, Side::Computer)?,
        None => board,
    };

    info!(
        "human played {}, engine replied {:?} (score {})",
        req.column, result.column, result.score
    );
    Ok(StateResponse::from_board(&board, Turn::Player, result.column))
}

/// Dispatches a request of the JSON protocol
pub fn handle(config: &DifficultyConfig, req: &Request) -> Result<StateResponse, EngineError> {
    match req {
        Request::NewGame(req) => Ok(new_game(config, req)),
        Request::Move(req) => play_move(config, req),
    }
}
