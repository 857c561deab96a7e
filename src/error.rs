/// Errors raised by the engine and the request layer wrapped around it.
///
/// Ordinary game flow (a full board, no move available, a draw) is never an
/// error; it is reported through return values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid move, column {column} is out of range or full")]
    InvalidMove { column: i64 },

    #[error("malformed board: {0}")]
    MalformedBoard(String),

    #[error("unknown difficulty '{0}', expected easy, medium or hard")]
    UnknownDifficulty(String),

    #[error("difficulty config validation error: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// The status code a request/response boundary reports for this error
    ///
    /// Rejected moves are client errors (400), inputs that do not have the
    /// expected shape are validation errors (422).
    pub fn status_code(&self) -> u16 {
        match self {
            EngineError::InvalidMove { .. } => 400,
            EngineError::MalformedBoard(_)
            | EngineError::UnknownDifficulty(_)
            | EngineError::InvalidConfig(_) => 422,
        }
    }
}
