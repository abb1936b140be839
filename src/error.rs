use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimatorError {
    #[error("invalid board size {width}x{height}: each side must be between 1 and {max_side}")]
    InvalidBoardSize { width: i32, height: i32, max_side: i32 },

    #[error("invalid position {0:?}: expected \"x,y\"")]
    InvalidPosition(String),

    #[error("unknown or destroyed handle {0}")]
    UnknownHandle(u32),
}
