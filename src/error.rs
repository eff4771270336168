//! Errors raised while loading, saving or playing on a [`Board`](crate::board::Board)

use crate::{HEIGHT, WIDTH};

/// Errors that can occur when reading, writing or modifying a board
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("invalid value '{found}' at block [{row}, {column}]")]
    InvalidCell {
        row: usize,
        column: usize,
        found: char,
    },

    #[error("row {row} has {length} blocks, expected {}", WIDTH)]
    RowLength { row: usize, length: usize },

    #[error("expected {} board rows and a turn line, found {found} lines", HEIGHT)]
    MissingLines { found: usize },

    #[error("invalid turn value '{0}', expected 1 or 2")]
    InvalidTurn(String),

    #[error("unexpected data after the turn line at line {line}")]
    TrailingData { line: usize },

    #[error("tile at block [{row}, {column}] is floating above an empty block")]
    FloatingPiece { row: usize, column: usize },

    #[error("Invalid move, column {column} out of range. Columns must be between 0 and {}", WIDTH - 1)]
    InvalidMove { column: usize },

    #[error("Invalid move, column {column} full")]
    ColumnFull { column: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BoardError {
    /// Whether this error comes from malformed board text rather than storage or play
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            BoardError::InvalidCell { .. }
                | BoardError::RowLength { .. }
                | BoardError::MissingLines { .. }
                | BoardError::InvalidTurn(_)
                | BoardError::TrailingData { .. }
                | BoardError::FloatingPiece { .. }
        )
    }
}
