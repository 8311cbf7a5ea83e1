//! Error types for cutting stock column generation.

use thiserror::Error;

/// Result type alias for cutstock operations.
pub type Result<T> = std::result::Result<T, CutStockError>;

/// Errors that can occur while loading an instance or running column generation.
#[derive(Debug, Error)]
pub enum CutStockError {
    /// The instance data is malformed (lengths, signs, non-finite values).
    #[error("Invalid instance: {0}")]
    InvalidInstance(String),

    /// An item does not fit in a single stock unit, so no single-type seed pattern exists.
    #[error("Item {item} has size {size} which exceeds the stock length {stock_length}")]
    ItemTooLarge {
        item         : usize,
        size         : f64,
        stock_length : f64,
    },

    /// Instance text could not be parsed.
    #[error("Parse error on line {line}: {msg}")]
    Parse { line : usize, msg : String },

    /// Instance file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The LP/MIP backend failed or returned no usable solution.
    #[error("Solver failed: {0}")]
    Solver(String),

    /// The pricing problem produced a pattern that does not fit the stock.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

impl CutStockError {
    pub(crate) fn solver<S : Into<String>>(msg : S) -> CutStockError {
        CutStockError::Solver(msg.into())
    }
}
