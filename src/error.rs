//! Error types for Protocol-7 encoding and verification.

use thiserror::Error;

/// Errors returned by the encoder, placement configuration and integrity checks.
#[derive(Debug, Error)]
pub enum Error {
    /// Symbol needs more significant bits than a grid has rows
    #[error("symbol {symbol:#x} needs {bits} bits, grid holds at most 7")]
    InvalidSymbolWidth { symbol: u32, bits: u32 },

    /// Stride does not map every bit index to its own cell
    #[error("stride {stride} does not place 7 bits in 7 distinct cells")]
    InvalidStride { stride: usize },

    /// Grid cell holding something other than 0 or 1
    #[error("cell ({row}, {col}) holds {value}, expected 0 or 1")]
    InvalidCell { row: usize, col: usize, value: u8 },

    #[error("row {row} check mismatch: expected {expected}, got {actual}")]
    RowCheckMismatch { row: usize, expected: u8, actual: u8 },

    #[error("column {col} check mismatch: expected {expected}, got {actual}")]
    ColumnCheckMismatch { col: usize, expected: u8, actual: u8 },

    #[error("harmonic checksum mismatch: expected {expected}, got {actual}")]
    HarmonicChecksumMismatch { expected: u8, actual: u8 },

    /// Failure tied to one position of a message
    #[error("symbol {index}: {source}")]
    Symbol {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for the variants produced by [`crate::verify::check_integrity`].
    pub fn is_integrity_failure(&self) -> bool {
        match self {
            Error::RowCheckMismatch { .. }
            | Error::ColumnCheckMismatch { .. }
            | Error::HarmonicChecksumMismatch { .. } => true,
            Error::Symbol { source, .. } => source.is_integrity_failure(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidSymbolWidth {
            symbol: 0xe9,
            bits: 8,
        };
        assert_eq!(err.to_string(), "symbol 0xe9 needs 8 bits, grid holds at most 7");
        assert!(!err.is_integrity_failure());

        let err = Error::ColumnCheckMismatch {
            col: 3,
            expected: 1,
            actual: 0,
        };
        assert!(err.is_integrity_failure());

        let err = Error::Symbol {
            index: 2,
            source: Box::new(err),
        };
        assert!(err.is_integrity_failure());
        assert_eq!(
            err.to_string(),
            "symbol 2: column 3 check mismatch: expected 1, got 0"
        );
    }
}
