//! Error types for pcb2dxf

use std::io;
use thiserror::Error;

/// Main error type for pcb2dxf operations
#[derive(Debug, Error)]
pub enum DxfError {
    /// IO error occurred while reading the board or writing the drawing
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Color index outside the ACI range
    #[error("color has to be an integer in the range from 0 to 256, got {0}")]
    InvalidColor(i16),

    /// 3DFACE/SOLID called with a corner count other than 3 or 4
    #[error("{entity} needs 3 or 4 vertices, got {count}")]
    VertexCount { entity: &'static str, count: usize },

    /// Text alignment name not present in the alignment table
    #[error("Unknown text alignment: {0:?}")]
    UnknownAlignment(String),

    /// Positional token extraction failed on an input line
    #[error("Extraction error at line {line}: {message}")]
    Extraction { line: usize, message: String },
}

/// Result type alias for pcb2dxf operations
pub type Result<T> = std::result::Result<T, DxfError>;

impl DxfError {
    pub(crate) fn extraction(line: usize, message: impl Into<String>) -> Self {
        DxfError::Extraction {
            line,
            message: message.into(),
        }
    }
}
