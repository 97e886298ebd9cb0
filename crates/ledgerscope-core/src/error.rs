// crates/ledgerscope-core/src/error.rs

use ledgerscope_parser::ParserError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Parse(#[from] ParserError),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    /// True when the input itself was rejected, as opposed to an internal failure.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, AnalysisError::Parse(ParserError::MalformedInput { .. }))
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
