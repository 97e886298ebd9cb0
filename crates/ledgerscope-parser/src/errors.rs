use std::fmt;

use thiserror::Error;

/// Non-fatal conditions found while reading a dataset. The affected row is
/// still produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    RowFieldCountMismatch {
        /// 1-based position among the non-blank data lines.
        line: usize,
        found: usize,
        expected: usize,
    },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::RowFieldCountMismatch {
                line,
                found,
                expected,
            } => write!(
                f,
                "row {line} has {found} values but expected {expected}"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    #[error(
        "CSV must have at least a header row and one data row (found {lines} non-blank line(s))"
    )]
    MalformedInput { lines: usize },
}
