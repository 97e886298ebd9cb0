//! Non-fatal conditions absorbed during an analysis.
//!
//! Stages never print. They hand a [`Diagnostic`] to the caller-provided
//! [`DiagnosticSink`]; the default sink forwards to `tracing`.

use std::fmt;
use std::sync::Mutex;

use ledgerscope_parser::ParseWarning;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// Standard deviation is zero, so z-scores are undefined.
    ZeroStdDev,
    /// No value of the column parsed as a number.
    NoValues,
}

impl Degeneracy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Degeneracy::ZeroStdDev => "zero standard deviation",
            Degeneracy::NoValues => "no numeric values",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    RowFieldCountMismatch {
        line: usize,
        found: usize,
        expected: usize,
    },
    UnparsableValue {
        column: String,
        row_index: usize,
        raw: String,
    },
    DegenerateStatistic {
        column: String,
        kind: Degeneracy,
    },
    EmptyCategoricalColumn {
        column: String,
    },
}

impl Diagnostic {
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::RowFieldCountMismatch { .. } => "row_field_count_mismatch",
            Diagnostic::UnparsableValue { .. } => "unparsable_value",
            Diagnostic::DegenerateStatistic { .. } => "degenerate_statistic",
            Diagnostic::EmptyCategoricalColumn { .. } => "empty_categorical_column",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::RowFieldCountMismatch {
                line,
                found,
                expected,
            } => write!(f, "row {line} has {found} values but expected {expected}"),
            Diagnostic::UnparsableValue {
                column,
                row_index,
                raw,
            } => write!(f, "{column}: row {row_index} value '{raw}' is not numeric"),
            Diagnostic::DegenerateStatistic { column, kind } => {
                write!(f, "{column}: {}", kind.as_str())
            }
            Diagnostic::EmptyCategoricalColumn { column } => {
                write!(f, "{column}: no non-empty values")
            }
        }
    }
}

impl From<ParseWarning> for Diagnostic {
    fn from(warning: ParseWarning) -> Self {
        match warning {
            ParseWarning::RowFieldCountMismatch {
                line,
                found,
                expected,
            } => Diagnostic::RowFieldCountMismatch {
                line,
                found,
                expected,
            },
        }
    }
}

pub trait DiagnosticSink {
    fn record(&self, diagnostic: Diagnostic);
}

/// Emits every diagnostic as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: Diagnostic) {
        warn!(kind = diagnostic.kind(), "{diagnostic}");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn record(&self, _diagnostic: Diagnostic) {}
}

/// Keeps diagnostics in memory, in the order they were recorded.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(
            &mut *self
                .entries
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl DiagnosticSink for CollectingSink {
    fn record(&self, diagnostic: Diagnostic) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic);
    }
}
