pub mod analysis;
pub mod categorical;
pub mod classifier;
pub mod diagnostics;
pub mod error;
pub mod financial;
pub mod insights;
pub mod numeric;
pub mod stats;

pub use analysis::{
    analyze, analyze_dataset, analyze_with_sink, AnalysisResult, ColumnProfile, DatasetSummary,
};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, NoopSink, TracingSink};
pub use error::{AnalysisError, Result};
