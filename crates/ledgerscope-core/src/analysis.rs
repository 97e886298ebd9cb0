use indexmap::IndexMap;
use ledgerscope_parser::{parse_dataset, Dataset};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::categorical::{profile_categorical, CategoricalColumnProfile};
use crate::classifier::{classify_columns, ColumnClassification, ColumnKind};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::Result;
use crate::financial::{generate_financial_insights, FinancialInsights};
use crate::insights::synthesize_insights;
use crate::numeric::{collect_numeric_values, profile_numeric, NumericColumnProfile};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_rows: usize,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub date_columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub dataset_summary: DatasetSummary,
    pub numeric_analysis: IndexMap<String, NumericColumnProfile>,
    pub categorical_analysis: IndexMap<String, CategoricalColumnProfile>,
    pub financial_insights: FinancialInsights,
    pub overall_insights: Vec<String>,
}

/// A single column's profile, whichever kind it was classified as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnProfile<'a> {
    Numeric(&'a NumericColumnProfile),
    Categorical(&'a CategoricalColumnProfile),
    /// Date-like columns are recognised by name only and carry no statistics.
    DateLike,
}

impl ColumnProfile<'_> {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnProfile::Numeric(_) => ColumnKind::Numeric,
            ColumnProfile::Categorical(_) => ColumnKind::Categorical,
            ColumnProfile::DateLike => ColumnKind::DateLike,
        }
    }
}

impl AnalysisResult {
    pub fn column_profile(&self, column: &str) -> Option<ColumnProfile<'_>> {
        if let Some(profile) = self.numeric_analysis.get(column) {
            return Some(ColumnProfile::Numeric(profile));
        }
        if let Some(profile) = self.categorical_analysis.get(column) {
            return Some(ColumnProfile::Categorical(profile));
        }
        self.dataset_summary
            .date_columns
            .iter()
            .any(|c| c == column)
            .then_some(ColumnProfile::DateLike)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Analyzes raw CSV text, reporting absorbed problems through `tracing`.
pub fn analyze(content: &str) -> Result<AnalysisResult> {
    analyze_with_sink(content, &TracingSink)
}

/// Analyzes raw CSV text. Only malformed input is an error; every other
/// problem goes to `sink` and shows up as missing or zeroed output.
pub fn analyze_with_sink(content: &str, sink: &dyn DiagnosticSink) -> Result<AnalysisResult> {
    let parsed = parse_dataset(content)?;
    for warning in parsed.warnings {
        sink.record(warning.into());
    }
    Ok(analyze_dataset(&parsed.dataset, sink))
}

pub fn analyze_dataset(dataset: &Dataset, sink: &dyn DiagnosticSink) -> AnalysisResult {
    let classification = classify_columns(dataset);
    debug!(
        rows = dataset.row_count(),
        numeric = classification.numeric.len(),
        categorical = classification.categorical.len(),
        date = classification.date_like.len(),
        "classified columns"
    );

    let mut numeric_analysis = IndexMap::with_capacity(classification.numeric.len());
    for column in &classification.numeric {
        let values = collect_numeric_values(dataset, column, sink);
        numeric_analysis.insert(column.clone(), profile_numeric(column, &values, sink));
    }

    let mut categorical_analysis = IndexMap::with_capacity(classification.categorical.len());
    for column in &classification.categorical {
        let profile = profile_categorical(column, dataset.column_values(column), sink);
        categorical_analysis.insert(column.clone(), profile);
    }

    let financial_insights = generate_financial_insights(dataset, &classification, sink);
    let overall_insights =
        synthesize_insights(&numeric_analysis, &categorical_analysis, &financial_insights);

    let ColumnClassification {
        numeric,
        categorical,
        date_like,
    } = classification;

    AnalysisResult {
        dataset_summary: DatasetSummary {
            total_rows: dataset.row_count(),
            numeric_columns: numeric,
            categorical_columns: categorical,
            date_columns: date_like,
        },
        numeric_analysis,
        categorical_analysis,
        financial_insights,
        overall_insights,
    }
}
