//! Descriptive statistics and outlier detection for numeric columns.

use std::fmt;

use ledgerscope_parser::{parse_number, Dataset};
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Degeneracy, Diagnostic, DiagnosticSink};
use crate::stats::{self, round2};

/// |z| above this marks a z-score outlier.
pub const Z_SCORE_THRESHOLD: f64 = 2.0;
/// Tukey fence multiplier applied to the IQR.
pub const IQR_FENCE: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutlierMethod {
    #[serde(rename = "z-score")]
    ZScore,
    #[serde(rename = "iqr")]
    Iqr,
}

impl OutlierMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutlierMethod::ZScore => "z-score",
            OutlierMethod::Iqr => "iqr",
        }
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    /// Position in the column's parsed values, not in the dataset rows.
    pub row_index: usize,
    pub value: f64,
    pub method: OutlierMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quartiles {
    #[serde(rename = "Q1")]
    pub q1: f64,
    #[serde(rename = "Q2")]
    pub q2: f64,
    #[serde(rename = "Q3")]
    pub q3: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericColumnProfile {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub quartiles: Quartiles,
    pub iqr: f64,
    pub outliers: Vec<Outlier>,
}

/// Parses every cell of `column`, dropping the ones that are not numbers.
///
/// Non-empty cells that fail to parse are reported as
/// [`Diagnostic::UnparsableValue`]; empty cells are dropped silently.
pub fn collect_numeric_values(
    dataset: &Dataset,
    column: &str,
    sink: &dyn DiagnosticSink,
) -> Vec<f64> {
    let mut values = Vec::with_capacity(dataset.row_count());
    for (row_index, raw) in dataset.column_values(column).enumerate() {
        match parse_number(raw) {
            Some(value) => values.push(value),
            None if raw.is_empty() => {}
            None => sink.record(Diagnostic::UnparsableValue {
                column: column.to_string(),
                row_index,
                raw: raw.to_string(),
            }),
        }
    }
    values
}

/// Computes the profile of one numeric column.
///
/// Reported statistics are rounded to two decimals, except `min`, `max` and
/// `range`. Outlier fences use the unrounded values. An empty slice produces
/// an all-zero profile.
pub fn profile_numeric(
    column: &str,
    values: &[f64],
    sink: &dyn DiagnosticSink,
) -> NumericColumnProfile {
    let n = values.len();
    let Some(mean) = stats::mean(values) else {
        sink.record(Diagnostic::DegenerateStatistic {
            column: column.to_string(),
            kind: Degeneracy::NoValues,
        });
        return NumericColumnProfile::default();
    };

    let sorted = stats::sorted_ascending(values);
    let sum: f64 = values.iter().sum();

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    let variance = stats::population_variance(values, mean);
    let std_dev = variance.sqrt();

    // Nearest rank, no interpolation: floor(n * 0.25) and floor(n * 0.75).
    let q1 = sorted[n / 4];
    let q3 = sorted[n * 3 / 4];
    let iqr = q3 - q1;

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if stats::is_degenerate_spread(std_dev) {
        sink.record(Diagnostic::DegenerateStatistic {
            column: column.to_string(),
            kind: Degeneracy::ZeroStdDev,
        });
    }

    let outliers = detect_outliers(values, mean, std_dev, q1, q3);

    NumericColumnProfile {
        count: n,
        sum: round2(sum),
        mean: round2(mean),
        median: round2(median),
        min,
        max,
        range: max - min,
        variance: round2(variance),
        std_dev: round2(std_dev),
        quartiles: Quartiles {
            q1: round2(q1),
            q2: round2(median),
            q3: round2(q3),
        },
        iqr: round2(iqr),
        outliers,
    }
}

/// Flags each value at most once, in value order. The z-score rule is checked
/// first; the IQR fences only apply to values it did not flag.
pub fn detect_outliers(values: &[f64], mean: f64, std_dev: f64, q1: f64, q3: f64) -> Vec<Outlier> {
    let iqr = q3 - q1;
    let lower = q1 - IQR_FENCE * iqr;
    let upper = q3 + IQR_FENCE * iqr;

    values
        .iter()
        .enumerate()
        .filter_map(|(row_index, &value)| {
            let method = match stats::z_score(value, mean, std_dev) {
                Some(z) if z > Z_SCORE_THRESHOLD => OutlierMethod::ZScore,
                _ if value < lower || value > upper => OutlierMethod::Iqr,
                _ => return None,
            };
            Some(Outlier {
                row_index,
                value,
                method,
            })
        })
        .collect()
}
