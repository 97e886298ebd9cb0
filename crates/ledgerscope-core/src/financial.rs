//! Expense-oriented heuristics: largest entries, per-category totals and
//! amount anomalies.
//!
//! Columns are discovered by name. The first header mentioning an amount
//! keyword drives the whole stage; without one the stage yields an empty
//! [`FinancialInsights`].

use indexmap::IndexMap;
use ledgerscope_parser::{parse_number, Dataset};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::ColumnClassification;
use crate::diagnostics::{Degeneracy, Diagnostic, DiagnosticSink};
use crate::stats::{self, round2};

pub const AMOUNT_KEYWORDS: [&str; 4] = ["amount", "cost", "price", "expense"];
pub const CATEGORY_KEYWORDS: [&str; 2] = ["category", "type"];
pub const RECEIPT_KEYWORD: &str = "receipt";

/// |z| above this turns an amount into an anomaly line.
pub const ANOMALY_Z_THRESHOLD: f64 = 2.5;

/// Receipt cell values that count as "no receipt" (besides an empty cell).
const MISSING_RECEIPT_MARKERS: [&str; 2] = ["false", "0"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighValueEntry {
    pub row_index: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialInsights {
    pub high_value_entries: Vec<HighValueEntry>,
    pub category_wise_totals: IndexMap<String, f64>,
    pub anomaly_summary: Vec<String>,
}

/// First header, in order, whose lowercase name contains any of `keywords`.
pub fn find_column<'a, S>(headers: &'a [S], keywords: &[&str]) -> Option<&'a str>
where
    S: AsRef<str>,
{
    headers
        .iter()
        .map(|header| header.as_ref())
        .find(|header| {
            let lower = header.to_lowercase();
            keywords.iter().any(|keyword| lower.contains(keyword))
        })
}

pub fn generate_financial_insights(
    dataset: &Dataset,
    classification: &ColumnClassification,
    sink: &dyn DiagnosticSink,
) -> FinancialInsights {
    let mut insights = FinancialInsights::default();

    let Some(amount_column) = find_column(dataset.headers(), &AMOUNT_KEYWORDS) else {
        debug!("no amount column found; skipping financial insights");
        return insights;
    };
    debug!(column = amount_column, "using amount column");

    let amounts: Vec<HighValueEntry> = dataset
        .column_values(amount_column)
        .enumerate()
        .filter_map(|(row_index, raw)| {
            parse_number(raw).map(|value| HighValueEntry { row_index, value })
        })
        .collect();

    insights.high_value_entries = top_decile(&amounts);

    let category_column = find_column(classification.categorical.as_slice(), &CATEGORY_KEYWORDS);
    if let Some(category_column) = category_column {
        insights.category_wise_totals = category_totals(dataset, amount_column, category_column);
    }

    insights.anomaly_summary = amount_anomalies(amount_column, &amounts, sink);

    if let Some(line) = missing_receipts(dataset) {
        insights.anomaly_summary.push(line);
    }

    insights
}

/// The largest ⌈n / 10⌉ entries, largest first. Equal values keep row order.
pub fn top_decile(entries: &[HighValueEntry]) -> Vec<HighValueEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.value.total_cmp(&a.value));
    sorted.truncate(entries.len().div_ceil(10));
    sorted
}

/// Sums parsable amounts per non-empty category label, rounded to cents.
pub fn category_totals(
    dataset: &Dataset,
    amount_column: &str,
    category_column: &str,
) -> IndexMap<String, f64> {
    let mut totals: IndexMap<String, f64> = IndexMap::new();
    for row in dataset.rows() {
        let category = row.get(category_column);
        if category.is_empty() {
            continue;
        }
        if let Some(amount) = parse_number(row.get(amount_column)) {
            *totals.entry(category.to_string()).or_insert(0.0) += amount;
        }
    }

    for total in totals.values_mut() {
        *total = round2(*total);
    }
    totals
}

fn amount_anomalies(
    amount_column: &str,
    amounts: &[HighValueEntry],
    sink: &dyn DiagnosticSink,
) -> Vec<String> {
    let values: Vec<f64> = amounts.iter().map(|entry| entry.value).collect();
    let Some(mean) = stats::mean(&values) else {
        return Vec::new();
    };
    let std_dev = stats::population_variance(&values, mean).sqrt();

    if stats::is_degenerate_spread(std_dev) {
        sink.record(Diagnostic::DegenerateStatistic {
            column: amount_column.to_string(),
            kind: Degeneracy::ZeroStdDev,
        });
        return Vec::new();
    }

    amounts
        .iter()
        .filter_map(|entry| {
            let z = stats::z_score(entry.value, mean, std_dev)?;
            (z > ANOMALY_Z_THRESHOLD).then(|| {
                format!(
                    "Row {}: Unusual {} of {} ({:.1}σ from mean)",
                    entry.row_index,
                    amount_column,
                    entry.value,
                    stats::round_to(z, 1)
                )
            })
        })
        .collect()
}

fn missing_receipts(dataset: &Dataset) -> Option<String> {
    let receipt_column = find_column(dataset.headers(), &[RECEIPT_KEYWORD])?;
    let missing = dataset
        .column_values(receipt_column)
        .filter(|value| value.is_empty() || MISSING_RECEIPT_MARKERS.contains(value))
        .count();

    (missing > 0).then(|| format!("{missing} transactions missing receipts"))
}
