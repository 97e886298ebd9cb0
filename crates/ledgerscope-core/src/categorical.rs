use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, DiagnosticSink};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoricalColumnProfile {
    pub unique_values: usize,
    /// Occurrence count per distinct value, in first-seen order.
    pub distribution: IndexMap<String, usize>,
    pub most_frequent: Option<String>,
    pub least_frequent: Option<String>,
}

/// Builds the frequency summary of a categorical column. Empty values are
/// ignored; equal counts keep their first-seen order when ranking.
pub fn profile_categorical<'a, I>(
    column: &str,
    values: I,
    sink: &dyn DiagnosticSink,
) -> CategoricalColumnProfile
where
    I: IntoIterator<Item = &'a str>,
{
    let mut distribution: IndexMap<String, usize> = IndexMap::new();
    for value in values.into_iter().filter(|value| !value.is_empty()) {
        *distribution.entry(value.to_string()).or_insert(0) += 1;
    }

    if distribution.is_empty() {
        sink.record(Diagnostic::EmptyCategoricalColumn {
            column: column.to_string(),
        });
        return CategoricalColumnProfile::default();
    }

    let mut ranked: Vec<(&String, &usize)> = distribution.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1));

    let most_frequent = ranked.first().map(|(value, _)| (*value).clone());
    let least_frequent = ranked.last().map(|(value, _)| (*value).clone());

    CategoricalColumnProfile {
        unique_values: distribution.len(),
        most_frequent,
        least_frequent,
        distribution,
    }
}
