use indexmap::IndexMap;

use crate::categorical::CategoricalColumnProfile;
use crate::financial::FinancialInsights;
use crate::numeric::NumericColumnProfile;
use crate::stats::round_to;

/// Coefficient of variation (percent) above which a column is called out.
pub const HIGH_VARIABILITY_CV: f64 = 50.0;

/// Turns the computed profiles into plain-language findings.
///
/// Order is fixed: numeric findings per column, then categorical ones, then
/// the financial anomaly lines, then the highest transaction.
pub fn synthesize_insights(
    numeric: &IndexMap<String, NumericColumnProfile>,
    categorical: &IndexMap<String, CategoricalColumnProfile>,
    financial: &FinancialInsights,
) -> Vec<String> {
    let mut insights = Vec::new();

    for (column, profile) in numeric {
        if !profile.outliers.is_empty() {
            insights.push(format!(
                "{column}: {} outlier(s) detected",
                profile.outliers.len()
            ));
        }

        if let Some(cv) = coefficient_of_variation(profile) {
            if cv > HIGH_VARIABILITY_CV {
                let cv = round_to(cv, 1);
                insights.push(format!(
                    "{column}: High variability detected (CV: {cv:.1}%)"
                ));
            }
        }
    }

    for (column, profile) in categorical {
        if profile.unique_values == 1 {
            if let Some(value) = &profile.most_frequent {
                insights.push(format!("{column}: All values are identical ({value})"));
            }
        }
    }

    insights.extend(financial.anomaly_summary.iter().cloned());

    if let Some(top) = financial.high_value_entries.first() {
        insights.push(format!("Highest transaction: {}", top.value));
    }

    insights
}

/// `std_dev / mean * 100` from the reported (rounded) statistics; `None` when
/// the mean is zero.
pub fn coefficient_of_variation(profile: &NumericColumnProfile) -> Option<f64> {
    let cv = profile.std_dev / profile.mean * 100.0;
    cv.is_finite().then_some(cv)
}
