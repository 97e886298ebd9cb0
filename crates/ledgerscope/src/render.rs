// crates/ledgerscope/src/render.rs

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use ledgerscope_core::AnalysisResult;

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// Renders an analysis as a sequence of titled terminal tables.
pub fn render_tables(result: &AnalysisResult) -> String {
    let mut sections = Vec::new();

    let summary = &result.dataset_summary;
    let mut table = new_table(&["Rows", "Numeric", "Categorical", "Date"]);
    table.add_row(vec![
        summary.total_rows.to_string(),
        summary.numeric_columns.join(", "),
        summary.categorical_columns.join(", "),
        summary.date_columns.join(", "),
    ]);
    sections.push(("Dataset", table));

    if !result.numeric_analysis.is_empty() {
        let mut table = new_table(&[
            "Column", "Count", "Mean", "Median", "Std dev", "Min", "Max", "Q1", "Q3", "Outliers",
        ]);
        for (column, profile) in &result.numeric_analysis {
            table.add_row(vec![
                column.clone(),
                profile.count.to_string(),
                profile.mean.to_string(),
                profile.median.to_string(),
                profile.std_dev.to_string(),
                profile.min.to_string(),
                profile.max.to_string(),
                profile.quartiles.q1.to_string(),
                profile.quartiles.q3.to_string(),
                profile.outliers.len().to_string(),
            ]);
        }
        sections.push(("Numeric columns", table));

        let mut outliers = new_table(&["Column", "Index", "Value", "Method"]);
        let mut any_outliers = false;
        for (column, profile) in &result.numeric_analysis {
            for outlier in &profile.outliers {
                any_outliers = true;
                outliers.add_row(vec![
                    column.clone(),
                    outlier.row_index.to_string(),
                    outlier.value.to_string(),
                    outlier.method.to_string(),
                ]);
            }
        }
        if any_outliers {
            sections.push(("Outlier values", outliers));
        }
    }

    if !result.categorical_analysis.is_empty() {
        let mut table = new_table(&["Column", "Unique", "Most frequent", "Least frequent"]);
        for (column, profile) in &result.categorical_analysis {
            table.add_row(vec![
                column.clone(),
                profile.unique_values.to_string(),
                or_dash(profile.most_frequent.as_deref()),
                or_dash(profile.least_frequent.as_deref()),
            ]);
        }
        sections.push(("Categorical columns", table));
    }

    let financial = &result.financial_insights;
    if !financial.category_wise_totals.is_empty() {
        let mut table = new_table(&["Category", "Total"]);
        for (category, total) in &financial.category_wise_totals {
            table.add_row(vec![category.clone(), total.to_string()]);
        }
        sections.push(("Category totals", table));
    }

    if !financial.high_value_entries.is_empty() {
        let mut table = new_table(&["Row", "Value"]);
        for entry in &financial.high_value_entries {
            table.add_row(vec![entry.row_index.to_string(), entry.value.to_string()]);
        }
        sections.push(("High-value entries", table));
    }

    if !result.overall_insights.is_empty() {
        let mut table = new_table(&["Insight"]);
        for insight in &result.overall_insights {
            table.add_row(vec![insight.as_str()]);
        }
        sections.push(("Insights", table));
    }

    sections
        .into_iter()
        .map(|(title, table)| format!("{title}\n{table}"))
        .collect::<Vec<_>>()
        .join("\n\n")
}
