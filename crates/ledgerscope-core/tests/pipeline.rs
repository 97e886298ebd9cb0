use anyhow::Result;
use ledgerscope_core::classifier::ColumnKind;
use ledgerscope_core::diagnostics::Diagnostic;
use ledgerscope_core::financial::HighValueEntry;
use ledgerscope_core::numeric::OutlierMethod;
use ledgerscope_core::{analyze, analyze_with_sink, AnalysisError, CollectingSink, NoopSink};
use ledgerscope_parser::ParserError;

fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name);
    std::fs::read_to_string(path).expect("read fixture")
}

const SMALL_LEDGER: &str = "amount,category\n100,food\n200,food\n5000,travel\n90,food";

#[test]
fn small_ledger_end_to_end() -> Result<()> {
    let result = analyze_with_sink(SMALL_LEDGER, &NoopSink)?;

    let summary = &result.dataset_summary;
    assert_eq!(summary.total_rows, 4);
    assert_eq!(summary.numeric_columns, ["amount"]);
    assert_eq!(summary.categorical_columns, ["category"]);
    assert!(summary.date_columns.is_empty());

    let amount = &result.numeric_analysis["amount"];
    assert_eq!(amount.count, 4);
    assert_eq!(amount.sum, 5390.0);
    assert_eq!(amount.mean, 1347.5);
    assert_eq!(amount.median, 150.0);
    assert_eq!(amount.variance, 4448768.75);
    assert_eq!(amount.std_dev, 2109.21);
    assert_eq!(amount.quartiles.q1, 100.0);
    assert_eq!(amount.quartiles.q3, 5000.0);
    assert_eq!(amount.range, 4910.0);
    assert!(amount.outliers.is_empty());

    let category = &result.categorical_analysis["category"];
    assert_eq!(category.unique_values, 2);
    assert_eq!(category.most_frequent.as_deref(), Some("food"));
    assert_eq!(category.least_frequent.as_deref(), Some("travel"));

    let financial = &result.financial_insights;
    assert_eq!(financial.category_wise_totals["food"], 390.0);
    assert_eq!(financial.category_wise_totals["travel"], 5000.0);
    assert_eq!(
        financial.high_value_entries,
        vec![HighValueEntry {
            row_index: 2,
            value: 5000.0
        }]
    );
    assert!(financial.anomaly_summary.is_empty());

    assert_eq!(
        result.overall_insights,
        vec![
            "amount: High variability detected (CV: 156.5%)",
            "Highest transaction: 5000",
        ]
    );
    Ok(())
}

#[test]
fn fixture_end_to_end() -> Result<()> {
    let sink = CollectingSink::new();
    let result = analyze_with_sink(&fixture("event_expenses.csv"), &sink)?;

    assert_eq!(result.dataset_summary.total_rows, 20);
    assert_eq!(result.dataset_summary.date_columns, ["date"]);

    let amount = &result.numeric_analysis["amount"];
    assert_eq!(amount.count, 19);
    assert_eq!(amount.sum, 13952.25);
    assert_eq!(amount.median, 180.75);
    assert_eq!(amount.quartiles.q1, 72.3);
    assert_eq!(amount.quartiles.q3, 480.0);
    assert_eq!(amount.min, 25.0);
    assert_eq!(amount.max, 7500.0);

    let outliers: Vec<(usize, f64, OutlierMethod)> = amount
        .outliers
        .iter()
        .map(|o| (o.row_index, o.value, o.method))
        .collect();
    assert_eq!(
        outliers,
        vec![
            (0, 2500.0, OutlierMethod::Iqr),
            (16, 7500.0, OutlierMethod::ZScore),
        ]
    );

    let category = &result.categorical_analysis["category"];
    assert_eq!(category.most_frequent.as_deref(), Some("catering"));
    assert_eq!(category.least_frequent.as_deref(), Some("transport"));

    let totals = &result.financial_insights.category_wise_totals;
    assert_eq!(totals["venue"], 10150.0);
    assert_eq!(totals["catering"], 1176.05);
    assert_eq!(totals["marketing"], 547.3);

    assert_eq!(
        result.financial_insights.high_value_entries,
        vec![
            HighValueEntry {
                row_index: 17,
                value: 7500.0
            },
            HighValueEntry {
                row_index: 0,
                value: 2500.0
            },
        ]
    );

    assert_eq!(
        result.overall_insights,
        vec![
            "amount: 2 outlier(s) detected",
            "amount: High variability detected (CV: 229.7%)",
            "Row 17: Unusual amount of 7500 (4.0σ from mean)",
            "5 transactions missing receipts",
            "Highest transaction: 7500",
        ]
    );

    let diagnostics = sink.take();
    assert!(diagnostics.contains(&Diagnostic::RowFieldCountMismatch {
        line: 20,
        found: 6,
        expected: 7,
    }));
    assert!(diagnostics.contains(&Diagnostic::UnparsableValue {
        column: "amount".into(),
        row_index: 16,
        raw: "n/a".into(),
    }));
    Ok(())
}

#[test]
fn header_only_input_is_malformed() {
    let err = analyze_with_sink("amount,category\n", &NoopSink).expect_err("must fail");

    assert!(err.is_malformed_input());
    assert!(matches!(
        err,
        AnalysisError::Parse(ParserError::MalformedInput { lines: 1 })
    ));
}

#[test]
fn identical_input_gives_identical_json() -> Result<()> {
    let content = fixture("event_expenses.csv");
    let first = analyze(&content)?.to_json(false)?;
    let second = analyze(&content)?.to_json(false)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn every_header_is_profiled_or_dated() -> Result<()> {
    let result = analyze_with_sink(&fixture("event_expenses.csv"), &NoopSink)?;

    for header in [
        "date",
        "description",
        "category",
        "amount",
        "vendor",
        "receipt_attached",
        "payment_type",
    ] {
        assert!(
            result.column_profile(header).is_some(),
            "{header} missing from result"
        );
    }
    assert_eq!(
        result.column_profile("date").map(|p| p.kind()),
        Some(ColumnKind::DateLike)
    );
    assert_eq!(
        result.column_profile("amount").map(|p| p.kind()),
        Some(ColumnKind::Numeric)
    );
    assert!(result.column_profile("nonexistent").is_none());
    Ok(())
}

#[test]
fn json_shape_matches_wire_format() -> Result<()> {
    let result = analyze_with_sink("amount,notes\n1,\n2,\n3,\n4,\n100,x", &NoopSink)?;
    let value = serde_json::to_value(&result)?;

    assert_eq!(value["dataset_summary"]["total_rows"], 5);
    assert_eq!(value["numeric_analysis"]["amount"]["quartiles"]["Q1"], 2.0);
    assert_eq!(
        value["numeric_analysis"]["amount"]["outliers"][0]["method"],
        "iqr"
    );
    assert_eq!(value["categorical_analysis"]["notes"]["unique_values"], 1);
    assert_eq!(
        value["financial_insights"]["high_value_entries"][0]["value"],
        100.0
    );

    let wire = result.to_json(false)?;
    let positions: Vec<usize> = [
        "\"dataset_summary\"",
        "\"numeric_analysis\"",
        "\"categorical_analysis\"",
        "\"financial_insights\"",
        "\"overall_insights\"",
    ]
    .iter()
    .map(|key| wire.find(key).expect("key present"))
    .collect();
    assert!(
        positions.windows(2).all(|pair| pair[0] < pair[1]),
        "top-level keys out of order: {wire}"
    );
    Ok(())
}

#[test]
fn rows_of_empty_cells_leave_vacuous_numeric_columns() -> Result<()> {
    let sink = CollectingSink::new();
    let result = analyze_with_sink("score,label\n,\n , ", &sink)?;

    assert_eq!(result.dataset_summary.total_rows, 0);
    assert_eq!(result.dataset_summary.numeric_columns, ["score", "label"]);
    assert_eq!(result.numeric_analysis["score"].count, 0);
    assert!(result.overall_insights.is_empty());
    Ok(())
}
