use std::collections::HashSet;

use ledgerscope_core::classifier::{classify_column, classify_columns, ColumnKind, SAMPLE_SIZE};
use ledgerscope_parser::parse_dataset;

fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name);
    std::fs::read_to_string(path).expect("read fixture")
}

#[test]
fn classifies_fixture_columns() {
    let parsed = parse_dataset(&fixture("event_expenses.csv")).expect("parse failed");
    let classification = classify_columns(&parsed.dataset);

    assert_eq!(classification.date_like, ["date"]);
    assert_eq!(classification.numeric, ["amount"]);
    assert_eq!(
        classification.categorical,
        ["description", "category", "vendor", "receipt_attached", "payment_type"]
    );
}

#[test]
fn every_header_lands_in_exactly_one_set() {
    let parsed = parse_dataset(&fixture("event_expenses.csv")).expect("parse failed");
    let classification = classify_columns(&parsed.dataset);

    let mut seen = HashSet::new();
    for header in classification
        .numeric
        .iter()
        .chain(&classification.categorical)
        .chain(&classification.date_like)
    {
        assert!(seen.insert(header.as_str()), "{header} classified twice");
    }
    let headers: HashSet<&str> = parsed.dataset.headers().iter().map(String::as_str).collect();
    assert_eq!(seen, headers);
}

#[test]
fn name_check_shadows_numeric_values() {
    let content = "Timestamp,Updated_Date,score\n1700000000,20240101,3\n1700000600,20240102,4";
    let parsed = parse_dataset(content).expect("parse failed");
    let classification = classify_columns(&parsed.dataset);

    assert_eq!(classification.date_like, ["Timestamp", "Updated_Date"]);
    assert_eq!(classification.numeric, ["score"]);
    assert_eq!(
        classification.kind_of("Timestamp"),
        Some(ColumnKind::DateLike)
    );
}

#[test]
fn only_the_leading_sample_is_inspected() {
    let mut content = String::from("reading\n");
    for value in 0..SAMPLE_SIZE {
        content.push_str(&format!("{value}\n"));
    }
    content.push_str("broken\n");

    let parsed = parse_dataset(&content).expect("parse failed");
    let classification = classify_columns(&parsed.dataset);
    assert_eq!(classification.numeric, ["reading"]);
}

#[test]
fn one_bad_sample_makes_a_column_categorical() {
    let parsed = parse_dataset("qty,flag\n1,true\n2,false\nthree,true").expect("parse failed");
    let classification = classify_columns(&parsed.dataset);

    assert_eq!(classification.categorical, ["qty", "flag"]);
    assert!(classification.numeric.is_empty());
}

#[test]
fn empty_sample_cell_is_not_numeric() {
    let parsed = parse_dataset("a,b\n1,x\n,y").expect("parse failed");
    let classification = classify_columns(&parsed.dataset);
    assert_eq!(classification.kind_of("a"), Some(ColumnKind::Categorical));
}

#[test]
fn empty_sample_is_vacuously_numeric() {
    assert_eq!(classify_column("anything", &[]), ColumnKind::Numeric);
    assert_eq!(classify_column("due_date", &[]), ColumnKind::DateLike);
}

#[test]
fn numeric_prefixes_count_as_numbers() {
    let parsed = parse_dataset("weight\n12kg\n7.5kg").expect("parse failed");
    assert_eq!(
        classify_columns(&parsed.dataset).kind_of("weight"),
        Some(ColumnKind::Numeric)
    );
}
