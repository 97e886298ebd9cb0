use ledgerscope_parser::{parse_number, Dataset, Row};

/// Number of leading rows inspected per column.
pub const SAMPLE_SIZE: usize = 10;

const DATE_KEYWORDS: [&str; 2] = ["date", "time"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Numeric,
    Categorical,
    DateLike,
}

/// Headers partitioned by kind, each list in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnClassification {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
    pub date_like: Vec<String>,
}

impl ColumnClassification {
    pub fn kind_of(&self, header: &str) -> Option<ColumnKind> {
        if self.date_like.iter().any(|h| h == header) {
            Some(ColumnKind::DateLike)
        } else if self.numeric.iter().any(|h| h == header) {
            Some(ColumnKind::Numeric)
        } else if self.categorical.iter().any(|h| h == header) {
            Some(ColumnKind::Categorical)
        } else {
            None
        }
    }

    fn push(&mut self, header: &str, kind: ColumnKind) {
        let target = match kind {
            ColumnKind::Numeric => &mut self.numeric,
            ColumnKind::Categorical => &mut self.categorical,
            ColumnKind::DateLike => &mut self.date_like,
        };
        target.push(header.to_string());
    }
}

/// Classifies one header against a sample of rows.
///
/// The name check runs first, so a column called `time` holding plain numbers
/// is date-like. An empty sample is vacuously numeric.
pub fn classify_column(header: &str, sample: &[Row]) -> ColumnKind {
    let lower = header.to_lowercase();
    if DATE_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
        return ColumnKind::DateLike;
    }

    let all_numeric = sample.iter().all(|row| {
        let value = row.get(header);
        value != "true" && value != "false" && parse_number(value).is_some()
    });

    if all_numeric {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

pub fn classify_columns(dataset: &Dataset) -> ColumnClassification {
    let rows = dataset.rows();
    let sample = &rows[..rows.len().min(SAMPLE_SIZE)];

    let mut classification = ColumnClassification::default();
    for header in dataset.headers() {
        classification.push(header, classify_column(header, sample));
    }
    classification
}
