use crate::errors::{ParseWarning, ParserError};
use crate::model::{Dataset, ParsedDataset, Row};

const DELIMITER: char = ',';

/// Rewrites CRLF and lone CR line endings as `\n`.
pub fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Splits a line on commas and trims every field. Quoting is not supported.
pub fn split_fields(line: &str) -> Vec<String> {
    line.split(DELIMITER)
        .map(|field| field.trim().to_string())
        .collect()
}

/// Reads a header line plus data lines into a [`Dataset`].
///
/// Blank lines are skipped before anything else, so at least two non-blank
/// lines are required. Rows whose cells are all empty are discarded and
/// row indices downstream refer to the remaining rows.
pub fn parse_dataset(content: &str) -> Result<ParsedDataset, ParserError> {
    let normalized = normalize_line_endings(content);
    let lines: Vec<&str> = normalized
        .trim()
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(ParserError::MalformedInput { lines: lines.len() });
    }

    let headers = split_fields(lines[0]);
    let mut warnings = Vec::new();
    let mut rows = Vec::with_capacity(lines.len() - 1);

    for (offset, line) in lines[1..].iter().enumerate() {
        let values = split_fields(line);
        if values.len() != headers.len() {
            warnings.push(ParseWarning::RowFieldCountMismatch {
                line: offset + 1,
                found: values.len(),
                expected: headers.len(),
            });
        }

        let row = Row::from_fields(&headers, values);
        if !row.is_blank() {
            rows.push(row);
        }
    }

    Ok(ParsedDataset {
        dataset: Dataset::new(headers, rows),
        warnings,
    })
}
