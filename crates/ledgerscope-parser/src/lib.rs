pub mod errors;
pub mod model;
mod number;
mod reader;

pub use errors::{ParseWarning, ParserError};
pub use model::{Dataset, ParsedDataset, Row};
pub use number::parse_number;
pub use reader::{normalize_line_endings, parse_dataset, split_fields};
