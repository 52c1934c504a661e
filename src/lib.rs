//! # csvstream
//!
//! Lazy streaming CSV parser. Records are produced one line at a time and can
//! be read by column name or by position.
//!
//! ## Features
//!
//! - **Streaming**: the source is read line by line, never slurped
//! - **Forgiving**: blank lines are skipped, short and long rows are fine,
//!   unterminated quotes close at end of line
//! - **Dialect detection**: separator (`,` `;` `:` tab `|`) and quote
//!   character (`"` `'`) inferred from a small replayed sample
//! - **Dual addressing**: `record.get("name")` and `record.get(0)`
//!
//! ## Quick Start
//!
//! ```
//! let mut fruits = Vec::new();
//! for record in csvstream::parse("Fruit,Country\n\nApple,Sweden\n") {
//!     let record = record?;
//!     fruits.push(record.get("Fruit").unwrap_or_default().to_string());
//! }
//! assert_eq!(fruits, vec!["Apple"]);
//! # Ok::<(), csvstream::CsvError>(())
//! ```
//!
//! ## Configuration
//!
//! ```
//! use csvstream::ParserConfig;
//!
//! let mut records = ParserConfig::new()
//!     .auto_detect(true)
//!     .trim_whitespace_from_column_names(true)
//!     .parse("id ; name\n1;\"Smith; John\"\n");
//!
//! let record = records.next_record()?;
//! assert_eq!(record.get("name"), Some("Smith; John"));
//! # Ok::<(), csvstream::CsvError>(())
//! ```

pub mod config;
pub mod csv;
pub mod error;
pub mod header;
pub mod line_source;
pub mod record;
pub mod sequence;

pub use config::ParserConfig;
pub use csv::{Dialect, DialectDetector, Tokenizer};
pub use error::{CsvError, Result};
pub use header::Header;
pub use record::{FieldKey, Record};
pub use sequence::CsvSequence;

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// Parse in-memory CSV text with the default configuration
pub fn parse<S: Into<String>>(text: S) -> CsvSequence<Cursor<String>> {
    ParserConfig::default().parse(text)
}

/// Parse CSV from a reader with the default configuration
///
/// # Examples
///
/// ```
/// let data: &[u8] = b"id,name\n1,Alice\n";
/// let names: Vec<String> = csvstream::parse_reader(data)
///     .filter_map(|record| record.ok())
///     .filter_map(|record| record.get("name").map(str::to_string))
///     .collect();
/// assert_eq!(names, vec!["Alice"]);
/// ```
pub fn parse_reader<R: Read>(reader: R) -> CsvSequence<R> {
    ParserConfig::default().parse_reader(reader)
}

/// Open a CSV file with the default configuration
///
/// ```no_run
/// for record in csvstream::open("data.csv")? {
///     println!("{:?}", record?.fields());
/// }
/// # Ok::<(), csvstream::CsvError>(())
/// ```
pub fn open<P: AsRef<Path>>(path: P) -> Result<CsvSequence<File>> {
    ParserConfig::default().open(path)
}
