//! CSV dialect handling: line tokenizing and dialect detection

mod dialect;
mod parser;

pub use dialect::{Dialect, DialectDetector, QUOTE_CANDIDATES, SEPARATOR_CANDIDATES};
pub use parser::{ScannedField, Tokenizer};
