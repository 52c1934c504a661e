//! Parser configuration
//!
//! [`ParserConfig`] is built with consuming builder methods and then handed
//! to [`CsvSequence`] through [`ParserConfig::parse`],
//! [`ParserConfig::parse_reader`] or [`ParserConfig::open`].

use crate::csv::{Dialect, DialectDetector};
use crate::error::{CsvError, Result};
use crate::sequence::CsvSequence;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default number of non-blank lines sampled for dialect detection
pub const DEFAULT_SAMPLE_LINES: usize = 10;

/// Options recognized by the parser
///
/// Separator, quote and escape characters left unset fall back to `,`, `"`
/// and the quote character respectively. With `auto_detect`, only the unset
/// separator and quote character are inferred; explicit values are kept.
///
/// # Examples
///
/// ```
/// use csvstream::ParserConfig;
///
/// let mut records = ParserConfig::new()
///     .separator(';')
///     .skip_lines(1)
///     .parse("exported 2024-01-01\nid;name\n1;Alice\n");
///
/// let record = records.next().unwrap()?;
/// assert_eq!(record.get("name"), Some("Alice"));
/// # Ok::<(), csvstream::CsvError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ParserConfig {
    pub(crate) separator: Option<char>,
    pub(crate) quote_char: Option<char>,
    pub(crate) escape_char: Option<char>,
    pub(crate) auto_detect: bool,
    pub(crate) read_first_line: bool,
    pub(crate) skip_lines: usize,
    pub(crate) trim_whitespace_from_column_names: bool,
    pub(crate) sample_lines: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            separator: None,
            quote_char: None,
            escape_char: None,
            auto_detect: false,
            read_first_line: false,
            skip_lines: 0,
            trim_whitespace_from_column_names: false,
            sample_lines: DEFAULT_SAMPLE_LINES,
        }
    }
}

impl ParserConfig {
    /// Create a configuration with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field separator (builder pattern)
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Set the quote character (builder pattern)
    pub fn quote_char(mut self, quote_char: char) -> Self {
        self.quote_char = Some(quote_char);
        self
    }

    /// Set the escape character used before a quote inside quoted fields
    pub fn escape_char(mut self, escape_char: char) -> Self {
        self.escape_char = Some(escape_char);
        self
    }

    /// Infer unset separator and quote character from a sample of the input
    pub fn auto_detect(mut self, auto_detect: bool) -> Self {
        self.auto_detect = auto_detect;
        self
    }

    /// Treat every line as data instead of reading a header row first
    pub fn read_first_line(mut self, read_first_line: bool) -> Self {
        self.read_first_line = read_first_line;
        self
    }

    /// Discard this many physical lines, blank ones included, before anything else
    pub fn skip_lines(mut self, skip_lines: usize) -> Self {
        self.skip_lines = skip_lines;
        self
    }

    /// Trim surrounding whitespace from header names (data values are never trimmed)
    pub fn trim_whitespace_from_column_names(mut self, trim: bool) -> Self {
        self.trim_whitespace_from_column_names = trim;
        self
    }

    /// Number of non-blank lines buffered for dialect detection
    pub fn sample_lines(mut self, sample_lines: usize) -> Self {
        self.sample_lines = sample_lines.max(1);
        self
    }

    /// Dialect from explicit settings and defaults, without detection
    pub fn dialect(&self) -> Dialect {
        let defaults = Dialect::default();
        self.complete(
            self.separator.unwrap_or(defaults.separator),
            self.quote_char.unwrap_or(defaults.quote_char),
        )
    }

    /// Dialect for a sample of the input
    ///
    /// Without `auto_detect` the sample is ignored and this equals
    /// [`dialect`](Self::dialect).
    pub fn resolve_dialect<'a, I>(&self, sample: I) -> Dialect
    where
        I: IntoIterator<Item = &'a str>,
    {
        if !self.auto_detect {
            return self.dialect();
        }
        let mut detector = DialectDetector::new()
            .separator(self.separator)
            .quote_char(self.quote_char);
        if let Some(escape_char) = self.escape_char {
            detector = detector.reserve(escape_char);
        }
        let detected = detector.detect(sample);
        self.complete(detected.separator, detected.quote_char)
    }

    /// Reject dialects where the separator collides with quoting
    pub fn validate_dialect(dialect: &Dialect) -> Result<()> {
        if dialect.separator == dialect.quote_char {
            return Err(CsvError::InvalidConfig(format!(
                "separator and quote character are both {:?}",
                dialect.separator
            )));
        }
        if dialect.separator == dialect.escape_char {
            return Err(CsvError::InvalidConfig(format!(
                "separator and escape character are both {:?}",
                dialect.separator
            )));
        }
        Ok(())
    }

    /// Parse in-memory text
    pub fn parse<S: Into<String>>(self, text: S) -> CsvSequence<Cursor<String>> {
        CsvSequence::new(Cursor::new(text.into()), self)
    }

    /// Parse any reader, pulling lines from it on demand
    pub fn parse_reader<R: Read>(self, reader: R) -> CsvSequence<R> {
        CsvSequence::new(reader, self)
    }

    /// Open a CSV file and parse it lazily
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<CsvSequence<File>> {
        let file = File::open(path.as_ref())?;
        Ok(CsvSequence::new(file, self))
    }

    fn complete(&self, separator: char, quote_char: char) -> Dialect {
        let dialect = Dialect::new(separator, quote_char);
        match self.escape_char {
            Some(escape_char) => dialect.escape_char(escape_char),
            None => dialect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.dialect(), Dialect::new(',', '"'));
        assert!(!config.auto_detect);
        assert!(!config.read_first_line);
        assert_eq!(config.skip_lines, 0);
        assert_eq!(config.sample_lines, DEFAULT_SAMPLE_LINES);
    }

    #[test]
    fn test_builder() {
        let config = ParserConfig::new()
            .separator('\t')
            .quote_char('\'')
            .escape_char('\\')
            .read_first_line(true)
            .skip_lines(2)
            .trim_whitespace_from_column_names(true);

        assert_eq!(config.dialect(), Dialect::new('\t', '\'').escape_char('\\'));
        assert!(config.read_first_line);
        assert!(config.trim_whitespace_from_column_names);
        assert_eq!(config.skip_lines, 2);
    }

    #[test]
    fn test_escape_follows_quote() {
        let config = ParserConfig::new().quote_char('\'');
        assert_eq!(config.dialect().escape_char, '\'');
    }

    #[test]
    fn test_resolve_without_auto_detect_ignores_sample() {
        let config = ParserConfig::new();
        assert_eq!(config.resolve_dialect(["a;b", "1;2"]).separator, ',');
    }

    #[test]
    fn test_resolve_fills_only_unset_dimensions() {
        let config = ParserConfig::new().auto_detect(true).quote_char('\'');
        let dialect = config.resolve_dialect(["a;b", "1;2"]);
        assert_eq!(dialect, Dialect::new(';', '\''));
    }

    #[test]
    fn test_resolve_never_detects_the_escape_as_separator() {
        let config = ParserConfig::new().auto_detect(true).escape_char(';');
        let dialect = config.resolve_dialect(["a;b;c", "1;2;3"]);
        assert_eq!(dialect.separator, ',');
        assert_eq!(dialect.escape_char, ';');
        assert!(ParserConfig::validate_dialect(&dialect).is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(ParserConfig::validate_dialect(&Dialect::default()).is_ok());
        assert!(matches!(
            ParserConfig::validate_dialect(&Dialect::new(',', ',')),
            Err(CsvError::InvalidConfig(_))
        ));
        assert!(ParserConfig::validate_dialect(&Dialect::new(';', '"').escape_char(';')).is_err());
    }

    #[test]
    fn test_sample_lines_at_least_one() {
        assert_eq!(ParserConfig::new().sample_lines(0).sample_lines, 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial() {
        let config: ParserConfig =
            serde_json::from_str(r#"{"separator": ";", "skip_lines": 1}"#).unwrap();
        assert_eq!(config.dialect().separator, ';');
        assert_eq!(config.skip_lines, 1);
        assert_eq!(config.sample_lines, DEFAULT_SAMPLE_LINES);
    }
}
