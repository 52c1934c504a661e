//! Dialect description and sample-based dialect detection

use super::parser::Tokenizer;
use log::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Separator candidates, highest priority first
pub const SEPARATOR_CANDIDATES: [char; 5] = [',', ';', ':', '\t', '|'];

/// Quote character candidates, highest priority first
pub const QUOTE_CANDIDATES: [char; 2] = ['"', '\''];

/// Characters that govern how a line is split into fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dialect {
    /// Field separator
    pub separator: char,
    /// Character that opens and closes a quoted field
    pub quote_char: char,
    /// Character that, followed by the quote character, embeds a literal quote
    pub escape_char: char,
}

impl Dialect {
    /// Create a dialect where quotes are escaped by doubling them
    pub fn new(separator: char, quote_char: char) -> Self {
        Self {
            separator,
            quote_char,
            escape_char: quote_char,
        }
    }

    /// Set the escape character (builder pattern)
    pub fn escape_char(mut self, escape_char: char) -> Self {
        self.escape_char = escape_char;
        self
    }

    /// Tokenizer configured for this dialect
    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new(self.separator, self.quote_char, self.escape_char)
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::new(',', '"')
    }
}

impl From<Dialect> for Tokenizer {
    fn from(dialect: Dialect) -> Self {
        dialect.tokenizer()
    }
}

/// Infers separator and quote character from a bounded sample of lines
///
/// Detection is deterministic and total: when no candidate splits the sample
/// into a consistent number of fields (more than one), the default comma and
/// double-quote are used. Reserved characters are never picked as the
/// separator. Explicit overrides always win over detected values.
///
/// # Examples
///
/// ```
/// use csvstream::csv::DialectDetector;
///
/// let dialect = DialectDetector::new().detect(["a;b;c", "1;2;3"]);
/// assert_eq!(dialect.separator, ';');
/// assert_eq!(dialect.quote_char, '"');
/// ```
#[derive(Debug, Clone, Default)]
pub struct DialectDetector {
    separator: Option<char>,
    quote_char: Option<char>,
    reserved: Vec<char>,
}

impl DialectDetector {
    /// Create a detector with nothing fixed
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the separator instead of detecting it
    pub fn separator(mut self, separator: Option<char>) -> Self {
        self.separator = separator;
        self
    }

    /// Fix the quote character instead of detecting it
    pub fn quote_char(mut self, quote_char: Option<char>) -> Self {
        self.quote_char = quote_char;
        self
    }

    /// Never pick this character as the separator
    ///
    /// Used for an explicit escape character.
    pub fn reserve(mut self, reserved: char) -> Self {
        if !self.reserved.contains(&reserved) {
            self.reserved.push(reserved);
        }
        self
    }

    /// Infer the dialect from sampled lines
    ///
    /// The escape character of the returned dialect equals its quote
    /// character; callers with an explicit escape character override it.
    pub fn detect<'a, I>(&self, sample: I) -> Dialect
    where
        I: IntoIterator<Item = &'a str>,
    {
        let sample: Vec<&str> = sample.into_iter().collect();

        let separator = match self.separator {
            Some(separator) => separator,
            None => match self.detect_separator(&sample) {
                Some((separator, width)) => {
                    debug!(
                        "Detected separator {:?} ({} fields over {} sampled lines)",
                        separator,
                        width,
                        sample.len()
                    );
                    separator
                }
                None => {
                    let fallback = self
                        .separator_candidates()
                        .next()
                        .unwrap_or(Dialect::default().separator);
                    warn!(
                        "No consistent separator in {} sampled lines, using {:?}",
                        sample.len(),
                        fallback
                    );
                    fallback
                }
            },
        };

        let quote_char = match self.quote_char {
            Some(quote_char) => quote_char,
            None => Self::detect_quote_char(&sample, separator),
        };

        Dialect::new(separator, quote_char)
    }

    fn separator_candidates(&self) -> impl Iterator<Item = char> + '_ {
        SEPARATOR_CANDIDATES
            .iter()
            .copied()
            .filter(move |candidate| {
                !self.reserved.contains(candidate) && Some(*candidate) != self.quote_char
            })
    }

    /// Pick the separator with the widest consistent split
    ///
    /// Ties go to the candidate listed first in [`SEPARATOR_CANDIDATES`].
    fn detect_separator(&self, sample: &[&str]) -> Option<(char, usize)> {
        let quotes: &[char] = match &self.quote_char {
            Some(quote_char) => std::slice::from_ref(quote_char),
            None => &QUOTE_CANDIDATES,
        };

        let mut best: Option<(char, usize)> = None;
        for separator in self.separator_candidates() {
            for &quote_char in quotes {
                if separator == quote_char {
                    continue;
                }
                let tokenizer = Tokenizer::new(separator, quote_char, quote_char);
                if let Some(width) = consistent_width(sample, &tokenizer) {
                    if best.map_or(true, |(_, best_width)| width > best_width) {
                        best = Some((separator, width));
                    }
                }
            }
        }
        best
    }

    /// Pick the quote character whose quoted fields look intentional
    ///
    /// Only quotes that keep the separator's widest consistent split are
    /// eligible. Among those, closed quoted fields containing the separator
    /// are the strongest signal, any closed quoted field the next one.
    /// Without either the double quote wins.
    fn detect_quote_char(sample: &[&str], separator: char) -> char {
        let widths: Vec<(char, Option<usize>)> = QUOTE_CANDIDATES
            .iter()
            .copied()
            .filter(|&quote_char| quote_char != separator)
            .map(|quote_char| {
                let tokenizer = Tokenizer::new(separator, quote_char, quote_char);
                (quote_char, consistent_width(sample, &tokenizer))
            })
            .collect();
        let widest = widths.iter().filter_map(|(_, width)| *width).max();
        let eligible: Vec<char> = widths
            .iter()
            .filter(|(_, width)| widest.is_none() || *width == widest)
            .map(|(quote_char, _)| *quote_char)
            .collect();

        let fallback = eligible.first().copied().unwrap_or(QUOTE_CANDIDATES[0]);
        let mut best = (fallback, 0usize, 0usize);

        for &quote_char in &eligible {
            let tokenizer = Tokenizer::new(separator, quote_char, quote_char);
            let mut quoted = 0;
            let mut quoted_with_separator = 0;
            for line in sample {
                for field in tokenizer.scan_line(line) {
                    if field.quoted {
                        quoted += 1;
                        if field.value.contains(separator) {
                            quoted_with_separator += 1;
                        }
                    }
                }
            }

            if (quoted_with_separator, quoted) > (best.1, best.2) {
                best = (quote_char, quoted_with_separator, quoted);
            }
        }

        if best.2 > 0 {
            debug!(
                "Detected quote character {:?} ({} quoted fields)",
                best.0, best.2
            );
        }
        best.0
    }
}

/// Field count shared by every sampled line, if there is one above 1
fn consistent_width(sample: &[&str], tokenizer: &Tokenizer) -> Option<usize> {
    let mut counts = sample.iter().map(|line| tokenizer.count_fields(line));
    let first = counts.next()?;
    if first > 1 && counts.all(|count| count == first) {
        Some(first)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_comma() {
        let dialect = DialectDetector::new().detect(["Letter,Word,Number", "a,paris,5"]);
        assert_eq!(dialect, Dialect::new(',', '"'));
    }

    #[test]
    fn test_detect_semicolon() {
        let dialect = DialectDetector::new().detect(["a;b;c", "1;2;3", "4;5;6"]);
        assert_eq!(dialect.separator, ';');
    }

    #[test]
    fn test_detect_colon() {
        let dialect = DialectDetector::new().detect(["key:value", "a:1", "b:2"]);
        assert_eq!(dialect.separator, ':');
    }

    #[test]
    fn test_detect_tab_and_pipe() {
        assert_eq!(
            DialectDetector::new().detect(["a\tb", "1\t2"]).separator,
            '\t'
        );
        assert_eq!(DialectDetector::new().detect(["a|b", "1|2"]).separator, '|');
    }

    #[test]
    fn test_widest_consistent_split_wins() {
        // Comma gives a consistent 2, semicolon a consistent 3
        let dialect = DialectDetector::new().detect(["a;b,x;c", "1;2,y;3"]);
        assert_eq!(dialect.separator, ';');
    }

    #[test]
    fn test_tie_goes_to_priority_order() {
        let dialect = DialectDetector::new().detect(["a,b;c", "1,2;3"]);
        assert_eq!(dialect.separator, ',');
    }

    #[test]
    fn test_inconsistent_sample_falls_back() {
        let dialect = DialectDetector::new().detect(["a,b", "1,2,3", "x"]);
        assert_eq!(dialect, Dialect::default());
    }

    #[test]
    fn test_empty_sample_falls_back() {
        let dialect = DialectDetector::new().detect(Vec::<&str>::new());
        assert_eq!(dialect, Dialect::default());
    }

    #[test]
    fn test_single_column_falls_back() {
        let dialect = DialectDetector::new().detect(["name", "alice", "bob"]);
        assert_eq!(dialect, Dialect::default());
    }

    #[test]
    fn test_quoted_separator_detected() {
        let dialect = DialectDetector::new().detect([
            "Typo;Desc",
            r#"123;"text ;and more""#,
            r#"456;"plain""#,
        ]);
        assert_eq!(dialect.separator, ';');
        assert_eq!(dialect.quote_char, '"');
    }

    #[test]
    fn test_single_quote_detected() {
        let dialect = DialectDetector::new().detect([
            "id,name",
            "1,'Smith, John'",
            "2,'Doe, Jane'",
        ]);
        assert_eq!(dialect.separator, ',');
        assert_eq!(dialect.quote_char, '\'');
    }

    #[test]
    fn test_overrides_win() {
        let dialect = DialectDetector::new()
            .separator(Some('|'))
            .detect(["a;b;c", "1;2;3"]);
        assert_eq!(dialect.separator, '|');

        let dialect = DialectDetector::new()
            .quote_char(Some('\''))
            .detect(["a;b;c", "1;2;3"]);
        assert_eq!(dialect, Dialect::new(';', '\''));
    }

    #[test]
    fn test_quote_never_equals_separator() {
        let dialect = DialectDetector::new()
            .separator(Some('"'))
            .detect(["a\"b", "1\"2"]);
        assert_eq!(dialect, Dialect::new('"', '\''));
    }

    #[test]
    fn test_apostrophe_led_field_keeps_double_quote() {
        let sample = ["name,year", "'80s hits,1985", "other,1990"];
        let dialect = DialectDetector::new().detect(sample);
        assert_eq!(dialect, Dialect::new(',', '"'));
        assert_eq!(
            dialect.tokenizer().parse_line(sample[1]),
            vec!["'80s hits", "1985"]
        );
    }

    #[test]
    fn test_quote_must_keep_the_split_consistent() {
        // Closed single quotes exist, but they would merge fields on line 3
        let dialect = DialectDetector::new().detect([
            "a,b,c",
            "'x',1,2",
            "'y,3,4",
        ]);
        assert_eq!(dialect, Dialect::new(',', '"'));
    }

    #[test]
    fn test_reserved_character_is_never_the_separator() {
        let dialect = DialectDetector::new()
            .reserve(';')
            .detect(["a;b;c", "1;2;3"]);
        assert_ne!(dialect.separator, ';');
        assert_eq!(dialect, Dialect::default());

        let dialect = DialectDetector::new()
            .reserve(',')
            .detect(["a;b,c", "1;2,3"]);
        assert_eq!(dialect.separator, ';');
    }

    #[test]
    fn test_fallback_skips_reserved_comma() {
        let dialect = DialectDetector::new().reserve(',').detect(["name", "x"]);
        assert_eq!(dialect.separator, ';');
    }

    #[test]
    fn test_dialect_escape_builder() {
        let dialect = Dialect::new(',', '"').escape_char('\\');
        assert_eq!(dialect.escape_char, '\\');
        assert_eq!(
            dialect.tokenizer().parse_line(r#""a\"b",c"#),
            vec!["a\"b", "c"]
        );
    }
}
