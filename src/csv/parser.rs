//! Line tokenizer with quote and escape handling

use std::mem;

/// One field produced by [`Tokenizer::scan_line`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedField {
    /// Unescaped field contents
    pub value: String,
    /// Whether the field was enclosed in a matched pair of quote characters
    ///
    /// A field whose opening quote is only closed by the end of the line is
    /// not counted as quoted.
    pub quoted: bool,
}

/// Splits one physical line into fields
///
/// A field is quoted only when its very first character is the quote
/// character. Inside a quoted field the separator is literal, and the escape
/// character followed by the quote character yields one literal quote. With
/// the default dialect escape and quote are both `"`, so `""` embeds a quote.
///
/// Malformed input never fails: an unterminated quoted field is closed at the
/// end of the line, and anything between a closing quote and the next
/// separator is kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    separator: char,
    quote_char: char,
    escape_char: char,
}

impl Tokenizer {
    /// Create a tokenizer for the given separator, quote and escape characters
    pub fn new(separator: char, quote_char: char, escape_char: char) -> Self {
        Self {
            separator,
            quote_char,
            escape_char,
        }
    }

    /// Field separator
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Quote character
    pub fn quote_char(&self) -> char {
        self.quote_char
    }

    /// Parse a line into field values
    pub fn parse_line(&self, line: &str) -> Vec<String> {
        self.scan_line(line)
            .into_iter()
            .map(|field| field.value)
            .collect()
    }

    /// Count fields without keeping their values around
    pub fn count_fields(&self, line: &str) -> usize {
        self.scan_line(line).len()
    }

    /// Parse a line, also reporting which fields were quoted
    pub fn scan_line(&self, line: &str) -> Vec<ScannedField> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut quoted = false;
        let mut in_quotes = false;
        let mut at_field_start = true;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            if in_quotes {
                if ch == self.escape_char && chars.peek() == Some(&self.quote_char) {
                    current.push(self.quote_char);
                    chars.next();
                } else if ch == self.quote_char {
                    in_quotes = false;
                    quoted = true;
                } else {
                    current.push(ch);
                }
                continue;
            }

            if ch == self.separator {
                fields.push(ScannedField {
                    value: mem::take(&mut current),
                    quoted,
                });
                quoted = false;
                at_field_start = true;
            } else if at_field_start && ch == self.quote_char {
                in_quotes = true;
                at_field_start = false;
            } else {
                current.push(ch);
                at_field_start = false;
            }
        }

        // End of line closes the last field, quoted or not
        fields.push(ScannedField {
            value: current,
            quoted,
        });
        fields
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(',', '"', '"')
    }
}
