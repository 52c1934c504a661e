//! Read-only record view addressable by column name or position

use crate::header::Header;
use indexmap::IndexMap;
use std::sync::Arc;

/// Key usable with [`Record::get`]: a column name or a 0-based position
pub trait FieldKey {
    /// Resolve the key to a field position, if the header knows it
    fn position(&self, header: Option<&Header>) -> Option<usize>;
}

impl FieldKey for usize {
    fn position(&self, _header: Option<&Header>) -> Option<usize> {
        Some(*self)
    }
}

impl FieldKey for &str {
    fn position(&self, header: Option<&Header>) -> Option<usize> {
        header?.position(self)
    }
}

impl FieldKey for String {
    fn position(&self, header: Option<&Header>) -> Option<usize> {
        self.as_str().position(header)
    }
}

impl FieldKey for &String {
    fn position(&self, header: Option<&Header>) -> Option<usize> {
        self.as_str().position(header)
    }
}

/// One tokenized line bound to the sequence's shared header
///
/// The number of fields may differ from the header length. Lookups outside
/// the record return `None`: a short row is missing its trailing columns, and
/// fields past the last header name stay reachable by position only.
///
/// # Examples
///
/// ```
/// let mut records = csvstream::parse("Letter,Word\na,paris\n");
/// let record = records.next().unwrap()?;
///
/// assert_eq!(record.get("Letter"), Some("a"));
/// assert_eq!(record.get(1), Some("paris"));
/// assert_eq!(record.get("Number"), None);
/// assert_eq!(record.get(5), None);
/// # Ok::<(), csvstream::CsvError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    header: Option<Arc<Header>>,
    fields: Vec<String>,
    line_number: u64,
}

impl Record {
    /// Create a record from its fields and an optional shared header
    pub fn new(fields: Vec<String>, header: Option<Arc<Header>>, line_number: u64) -> Self {
        Self {
            header,
            fields,
            line_number,
        }
    }

    /// Field by column name or position, `None` when missing
    pub fn get<K: FieldKey>(&self, key: K) -> Option<&str> {
        let index = key.position(self.header())?;
        self.fields.get(index).map(String::as_str)
    }

    /// Header shared with the other records, absent when every line is data
    pub fn header(&self) -> Option<&Header> {
        self.header.as_deref()
    }

    /// 1-based physical line this record was read from
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Number of fields in this record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// All fields in order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Iterate over field values in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Consume the record, keeping only its fields
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    /// Named columns present in this record, in header order
    ///
    /// Returns `None` without a header. Missing trailing columns are left
    /// out, as are fields beyond the header. Duplicate names keep the first
    /// column.
    pub fn to_map(&self) -> Option<IndexMap<&str, &str>> {
        let header = self.header()?;
        let mut map = IndexMap::with_capacity(header.len());
        for (name, value) in header.iter().zip(self.iter()) {
            map.entry(name).or_insert(value);
        }
        Some(map)
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields
            .iter()
            .map(String::as_str as fn(&'a String) -> &'a str)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Record {
    /// Headed records serialize as a name to value map, others as a list
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_map() {
            Some(map) => serializer.collect_map(map),
            None => serializer.collect_seq(&self.fields),
        }
    }
}
