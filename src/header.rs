//! Column names and their name to position mapping

use indexmap::IndexMap;

/// Ordered column names shared by every record of a sequence
///
/// Names need not be unique; a lookup resolves to the first column carrying
/// the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
    positions: IndexMap<String, usize>,
}

impl Header {
    /// Create a header from column names, kept verbatim
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut positions = IndexMap::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            positions.entry(name.clone()).or_insert(index);
        }
        Self { names, positions }
    }

    /// Create a header from a tokenized line, optionally trimming each name
    pub fn from_fields(fields: Vec<String>, trim: bool) -> Self {
        if trim {
            Self::new(fields.iter().map(|name| name.trim()))
        } else {
            Self::new(fields)
        }
    }

    /// Position of the first column with this name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Name of the column at `index`
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Check if a column with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// All column names in order, duplicates included
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterate over column names in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the header has no columns
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        let header = Header::new(["Letter", "Word", "Number"]);
        assert_eq!(header.len(), 3);
        assert_eq!(header.position("Word"), Some(1));
        assert_eq!(header.position("word"), None);
        assert_eq!(header.name(2), Some("Number"));
        assert_eq!(header.name(3), None);
    }

    #[test]
    fn test_duplicate_names_resolve_to_first() {
        let header = Header::new(["id", "value", "id"]);
        assert_eq!(header.position("id"), Some(0));
        assert_eq!(header.names(), &["id", "value", "id"]);
    }

    #[test]
    fn test_trim_names() {
        let fields = vec![" id ".to_string(), "\tname".to_string()];
        let header = Header::from_fields(fields.clone(), true);
        assert_eq!(header.position("id"), Some(0));
        assert_eq!(header.position("name"), Some(1));

        let verbatim = Header::from_fields(fields, false);
        assert_eq!(verbatim.position("id"), None);
        assert_eq!(verbatim.position(" id "), Some(0));
    }

    #[test]
    fn test_iter() {
        let header = Header::new(vec!["a".to_string(), "b".to_string()]);
        assert!(header.contains("b"));
        assert_eq!(header.iter().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(!header.is_empty());
    }
}
