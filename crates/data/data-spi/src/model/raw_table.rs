//! Untyped table as read from a source.

use serde::{Deserialize, Serialize};

/// Markers treated as a missing cell, compared after trimming.
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL"];

/// Whether a raw cell counts as missing.
pub fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell.trim())
}

/// Header plus rows of text cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table, trimming surrounding whitespace from every header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: headers.into_iter().map(|h| h.trim().to_string()).collect(),
            rows,
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_trimmed() {
        let table = RawTable::new(
            vec!["Serial No.".into(), " LOR ".into(), "Chance of Admit ".into()],
            vec![],
        );
        assert_eq!(table.headers, vec!["Serial No.", "LOR", "Chance of Admit"]);
        assert_eq!(table.column_index("Chance of Admit"), Some(2));
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_markers() {
        assert!(is_missing(""));
        assert!(is_missing("  "));
        assert!(is_missing("NA"));
        assert!(is_missing("NaN"));
        assert!(!is_missing("0"));
        assert!(!is_missing("n.a."));
    }
}
