use std::collections::BTreeMap;

use dart_core::sequence::Sequence;
use serde::{Deserialize, Serialize};

/// Columns tried, in order, when looking for an aptamer's sequence.
const SEQUENCE_COLUMNS: [&str; 4] = [
    "sequence",
    "aptamer_sequence",
    "sequence_5'-3'",
    "sequence_5'_to_3'",
];

/// One row of the aptamer table.
///
/// Every cell is kept under its normalized column name; `target` and the
/// derived `target_key` are lifted out because lookups go through them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AptamerRecord {
    /// 1-based data row (the header is row 0).
    pub row: usize,
    pub target: String,
    /// Lowercased target with everything but ASCII letters and digits removed.
    pub target_key: String,
    pub fields: BTreeMap<String, String>,
}

impl AptamerRecord {
    pub fn new(row: usize, fields: BTreeMap<String, String>) -> Self {
        let target = fields.get("target").cloned().unwrap_or_default();
        Self {
            row,
            target_key: normalize_key(&target),
            target,
            fields,
        }
    }

    /// Cell under a normalized column name; blank cells read as `None`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// The aptamer sequence cell, from the first sequence-like column present.
    pub fn sequence(&self) -> Option<&str> {
        SEQUENCE_COLUMNS
            .iter()
            .find_map(|column| self.get(column))
            .or_else(|| self.first_matching("sequence"))
    }

    /// Sanitized aptamer named after the target, if the row has a usable sequence.
    pub fn aptamer(&self) -> Option<Sequence> {
        let name = if self.target_key.is_empty() {
            format!("row_{}", self.row)
        } else {
            self.target_key.clone()
        };
        let seq = Sequence::new(name, self.sequence()?);
        (!seq.is_empty()).then_some(seq)
    }

    /// The binding buffer description, if the table has one.
    pub fn buffer(&self) -> Option<&str> {
        self.get("buffer").or_else(|| self.first_matching("buffer"))
    }

    fn first_matching(&self, fragment: &str) -> Option<&str> {
        self.fields
            .iter()
            .filter(|(column, _)| column.contains(fragment))
            .find_map(|(column, _)| self.get(column))
    }

    pub fn matches(&self, query_key: &str) -> bool {
        !self.target_key.is_empty() && self.target_key.contains(query_key)
    }
}

/// Normalize a spreadsheet header: trim, lowercase, spaces and slashes to
/// underscores, parentheses removed.
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .replace(' ', "_")
        .replace(['(', ')'], "")
        .replace('/', "_")
}

/// Lookup key for target names: lowercase ASCII letters and digits only.
pub fn normalize_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
