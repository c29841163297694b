use crate::error::{PlotError, Result};
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Key to value table read from a small csv-like file (colors or labels).
/// The first occurrence of a key wins.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: IndexMap<String, String>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Self::from_reader(reader, path)
    }

    pub fn from_reader(reader: impl BufRead, path: &str) -> Result<Self> {
        let mut table = Self::new();
        for line in table_lines(reader) {
            let line = line?;
            let separator = detect_separator(&line).ok_or_else(|| PlotError::MissingSeparator {
                line: line.clone(),
                path: path.to_string(),
            })?;
            if let Some((key, value)) = line.split_once(separator) {
                table.insert_if_absent(key.trim(), value.trim());
            }
        }
        Ok(table)
    }

    /// Returns false when the key was already present; the old value is kept.
    pub fn insert_if_absent(&mut self, key: &str, value: &str) -> bool {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value.to_string());
                true
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Value for the first key that has one.
    pub fn first_hit<'a>(&self, mut keys: impl Iterator<Item = &'a str>) -> Option<&str> {
        keys.find_map(|key| self.get(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Comma, then semicolon, then tab; the first one found on the line is used.
pub fn detect_separator(line: &str) -> Option<char> {
    [',', ';', '\t'].into_iter().find(|sep| line.contains(*sep))
}

/// Trimmed lines without blanks and `#` comments.
pub(crate) fn table_lines(reader: impl BufRead) -> impl Iterator<Item = std::io::Result<String>> {
    reader
        .lines()
        .map(|line| line.map(|l| l.trim().to_string()))
        .filter(|line| match line {
            Ok(l) => !l.is_empty() && !l.starts_with('#'),
            Err(_) => true,
        })
}
