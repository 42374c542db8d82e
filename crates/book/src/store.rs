//! Deduplicating, ordered collection of book positions.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;

/// How a stored position was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookLine {
    /// FEN of the position the expansion started from.
    pub root: Arc<str>,
    /// UCI moves leading from `root` to the stored position.
    pub moves: Vec<String>,
}

/// Book positions keyed by FEN, iterated in lexicographic FEN order.
///
/// When two lines reach the same position the first one inserted is kept
/// and later ones are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryStore {
    entries: BTreeMap<String, BookLine>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a position. Returns false if the position was already stored.
    pub fn insert(&mut self, fen: String, line: BookLine) -> bool {
        match self.entries.entry(fen) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(line);
                true
            }
        }
    }

    pub fn get(&self, fen: &str) -> Option<&BookLine> {
        self.entries.get(fen)
    }

    pub fn contains(&self, fen: &str) -> bool {
        self.entries.contains_key(fen)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BookLine)> {
        self.entries.iter().map(|(fen, line)| (fen.as_str(), line))
    }

    /// Keep only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &BookLine) -> bool) {
        self.entries.retain(|fen, line| keep(fen, line));
    }
}

impl<'a> IntoIterator for &'a EntryStore {
    type Item = (&'a String, &'a BookLine);
    type IntoIter = std::collections::btree_map::Iter<'a, String, BookLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Drop the halfmove clock and fullmove number from a FEN.
///
/// Text with fewer than three fields is returned with whitespace normalized.
pub fn trim_fen(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let keep = if fields.len() < 3 {
        fields.len()
    } else {
        fields.len() - 2
    };
    fields[..keep].join(" ")
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
