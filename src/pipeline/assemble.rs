//! Ordered, duplicate-free assembly of output tokens.

use crate::Extraction;
use compact_str::CompactString;
use itertools::Itertools;

/// Token accumulator owned by one document-processing call.
///
/// Insertion order is preserved and duplicates are refused by exact token
/// equality, first seen wins.
#[derive(Debug, Default)]
pub(crate) struct ResultSet {
    tokens: Vec<CompactString>,
}

impl ResultSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a token unless an identical one is already present.
    ///
    /// Returns `true` when the token was added.
    pub(crate) fn push(&mut self, token: CompactString) -> bool {
        if self.tokens.contains(&token) {
            return false;
        }
        self.tokens.push(token);
        true
    }

    /// Joins the collected tokens into the final output.
    pub(crate) fn finish(self) -> Extraction {
        if self.tokens.is_empty() {
            Extraction::Empty
        } else {
            Extraction::Text(self.tokens.iter().join(" - "))
        }
    }
}
