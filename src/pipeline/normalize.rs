//! Name canonicalization and token formatting.
//!
//! Turns one [`Candidate`] into its final output token: the name is stripped
//! of `%`/`:`, trimmed and title-cased into the canonical lookup key, the
//! abbreviation table substitutes the short form when one exists, and the
//! percent-suffix rule restores a `%` the numeric pattern could not capture.

use crate::Candidate;
use crate::config::RuleConfig;
use crate::utils::title_case;
use compact_str::{CompactString, format_compact};

pub(crate) struct NameNormalizer<'a> {
    config: &'a RuleConfig,
}

impl<'a> NameNormalizer<'a> {
    pub(crate) fn new(config: &'a RuleConfig) -> Self {
        Self { config }
    }

    /// Produces the formatted output token for one candidate.
    ///
    /// `line` is the raw line the candidate came from; it carries the `%`
    /// marker when the value pattern only captured the digits.
    pub(crate) fn normalize(&self, candidate: &Candidate, line: &str) -> CompactString {
        match candidate {
            Candidate::Numeric { name, value }
            | Candidate::Range { name, value }
            | Candidate::Qualitative { name, value } => {
                let name = self.resolve_name(name);
                let value = self.apply_percent_rule(value, line);
                format_compact!("{name} {value}")
            }
            Candidate::Antibiogram { name, code } => format_compact!("{name} ({code})"),
            Candidate::Microbiology { text } => text.clone(),
        }
    }

    /// Canonicalizes the extracted name and substitutes its abbreviation.
    fn resolve_name(&self, name: &str) -> CompactString {
        let canonical = canonical_name(name);
        match self.config.abbreviation_for(&canonical) {
            Some(short) => CompactString::new(short),
            None => CompactString::new(canonical),
        }
    }

    /// Appends `%` when the raw line carried one and the value does not
    /// already end in it.
    fn apply_percent_rule(&self, value: &str, line: &str) -> CompactString {
        if line.contains('%') && !value.ends_with('%') {
            format_compact!("{value}%")
        } else {
            CompactString::new(value)
        }
    }
}

/// The canonical abbreviation-table lookup key: `%` and `:` stripped,
/// whitespace trimmed, title-cased.
pub(crate) fn canonical_name(name: &str) -> String {
    let stripped: String = name.chars().filter(|c| *c != '%' && *c != ':').collect();
    title_case(stripped.trim())
}
