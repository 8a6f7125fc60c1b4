//! Extract and normalize structured test results from scanned laboratory
//! report text.
//!
//! `labextract` turns the unstructured text lines of a scanned lab report into
//! deduplicated `"test-name value"` tokens joined into one string, ready to be
//! pasted into a clinical note. It classifies each line with an ordered rule
//! cascade (antibiogram → microbiology free-text → range → numeric →
//! qualitative), canonicalizes test names through an abbreviation table, and
//! assembles the accepted tokens in encounter order.
//!
//! # Features
//!
//! - `fetch` - Enable the blocking remote fetch collaborator (`RemoteFetcher`,
//!   built on `reqwest`), for callers that download reports by URL.
//!
//! # Basic Usage
//!
//! ```rust
//! use labextract::{Extractor, TextDocument};
//!
//! let doc = TextDocument::from_text(
//!     "Hospital Barros Luco - Fecha 01/01/2024\n\
//!      Hemoglobina 10.1\n\
//!      Proteina C Reactiva 57.09",
//! );
//!
//! let outcome = Extractor::new().process(&doc).unwrap();
//! assert_eq!(outcome.text(), Some("Hb 10.1 - PCR 57.09"));
//! ```
//!
//! # Customizing the Rules
//!
//! All matching is driven by an immutable [`RuleConfig`]: noise keywords,
//! qualitative vocabulary, antibiotic and microbiology lists, and the
//! abbreviation table. New panels or institutions are covered by extending the
//! configuration, never by touching the matching algorithm:
//!
//! ```rust
//! use labextract::{Extractor, RuleConfig};
//!
//! let mut config = RuleConfig::new();
//! config
//!     .add_noise_keywords(["Clinica Davila"])
//!     .set_abbreviation("Procalcitonina", "PCT");
//!
//! let extractor = Extractor::with_config(config);
//! let outcome = extractor.process_text("Procalcitonina 0.12").unwrap();
//! assert_eq!(outcome.text(), Some("PCT 0.12"));
//! ```
//!
//! # Outcomes and Errors
//!
//! Each processed document ends in exactly one of three states: text was
//! extracted ([`Extraction::Text`]), the document was readable but held no
//! results ([`Extraction::Empty`]), or a document-level failure occurred
//! ([`ExtractError`]). Lines that fail filtering or matching are absorbed
//! silently; one malformed line never prevents extraction of the rest, and an
//! error never comes with partial output.
//!
//! ```rust
//! use labextract::{Extraction, Extractor};
//!
//! let outcome = Extractor::new()
//!     .process_text("Página 1 de 1\nValores de Referencia")
//!     .unwrap();
//! assert_eq!(outcome, Extraction::Empty);
//! ```
//!
//! # Thread Safety
//!
//! An [`Extractor`] holds only its read-only [`RuleConfig`] and may be shared
//! across threads; every `process` call owns its result set exclusively.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;
#[cfg(feature = "fetch")]
pub mod fetch;
mod pipeline;
pub mod source;
mod utils;

// Reexports
pub use config::RuleConfig;
pub use error::ExtractError;
#[cfg(feature = "fetch")]
pub use fetch::RemoteFetcher;
pub use pipeline::Extractor;
pub use source::{DocumentSource, TextDocument};

/// Result kinds recognized by the rule cascade, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultKind {
    /// Per-antibiotic susceptibility outcome (`S`/`I`/`R`).
    Antibiogram,
    /// Free-text microbiology finding (organisms, cultures, counts).
    MicrobiologyText,
    /// Numeric reference range `N - M`.
    Range,
    /// Plain numeric result, optionally prefixed with `<`/`>`.
    Numeric,
    /// Descriptive result from the qualitative vocabulary.
    Qualitative,
}

impl ResultKind {
    /// Convert the kind to a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Antibiogram => "antibiogram",
            ResultKind::MicrobiologyText => "microbiology",
            ResultKind::Range => "range",
            ResultKind::Numeric => "numeric",
            ResultKind::Qualitative => "qualitative",
        }
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tentative name/value pair extracted from one line, before normalization.
///
/// Transient: scoped to processing a single line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Candidate {
    /// Plain numeric result.
    Numeric {
        name: CompactString,
        value: CompactString,
    },
    /// Numeric range result, value already collapsed to `N-M`.
    Range {
        name: CompactString,
        value: CompactString,
    },
    /// Descriptive result: the matched keyword plus any trailing text.
    Qualitative {
        name: CompactString,
        value: CompactString,
    },
    /// Antibiotic susceptibility, `code` one of `S`/`I`/`R`.
    Antibiogram {
        name: CompactString,
        code: CompactString,
    },
    /// Whitespace-collapsed free-text microbiology line.
    Microbiology { text: CompactString },
}

impl Candidate {
    /// The rule kind this candidate was produced by.
    pub fn kind(&self) -> ResultKind {
        match self {
            Candidate::Numeric { .. } => ResultKind::Numeric,
            Candidate::Range { .. } => ResultKind::Range,
            Candidate::Qualitative { .. } => ResultKind::Qualitative,
            Candidate::Antibiogram { .. } => ResultKind::Antibiogram,
            Candidate::Microbiology { .. } => ResultKind::MicrobiologyText,
        }
    }
}

/// Outcome of processing one document.
///
/// A document that decodes but yields no matching lines is a valid, non-error
/// outcome ([`Extraction::Empty`]), distinct from a terminal [`ExtractError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extraction {
    /// Non-empty assembled output, tokens joined with `" - "`.
    Text(String),
    /// The document held no readable results.
    Empty,
}

impl Extraction {
    /// The assembled text, or `None` for an empty extraction.
    pub fn text(&self) -> Option<&str> {
        match self {
            Extraction::Text(text) => Some(text),
            Extraction::Empty => None,
        }
    }

    /// Consumes the outcome, yielding the assembled text if any.
    pub fn into_text(self) -> Option<String> {
        match self {
            Extraction::Text(text) => Some(text),
            Extraction::Empty => None,
        }
    }

    /// Whether the document held no readable results.
    pub fn is_empty(&self) -> bool {
        matches!(self, Extraction::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_kind_display() {
        assert_eq!(format!("{}", ResultKind::Antibiogram), "antibiogram");
        assert_eq!(format!("{}", ResultKind::Numeric), "numeric");
        assert_eq!(format!("{}", ResultKind::MicrobiologyText), "microbiology");
    }

    #[test]
    fn test_candidate_kind() {
        let candidate = Candidate::Antibiogram {
            name: "Vancomicina".into(),
            code: "S".into(),
        };
        assert_eq!(candidate.kind(), ResultKind::Antibiogram);

        let candidate = Candidate::Microbiology {
            text: "Desarrollo de Escherichia coli".into(),
        };
        assert_eq!(candidate.kind(), ResultKind::MicrobiologyText);
    }

    #[test]
    fn test_extraction_accessors() {
        let full = Extraction::Text("Hb 10.1".to_string());
        assert_eq!(full.text(), Some("Hb 10.1"));
        assert!(!full.is_empty());
        assert_eq!(full.into_text(), Some("Hb 10.1".to_string()));

        assert_eq!(Extraction::Empty.text(), None);
        assert!(Extraction::Empty.is_empty());
        assert_eq!(Extraction::Empty.into_text(), None);
    }
}
