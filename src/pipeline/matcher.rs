//! Line classification: the ordered multi-pattern dispatch that turns one
//! surviving line into a [`Candidate`].
//!
//! Rules run in fixed priority and the first match wins. Antibiogram and
//! microbiology free-text come before the generic range/numeric rules because
//! organism counts and antibiotic/code pairs would otherwise be misread as
//! ordinary numeric results; qualitative runs last because its vocabulary is
//! the most permissive.

use crate::Candidate;
use crate::config::RuleConfig;
use crate::error::ExtractError;
use crate::utils::{collapse_whitespace, contains_ignore_case};
use compact_str::{CompactString, format_compact};
use itertools::Itertools;
use regex::Regex;
use std::sync::LazyLock;

/// Leading name, then an optional comparison prefix, optional sign, digits and
/// at most one decimal separator (comma or dot).
static NUMERIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+([<>]?-?\d+[.,]?\d*)").unwrap());

/// Leading name followed by a numeric range `N - M` with optional spaces.
/// Trailing text (units such as `%` or `mg/dl`) is allowed and ignored.
static RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(\d+(?:[.,]\d+)?)\s*-\s*(\d+(?:[.,]\d+)?)").unwrap()
});

/// A standalone one-letter susceptibility code bounded by word edges.
static SUSCEPTIBILITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([SIR])\b").unwrap());

/// The word "Resultado"/"Result" (and plurals) marking a leftover table
/// header rather than a finding.
static RESULT_HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:resultados?|results?)\b").unwrap());

/// Classifies surviving lines against the configured rule set.
pub(crate) struct FieldMatcher<'a> {
    config: &'a RuleConfig,
    qualitative_regex: Regex,
}

impl<'a> FieldMatcher<'a> {
    /// Compiles the config-driven qualitative pattern for one processing run.
    ///
    /// Keywords are escaped and ordered longest-first so multi-word entries
    /// ("No Reactivo") are preferred over their suffixes ("Reactivo").
    pub(crate) fn new(config: &'a RuleConfig) -> Result<Self, ExtractError> {
        let alternation = config
            .qualitative_vocabulary
            .iter()
            .sorted_by_key(|word| std::cmp::Reverse(word.len()))
            .map(|word| regex::escape(word))
            .join("|");
        let pattern = format!(r"(?i)^(.+?)\s+((?:{alternation}).*)$");
        let qualitative_regex = Regex::new(&pattern).map_err(|e| {
            ExtractError::InvalidConfig(format!("qualitative vocabulary does not compile: {e}"))
        })?;
        Ok(Self {
            config,
            qualitative_regex,
        })
    }

    /// Runs the rule cascade; the first matching rule wins.
    ///
    /// Returns `None` when no rule matches or a post-match guard rejects the
    /// extracted name; the caller drops the line silently.
    pub(crate) fn classify(&self, line: &str) -> Option<Candidate> {
        let candidate = self
            .match_antibiogram(line)
            .or_else(|| self.match_microbiology(line))
            .or_else(|| self.match_range(line))
            .or_else(|| self.match_numeric(line))
            .or_else(|| self.match_qualitative(line))?;

        match &candidate {
            Candidate::Numeric { name, .. }
            | Candidate::Range { name, .. }
            | Candidate::Qualitative { name, .. } => {
                if !self.name_is_acceptable(name) {
                    return None;
                }
            }
            Candidate::Antibiogram { .. } | Candidate::Microbiology { .. } => {}
        }

        Some(candidate)
    }

    fn match_antibiogram(&self, line: &str) -> Option<Candidate> {
        let antibiotic = self
            .config
            .antibiotics
            .iter()
            .find(|name| contains_ignore_case(line, name.as_str()))?;
        let code = SUSCEPTIBILITY_REGEX.captures(line)?;
        Some(Candidate::Antibiogram {
            name: CompactString::new(antibiotic),
            code: CompactString::new(&code[1]),
        })
    }

    fn match_microbiology(&self, line: &str) -> Option<Candidate> {
        self.config
            .microbiology_keywords
            .iter()
            .find(|kw| contains_ignore_case(line, kw.as_str()))?;
        let text = collapse_whitespace(line);
        // Leftover table headers ("Resultado del cultivo") are not findings.
        if text.chars().count() <= 3 || RESULT_HEADER_REGEX.is_match(&text) {
            return None;
        }
        Some(Candidate::Microbiology {
            text: CompactString::new(text),
        })
    }

    fn match_range(&self, line: &str) -> Option<Candidate> {
        let caps = RANGE_REGEX.captures(line)?;
        Some(Candidate::Range {
            name: CompactString::new(caps[1].trim()),
            value: format_compact!("{}-{}", &caps[2], &caps[3]),
        })
    }

    fn match_numeric(&self, line: &str) -> Option<Candidate> {
        let caps = NUMERIC_REGEX.captures(line)?;
        let name = caps[1].trim();
        // A name starting with a digit is a continuation/value-only line.
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        Some(Candidate::Numeric {
            name: CompactString::new(name),
            value: CompactString::new(caps[2].trim()),
        })
    }

    fn match_qualitative(&self, line: &str) -> Option<Candidate> {
        let caps = self.qualitative_regex.captures(line)?;
        Some(Candidate::Qualitative {
            name: CompactString::new(caps[1].trim()),
            value: CompactString::new(caps[2].trim()),
        })
    }

    /// Post-match guards shared by the numeric, range and qualitative rules.
    fn name_is_acceptable(&self, name: &str) -> bool {
        let len = name.chars().count();
        if len < self.config.min_name_len {
            return false;
        }
        // A very short name with a colon is a truncated label fragment.
        if name.contains(':') && len < 5 {
            return false;
        }
        true
    }
}
