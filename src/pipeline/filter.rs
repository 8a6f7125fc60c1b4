//! Noise filtering: decides whether a raw line is report boilerplate.

use crate::config::RuleConfig;
use crate::utils::contains_ignore_case;
use regex::Regex;
use std::sync::LazyLock;

static FULL_DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}/\d{2}/\d{4}").unwrap());

/// Pure per-line predicate over the configured noise rules.
pub(crate) struct NoiseFilter<'a> {
    config: &'a RuleConfig,
}

impl<'a> NoiseFilter<'a> {
    pub(crate) fn new(config: &'a RuleConfig) -> Self {
        Self { config }
    }

    /// Returns `false` when the line is boilerplate and must be dropped:
    /// administrative keywords, full `DD/MM/YYYY` dates, age/range vocabulary,
    /// and (when enabled) clinical-narrative wording.
    pub(crate) fn keep(&self, line: &str) -> bool {
        if self
            .config
            .noise_keywords
            .iter()
            .any(|kw| contains_ignore_case(line, kw))
        {
            return false;
        }

        if FULL_DATE_REGEX.is_match(line) {
            return false;
        }

        // Range vocabulary is matched as printed: short tokens like "Dia"
        // must not swallow unrelated lowercase words.
        if self.config.range_vocabulary.iter().any(|w| line.contains(w.as_str())) {
            return false;
        }

        if self.config.filter_clinical_narrative
            && self
                .config
                .narrative_keywords
                .iter()
                .any(|kw| contains_ignore_case(line, kw))
        {
            return false;
        }

        true
    }
}
