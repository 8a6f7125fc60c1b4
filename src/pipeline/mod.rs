//! The line-classification-and-normalization pipeline.
//!
//! One [`Extractor`] owns an immutable [`RuleConfig`] and processes whole
//! documents: every page in document order, every line in textual order, each
//! line passing noise filtering, field matching and name normalization before
//! its token joins the shared, deduplicated result set.
//!
//! # Example
//!
//! ```
//! use labextract::{Extractor, TextDocument};
//!
//! let doc = TextDocument::from_text("Hemoglobina 10.1\nPlaquetas 250");
//! let outcome = Extractor::new().process(&doc).unwrap();
//! assert_eq!(outcome.text(), Some("Hb 10.1 - Plaq 250"));
//! ```

mod assemble;
mod filter;
mod matcher;
mod normalize;

use crate::config::RuleConfig;
use crate::error::ExtractError;
use crate::source::{DocumentSource, TextDocument};
use crate::Extraction;
use assemble::ResultSet;
use filter::NoiseFilter;
use log::{debug, trace};
use matcher::FieldMatcher;
use normalize::NameNormalizer;

/// Extracts structured result tokens from laboratory report documents.
///
/// The extractor is stateless between calls: every [`process`](Self::process)
/// invocation owns its result set exclusively, so one instance can serve any
/// number of documents, concurrently included.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: RuleConfig,
}

impl Extractor {
    /// Creates an extractor with the default rule configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor driven by a custom rule configuration.
    #[must_use]
    pub fn with_config(config: RuleConfig) -> Self {
        Self { config }
    }

    /// The rule configuration in use.
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Processes one document into its assembled output.
    ///
    /// Pages yielding no text contribute zero lines. Lines failing every rule
    /// are dropped silently; only a document-level decode failure escalates,
    /// and then no partial output is produced.
    ///
    /// # Errors
    ///
    /// [`ExtractError::InvalidConfig`] when the rule configuration fails
    /// validation, or [`ExtractError::Decode`] propagated from the source.
    pub fn process<D: DocumentSource>(&self, document: &D) -> Result<Extraction, ExtractError> {
        self.config
            .validate()
            .map_err(ExtractError::InvalidConfig)?;

        let filter = NoiseFilter::new(&self.config);
        let matcher = FieldMatcher::new(&self.config)?;
        let normalizer = NameNormalizer::new(&self.config);
        let mut results = ResultSet::new();

        for page in 0..document.page_count() {
            let Some(text) = document.page_text(page)? else {
                debug!("page {page}: no extractable text, skipping");
                continue;
            };

            for (index, raw) in text.lines().enumerate() {
                let cleaned = raw.replace('*', "");
                let line = cleaned.trim();
                if line.is_empty() {
                    continue;
                }
                if !filter.keep(line) {
                    debug!("page {page} line {index}: dropped as noise");
                    continue;
                }
                let Some(candidate) = matcher.classify(line) else {
                    debug!("page {page} line {index}: no rule matched");
                    continue;
                };
                let token = normalizer.normalize(&candidate, line);
                if results.push(token.clone()) {
                    trace!("page {page} line {index}: accepted token '{token}'");
                } else {
                    debug!("page {page} line {index}: duplicate token '{token}'");
                }
            }
        }

        Ok(results.finish())
    }

    /// Processes one block of already-decoded text as a single-page document.
    ///
    /// # Errors
    ///
    /// Same as [`process`](Self::process).
    pub fn process_text(&self, text: &str) -> Result<Extraction, ExtractError> {
        self.process(&TextDocument::from_text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn extract(text: &str) -> Extraction {
        Extractor::new().process_text(text).unwrap()
    }

    #[rstest]
    #[case("Hemoglobina 10.1", "Hb 10.1")]
    #[case("PCR 57.09", "PCR 57.09")]
    #[case("Aspecto Amarillo", "Aspecto Amarillo")]
    #[case("Vancomicina S", "Vancomicina (S)")]
    #[case("Glucosa 95%", "Glu 95%")]
    #[case("Recuento de Leucocitos 12.3", "GB 12.3")]
    #[case("TIEMPO DE PROTROMBINA 65", "TP 65")]
    fn test_single_line_scenarios(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(extract(line).text(), Some(expected));
    }

    #[test]
    fn test_noise_line_contributes_nothing() {
        let outcome = extract("Hospital Barros Luco - Fecha 01/01/2024");
        assert_eq!(outcome, Extraction::Empty);
    }

    #[test]
    fn test_document_order_is_preserved_across_pages() {
        let doc = TextDocument::new(vec![
            "Hemoglobina 10.1\nHematocrito 31".to_string(),
            "Creatinina 0.8\nSodio 140".to_string(),
        ]);
        let outcome = Extractor::new().process(&doc).unwrap();
        assert_eq!(
            outcome.text(),
            Some("Hb 10.1 - Hto 31 - Crea 0.8 - Na 140")
        );
    }

    #[test]
    fn test_duplicate_lines_produce_one_token() {
        let doc = TextDocument::new(vec![
            "Hemoglobina 10.1".to_string(),
            "HEMOGLOBINA 10.1\nPotasio 4.1".to_string(),
        ]);
        let outcome = Extractor::new().process(&doc).unwrap();
        assert_eq!(outcome.text(), Some("Hb 10.1 - K 4.1"));
    }

    #[test]
    fn test_first_seen_order_wins_for_duplicates() {
        let outcome = extract("Sodio 140\nPotasio 4.1\nSodio 140");
        assert_eq!(outcome.text(), Some("Na 140 - K 4.1"));
    }

    #[test]
    fn test_empty_pages_yield_empty_result_not_error() {
        let doc = TextDocument::new(vec![String::new(), String::new()]);
        let outcome = Extractor::new().process(&doc).unwrap();
        assert!(outcome.is_empty());
    }

    #[test]
    fn test_undecodable_page_contributes_zero_lines() {
        struct HalfReadable;
        impl DocumentSource for HalfReadable {
            fn page_count(&self) -> usize {
                2
            }
            fn page_text(&self, index: usize) -> Result<Option<String>, ExtractError> {
                match index {
                    0 => Ok(None),
                    _ => Ok(Some("Hemoglobina 10.1".to_string())),
                }
            }
        }

        let outcome = Extractor::new().process(&HalfReadable).unwrap();
        assert_eq!(outcome.text(), Some("Hb 10.1"));
    }

    #[test]
    fn test_decode_failure_is_terminal_with_no_partial_output() {
        struct Corrupt;
        impl DocumentSource for Corrupt {
            fn page_count(&self) -> usize {
                2
            }
            fn page_text(&self, index: usize) -> Result<Option<String>, ExtractError> {
                match index {
                    0 => Ok(Some("Hemoglobina 10.1".to_string())),
                    _ => Err(ExtractError::decode("damaged stream on page 2")),
                }
            }
        }

        let err = Extractor::new().process(&Corrupt).unwrap_err();
        assert!(matches!(err, ExtractError::Decode(_)));
    }

    #[test]
    fn test_invalid_config_is_rejected_at_entry() {
        let mut config = RuleConfig::new();
        config.set_min_name_len(0);
        let err = Extractor::with_config(config)
            .process_text("Hemoglobina 10.1")
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_line_does_not_abort_the_document() {
        let outcome = extract("@@@???\nHemoglobina 10.1\n???");
        assert_eq!(outcome.text(), Some("Hb 10.1"));
    }

    #[test]
    fn test_starred_emphasis_is_stripped_before_matching() {
        let outcome = extract("*Hemoglobina* 10.1");
        assert_eq!(outcome.text(), Some("Hb 10.1"));
    }

    #[test]
    fn test_mixed_panel_document() {
        let text = concat!(
            "Hospital Barros Luco\n",
            "Paciente: Juan Perez RUT 12.345.678-9\n",
            "Fecha 01/01/2024 Hora 10:00\n",
            "Hemoglobina 10.1\n",
            "Recuento de Leucocitos 12.3\n",
            "Adulto 4.5 - 11.0\n",
            "Aspecto Amarillo\n",
            "Desarrollo de Escherichia coli >100.000 UFC/ml\n",
            "Vancomicina S\n",
            "Ciprofloxacino 0.25 R\n",
        );
        assert_eq!(
            extract(text).text(),
            Some(
                "Hb 10.1 - GB 12.3 - Aspecto Amarillo - \
                 Desarrollo de Escherichia coli >100.000 UFC/ml - \
                 Vancomicina (S) - Ciprofloxacino (R)"
            )
        );
    }

    #[test]
    fn test_range_with_trailing_unit_keeps_the_full_range() {
        assert_eq!(extract("Segmentados 45 - 70 %").text(), Some("Segmentados 45-70%"));
        assert_eq!(extract("Calcio 8.5 - 10.5 mg/dl").text(), Some("Ca 8.5-10.5"));
    }

    #[test]
    fn test_reference_row_vocabulary_matches_printed_case_only() {
        // Reference rows carry the vocabulary's printed casing and are dropped.
        assert!(extract("Recien nacido 3 Dias 4.5").is_empty());
        // Lowercased forms are ordinary name text, not reference rows.
        assert_eq!(
            extract("recien nacido 3 dias 4.5").text(),
            Some("Recien Nacido 3")
        );
    }

    #[test]
    fn test_custom_abbreviation_changes_only_new_names() {
        let mut config = RuleConfig::new();
        config.set_abbreviation("Procalcitonina", "PCT");
        let extractor = Extractor::with_config(config);
        let outcome = extractor
            .process_text("Procalcitonina 0.12\nHemoglobina 10.1")
            .unwrap();
        assert_eq!(outcome.text(), Some("PCT 0.12 - Hb 10.1"));
    }
}
