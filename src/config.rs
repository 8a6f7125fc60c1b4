//! Rule configuration for the extraction pipeline.
//!
//! All matching behavior is driven by one immutable [`RuleConfig`] value:
//! noise keyword lists, the qualitative vocabulary, antibiotic and microbiology
//! name lists, and the abbreviation table. The defaults target Spanish-language
//! hospital laboratory reports; every list is replaceable for other institutions
//! or panels without touching the matching algorithm.

use crate::utils::title_case;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Administrative boilerplate: institution names, address fragments,
/// patient/requester/validator labels, page/date/time headers, reference-range
/// table headers and section banners. Matched case-insensitively as substrings.
pub(crate) const DEFAULT_NOISE_KEYWORDS: &[&str] = &[
    "Avda",
    "Carrera",
    "Teléfono",
    "Miguel",
    "Ministerio",
    "Salud",
    "Hospital",
    "Barros",
    "Luco",
    "RUT",
    "Paciente",
    "Solicitante",
    "Validado",
    "Fecha",
    "Hora",
    "Página",
    "Nota",
    "Valor",
    "Critico",
    "Método",
    "Anterior",
    "Referencia",
    "Unidad",
    "Medida",
    "Edad",
    "Sexo",
    "Procedencia",
    "Bioquimico",
    "Hematologia",
    "Coagulacion",
    "Gases",
    "Orina Completa",
    "Urocultivo",
];

/// Clinical-narrative severity and risk wording that belongs to report prose,
/// not to result rows. Matched case-insensitively as substrings.
pub(crate) const DEFAULT_NARRATIVE_KEYWORDS: &[&str] = &[
    "Severo",
    "Severa",
    "Moderado",
    "Moderada",
    "Riesgo",
    "Alerta",
    "Urgente",
    "Pendiente",
    "Observacion",
    "Comentario",
];

/// Age/range vocabulary used by reference-interval rows ("Adulto: 4.5 - 11.0",
/// "Niño 2 - 5 Años"). Matched case-sensitively, as printed on the reports,
/// so short tokens like "Dia" do not swallow unrelated lowercase words.
pub(crate) const DEFAULT_RANGE_VOCABULARY: &[&str] = &[
    "Día", "Dia", "Mes", "Año", "Adulto", "Niño", "Semanas",
];

/// Descriptive result words accepted by the qualitative rule.
pub(crate) const DEFAULT_QUALITATIVE_VOCABULARY: &[&str] = &[
    "Positivo",
    "Negativo",
    "Normal",
    "Amarillo",
    "Ambar",
    "Turbio",
    "Limpido",
    "Escaso",
    "Regular",
    "Abundante",
    "Indeterminado",
    "Reactivo",
    "No Reactivo",
];

/// Antibiotics that appear on susceptibility panels. Matched case-insensitively.
pub(crate) const DEFAULT_ANTIBIOTICS: &[&str] = &[
    "Amikacina",
    "Amoxicilina",
    "Ampicilina",
    "Cefazolina",
    "Cefepime",
    "Cefotaxima",
    "Ceftazidima",
    "Ceftriaxona",
    "Ciprofloxacino",
    "Clindamicina",
    "Cloxacilina",
    "Colistin",
    "Cotrimoxazol",
    "Daptomicina",
    "Eritromicina",
    "Ertapenem",
    "Gentamicina",
    "Imipenem",
    "Levofloxacino",
    "Linezolid",
    "Meropenem",
    "Moxifloxacino",
    "Nitrofurantoina",
    "Oxacilina",
    "Penicilina",
    "Piperacilina/Tazobactam",
    "Rifampicina",
    "Tetraciclina",
    "Tigeciclina",
    "Vancomicina",
];

/// Organism genus names and staining/culture/count terms that mark a line as
/// free-text microbiology. Matched case-insensitively.
pub(crate) const DEFAULT_MICROBIOLOGY_KEYWORDS: &[&str] = &[
    "Gram",
    "Cocaceas",
    "Bacilos",
    "Levaduras",
    "Cultivo",
    "Desarrollo",
    "Colonias",
    "UFC",
    "Escherichia",
    "Klebsiella",
    "Staphylococcus",
    "Streptococcus",
    "Pseudomonas",
    "Enterococcus",
    "Proteus",
    "Candida",
    "Acinetobacter",
    "Enterobacter",
    "Serratia",
    "Haemophilus",
    "Neisseria",
];

/// Default abbreviation table: canonical (post-title-case) test name → short
/// form, covering hematology, coagulation, chemistry, blood gases, urine
/// sediment and thyroid/lipid panels.
///
/// Entries whose key is itself a title-cased short form ("Pcr" → "PCR",
/// "Bun" → "BUN") make normalization a fixed point on already-abbreviated
/// names: every value in this table canonicalizes back to itself.
pub(crate) const DEFAULT_ABBREVIATIONS: &[(&str, &str)] = &[
    // Hematology
    ("Hemoglobina", "Hb"),
    ("Hematocrito", "Hto"),
    ("Recuento De Leucocitos", "GB"),
    ("Plaquetas", "Plaq"),
    ("Gb", "GB"),
    // Coagulation
    ("Tiempo De Protrombina", "TP"),
    ("Tiempo De Tromboplastina", "TTPA"),
    ("Inr", "INR"),
    ("Tp", "TP"),
    ("Ttpa", "TTPA"),
    // Chemistry
    ("Nitrogeno Ureico", "BUN"),
    ("Urea", "Urea"),
    ("Creatinina", "Crea"),
    ("Sodio", "Na"),
    ("Potasio", "K"),
    ("Cloro", "Cl"),
    ("Proteina C Reactiva", "PCR"),
    ("Acido Urico", "Ac.Urico"),
    ("Calcio", "Ca"),
    ("Fosforo", "P"),
    ("Proteinas Totales", "Prot.Tot"),
    ("Albumina", "Alb"),
    ("Ldh", "LDH"),
    ("Fosfatasa Alcalina", "FA"),
    ("Got/Ast", "GOT"),
    ("Gpt/Alt", "GPT"),
    ("Colesterol Total", "Col.Tot"),
    ("Bilirrubina Total", "Bili.T"),
    ("Glucosa", "Glu"),
    ("Bun", "BUN"),
    ("Pcr", "PCR"),
    ("Fa", "FA"),
    ("Got", "GOT"),
    ("Gpt", "GPT"),
    // Blood gases
    ("Po2", "pO2"),
    ("Pco2", "pCO2"),
    ("So2", "SatO2"),
    ("Hco3", "HCO3"),
    ("Exceso De Base", "BE"),
    ("Acido Lactico", "Lactato"),
    ("Tco2", "tCO2"),
    ("Sato2", "SatO2"),
    ("Be", "BE"),
    // Urine sediment
    ("Sedimento Urinario", "Sedimento"),
    ("Aspecto", "Aspecto"),
    ("Color", "Color"),
    ("Cetonas", "Cetonas"),
    ("Nitritos", "Nitritos"),
    ("Glucosa En Orina", "Glu.Orina"),
    // Thyroid / lipids
    ("Tsh", "TSH"),
    ("T4 Libre", "T4L"),
    ("Trigliceridos", "TG"),
    ("Colesterol Hdl", "HDL"),
    ("Colesterol Ldl", "LDL"),
    ("Tg", "TG"),
    ("Hdl", "HDL"),
    ("Ldl", "LDL"),
];

/// Default minimum length (in characters) of an extracted test name.
pub(crate) const DEFAULT_MIN_NAME_LEN: usize = 2;

/// Immutable rule set driving the whole pipeline.
///
/// Constructed once, read-only afterwards; safe to share across any number of
/// concurrent document-processing calls.
///
/// # Examples
///
/// ```
/// use labextract::RuleConfig;
///
/// let mut config = RuleConfig::new();
/// config
///     .add_noise_keywords(["Clinica Alemana"])
///     .add_antibiotics(["Fosfomicina"])
///     .set_abbreviation("Ferritina", "Ferr");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Administrative keywords, matched case-insensitively as substrings.
    pub(crate) noise_keywords: Vec<String>,
    /// Clinical-narrative keywords, matched case-insensitively as substrings.
    pub(crate) narrative_keywords: Vec<String>,
    /// Age/range vocabulary, matched case-sensitively as printed.
    pub(crate) range_vocabulary: Vec<String>,
    /// Descriptive result words for the qualitative rule.
    pub(crate) qualitative_vocabulary: Vec<String>,
    /// Antibiotic names for the antibiogram rule.
    pub(crate) antibiotics: Vec<String>,
    /// Microbiology keywords for the free-text rule.
    pub(crate) microbiology_keywords: Vec<String>,
    /// Canonical name → short form. Keys are in post-title-case form.
    pub(crate) abbreviations: HashMap<String, String>,
    /// Minimum accepted name length in characters.
    pub(crate) min_name_len: usize,
    /// Whether narrative keywords participate in noise filtering.
    pub(crate) filter_clinical_narrative: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleConfig {
    /// Creates a rule configuration with the default vocabularies and table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            noise_keywords: to_owned_list(DEFAULT_NOISE_KEYWORDS),
            narrative_keywords: to_owned_list(DEFAULT_NARRATIVE_KEYWORDS),
            range_vocabulary: to_owned_list(DEFAULT_RANGE_VOCABULARY),
            qualitative_vocabulary: to_owned_list(DEFAULT_QUALITATIVE_VOCABULARY),
            antibiotics: to_owned_list(DEFAULT_ANTIBIOTICS),
            microbiology_keywords: to_owned_list(DEFAULT_MICROBIOLOGY_KEYWORDS),
            abbreviations: DEFAULT_ABBREVIATIONS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            min_name_len: DEFAULT_MIN_NAME_LEN,
            filter_clinical_narrative: true,
        }
    }

    /// Adds administrative noise keywords.
    pub fn add_noise_keywords<I, S>(&mut self, keywords: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.noise_keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Adds clinical-narrative keywords.
    pub fn add_narrative_keywords<I, S>(&mut self, keywords: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.narrative_keywords
            .extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Adds age/range vocabulary tokens.
    pub fn add_range_vocabulary<I, S>(&mut self, words: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.range_vocabulary.extend(words.into_iter().map(Into::into));
        self
    }

    /// Adds qualitative result words.
    pub fn add_qualitative_words<I, S>(&mut self, words: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.qualitative_vocabulary
            .extend(words.into_iter().map(Into::into));
        self
    }

    /// Adds antibiotic names for the antibiogram rule.
    pub fn add_antibiotics<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.antibiotics.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds microbiology keywords.
    pub fn add_microbiology_keywords<I, S>(&mut self, keywords: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.microbiology_keywords
            .extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Adds or replaces one abbreviation-table entry.
    ///
    /// The key is stored in canonical (post-title-case) form, so it matches
    /// whatever casing the report prints the name in.
    pub fn set_abbreviation(&mut self, canonical: &str, short: &str) -> &mut Self {
        self.abbreviations
            .insert(title_case(canonical.trim()), short.to_string());
        self
    }

    /// Sets the minimum accepted name length (in characters).
    pub fn set_min_name_len(&mut self, len: usize) -> &mut Self {
        self.min_name_len = len;
        self
    }

    /// Enables or disables the clinical-narrative noise check.
    pub fn set_filter_clinical_narrative(&mut self, enabled: bool) -> &mut Self {
        self.filter_clinical_narrative = enabled;
        self
    }

    /// Looks up the short form for a canonical name.
    pub fn abbreviation_for(&self, canonical: &str) -> Option<&str> {
        self.abbreviations.get(canonical).map(String::as_str)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.qualitative_vocabulary.is_empty() {
            return Err("qualitative vocabulary is empty".to_string());
        }
        if self.min_name_len == 0 {
            return Err("minimum name length must be at least 1".to_string());
        }

        let lists = [
            ("noise keyword", &self.noise_keywords),
            ("narrative keyword", &self.narrative_keywords),
            ("range vocabulary", &self.range_vocabulary),
            ("qualitative vocabulary", &self.qualitative_vocabulary),
            ("antibiotic", &self.antibiotics),
            ("microbiology keyword", &self.microbiology_keywords),
        ];
        for (what, list) in lists {
            if list.iter().any(|entry| entry.trim().is_empty()) {
                return Err(format!("empty {what} entry"));
            }
        }

        for (canonical, short) in &self.abbreviations {
            if title_case(canonical) != *canonical {
                return Err(format!(
                    "abbreviation key '{canonical}' is not in canonical title-case form"
                ));
            }
            if short.trim().is_empty() {
                return Err(format!("abbreviation for '{canonical}' is empty"));
            }
        }

        Ok(())
    }
}

fn to_owned_list(defaults: &[&str]) -> Vec<String> {
    defaults.iter().map(|s| s.to_string()).collect()
}
