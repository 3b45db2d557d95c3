use chrono::NaiveDate;
use whatlang::{detect, Lang};

use crate::config::TextAnalysisConfig;
use crate::error::Result;

/// Case shape of a whole message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseClass {
    /// Lowercasing leaves the text unchanged (includes empty and caseless text)
    Lower,
    /// Uppercasing leaves the text unchanged
    Upper,
    /// Anything else
    Mixed,
}

/// Which side of the period boundary a message falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Before,
    OnOrAfter,
}

/// Term matching and language detection over message bodies.
///
/// Built once from [`TextAnalysisConfig`]; all lookups are read-only.
pub struct TextAnalyzer {
    alcohol_terms: Vec<String>,
    alcohol_aliases: std::collections::HashMap<String, String>,
    neologisms: Vec<String>,
    tracked_languages: Vec<String>,
    boundary: NaiveDate,
}

impl TextAnalyzer {
    /// Create an analyzer from the term lists and language settings
    pub fn new(config: &TextAnalysisConfig) -> Result<Self> {
        Ok(Self {
            alcohol_terms: config.alcohol_terms.clone(),
            alcohol_aliases: config.alcohol_aliases.clone(),
            neologisms: config.neologisms.clone(),
            tracked_languages: config.tracked_languages.clone(),
            boundary: config.boundary_date()?,
        })
    }

    /// Alcohol terms found in `text` with their display name and occurrence count.
    ///
    /// Matching is case-sensitive substring containment, so a stem also
    /// matches inside longer words.
    #[must_use]
    pub fn alcohol_mentions(&self, text: &str) -> Vec<(String, u64)> {
        count_terms(&self.alcohol_terms, text)
            .map(|(term, count)| {
                let name = self.alcohol_aliases.get(term).map_or(term, String::as_str);
                (name.to_string(), count)
            })
            .collect()
    }

    /// Neologisms found in `text` with their occurrence count
    #[must_use]
    pub fn neologism_mentions(&self, text: &str) -> Vec<(String, u64)> {
        count_terms(&self.neologisms, text)
            .map(|(term, count)| (term.to_string(), count))
            .collect()
    }

    /// Detected language code if it is one of the tracked languages.
    ///
    /// `None` covers both "could not detect" and "detected but untracked".
    #[must_use]
    pub fn tracked_language(&self, text: &str) -> Option<String> {
        let code = language_code(detect(text)?.lang());
        self.tracked_languages
            .iter()
            .find(|tracked| tracked.as_str() == code)
            .cloned()
    }

    /// Period of a message sent on `date`
    #[must_use]
    pub fn period_of(&self, date: NaiveDate) -> Period {
        if date < self.boundary {
            Period::Before
        } else {
            Period::OnOrAfter
        }
    }
}

fn count_terms<'t>(terms: &'t [String], text: &'t str) -> impl Iterator<Item = (&'t str, u64)> + 't {
    terms
        .iter()
        .filter(move |term| text.contains(term.as_str()))
        .map(move |term| (term.as_str(), text.matches(term.as_str()).count() as u64))
}

/// ISO 639-1 code for the languages whatlang reports with a three-letter code.
///
/// Languages without a two-letter code keep whatlang's code.
#[must_use]
pub fn language_code(lang: Lang) -> &'static str {
    match lang {
        Lang::Ukr => "uk",
        Lang::Rus => "ru",
        Lang::Bel => "be",
        Lang::Bul => "bg",
        Lang::Srp => "sr",
        Lang::Mkd => "mk",
        Lang::Pol => "pl",
        Lang::Eng => "en",
        Lang::Deu => "de",
        Lang::Fra => "fr",
        Lang::Spa => "es",
        Lang::Ita => "it",
        Lang::Por => "pt",
        other => other.code(),
    }
}

/// Classify the case shape of `text`
#[must_use]
pub fn classify_case(text: &str) -> CaseClass {
    if text.to_lowercase() == text {
        CaseClass::Lower
    } else if text.to_uppercase() == text {
        CaseClass::Upper
    } else {
        CaseClass::Mixed
    }
}

/// True if any character is ASCII punctuation
#[must_use]
pub fn has_punctuation(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_punctuation())
}
