// Label normalization: maps the coders' spelling variants onto the canonical
// vocabulary.
//
// Both coding teams used slightly different spellings ("policy goal",
// "contra meat", "economic"). The English team additionally folded two pairs
// of reference categories together, so its alias table is a superset.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::vocab::{Dimension, Language};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

const TYPE_ALIASES: &[(&str, &str)] = &[
    ("policy instrument", "instrument"),
    ("policy goal", "goal"),
];

const ENGLISH_TYPE_ALIASES: &[(&str, &str)] = &[("narrativ", "narrative")];

const VALENCE_ALIASES: &[(&str, &str)] = &[
    ("contra meat", "contra"),
    ("contra plant-based", "contra"),
    ("pro plant-based", "pro"),
    ("pro meat", "pro"),
];

const REFERENCE_ALIASES: &[(&str, &str)] = &[
    ("economic", "economy"),
    ("ann", "animal welfare"),
    ("moral and ethics", "moral and ethic"),
    ("water-usage and quality", "water usage and quality"),
];

const ENGLISH_REFERENCE_ALIASES: &[(&str, &str)] = &[
    ("world food supply", "food security"),
    ("social inequality", "social fairness"),
];

/// Per-language label cleaner.
#[derive(Debug, Clone, Copy)]
pub struct LabelNormalizer {
    language: Language,
}

impl LabelNormalizer {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Normalize one raw label for the given dimension.
    ///
    /// Whitespace is collapsed and trimmed, the value is lowercased, and the
    /// alias tables for this language are applied in order.
    pub fn normalize(&self, dimension: Dimension, raw: &str) -> String {
        let raw = if dimension == Dimension::Topic {
            raw.replace('-', " ")
        } else {
            raw.to_string()
        };
        let mut value = WHITESPACE
            .replace_all(raw.trim(), " ")
            .to_lowercase();

        for table in self.alias_tables(dimension) {
            if let Some((_, canonical)) = table.iter().find(|(alias, _)| *alias == value) {
                value = (*canonical).to_string();
            }
        }
        value
    }

    fn alias_tables(&self, dimension: Dimension) -> Vec<&'static [(&'static str, &'static str)]> {
        let english = self.language == Language::English;
        match dimension {
            Dimension::Type if english => vec![ENGLISH_TYPE_ALIASES, TYPE_ALIASES],
            Dimension::Type => vec![TYPE_ALIASES],
            Dimension::Valence => vec![VALENCE_ALIASES],
            Dimension::Reference if english => vec![REFERENCE_ALIASES, ENGLISH_REFERENCE_ALIASES],
            Dimension::Reference => vec![REFERENCE_ALIASES],
            Dimension::Topic => Vec::new(),
        }
    }
}
