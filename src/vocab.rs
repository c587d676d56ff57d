// Domain vocabulary: the canonical label sets, column names, and languages.
//
// The order of each list is fixed: it is the numeric label encoding of the
// coding scheme and the tie-break order used when ranking categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TrendError;

pub const STATEMENT_TYPES: [&str; 3] = ["narrative", "goal", "instrument"];

pub const STATEMENT_TOPICS: [&str; 4] = ["meat", "substitute", "plant based", "all"];

pub const TOPIC_VALENCES: [&str; 2] = ["pro", "contra"];

/// The 21 statement reference categories, in canonical order.
pub const STATEMENT_REFERENCES: [&str; 21] = [
    "health",
    "environment",
    "climate",
    "biodiversity",
    "land usage",
    "water usage and quality",
    "deforestation",
    "animal welfare",
    "working conditions",
    "pandemics and epizootic diseases",
    "antibiotics",
    "economy",
    "moral and ethic",
    "taste and texture",
    "world food supply",
    "highly processed",
    "social fairness",
    "oligopoly",
    "tradition and culture",
    "food security",
    "social inequality",
];

/// One of the four categorical attributes a statement is coded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Type,
    Topic,
    Valence,
    Reference,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Type,
        Dimension::Topic,
        Dimension::Valence,
        Dimension::Reference,
    ];

    /// Column name in the coded files and in aggregate table names.
    pub fn column_name(self) -> &'static str {
        match self {
            Dimension::Type => "statement_type",
            Dimension::Topic => "statement_topic",
            Dimension::Valence => "topic_valence",
            Dimension::Reference => "statement_reference",
        }
    }

    /// Human-readable label for headings.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Type => "Statement type",
            Dimension::Topic => "Statement topic",
            Dimension::Valence => "Topic valence",
            Dimension::Reference => "Statement reference",
        }
    }

    pub fn vocabulary(self) -> &'static [&'static str] {
        match self {
            Dimension::Type => &STATEMENT_TYPES,
            Dimension::Topic => &STATEMENT_TOPICS,
            Dimension::Valence => &TOPIC_VALENCES,
            Dimension::Reference => &STATEMENT_REFERENCES,
        }
    }

    /// Position of `value` in the canonical vocabulary, if it belongs to it.
    pub fn ordinal(self, value: &str) -> Option<usize> {
        self.vocabulary().iter().position(|v| *v == value)
    }

    /// Sort key that places canonical values first (in vocabulary order) and
    /// anything else afterwards, lexicographically.
    pub fn sort_key(self, value: &str) -> (usize, &str) {
        (self.ordinal(value).unwrap_or(usize::MAX), value)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Dimension {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Column>()? {
            Column::Dimension(d) => Ok(d),
            other => Err(TrendError::InvalidArgument(format!(
                "'{other}' is not a categorical dimension"
            ))),
        }
    }
}

/// A column a statement can be grouped or counted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    /// Derived from the document title; only present after year extraction.
    Year,
    Title,
    Dimension(Dimension),
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::Year => "year",
            Column::Title => "document title",
            Column::Dimension(d) => d.column_name(),
        }
    }
}

impl From<Dimension> for Column {
    fn from(d: Dimension) -> Self {
        Column::Dimension(d)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let column = match s.trim().to_lowercase().as_str() {
            "year" => Column::Year,
            "document title" | "document_title" | "title" => Column::Title,
            "statement_type" | "type" => Column::Dimension(Dimension::Type),
            "statement_topic" | "topic" => Column::Dimension(Dimension::Topic),
            "topic_valence" | "valence" => Column::Dimension(Dimension::Valence),
            "statement_reference" | "reference" => Column::Dimension(Dimension::Reference),
            _ => {
                return Err(TrendError::InvalidArgument(format!(
                    "unknown column '{s}'"
                )))
            }
        };
        Ok(column)
    }
}

/// Which coded dataset to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    German,
    English,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::German => "german",
            Language::English => "english",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "german" => Ok(Language::German),
            "english" => Ok(Language::English),
            _ => Err(TrendError::UnsupportedConfiguration(format!(
                "language '{s}' is not supported (expected 'german' or 'english')"
            ))),
        }
    }
}
