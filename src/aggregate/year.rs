// Year extraction: the coarse time bucket every aggregate is keyed by.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendError};

/// Calendar-year bucket taken verbatim from a document title.
///
/// Ordering is the natural string order, which for fixed-width years is
/// chronological.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearKey(String);

impl YearKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for YearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for YearKey {
    fn from(s: &str) -> Self {
        YearKey(s.to_string())
    }
}

/// Derive the year from a title like `"2016-05-01 Süddeutsche Zeitung"`.
///
/// The year is the first `-`-delimited segment of the first whitespace
/// delimited token. The token must contain a `-` and the segment must be
/// ASCII digits; anything else is rejected rather than defaulted.
pub fn extract_year(title: &str) -> Result<YearKey> {
    let token = title
        .split_whitespace()
        .next()
        .ok_or_else(|| TrendError::MalformedInput(format!("title '{title}' is empty")))?;

    let (year, _rest) = token.split_once('-').ok_or_else(|| {
        TrendError::MalformedInput(format!(
            "title '{title}' does not start with a date (no '-' in '{token}')"
        ))
    })?;

    if year.is_empty() || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TrendError::MalformedInput(format!(
            "title '{title}' does not start with a year ('{year}')"
        )));
    }

    Ok(YearKey(year.to_string()))
}
