use std::env;
use std::path::PathBuf;

use crate::aggregate::pipeline::DEFAULT_TOP_N;
use crate::error::{Result, TrendError};
use crate::vocab::Language;

pub const DEFAULT_GERMAN_DATA_DIR: &str = "meat_narratives/data/";
pub const DEFAULT_ENGLISH_DATA_DIR: &str = "meat_narratives/data/AW__Coded_files/";
pub const DEFAULT_OUTPUT_DIR: &str = "meat_narratives/aggregates";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy, so every value can live
/// there instead of the shell environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the German coded CSV exports
    pub german_data_dir: PathBuf,
    /// Directory holding the English coded CSV exports
    pub english_data_dir: PathBuf,
    /// Where aggregate JSON files are written
    pub output_dir: PathBuf,
    /// Categories kept per year in reduced tables
    pub top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            german_data_dir: PathBuf::from(DEFAULT_GERMAN_DATA_DIR),
            english_data_dir: PathBuf::from(DEFAULT_ENGLISH_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let top_n = match lookup("NARRATIVE_TOP_N") {
            Some(raw) => parse_top_n(&raw)?,
            None => defaults.top_n,
        };

        Ok(Self {
            german_data_dir: lookup("NARRATIVE_GERMAN_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.german_data_dir),
            english_data_dir: lookup("NARRATIVE_ENGLISH_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.english_data_dir),
            output_dir: lookup("NARRATIVE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            top_n,
        })
    }

    /// Coded-file directory for a language.
    pub fn data_dir(&self, language: Language) -> &PathBuf {
        match language {
            Language::German => &self.german_data_dir,
            Language::English => &self.english_data_dir,
        }
    }
}

fn parse_top_n(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(TrendError::InvalidArgument(format!(
            "NARRATIVE_TOP_N must be a positive integer, got '{raw}'"
        ))),
    }
}
