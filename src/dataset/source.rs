// Dataset source trait: the swap point between the German and English
// coded datasets.
//
// The aggregation core never branches on language. It takes whatever
// StatementTable a source produces.

use std::path::{Path, PathBuf};

use super::coded_files;
use super::normalize::LabelNormalizer;
use super::StatementTable;
use crate::error::Result;
use crate::vocab::Language;

/// Something that can materialize a StatementTable.
pub trait DatasetSource {
    /// Which coded dataset this source reads.
    fn language(&self) -> Language;

    /// Load and normalize the full table.
    fn load(&self) -> Result<StatementTable>;
}

/// German coded exports (one CSV per coded newspaper batch).
#[derive(Debug, Clone)]
pub struct GermanCodedFiles {
    pub dir: PathBuf,
}

impl DatasetSource for GermanCodedFiles {
    fn language(&self) -> Language {
        Language::German
    }

    fn load(&self) -> Result<StatementTable> {
        coded_files::load_directory(&self.dir, &LabelNormalizer::new(Language::German))
    }
}

/// English coded exports. Uses the English alias table, which also folds
/// `world food supply` and `social inequality` into neighbouring categories.
#[derive(Debug, Clone)]
pub struct EnglishCodedFiles {
    pub dir: PathBuf,
}

impl DatasetSource for EnglishCodedFiles {
    fn language(&self) -> Language {
        Language::English
    }

    fn load(&self) -> Result<StatementTable> {
        coded_files::load_directory(&self.dir, &LabelNormalizer::new(Language::English))
    }
}

/// Build the source for a language reading from `dir`.
pub fn source_for(language: Language, dir: &Path) -> Box<dyn DatasetSource> {
    match language {
        Language::German => Box::new(GermanCodedFiles {
            dir: dir.to_path_buf(),
        }),
        Language::English => Box::new(EnglishCodedFiles {
            dir: dir.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_for_matches_language() {
        let dir = Path::new("data");
        assert_eq!(source_for(Language::German, dir).language(), Language::German);
        assert_eq!(source_for(Language::English, dir).language(), Language::English);
    }
}
