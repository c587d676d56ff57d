// Error taxonomy for the aggregation core and the dataset loaders.
//
// Every failure aborts the current run. Callers decide whether that ends the
// program; nothing in the library substitutes defaults for bad input.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library result alias.
pub type Result<T> = std::result::Result<T, TrendError>;

#[derive(Debug, Error)]
pub enum TrendError {
    /// A row could not be turned into something the pipeline can group.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A caller asked for something the core cannot do (non-positive N,
    /// unknown column or dimension name).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A dataset selector (e.g. language) that no source handles.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read coded file {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl TrendError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
