// Narrative trends: time-series aggregation of coded narrative statements.
//
// This is the library root. The aggregation core (`aggregate`) only consumes
// a StatementTable; loading (`dataset`) and presentation (`output`) sit on
// either side of it.

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod error;
pub mod output;
pub mod vocab;

pub use error::{Result, TrendError};
