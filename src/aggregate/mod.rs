// Aggregation core: year bucketing, grouped counting, top-N reduction.

pub mod counter;
pub mod pipeline;
pub mod table;
pub mod top_n;
pub mod year;

pub use pipeline::{build_aggregates, build_aggregates_with, standard_report, AggregateOptions};
pub use table::{AggregateSet, AggregateTable};
pub use year::{extract_year, YearKey};
