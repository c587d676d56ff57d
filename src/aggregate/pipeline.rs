// Aggregation pipeline: Year Extractor -> Grouped Counter -> Top-N Selector.
//
// A run is all-or-nothing. If any title fails year extraction the whole run
// fails; partial aggregates would misrepresent the dataset.

use std::collections::BTreeMap;

use tracing::info;

use super::counter::{count_by_group, CategoryCounts, GroupCounts, KeyedRow};
use super::table::{table_name, AggregateSet, AggregateTable, CategoryCount, Split, YearGroup};
use super::top_n::top_n;
use super::year::{extract_year, YearKey};
use crate::dataset::StatementTable;
use crate::error::{Result, TrendError};
use crate::vocab::{Column, Dimension};

/// Default number of categories kept for reduced dimensions.
pub const DEFAULT_TOP_N: usize = 5;

/// Tunables for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateOptions {
    /// How many categories a reduced table keeps per year
    pub top_n: usize,
    /// Dimensions that get an additional top-N table next to the full one
    pub reduced: Vec<Dimension>,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            reduced: vec![Dimension::Reference],
        }
    }
}

/// Build aggregates with the default options (top-5 for `reference`).
pub fn build_aggregates(
    table: &StatementTable,
    dimensions: &[Dimension],
    split_by: Option<Column>,
) -> Result<AggregateSet> {
    build_aggregates_with(table, dimensions, split_by, &AggregateOptions::default())
}

/// Build one aggregate table per (dimension, split value), plus a top-N
/// table for each reduced dimension.
pub fn build_aggregates_with(
    table: &StatementTable,
    dimensions: &[Dimension],
    split_by: Option<Column>,
    options: &AggregateOptions,
) -> Result<AggregateSet> {
    if options.top_n == 0 {
        return Err(TrendError::InvalidArgument(
            "top-N requires a positive N".to_string(),
        ));
    }
    if let Some(split) = split_by {
        if split == Column::Year {
            return Err(TrendError::InvalidArgument(
                "cannot split by year; every table is already grouped by year".to_string(),
            ));
        }
        if let Some(d) = dimensions.iter().find(|&&d| Column::from(d) == split) {
            return Err(TrendError::InvalidArgument(format!(
                "'{d}' cannot be both the split column and an aggregated dimension"
            )));
        }
    }

    // Step 1: every row needs a year before anything is counted.
    let years = table
        .rows()
        .iter()
        .map(|row| extract_year(&row.title))
        .collect::<Result<Vec<YearKey>>>()?;
    let rows: Vec<KeyedRow<'_>> = years
        .iter()
        .zip(table.rows())
        .map(|(year, statement)| KeyedRow { year, statement })
        .collect();

    // Step 2: optional partition into sub-tables.
    let partitions: Vec<(Option<Split>, Vec<KeyedRow<'_>>)> = match split_by {
        None => vec![(None, rows)],
        Some(column) => {
            let mut parts: BTreeMap<&str, Vec<KeyedRow<'_>>> = BTreeMap::new();
            for row in rows {
                parts.entry(row.value(column)?).or_default().push(row);
            }
            parts
                .into_iter()
                .map(|(value, part)| {
                    let split = Split {
                        column: column.name().to_string(),
                        value: value.to_string(),
                    };
                    (Some(split), part)
                })
                .collect()
        }
    };

    // Steps 3 and 4: count, then reduce where requested.
    let group_keys: Vec<Column> = match split_by {
        Some(column) => vec![column, Column::Year],
        None => vec![Column::Year],
    };

    let mut set = AggregateSet::default();
    for (split, part) in &partitions {
        for &dimension in dimensions {
            let counts = count_by_group(part, &group_keys, dimension.into())?;
            set.tables
                .push(full_table(dimension, split.clone(), &counts));

            if options.reduced.contains(&dimension) {
                let ranked = top_n(&counts, options.top_n, dimension)?;
                let groups = ranked
                    .into_iter()
                    .map(|(key, entries)| YearGroup {
                        year: year_of(&key),
                        counts: entries
                            .into_iter()
                            .map(|(category, count)| CategoryCount { category, count })
                            .collect(),
                    })
                    .collect();
                set.tables.push(AggregateTable {
                    name: table_name(dimension, Some(options.top_n), split.as_ref()),
                    dimension,
                    split: split.clone(),
                    top_n: Some(options.top_n),
                    groups,
                });
            }
        }
    }

    set.ensure_unique_names()?;

    info!(
        rows = table.len(),
        partitions = partitions.len(),
        tables = set.len(),
        "Built aggregate tables"
    );
    Ok(set)
}

/// The aggregate set behind the standard chart set: every dimension over the
/// whole table, then valence and reference per statement topic.
pub fn standard_report(table: &StatementTable, options: &AggregateOptions) -> Result<AggregateSet> {
    let mut set = build_aggregates_with(table, &Dimension::ALL, None, options)?;
    let per_topic = build_aggregates_with(
        table,
        &[Dimension::Valence, Dimension::Reference],
        Some(Column::Dimension(Dimension::Topic)),
        options,
    )?;
    set.extend(per_topic);
    set.ensure_unique_names()?;
    Ok(set)
}

fn full_table(dimension: Dimension, split: Option<Split>, counts: &GroupCounts) -> AggregateTable {
    let groups = counts
        .iter()
        .map(|(key, categories)| YearGroup {
            year: year_of(key),
            counts: canonical_order(dimension, categories),
        })
        .collect();

    AggregateTable {
        name: table_name(dimension, None, split.as_ref()),
        dimension,
        split,
        top_n: None,
        groups,
    }
}

fn canonical_order(dimension: Dimension, categories: &CategoryCounts) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = categories
        .iter()
        .map(|(category, &count)| CategoryCount {
            category: category.clone(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| {
        dimension
            .sort_key(&a.category)
            .cmp(&dimension.sort_key(&b.category))
    });
    counts
}

/// The year is always the last grouping key.
fn year_of(key: &[String]) -> YearKey {
    key.last().map(String::as_str).unwrap_or_default().into()
}
