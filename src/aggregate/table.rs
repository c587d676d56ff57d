// Aggregate tables: the YearKey x Category -> count structures handed to
// whatever renders the stacked bar charts.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::year::YearKey;
use crate::error::{Result, TrendError};
use crate::vocab::Dimension;

/// The sub-table an aggregate was computed over, when a split is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Split {
    pub column: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// One x-axis bar: the category counts for a single year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearGroup {
    pub year: YearKey,
    pub counts: Vec<CategoryCount>,
}

impl YearGroup {
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.count).sum()
    }
}

/// A finished aggregate for one dimension (and optionally one split value).
///
/// Groups are in ascending year order. Inside a group, full tables list
/// categories in canonical vocabulary order and reduced tables in rank order.
/// Categories absent from a group have count zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateTable {
    pub name: String,
    pub dimension: Dimension,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<Split>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_n: Option<usize>,
    pub groups: Vec<YearGroup>,
}

impl AggregateTable {
    pub fn years(&self) -> Vec<&YearKey> {
        self.groups.iter().map(|g| &g.year).collect()
    }

    /// Legend order: each category the first time it appears, scanning groups
    /// in year order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for group in &self.groups {
            for c in &group.counts {
                if !seen.contains(&c.category.as_str()) {
                    seen.push(&c.category);
                }
            }
        }
        seen
    }

    pub fn group(&self, year: &str) -> Option<&YearGroup> {
        self.groups.iter().find(|g| g.year.as_str() == year)
    }

    /// Count for one cell; absent cells are zero.
    pub fn count(&self, year: &str, category: &str) -> u64 {
        self.group(year)
            .and_then(|g| g.counts.iter().find(|c| c.category == category))
            .map(|c| c.count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.groups.iter().map(YearGroup::total).sum()
    }

    /// Nested-map view, `year -> category -> count`.
    pub fn to_map(&self) -> BTreeMap<String, BTreeMap<String, u64>> {
        self.groups
            .iter()
            .map(|g| {
                let counts = g
                    .counts
                    .iter()
                    .map(|c| (c.category.clone(), c.count))
                    .collect();
                (g.year.to_string(), counts)
            })
            .collect()
    }
}

/// All tables produced by one pipeline run, in production order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateSet {
    pub tables: Vec<AggregateTable>,
}

impl AggregateSet {
    pub fn get(&self, name: &str) -> Option<&AggregateTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn extend(&mut self, other: AggregateSet) {
        self.tables.extend(other.tables);
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Fail if two tables share a name. Names double as export file names,
    /// so a clash would make one table overwrite another.
    pub fn ensure_unique_names(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for table in &self.tables {
            if !seen.insert(table.name.as_str()) {
                return Err(TrendError::InvalidArgument(format!(
                    "two aggregate tables are both named '{}'",
                    table.name
                )));
            }
        }
        Ok(())
    }
}

/// Table name: `[top_<n>_]<dimension column>[_for_<split column>_<value>]`.
///
/// The result is lowercased and every character outside `[a-z0-9_]` becomes
/// `_`, so a split value taken from the data can never turn the name into a
/// path.
pub fn table_name(dimension: Dimension, top_n: Option<usize>, split: Option<&Split>) -> String {
    let mut name = match top_n {
        Some(n) => format!("top_{n}_{}", dimension.column_name()),
        None => dimension.column_name().to_string(),
    };
    if let Some(split) = split {
        name.push_str(&format!("_for_{}_{}", split.column, split.value));
    }
    name.to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' => c,
            _ => '_',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AggregateTable {
        AggregateTable {
            name: "statement_reference".to_string(),
            dimension: Dimension::Reference,
            split: None,
            top_n: None,
            groups: vec![
                YearGroup {
                    year: YearKey::from("2015"),
                    counts: vec![
                        CategoryCount { category: "health".to_string(), count: 2 },
                        CategoryCount { category: "climate".to_string(), count: 1 },
                    ],
                },
                YearGroup {
                    year: YearKey::from("2016"),
                    counts: vec![
                        CategoryCount { category: "economy".to_string(), count: 4 },
                        CategoryCount { category: "health".to_string(), count: 1 },
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_absent_cells_are_zero() {
        let t = sample();
        assert_eq!(t.count("2016", "climate"), 0);
        assert_eq!(t.count("2020", "health"), 0);
        assert_eq!(t.count("2015", "health"), 2);
        assert_eq!(t.total(), 8);
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(sample().categories(), vec!["health", "climate", "economy"]);
    }

    #[test]
    fn test_table_names() {
        let split = Split {
            column: "statement_topic".to_string(),
            value: "plant based".to_string(),
        };
        assert_eq!(table_name(Dimension::Type, None, None), "statement_type");
        assert_eq!(
            table_name(Dimension::Reference, Some(5), Some(&split)),
            "top_5_statement_reference_for_statement_topic_plant_based"
        );
    }

    #[test]
    fn test_table_name_replaces_path_characters() {
        let split = Split {
            column: "statement_topic".to_string(),
            value: "Meat/Ersatz-Produkt".to_string(),
        };
        assert_eq!(
            table_name(Dimension::Valence, None, Some(&split)),
            "topic_valence_for_statement_topic_meat_ersatz_produkt"
        );
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let mut set = AggregateSet { tables: vec![sample()] };
        assert!(set.ensure_unique_names().is_ok());
        set.tables.push(sample());
        assert!(matches!(
            set.ensure_unique_names(),
            Err(TrendError::InvalidArgument(_))
        ));
    }
}
