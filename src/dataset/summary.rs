// Whole-table label statistics: how often each label occurs, and which
// labels fall outside the canonical vocabulary.

use std::collections::BTreeMap;

use serde::Serialize;

use super::StatementTable;
use crate::vocab::Dimension;

/// Occurrence counts for one dimension, in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionCounts {
    pub dimension: Dimension,
    pub counts: Vec<(String, u64)>,
}

impl DimensionCounts {
    pub fn get(&self, value: &str) -> u64 {
        self.counts
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, c)| c).sum()
    }
}

/// Label counts for all four dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCounts {
    pub rows: usize,
    pub dimensions: Vec<DimensionCounts>,
}

impl LabelCounts {
    pub fn for_dimension(&self, dimension: Dimension) -> Option<&DimensionCounts> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }
}

/// A label outside its dimension's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownLabel {
    pub dimension: Dimension,
    pub value: String,
    pub rows: u64,
}

/// Count every label value per dimension over the whole table.
pub fn count_label_occurrences(table: &StatementTable) -> LabelCounts {
    let dimensions = Dimension::ALL
        .iter()
        .map(|&dimension| {
            let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
            for row in table.rows() {
                *counts.entry(row.category(dimension)).or_insert(0) += 1;
            }
            let mut counts: Vec<(String, u64)> = counts
                .into_iter()
                .map(|(v, c)| (v.to_string(), c))
                .collect();
            counts.sort_by(|a, b| dimension.sort_key(&a.0).cmp(&dimension.sort_key(&b.0)));
            DimensionCounts { dimension, counts }
        })
        .collect();

    LabelCounts {
        rows: table.len(),
        dimensions,
    }
}

/// Every (dimension, value) pair that is not part of the canonical vocabulary.
pub fn unknown_labels(table: &StatementTable) -> Vec<UnknownLabel> {
    count_label_occurrences(table)
        .dimensions
        .into_iter()
        .flat_map(|dc| {
            let dimension = dc.dimension;
            dc.counts
                .into_iter()
                .filter(move |(value, _)| dimension.ordinal(value).is_none())
                .map(move |(value, rows)| UnknownLabel {
                    dimension,
                    value,
                    rows,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::statement;

    fn table() -> StatementTable {
        vec![
            statement("2015-01-01 a", "goal", "meat", "pro", "climate"),
            statement("2015-02-01 b", "narrative", "meat", "contra", "health"),
            statement("2016-01-01 c", "narrative", "all", "contra", "health"),
            statement("2016-03-01 d", "narrative", "substitute", "pro", "weather"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_counts_are_in_canonical_order() {
        let counts = count_label_occurrences(&table());
        assert_eq!(counts.rows, 4);

        let types = counts.for_dimension(Dimension::Type).unwrap();
        assert_eq!(
            types.counts,
            vec![("narrative".to_string(), 3), ("goal".to_string(), 1)]
        );

        let refs = counts.for_dimension(Dimension::Reference).unwrap();
        let order: Vec<&str> = refs.counts.iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(order, vec!["health", "climate", "weather"]);
        assert_eq!(refs.total(), 4);
        assert_eq!(refs.get("health"), 2);
        assert_eq!(refs.get("oligopoly"), 0);
    }

    #[test]
    fn test_unknown_labels() {
        let unknown = unknown_labels(&table());
        assert_eq!(
            unknown,
            vec![UnknownLabel {
                dimension: Dimension::Reference,
                value: "weather".to_string(),
                rows: 1,
            }]
        );
    }
}
