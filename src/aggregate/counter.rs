// Grouped counter: per-group frequency counts of one categorical column.
//
// Groups and categories are held in BTreeMaps so every traversal is in
// natural key order and the output never depends on hash iteration.

use std::collections::BTreeMap;

use tracing::debug;

use super::year::YearKey;
use crate::dataset::Statement;
use crate::error::{Result, TrendError};
use crate::vocab::Column;

/// Values of the grouping columns for one group, in grouping-key order.
pub type GroupKey = Vec<String>;

/// Category value -> occurrence count. Zero counts are never stored.
pub type CategoryCounts = BTreeMap<String, u64>;

/// Group -> category counts.
pub type GroupCounts = BTreeMap<GroupKey, CategoryCounts>;

/// A statement paired with its derived year.
#[derive(Debug, Clone, Copy)]
pub struct KeyedRow<'a> {
    pub year: &'a YearKey,
    pub statement: &'a Statement,
}

impl<'a> KeyedRow<'a> {
    pub fn value(&self, column: Column) -> Result<&'a str> {
        match column {
            Column::Year => Ok(self.year.as_str()),
            other => self.statement.column(other),
        }
    }
}

/// Count occurrences of `target` within each distinct combination of
/// `group_keys`.
///
/// The counts of a group always sum to the number of rows in that group.
pub fn count_by_group(
    rows: &[KeyedRow<'_>],
    group_keys: &[Column],
    target: Column,
) -> Result<GroupCounts> {
    if group_keys.contains(&target) {
        return Err(TrendError::InvalidArgument(format!(
            "cannot count '{target}' while also grouping by it"
        )));
    }

    let mut groups = GroupCounts::new();
    for row in rows {
        let key = group_keys
            .iter()
            .map(|&col| row.value(col).map(str::to_string))
            .collect::<Result<GroupKey>>()?;
        let category = row.value(target)?;

        *groups
            .entry(key)
            .or_default()
            .entry(category.to_string())
            .or_insert(0) += 1;
    }

    debug!(
        rows = rows.len(),
        groups = groups.len(),
        column = %target,
        "Counted categories per group"
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::statement;
    use crate::vocab::Dimension;

    #[test]
    fn test_counts_per_year() {
        let y15 = YearKey::from("2015");
        let y16 = YearKey::from("2016");
        let a = statement("2015-01-01 a", "goal", "meat", "pro", "health");
        let b = statement("2015-02-01 b", "goal", "meat", "contra", "health");
        let c = statement("2016-03-01 c", "narrative", "all", "pro", "climate");
        let rows = vec![
            KeyedRow { year: &y15, statement: &a },
            KeyedRow { year: &y15, statement: &b },
            KeyedRow { year: &y16, statement: &c },
        ];

        let counts = count_by_group(&rows, &[Column::Year], Dimension::Valence.into()).unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&vec!["2015".to_string()]]["pro"], 1);
        assert_eq!(counts[&vec!["2015".to_string()]]["contra"], 1);
        assert_eq!(counts[&vec!["2016".to_string()]]["pro"], 1);
        assert!(!counts[&vec!["2016".to_string()]].contains_key("contra"));
    }

    #[test]
    fn test_target_in_group_keys_rejected() {
        let err = count_by_group(&[], &[Column::Year], Column::Year).unwrap_err();
        assert!(matches!(err, TrendError::InvalidArgument(_)));
    }
}
