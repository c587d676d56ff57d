// Statement table: the in-memory dataset the aggregation core consumes.
//
// Rows come from a DatasetSource (coded CSV exports for one language). Once
// built, a table is only ever read.

pub mod coded_files;
pub mod normalize;
pub mod source;
pub mod summary;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendError};
use crate::vocab::{Column, Dimension};

/// One coded narrative statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Document title, starting with the document date (`YYYY-MM-DD ...`)
    pub title: String,
    /// The coded text excerpt
    pub text: String,
    /// The statement as paraphrased by the coder
    pub statement: String,
    pub statement_type: String,
    pub statement_topic: String,
    pub topic_valence: String,
    pub statement_reference: String,
}

impl Statement {
    /// Value of one categorical dimension.
    pub fn category(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Type => &self.statement_type,
            Dimension::Topic => &self.statement_topic,
            Dimension::Valence => &self.topic_valence,
            Dimension::Reference => &self.statement_reference,
        }
    }

    /// Value of a stored column. The year is derived, not stored, so asking
    /// for it here is an error.
    pub fn column(&self, column: Column) -> Result<&str> {
        match column {
            Column::Title => Ok(&self.title),
            Column::Dimension(d) => Ok(self.category(d)),
            Column::Year => Err(TrendError::InvalidArgument(
                "the year column only exists after year extraction".to_string(),
            )),
        }
    }
}

/// Ordered collection of statements. Row order carries no meaning for
/// aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementTable {
    rows: Vec<Statement>,
}

impl StatementTable {
    pub fn new(rows: Vec<Statement>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Statement] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fail on the first label that is outside its canonical vocabulary.
    pub fn require_known_labels(&self) -> Result<()> {
        for (idx, row) in self.rows.iter().enumerate() {
            for dimension in Dimension::ALL {
                let value = row.category(dimension);
                if dimension.ordinal(value).is_none() {
                    return Err(TrendError::MalformedInput(format!(
                        "row {idx} ('{}'): unknown {} '{value}'",
                        row.title,
                        dimension.column_name()
                    )));
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<Statement> for StatementTable {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::statement;
    use super::*;

    #[test]
    fn test_column_access() {
        let s = statement("2016-05-01 Zeit", "goal", "meat", "pro", "health");
        assert_eq!(s.column(Column::Title).unwrap(), "2016-05-01 Zeit");
        assert_eq!(s.column(Dimension::Valence.into()).unwrap(), "pro");
        assert!(s.column(Column::Year).is_err());
    }

    #[test]
    fn test_require_known_labels() {
        let good: StatementTable =
            vec![statement("2016-05-01 a", "goal", "plant based", "contra", "oligopoly")]
                .into_iter()
                .collect();
        assert!(good.require_known_labels().is_ok());

        let bad: StatementTable =
            vec![statement("2016-05-01 a", "goal", "meat", "pro", "weather")]
                .into_iter()
                .collect();
        let err = bad.require_known_labels().unwrap_err();
        assert!(matches!(err, TrendError::MalformedInput(_)));
        assert!(err.to_string().contains("weather"));
    }
}
