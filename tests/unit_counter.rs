// Unit tests for the grouped counter.
//
// Tests the count invariants: per-group sums equal group sizes, totals equal
// the row count, groups come out in natural key order, and unknown columns
// are rejected.

use narrative_trends::aggregate::counter::{count_by_group, KeyedRow};
use narrative_trends::aggregate::{extract_year, YearKey};
use narrative_trends::dataset::Statement;
use narrative_trends::vocab::{Column, Dimension};

fn statement(title: &str, kind: &str, topic: &str, valence: &str, reference: &str) -> Statement {
    Statement {
        title: title.to_string(),
        text: "excerpt".to_string(),
        statement: "paraphrase".to_string(),
        statement_type: kind.to_string(),
        statement_topic: topic.to_string(),
        topic_valence: valence.to_string(),
        statement_reference: reference.to_string(),
    }
}

fn rows() -> Vec<Statement> {
    vec![
        statement("2017-01-01 a", "goal", "meat", "pro", "health"),
        statement("2015-01-01 b", "narrative", "meat", "contra", "climate"),
        statement("2016-01-01 c", "narrative", "all", "contra", "health"),
        statement("2015-06-01 d", "instrument", "substitute", "pro", "economy"),
        statement("2017-03-01 e", "narrative", "plant based", "pro", "oligopoly"),
        statement("2015-09-01 f", "narrative", "meat", "pro", "climate"),
    ]
}

fn years(statements: &[Statement]) -> Vec<YearKey> {
    statements
        .iter()
        .map(|s| extract_year(&s.title).unwrap())
        .collect()
}

fn keyed<'a>(years: &'a [YearKey], statements: &'a [Statement]) -> Vec<KeyedRow<'a>> {
    years
        .iter()
        .zip(statements)
        .map(|(year, statement)| KeyedRow { year, statement })
        .collect()
}

#[test]
fn totals_equal_row_count_for_every_dimension() {
    let statements = rows();
    let years = years(&statements);
    let keyed = keyed(&years, &statements);

    for dimension in Dimension::ALL {
        let counts = count_by_group(&keyed, &[Column::Year], dimension.into()).unwrap();
        let total: u64 = counts.values().flat_map(|c| c.values()).sum();
        assert_eq!(total, statements.len() as u64, "dimension {dimension}");
    }
}

#[test]
fn group_sums_equal_group_sizes() {
    let statements = rows();
    let years = years(&statements);
    let keyed = keyed(&years, &statements);

    let counts = count_by_group(&keyed, &[Column::Year], Dimension::Type.into()).unwrap();
    let sizes: Vec<(String, u64)> = counts
        .iter()
        .map(|(k, c)| (k[0].clone(), c.values().sum()))
        .collect();
    assert_eq!(
        sizes,
        vec![
            ("2015".to_string(), 3),
            ("2016".to_string(), 1),
            ("2017".to_string(), 2),
        ]
    );
}

#[test]
fn groups_follow_key_order_not_input_order() {
    let statements = rows();
    let years = years(&statements);
    let keyed = keyed(&years, &statements);

    let counts = count_by_group(
        &keyed,
        &[Column::Dimension(Dimension::Topic), Column::Year],
        Dimension::Valence.into(),
    )
    .unwrap();
    let keys: Vec<Vec<String>> = counts.keys().cloned().collect();
    let expected: Vec<Vec<String>> = [
        ["all", "2016"],
        ["meat", "2015"],
        ["meat", "2017"],
        ["plant based", "2017"],
        ["substitute", "2015"],
    ]
    .iter()
    .map(|k| k.iter().map(|s| s.to_string()).collect())
    .collect();
    assert_eq!(keys, expected);
}

#[test]
fn zero_counts_are_omitted() {
    let statements = rows();
    let years = years(&statements);
    let keyed = keyed(&years, &statements);

    let counts = count_by_group(&keyed, &[Column::Year], Dimension::Valence.into()).unwrap();
    let y2016 = &counts[&vec!["2016".to_string()]];
    assert_eq!(y2016.len(), 1);
    assert_eq!(y2016["contra"], 1);
}

#[test]
fn unknown_column_name_is_invalid_argument() {
    let err = "sentiment".parse::<Column>().unwrap_err();
    assert!(matches!(err, narrative_trends::TrendError::InvalidArgument(_)));
}
