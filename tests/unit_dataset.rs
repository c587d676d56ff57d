// Unit tests for dataset loading and label statistics.
//
// Writes small coded exports into a scratch directory under the system temp
// dir and loads them through both language sources.

use std::fs;
use std::path::PathBuf;

use narrative_trends::dataset::source::{source_for, DatasetSource, EnglishCodedFiles};
use narrative_trends::dataset::summary::{count_label_occurrences, unknown_labels};
use narrative_trends::vocab::{Dimension, Language};
use narrative_trends::TrendError;

const HEADER: &str =
    "text;document title;statement;statement_type;statement_topic;topic_valence;statement_reference";

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "narrative-trends-{}-{}",
        name,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_export(dir: &PathBuf, file: &str, rows: &[&str]) {
    let mut body = String::from(HEADER);
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    body.push('\n');
    fs::write(dir.join(file), body).unwrap();
}

#[test]
fn loads_all_csv_files_and_ignores_others() {
    let dir = scratch_dir("load-all");
    write_export(
        &dir,
        "b_batch.csv",
        &["t2;2016-02-01 Welt;s;Narrative;meat;pro meat;Health"],
    );
    write_export(
        &dir,
        "a_batch.csv",
        &["t1;2015-01-01 Zeit;s;Policy Goal;Plant-based;Contra Plant-based;ANN"],
    );
    fs::write(dir.join("notes.txt"), "not an export").unwrap();

    let table = source_for(Language::German, &dir).load().unwrap();
    assert_eq!(table.len(), 2);

    // Files are read in name order
    let first = &table.rows()[0];
    assert_eq!(first.title, "2015-01-01 Zeit");
    assert_eq!(first.statement_type, "goal");
    assert_eq!(first.statement_topic, "plant based");
    assert_eq!(first.topic_valence, "contra");
    assert_eq!(first.statement_reference, "animal welfare");

    let second = &table.rows()[1];
    assert_eq!(second.statement_type, "narrative");
    assert_eq!(second.topic_valence, "pro");
    assert_eq!(second.statement_reference, "health");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn english_source_applies_english_aliases() {
    let dir = scratch_dir("english");
    write_export(
        &dir,
        "coded.csv",
        &[
            "t;2019-04-01 Guardian;s;narrativ;meat;contra;World food supply",
            "t;2019-05-01 Guardian;s;narrative;meat;pro;Social Inequality",
        ],
    );

    let source = EnglishCodedFiles { dir: dir.clone() };
    assert_eq!(source.language(), Language::English);
    let table = source.load().unwrap();

    let refs: Vec<&str> = table
        .rows()
        .iter()
        .map(|s| s.statement_reference.as_str())
        .collect();
    assert_eq!(refs, vec!["food security", "social fairness"]);
    assert!(table.rows().iter().all(|s| s.statement_type == "narrative"));
    assert!(table.require_known_labels().is_ok());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn incomplete_rows_are_dropped() {
    let dir = scratch_dir("incomplete");
    write_export(
        &dir,
        "coded.csv",
        &[
            "t;2017-01-01 a;s;goal;meat;pro;health",
            "t;2017-01-02 b;s;goal;;pro;health",
            ";2017-01-03 c;s;goal;meat;pro;health",
        ],
    );

    let table = source_for(Language::German, &dir).load().unwrap();
    assert_eq!(table.len(), 1);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_directory_is_io_error() {
    let dir = std::env::temp_dir().join("narrative-trends-does-not-exist-at-all");
    let err = source_for(Language::English, &dir).load().unwrap_err();
    assert!(matches!(err, TrendError::Io { .. }));
}

#[test]
fn label_counts_flag_unknown_values() {
    let dir = scratch_dir("labels");
    write_export(
        &dir,
        "coded.csv",
        &[
            "t;2015-01-01 a;s;goal;meat;pro;health",
            "t;2015-01-02 b;s;goal;meat;pro;Weather",
            "t;2016-01-03 c;s;instrument;all;contra;health",
        ],
    );
    let table = source_for(Language::German, &dir).load().unwrap();

    let counts = count_label_occurrences(&table);
    assert_eq!(counts.rows, 3);
    assert_eq!(counts.for_dimension(Dimension::Type).unwrap().get("goal"), 2);
    assert_eq!(counts.for_dimension(Dimension::Reference).unwrap().get("health"), 2);

    let unknown = unknown_labels(&table);
    assert_eq!(unknown.len(), 1);
    assert_eq!(unknown[0].value, "weather");
    assert!(matches!(
        table.require_known_labels(),
        Err(TrendError::MalformedInput(_))
    ));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unsupported_language_is_rejected() {
    let err = "klingon".parse::<Language>().unwrap_err();
    assert!(matches!(err, TrendError::UnsupportedConfiguration(_)));
    assert!(err.to_string().contains("klingon"));
}
