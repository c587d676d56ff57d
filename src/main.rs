use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use narrative_trends::aggregate::{self, AggregateOptions, AggregateSet};
use narrative_trends::config::Config;
use narrative_trends::dataset::{source, summary, StatementTable};
use narrative_trends::output::{export, terminal};
use narrative_trends::vocab::{Column, Dimension, Language};

/// Narrative trends: how coded meat narratives shift over time.
///
/// Loads the coded statement exports for one language and aggregates them
/// into per-year category counts ready for stacked bar charts.
#[derive(Parser)]
#[command(name = "narrative-trends", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate selected dimensions per year
    Aggregate {
        /// Dataset language (german or english)
        #[arg(long, default_value = "german")]
        language: String,

        /// Dimension to aggregate (type, topic, valence, reference); repeatable.
        /// Defaults to every dimension except the split column.
        #[arg(long = "dimension")]
        dimensions: Vec<String>,

        /// Produce one table per value of this column (e.g. statement_topic)
        #[arg(long)]
        split_by: Option<String>,

        /// Categories kept per year in reduced tables (default from config: 5)
        #[arg(long)]
        top_n: Option<usize>,

        /// Directory with the coded CSV exports (overrides config)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Where to write the JSON aggregates (overrides config)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Only print, don't write JSON files
        #[arg(long)]
        no_export: bool,

        /// Fail if any label is outside the canonical vocabulary
        #[arg(long)]
        strict: bool,
    },

    /// Build the standard aggregate set (all dimensions, then per topic)
    Report {
        /// Dataset language (german or english)
        #[arg(long, default_value = "german")]
        language: String,

        /// Directory with the coded CSV exports (overrides config)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Where to write the JSON aggregates (overrides config)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Fail if any label is outside the canonical vocabulary
        #[arg(long)]
        strict: bool,
    },

    /// Show how often every label occurs in the dataset
    Labels {
        /// Dataset language (german or english)
        #[arg(long, default_value = "german")]
        language: String,

        /// Directory with the coded CSV exports (overrides config)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Print the counts as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("narrative_trends=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Aggregate {
            language,
            dimensions,
            split_by,
            top_n,
            data_dir,
            output_dir,
            no_export,
            strict,
        } => {
            let language: Language = language.parse()?;
            let split_by = split_by.map(|s| s.parse::<Column>()).transpose()?;
            let dimensions = parse_dimensions(&dimensions, split_by)?;
            let options = AggregateOptions {
                top_n: top_n.unwrap_or(config.top_n),
                ..AggregateOptions::default()
            };

            let table = load_table(&config, language, data_dir, strict)?;
            let set = aggregate::build_aggregates_with(&table, &dimensions, split_by, &options)?;

            show(&set);
            if !no_export {
                let dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
                write(&set, language, &dir)?;
            }
        }

        Commands::Report {
            language,
            data_dir,
            output_dir,
            strict,
        } => {
            let language: Language = language.parse()?;
            let options = AggregateOptions {
                top_n: config.top_n,
                ..AggregateOptions::default()
            };

            let table = load_table(&config, language, data_dir, strict)?;
            let set = aggregate::standard_report(&table, &options)?;

            show(&set);
            let dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            write(&set, language, &dir)?;
        }

        Commands::Labels {
            language,
            data_dir,
            json,
        } => {
            let language: Language = language.parse()?;
            let table = load_table(&config, language, data_dir, false)?;
            let counts = summary::count_label_occurrences(&table);
            let unknown = summary::unknown_labels(&table);

            if json {
                println!("{}", serde_json::to_string_pretty(&counts)?);
            } else {
                terminal::display_label_counts(&counts, &unknown);
            }
        }
    }

    Ok(())
}

/// Resolve `--dimension` values; with none given, every dimension except the
/// split column.
fn parse_dimensions(raw: &[String], split_by: Option<Column>) -> Result<Vec<Dimension>> {
    if raw.is_empty() {
        return Ok(Dimension::ALL
            .into_iter()
            .filter(|d| split_by != Some(Column::from(*d)))
            .collect());
    }
    let mut dimensions = Vec::with_capacity(raw.len());
    for value in raw {
        let d: Dimension = value.parse()?;
        if !dimensions.contains(&d) {
            dimensions.push(d);
        }
    }
    Ok(dimensions)
}

fn load_table(
    config: &Config,
    language: Language,
    data_dir: Option<PathBuf>,
    strict: bool,
) -> Result<StatementTable> {
    let dir = data_dir.unwrap_or_else(|| config.data_dir(language).clone());
    println!("Loading {} coded statements from {}...", language, dir.display());

    let table = source::source_for(language, &dir)
        .load()
        .with_context(|| format!("Failed to load the {language} dataset"))?;

    if table.is_empty() {
        anyhow::bail!(
            "No statements found in {}. Check the data directory (NARRATIVE_{}_DATA_DIR).",
            dir.display(),
            language.as_str().to_uppercase()
        );
    }
    if strict {
        table.require_known_labels()?;
    }

    info!(rows = table.len(), %language, "Dataset ready");
    println!("  {} statements", table.len());
    Ok(table)
}

fn show(set: &AggregateSet) {
    for table in &set.tables {
        terminal::display_aggregate(table);
    }
}

fn write(set: &AggregateSet, language: Language, dir: &std::path::Path) -> Result<()> {
    let written = export::write_aggregates(set, language, dir)
        .with_context(|| format!("Failed to export aggregates to {}", dir.display()))?;
    println!(
        "\n{}",
        format!("{} aggregate tables written to {}", written.len(), dir.display()).bold()
    );
    Ok(())
}
