//! CLI entry-point for aligning and scoring in one pass.

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args as ClapArgs;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    cli::{default_output, Scheme},
    config::Settings,
    data::DocumentTable,
    metrics::{self, ClassificationReport, EntityScorer, EvalMode},
    nlp,
};

/// Args for the `evaluate` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Input table (.csv or .parquet).
    #[arg(long)]
    pub input: PathBuf,
    /// HTML output columns to evaluate, comma separated.
    #[arg(long = "column", required = true, value_delimiter = ',')]
    pub columns: Vec<String>,
    /// Highlight convention of the HTML.
    #[arg(long, default_value = "multi-label", value_enum)]
    pub scheme: Scheme,
    /// Boundary matching mode; defaults to `REPORT_MODE`.
    #[arg(long, value_enum)]
    pub mode: Option<EvalMode>,
    /// Also write `<outputs>/<stem>.<column>.report.json`.
    #[arg(long)]
    pub json: bool,
    /// Also write `<outputs>/<stem>.<column>.report.csv`.
    #[arg(long)]
    pub csv: bool,
}

/// Report plus the run metadata it was produced under.
#[derive(Debug, Serialize)]
pub struct ReportEnvelope<'a> {
    pub input: String,
    pub column: &'a str,
    pub scheme: Scheme,
    pub documents: usize,
    pub generated_at: DateTime<Utc>,
    pub report: &'a ClassificationReport,
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let mode = args.mode.unwrap_or(settings.report_mode);
    let table = DocumentTable::load(&args.input, &settings.text_column, &settings.labels_column)
        .with_context(|| format!("loading {}", args.input.display()))?;

    for column in &args.columns {
        let documents = table.documents(column)?;
        let tags = nlp::parse_documents(&documents, args.scheme)
            .with_context(|| format!("aligning column {column}"))?;
        let report =
            metrics::classification_report(&tags.ground_truth, &tags.predicted, mode, &EntityScorer)?;
        println!("== {column}");
        println!("{report}");

        if args.json {
            let path = default_output(&settings, &args.input, &format!("{column}.report.json"));
            let envelope = ReportEnvelope {
                input: args.input.display().to_string(),
                column,
                scheme: args.scheme,
                documents: tags.len(),
                generated_at: Utc::now(),
                report: &report,
            };
            let file = File::create(&path).with_context(|| format!("creating {path:?}"))?;
            serde_json::to_writer_pretty(file, &envelope)?;
            info!(path = %path.display(), "wrote json report");
        }
        if args.csv {
            let path = default_output(&settings, &args.input, &format!("{column}.report.csv"));
            report.write_csv(&path)?;
            info!(path = %path.display(), "wrote csv report");
        }
    }
    Ok(())
}
