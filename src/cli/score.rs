//! CLI entry-point for scoring stored tag columns.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    config::Settings,
    data::DocumentTable,
    metrics::{self, EntityScorer, EvalMode},
};

/// Args for the `score` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Table holding both tag columns, e.g. the output of `align`.
    #[arg(long)]
    pub input: PathBuf,
    /// Column of space-delimited gold tags.
    #[arg(long)]
    pub truth: String,
    /// Column of space-delimited predicted tags.
    #[arg(long)]
    pub pred: String,
    /// Boundary matching mode; defaults to `REPORT_MODE`.
    #[arg(long, value_enum)]
    pub mode: Option<EvalMode>,
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let mode = args.mode.unwrap_or(settings.report_mode);
    let table = DocumentTable::load(&args.input, &settings.text_column, &settings.labels_column)
        .with_context(|| format!("loading {}", args.input.display()))?;
    let truth = table.tag_sequences(&args.truth)?;
    let pred = table.tag_sequences(&args.pred)?;
    let report = metrics::classification_report(&truth, &pred, mode, &EntityScorer)
        .with_context(|| format!("scoring {} against {}", args.pred, args.truth))?;
    println!("{report}");
    Ok(())
}
