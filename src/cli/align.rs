//! CLI entry-point for writing predicted tag columns.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    cli::{default_output, Scheme},
    config::Settings,
    data::{write_frame, DocumentTable},
    nlp,
};

/// Args for the `align` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Input table (.csv or .parquet).
    #[arg(long)]
    pub input: PathBuf,
    /// HTML output columns to align, comma separated.
    #[arg(long = "column", required = true, value_delimiter = ',')]
    pub columns: Vec<String>,
    /// Highlight convention of the HTML.
    #[arg(long, default_value = "multi-label", value_enum)]
    pub scheme: Scheme,
    /// Destination table; defaults to `<outputs>/<stem>.tags.csv`.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let mut table = DocumentTable::load(&args.input, &settings.text_column, &settings.labels_column)
        .with_context(|| format!("loading {}", args.input.display()))?;
    for column in &args.columns {
        let documents = table.documents(column)?;
        let tags = nlp::parse_documents(&documents, args.scheme)
            .with_context(|| format!("aligning column {column}"))?;
        table.with_tags(column, &tags)?;
        info!(%column, documents = tags.len(), "aligned column");
    }
    let output = args
        .output
        .unwrap_or_else(|| default_output(&settings, &args.input, "tags.csv"));
    write_frame(&mut table.frame, &output)?;
    println!("{}", output.display());
    Ok(())
}
