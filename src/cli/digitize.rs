//! CLI entry-point for encoding relation labels as digits.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use polars::prelude::{NamedFrom, Series};
use tracing::{info, instrument};

use crate::{
    cli::default_output,
    config::Settings,
    data::{write_frame, DocumentTable},
    nlp::relation,
};

/// Args for the `digitize` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Input table (.csv or .parquet).
    #[arg(long)]
    pub input: PathBuf,
    /// Column holding relation names such as `ROUTE-DRUG`.
    #[arg(long, default_value = "relation")]
    pub column: String,
    /// Name of the digit column to add.
    #[arg(long, default_value = "label_digit")]
    pub target: String,
    /// Destination table; defaults to `<outputs>/<stem>.digits.csv`.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let mut table = DocumentTable::load(&args.input, &settings.text_column, &settings.labels_column)
        .with_context(|| format!("loading {}", args.input.display()))?;
    let digits: Vec<u32> = table
        .cells(&args.column)?
        .into_iter()
        .map(|name| u32::from(relation::digit_for(name.unwrap_or_default())))
        .collect();
    let unknown = digits.iter().filter(|d| **d == 0).count();
    info!(rows = digits.len(), no_relation = unknown, "encoded relation labels");
    table.with_column(Series::new(args.target.as_str().into(), digits))?;

    let output = args
        .output
        .unwrap_or_else(|| default_output(&settings, &args.input, "digits.csv"));
    write_frame(&mut table.frame, &output)?;
    println!("{}", output.display());
    Ok(())
}
