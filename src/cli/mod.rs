//! Command-line interface wiring for llm-ner-align.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::config::Settings;

pub mod align;
pub mod digitize;
pub mod evaluate;
pub mod score;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Align LLM highlight HTML with BIO labels", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Align(args) => align::run(args, settings),
            Commands::Evaluate(args) => evaluate::run(args, settings),
            Commands::Score(args) => score::run(args, settings),
            Commands::Digitize(args) => digitize::run(args, settings),
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert highlight HTML columns into predicted tag columns.
    Align(align::Args),
    /// Align and print a classification report per HTML column.
    Evaluate(evaluate::Args),
    /// Score two existing tag columns against each other.
    Score(score::Args),
    /// Map relation names to integer codes.
    Digitize(digitize::Args),
}

/// Which highlight convention the HTML follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    /// One yellow highlight color, untyped `B`/`I` tags.
    #[value(alias = "ncbi")]
    SingleLabel,
    /// Nine highlight colors, one per drug attribute type.
    #[value(alias = "n2c2")]
    MultiLabel,
}

/// `<outputs>/<input stem>.<suffix>`.
pub(crate) fn default_output(settings: &Settings, input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table");
    settings.join_output(format!("{stem}.{suffix}"))
}
