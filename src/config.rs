//! Runtime configuration utilities for llm-ner-align.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

use crate::metrics::EvalMode;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Column holding the raw document text.
    pub text_column: String,
    /// Column holding the space-delimited gold tags.
    pub labels_column: String,
    /// Matching mode used when the CLI does not pass one.
    pub report_mode: EvalMode,
    /// Root folder for tag tables and reports.
    pub outputs_dir: PathBuf,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let text_column = env::var("TEXT_COLUMN").unwrap_or_else(|_| "text".to_string());
        let labels_column = env::var("LABELS_COLUMN").unwrap_or_else(|_| "labels".to_string());
        let report_mode = match env::var("REPORT_MODE") {
            Ok(raw) => raw
                .parse()
                .map_err(anyhow::Error::msg)
                .context("parsing REPORT_MODE")?,
            Err(_) => EvalMode::default(),
        };
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));

        std::fs::create_dir_all(&outputs_dir).context("creating outputs dir")?;

        Ok(Self {
            text_column,
            labels_column,
            report_mode,
            outputs_dir,
        })
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}
