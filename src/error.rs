//! Error types shared by the alignment, table, and scoring layers.

use thiserror::Error;

/// Result alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures that abort a batch.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A document's token count disagrees with its label count.
    #[error("row {row}: text has {tokens} tokens but labels has {labels} tags")]
    TokenCountMismatch {
        row: usize,
        tokens: usize,
        labels: usize,
    },

    /// An opening highlight marker has no `</span>` after it.
    #[error("highlight span opened at byte {offset} is never closed")]
    UnclosedSpan { offset: usize },

    /// A highlight color is not `#` followed by six uppercase hex digits.
    #[error("invalid highlight color {0:?}")]
    InvalidColor(String),

    /// Flattened truth and prediction sequences differ in length.
    #[error("ground truth has {truth} tags but prediction has {pred}")]
    LengthMismatch { truth: usize, pred: usize },

    /// A tag is neither `O` nor a `B`/`I` tag.
    #[error("invalid BIO tag {0:?}")]
    InvalidTag(String),

    /// A required table column is absent.
    #[error("missing column {0:?}")]
    MissingColumn(String),

    /// A required table cell is null.
    #[error("row {row}: column {column:?} is null")]
    NullCell { row: usize, column: String },

    /// The table format cannot be inferred from the path.
    #[error("unsupported table format: {0}")]
    UnsupportedFormat(String),

    /// Underlying dataframe failure.
    #[error("table error: {0}")]
    Table(#[from] polars::prelude::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a missing column error.
    pub fn missing_column(name: impl Into<String>) -> Self {
        Error::MissingColumn(name.into())
    }

    /// Create a null cell error.
    pub fn null_cell(row: usize, column: impl Into<String>) -> Self {
        Error::NullCell {
            row,
            column: column.into(),
        }
    }
}
