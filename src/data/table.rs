//! Document tables backed by polars.

use std::{fs::File, path::Path};

use polars::prelude::{
    CsvReadOptions, CsvWriter, DataFrame, NamedFrom, ParquetReader, ParquetWriter, SerReader,
    SerWriter, Series, StringChunked,
};
use tracing::info;

use crate::{
    error::{Error, Result},
    nlp::{Document, TagColumns},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Csv,
    Parquet,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(Format::Csv),
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => Ok(Format::Parquet),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A loaded table plus the names of its text and label columns.
#[derive(Debug, Clone)]
pub struct DocumentTable {
    pub frame: DataFrame,
    text_column: String,
    labels_column: String,
}

impl DocumentTable {
    pub fn new(
        frame: DataFrame,
        text_column: impl Into<String>,
        labels_column: impl Into<String>,
    ) -> Self {
        Self {
            frame,
            text_column: text_column.into(),
            labels_column: labels_column.into(),
        }
    }

    /// Load a `.csv` or `.parquet` table. CSV columns are all read as strings.
    pub fn load(path: &Path, text_column: &str, labels_column: &str) -> Result<Self> {
        let frame = read_frame(path)?;
        info!(path = %path.display(), rows = frame.height(), "loaded document table");
        Ok(Self::new(frame, text_column, labels_column))
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Rows as documents, taking the HTML from `html_column`.
    pub fn documents(&self, html_column: &str) -> Result<Vec<Document>> {
        let text = self.strings(&self.text_column)?;
        let labels = self.strings(&self.labels_column)?;
        let html = self.strings(html_column)?;
        let mut docs = Vec::with_capacity(self.height());
        for row in 0..self.height() {
            docs.push(Document::new(
                cell(text, row, &self.text_column)?,
                cell(labels, row, &self.labels_column)?,
                cell(html, row, html_column)?,
            ));
        }
        Ok(docs)
    }

    /// A string column split on single spaces, one sequence per row.
    pub fn tag_sequences(&self, column: &str) -> Result<Vec<Vec<String>>> {
        let values = self.strings(column)?;
        (0..self.height())
            .map(|row| cell(values, row, column).map(|s| crate::nlp::split_tokens(&s)))
            .collect()
    }

    /// Append `<column>_gt` and `<column>_pred` with space-joined tags.
    pub fn with_tags(&mut self, html_column: &str, tags: &TagColumns) -> Result<()> {
        let joined = |rows: &[Vec<String>]| -> Vec<String> {
            rows.iter().map(|tags| tags.join(" ")).collect()
        };
        self.frame.with_column(Series::new(
            format!("{html_column}_gt").into(),
            joined(&tags.ground_truth),
        ))?;
        self.frame.with_column(Series::new(
            format!("{html_column}_pred").into(),
            joined(&tags.predicted),
        ))?;
        Ok(())
    }

    /// Raw string cells of a column; nulls stay `None`.
    pub fn cells(&self, column: &str) -> Result<Vec<Option<&str>>> {
        Ok(self.strings(column)?.into_iter().collect())
    }

    /// Add or replace a column.
    pub fn with_column(&mut self, series: Series) -> Result<()> {
        self.frame.with_column(series)?;
        Ok(())
    }

    fn strings(&self, column: &str) -> Result<&StringChunked> {
        let col = self
            .frame
            .column(column)
            .map_err(|_| Error::missing_column(column))?;
        Ok(col.str()?)
    }
}

fn cell(values: &StringChunked, row: usize, column: &str) -> Result<String> {
    values
        .get(row)
        .map(str::to_string)
        .ok_or_else(|| Error::null_cell(row, column))
}

fn read_frame(path: &Path) -> Result<DataFrame> {
    match Format::from_path(path)? {
        Format::Csv => Ok(CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?),
        Format::Parquet => Ok(ParquetReader::new(File::open(path)?).finish()?),
    }
}

/// Write a frame as CSV or parquet depending on the extension.
pub fn write_frame(frame: &mut DataFrame, path: &Path) -> Result<()> {
    let format = Format::from_path(path)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    match format {
        Format::Csv => CsvWriter::new(&mut file).finish(frame)?,
        Format::Parquet => {
            ParquetWriter::new(file).finish(frame)?;
        }
    }
    info!(path = %path.display(), rows = frame.height(), "wrote table");
    Ok(())
}
