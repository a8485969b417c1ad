//! Converts highlighted LLM output into BIO tag sequences.

pub mod align;
pub mod highlight;
pub mod relation;

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    cli::Scheme,
    error::{Error, Result},
};
use align::{AlignStats, TagBuffer};
use highlight::{HighlightMarker, SINGLE_LABEL_HEX};

/// One annotated record: source text, gold labels, and the model's HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub labels: String,
    pub html: String,
}

impl Document {
    pub fn new(
        text: impl Into<String>,
        labels: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            labels: labels.into(),
            html: html.into(),
        }
    }

    /// Reference tokens and gold tags, checked to be the same length.
    fn split(&self, row: usize) -> Result<(Vec<String>, Vec<String>)> {
        let tokens = split_tokens(&self.text);
        let gold = split_tokens(&self.labels);
        if tokens.len() != gold.len() {
            return Err(Error::TokenCountMismatch {
                row,
                tokens: tokens.len(),
                labels: gold.len(),
            });
        }
        Ok((tokens, gold))
    }
}

/// Split on the single space character; runs of spaces yield empty tokens.
pub fn split_tokens(text: &str) -> Vec<String> {
    text.split(' ').map(str::to_string).collect()
}

/// Gold and predicted tags, index-aligned by document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagColumns {
    pub ground_truth: Vec<Vec<String>>,
    pub predicted: Vec<Vec<String>>,
}

impl TagColumns {
    fn with_capacity(n: usize) -> Self {
        Self {
            ground_truth: Vec::with_capacity(n),
            predicted: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, gold: Vec<String>, predicted: TagBuffer) {
        self.ground_truth.push(gold);
        self.predicted.push(predicted.into_inner());
    }

    pub fn len(&self) -> usize {
        self.ground_truth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ground_truth.is_empty()
    }
}

/// Run the pipeline selected by `scheme`.
pub fn parse_documents(documents: &[Document], scheme: Scheme) -> Result<TagColumns> {
    match scheme {
        Scheme::SingleLabel => parse_single_label(documents),
        Scheme::MultiLabel => parse_multi_label(documents),
    }
}

/// Tag every document using the single highlight color with plain `B`/`I`.
pub fn parse_single_label(documents: &[Document]) -> Result<TagColumns> {
    let marker = HighlightMarker::new(SINGLE_LABEL_HEX)?;
    let mut columns = TagColumns::with_capacity(documents.len());
    let mut totals = AlignStats::default();
    for (row, doc) in documents.iter().enumerate() {
        let (reference, gold) = doc.split(row)?;
        let mut tags = TagBuffer::outside(reference.len());
        let phrases = highlight::extract(&doc.html, &marker)?;
        totals.merge(align::align(&phrases, &reference, None, &mut tags));
        columns.push(gold, tags);
    }
    info!(
        documents = columns.len(),
        matched = totals.matched,
        skipped = totals.skipped,
        "single-label alignment finished"
    );
    Ok(columns)
}

/// Tag every document with all palette colors, typed by entity.
pub fn parse_multi_label(documents: &[Document]) -> Result<TagColumns> {
    let mut columns = TagColumns::with_capacity(documents.len());
    let mut totals = AlignStats::default();
    for (row, doc) in documents.iter().enumerate() {
        let (reference, gold) = doc.split(row)?;
        let mut tags = TagBuffer::outside(reference.len());
        let extraction = highlight::extract_palette(&doc.html)?;
        for (kind, phrases) in &extraction.entries {
            let stats = align::align(phrases, &reference, Some(kind.name()), &mut tags);
            if stats.matched + stats.skipped > 0 {
                debug!(row, entity = %kind, ?stats, "aligned entity phrases");
            }
            totals.merge(stats);
        }
        columns.push(gold, tags);
    }
    info!(
        documents = columns.len(),
        matched = totals.matched,
        skipped = totals.skipped,
        "multi-label alignment finished"
    );
    Ok(columns)
}
