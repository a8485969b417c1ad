//! Entity-level precision, recall, and F1 over BIO sequences.
//!
//! Strict mode credits a prediction only when a gold chunk has the same
//! label and the same boundaries. Lenient mode credits any overlap with a gold
//! chunk of the same label, on both the precision and the recall side.

use std::{collections::BTreeMap, fmt, path::Path, str::FromStr};

use clap::ValueEnum;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::chunks::{self, Chunk};
use crate::error::Result;

/// Boundary matching strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EvalMode {
    /// Exact boundaries and label.
    Strict,
    /// Overlapping boundaries, exact label.
    #[default]
    Lenient,
}

impl EvalMode {
    pub fn name(self) -> &'static str {
        match self {
            EvalMode::Strict => "strict",
            EvalMode::Lenient => "lenient",
        }
    }
}

impl fmt::Display for EvalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EvalMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(EvalMode::Strict),
            "lenient" => Ok(EvalMode::Lenient),
            other => Err(format!("unknown evaluation mode {other:?}")),
        }
    }
}

/// Scores two flat, equally long tag sequences.
pub trait Scorer {
    fn score(&self, truth: &[String], pred: &[String], mode: EvalMode)
        -> Result<ClassificationReport>;
}

/// Chunk-based scorer over BIO tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityScorer;

impl Scorer for EntityScorer {
    fn score(
        &self,
        truth: &[String],
        pred: &[String],
        mode: EvalMode,
    ) -> Result<ClassificationReport> {
        let gold = group_by_label(chunks::chunks(truth)?);
        let predicted = group_by_label(chunks::chunks(pred)?);

        let mut labels: Vec<&String> = gold.keys().chain(predicted.keys()).collect();
        labels.sort();
        labels.dedup();

        let empty = Vec::new();
        let mut counts = IndexMap::new();
        for label in labels {
            let g = gold.get(label).unwrap_or(&empty);
            let p = predicted.get(label).unwrap_or(&empty);
            counts.insert(label.clone(), count(g, p, mode));
        }
        Ok(ClassificationReport::from_counts(mode, counts))
    }
}

fn group_by_label(chunks: Vec<Chunk>) -> BTreeMap<String, Vec<Chunk>> {
    let mut grouped: BTreeMap<String, Vec<Chunk>> = BTreeMap::new();
    for chunk in chunks {
        grouped.entry(chunk.label.clone()).or_default().push(chunk);
    }
    grouped
}

/// Raw tallies for one label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelCounts {
    pub support: usize,
    pub predicted: usize,
    pub correct_pred: usize,
    pub correct_gold: usize,
}

impl LabelCounts {
    fn merge(&mut self, other: LabelCounts) {
        self.support += other.support;
        self.predicted += other.predicted;
        self.correct_pred += other.correct_pred;
        self.correct_gold += other.correct_gold;
    }
}

// Chunks of one label come out of `chunks::chunks` sorted and disjoint.
fn count(gold: &[Chunk], pred: &[Chunk], mode: EvalMode) -> LabelCounts {
    let correct_pred = pred.iter().filter(|p| hit(gold, p, mode)).count();
    let correct_gold = match mode {
        EvalMode::Strict => correct_pred,
        EvalMode::Lenient => gold.iter().filter(|g| hit(pred, g, mode)).count(),
    };
    LabelCounts {
        support: gold.len(),
        predicted: pred.len(),
        correct_pred,
        correct_gold,
    }
}

fn hit(sorted: &[Chunk], probe: &Chunk, mode: EvalMode) -> bool {
    let idx = sorted.partition_point(|c| c.end <= probe.start);
    let Some(candidate) = sorted.get(idx) else {
        return false;
    };
    match mode {
        EvalMode::Strict => candidate.start == probe.start && candidate.end == probe.end,
        EvalMode::Lenient => candidate.overlaps(probe),
    }
}

/// Precision, recall and F1 for one label or average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LabelScores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
    pub predicted: usize,
}

impl LabelScores {
    fn from_counts(c: LabelCounts) -> Self {
        let precision = ratio(c.correct_pred, c.predicted);
        let recall = ratio(c.correct_gold, c.support);
        Self {
            precision,
            recall,
            f1: harmonic(precision, recall),
            support: c.support,
            predicted: c.predicted,
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn harmonic(p: f64, r: f64) -> f64 {
    if p + r == 0.0 {
        0.0
    } else {
        2.0 * p * r / (p + r)
    }
}

/// Per-label scores plus micro and macro averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub mode: EvalMode,
    pub labels: IndexMap<String, LabelScores>,
    pub micro_avg: LabelScores,
    pub macro_avg: LabelScores,
}

impl ClassificationReport {
    pub fn from_counts(mode: EvalMode, counts: IndexMap<String, LabelCounts>) -> Self {
        let mut total = LabelCounts::default();
        for c in counts.values() {
            total.merge(*c);
        }
        let labels: IndexMap<String, LabelScores> = counts
            .into_iter()
            .map(|(label, c)| (label, LabelScores::from_counts(c)))
            .collect();
        let macro_avg = macro_average(&labels);
        Self {
            mode,
            labels,
            micro_avg: LabelScores::from_counts(total),
            macro_avg,
        }
    }

    pub fn label(&self, name: &str) -> Option<&LabelScores> {
        self.labels.get(name)
    }

    /// Write one CSV row per label followed by the two averages.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        #[derive(Serialize)]
        struct Row<'a> {
            label: &'a str,
            precision: f64,
            recall: f64,
            f1: f64,
            support: usize,
            predicted: usize,
        }

        let mut writer = csv::Writer::from_path(path)?;
        let averages = [
            ("micro avg", &self.micro_avg),
            ("macro avg", &self.macro_avg),
        ];
        let rows = self
            .labels
            .iter()
            .map(|(label, s)| (label.as_str(), s))
            .chain(averages);
        for (label, s) in rows {
            writer.serialize(Row {
                label,
                precision: s.precision,
                recall: s.recall,
                f1: s.f1,
                support: s.support,
                predicted: s.predicted,
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn macro_average(labels: &IndexMap<String, LabelScores>) -> LabelScores {
    let n = labels.len();
    if n == 0 {
        return LabelScores::default();
    }
    let mut avg = LabelScores::default();
    for s in labels.values() {
        avg.precision += s.precision;
        avg.recall += s.recall;
        avg.f1 += s.f1;
        avg.support += s.support;
        avg.predicted += s.predicted;
    }
    avg.precision /= n as f64;
    avg.recall /= n as f64;
    avg.f1 /= n as f64;
    avg
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .labels
            .keys()
            .map(String::len)
            .chain(["macro avg".len()])
            .max()
            .unwrap_or(0);
        writeln!(f, "mode: {}", self.mode)?;
        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (label, s) in &self.labels {
            write_row(f, width, label, s)?;
        }
        writeln!(f)?;
        write_row(f, width, "micro avg", &self.micro_avg)?;
        write_row(f, width, "macro avg", &self.macro_avg)
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, width: usize, name: &str, s: &LabelScores) -> fmt::Result {
    writeln!(
        f,
        "{:>width$}  {:>9.4} {:>9.4} {:>9.4} {:>9}",
        name, s.precision, s.recall, s.f1, s.support
    )
}
