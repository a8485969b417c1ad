//! Greedy left-to-right alignment of phrases onto reference tokens.

use tracing::debug;

use super::highlight::Phrase;

pub const OUTSIDE: &str = "O";

/// Per-document BIO tags, one per reference token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBuffer {
    tags: Vec<String>,
}

impl TagBuffer {
    /// A buffer of `len` outside tags.
    pub fn outside(len: usize) -> Self {
        Self {
            tags: vec![OUTSIDE.to_string(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn into_inner(self) -> Vec<String> {
        self.tags
    }

    /// Tag `start..start + len` as one entity, optionally typed.
    fn mark(&mut self, start: usize, len: usize, label: Option<&str>) {
        let (begin, inside) = match label {
            Some(name) => (format!("B-{name}"), format!("I-{name}")),
            None => ("B".to_string(), "I".to_string()),
        };
        self.tags[start] = begin;
        for tag in &mut self.tags[start + 1..start + len] {
            *tag = inside.clone();
        }
    }
}

/// Outcome counts for one aligner invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignStats {
    pub matched: usize,
    pub skipped: usize,
}

impl AlignStats {
    pub fn merge(&mut self, other: AlignStats) {
        self.matched += other.matched;
        self.skipped += other.skipped;
    }
}

/// Locate each phrase in `reference` and write its tags into `tags`.
///
/// Phrases are matched in order. Each search starts at the end of the previous
/// match and takes the leftmost exact sub-sequence. A phrase with no match is
/// skipped and leaves the cursor where it was. Blank phrases never match.
pub fn align(
    phrases: &[Phrase],
    reference: &[String],
    label: Option<&str>,
    tags: &mut TagBuffer,
) -> AlignStats {
    debug_assert_eq!(reference.len(), tags.len());
    let mut stats = AlignStats::default();
    let mut cursor = 0usize;
    for phrase in phrases {
        match find_from(reference, phrase, cursor) {
            Some(start) => {
                tags.mark(start, phrase.len(), label);
                cursor = start + phrase.len();
                stats.matched += 1;
            }
            None => {
                debug!(phrase = ?phrase.tokens(), ?label, cursor, "phrase not found in text");
                stats.skipped += 1;
            }
        }
    }
    stats
}

fn find_from(reference: &[String], phrase: &Phrase, cursor: usize) -> Option<usize> {
    if phrase.is_empty() || phrase.is_blank() || cursor >= reference.len() {
        return None;
    }
    reference[cursor..]
        .windows(phrase.len())
        .position(|window| window == phrase.tokens())
        .map(|offset| cursor + offset)
}
