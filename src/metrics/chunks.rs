//! Decode flat BIO tag sequences into entity chunks.

use serde::Serialize;

use crate::error::{Error, Result};

/// Label given to chunks tagged with bare `B` / `I`.
pub const UNTYPED_LABEL: &str = "ENTITY";

/// A tagged entity covering tokens `start..end`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Chunk {
    pub label: String,
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    pub fn overlaps(&self, other: &Chunk) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    Begin,
    Inside,
    Outside,
}

fn parse_tag(tag: &str) -> Result<(Prefix, &str)> {
    if tag == "O" {
        return Ok((Prefix::Outside, ""));
    }
    let (prefix, rest) = if let Some(rest) = tag.strip_prefix('B') {
        (Prefix::Begin, rest)
    } else if let Some(rest) = tag.strip_prefix('I') {
        (Prefix::Inside, rest)
    } else {
        return Err(Error::InvalidTag(tag.to_string()));
    };
    match rest {
        "" => Ok((prefix, UNTYPED_LABEL)),
        _ => match rest.strip_prefix('-') {
            Some(label) if !label.is_empty() => Ok((prefix, label)),
            _ => Err(Error::InvalidTag(tag.to_string())),
        },
    }
}

/// Group tags into chunks.
///
/// `B-X` always opens a chunk. `I-X` continues an open `X` chunk and opens a
/// new one after `O` or a chunk of another type.
pub fn chunks<S: AsRef<str>>(tags: &[S]) -> Result<Vec<Chunk>> {
    let mut out = Vec::new();
    let mut open: Option<(&str, usize)> = None;
    for (idx, tag) in tags.iter().enumerate() {
        let (prefix, label) = parse_tag(tag.as_ref())?;
        let continues = prefix == Prefix::Inside && open.is_some_and(|(cur, _)| cur == label);
        if continues {
            continue;
        }
        if let Some((cur, start)) = open.take() {
            out.push(Chunk {
                label: cur.to_string(),
                start,
                end: idx,
            });
        }
        if prefix != Prefix::Outside {
            open = Some((label, idx));
        }
    }
    if let Some((cur, start)) = open {
        out.push(Chunk {
            label: cur.to_string(),
            start,
            end: tags.len(),
        });
    }
    Ok(out)
}
