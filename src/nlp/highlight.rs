//! Highlight-span extraction from LLM HTML output.
//!
//! The model marks entities with
//! `<span style="background-color: #RRGGBB">phrase</span>`. Each color is bound
//! to one entity type. Extraction pulls the phrase out of every span with a
//! given color, pads parentheses and hyphens so they tokenize the way the
//! reference text was split, and splits on single spaces.
//!
//! The closing tag is the first `</span>` after the opening marker, even when
//! another opening marker sits in between. Nested markup inside a highlighted
//! phrase therefore truncates the phrase.

use std::{collections::HashMap, fmt};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

const CLOSE_MARKER: &str = "</span>";

static OPEN_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<span style="background-color: (#[0-9A-F]{6})">"#).expect("valid regex")
});

static HEX_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9A-F]{6}$").expect("valid regex"));

/// Entity types of the multi-label palette, in enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Form,
    Route,
    Frequency,
    Dosage,
    Strength,
    Duration,
    Reason,
    Ade,
    Drug,
}

impl EntityKind {
    /// Label name used in `B-<name>` / `I-<name>` tags.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Form => "Form",
            EntityKind::Route => "Route",
            EntityKind::Frequency => "Frequency",
            EntityKind::Dosage => "Dosage",
            EntityKind::Strength => "Strength",
            EntityKind::Duration => "Duration",
            EntityKind::Reason => "Reason",
            EntityKind::Ade => "Ade",
            EntityKind::Drug => "Drug",
        }
    }

    /// Look up the entity bound to a highlight color.
    pub fn from_hex(hex: &str) -> Option<Self> {
        HEX_TO_KIND.get(hex).copied()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Color to entity bindings. Order matters: in multi-label alignment a later
/// entry overwrites tags set by an earlier one.
pub const PALETTE: [(&str, EntityKind); 9] = [
    ("#FF0000", EntityKind::Form),
    ("#FFA500", EntityKind::Route),
    ("#FFFF00", EntityKind::Frequency),
    ("#00FF00", EntityKind::Dosage),
    ("#0000FF", EntityKind::Strength),
    ("#800080", EntityKind::Duration),
    ("#FFC0CB", EntityKind::Reason),
    ("#964B00", EntityKind::Ade),
    ("#808080", EntityKind::Drug),
];

static HEX_TO_KIND: Lazy<HashMap<&'static str, EntityKind>> =
    Lazy::new(|| PALETTE.iter().copied().collect());

/// Color the single-label pipeline looks for.
pub const SINGLE_LABEL_HEX: &str = "#FFFF00";

/// One highlight color to search for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightMarker {
    hex: String,
}

impl HighlightMarker {
    /// Build a marker from an uppercase `#RRGGBB` code.
    pub fn new(hex: impl Into<String>) -> Result<Self> {
        let hex = hex.into();
        if !HEX_CODE.is_match(&hex) {
            return Err(Error::InvalidColor(hex));
        }
        Ok(Self { hex })
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// The literal opening tag this marker matches.
    pub fn open_tag(&self) -> String {
        format!(r#"<span style="background-color: {}">"#, self.hex)
    }
}

/// A highlighted phrase split into sub-tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    tokens: Vec<String>,
}

impl Phrase {
    /// Normalize raw span text and split it on single spaces.
    pub fn from_raw(raw: &str) -> Self {
        let normalized = normalize(raw);
        Self {
            tokens: normalized.split(' ').map(str::to_string).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True for a phrase extracted from an empty span (`[""]`).
    pub fn is_blank(&self) -> bool {
        self.tokens.iter().all(String::is_empty)
    }
}

/// Extract every phrase highlighted with `marker`, in document order.
pub fn extract(html: &str, marker: &HighlightMarker) -> Result<Vec<Phrase>> {
    let mut phrases = Vec::new();
    for caps in OPEN_MARKER.captures_iter(html) {
        let (Some(open), Some(hex)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if hex.as_str() != marker.hex() {
            continue;
        }
        let start = open.end();
        let end = html[start..]
            .find(CLOSE_MARKER)
            .map(|rel| start + rel)
            .ok_or(Error::UnclosedSpan {
                offset: open.start(),
            })?;
        phrases.push(Phrase::from_raw(&html[start..end]));
    }
    Ok(phrases)
}

/// Phrases found for each palette color of one document.
#[derive(Debug, Clone)]
pub struct PaletteExtraction {
    pub entries: Vec<(EntityKind, Vec<Phrase>)>,
}

/// Extract phrases for every palette color, in palette order.
pub fn extract_palette(html: &str) -> Result<PaletteExtraction> {
    let entries = PALETTE
        .iter()
        .map(|(hex, kind)| {
            let marker = HighlightMarker::new(*hex)?;
            Ok((*kind, extract(html, &marker)?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(PaletteExtraction { entries })
}

/// Pad `(`, `)` and `-` with spaces so they become standalone tokens.
pub fn normalize(phrase: &str) -> String {
    let mut out = phrase.to_string();
    for ch in ['(', ')', '-'] {
        out = pad_before(&out, ch);
        out = pad_after(&out, ch);
    }
    out
}

fn pad_before(text: &str, target: char) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if c == target && prev.is_some_and(|p| !p.is_whitespace()) {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

fn pad_after(text: &str, target: char) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == target && chars.peek().is_some_and(|n| !n.is_whitespace()) {
            out.push(' ');
        }
    }
    out
}
