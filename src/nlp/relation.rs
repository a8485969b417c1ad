//! Drug-attribute relation labels and their integer codes.

use std::{collections::HashMap, fmt, str::FromStr};

use once_cell::sync::Lazy;

/// Relation between a drug and one of its attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RelationLabel {
    #[default]
    NoRelation,
    StrengthDrug,
    RouteDrug,
    FrequencyDrug,
    FormDrug,
    DosageDrug,
    ReasonDrug,
    DurationDrug,
    AdeDrug,
}

impl RelationLabel {
    pub const ALL: [RelationLabel; 9] = [
        RelationLabel::NoRelation,
        RelationLabel::StrengthDrug,
        RelationLabel::RouteDrug,
        RelationLabel::FrequencyDrug,
        RelationLabel::FormDrug,
        RelationLabel::DosageDrug,
        RelationLabel::ReasonDrug,
        RelationLabel::DurationDrug,
        RelationLabel::AdeDrug,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RelationLabel::NoRelation => "No relation",
            RelationLabel::StrengthDrug => "STRENGTH-DRUG",
            RelationLabel::RouteDrug => "ROUTE-DRUG",
            RelationLabel::FrequencyDrug => "FREQUENCY-DRUG",
            RelationLabel::FormDrug => "FORM-DRUG",
            RelationLabel::DosageDrug => "DOSAGE-DRUG",
            RelationLabel::ReasonDrug => "REASON-DRUG",
            RelationLabel::DurationDrug => "DURATION-DRUG",
            RelationLabel::AdeDrug => "ADE-DRUG",
        }
    }

    pub fn digit(self) -> u8 {
        match self {
            RelationLabel::NoRelation => 0,
            RelationLabel::StrengthDrug => 1,
            RelationLabel::RouteDrug => 2,
            RelationLabel::FrequencyDrug => 3,
            RelationLabel::FormDrug => 4,
            RelationLabel::DosageDrug => 5,
            RelationLabel::ReasonDrug => 6,
            RelationLabel::DurationDrug => 7,
            RelationLabel::AdeDrug => 8,
        }
    }
}

impl fmt::Display for RelationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static BY_NAME: Lazy<HashMap<&'static str, RelationLabel>> = Lazy::new(|| {
    RelationLabel::ALL
        .iter()
        .map(|label| (label.name(), *label))
        .collect()
});

/// Unrecognised relation name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown relation label {0:?}")]
pub struct UnknownRelation(pub String);

impl FromStr for RelationLabel {
    type Err = UnknownRelation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BY_NAME
            .get(s)
            .copied()
            .ok_or_else(|| UnknownRelation(s.to_string()))
    }
}

/// Integer code for a relation name. Names outside the table are treated as
/// "No relation" and map to 0.
pub fn digit_for(name: &str) -> u8 {
    match name.parse::<RelationLabel>() {
        Ok(label) => label.digit(),
        Err(_) => RelationLabel::NoRelation.digit(),
    }
}
