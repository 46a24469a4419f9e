#![forbid(unsafe_code)]

use serde::{Serialize, Serializer};
use thiserror::Error;

pub const GAZETTEER: &[&str] = &[
    "bay-of-bengal",
    "arabian-sea",
    "indian-ocean",
    "kerala-coast",
    "tamil-nadu-coast",
    "gujarat-coast",
    "west-bengal-coast",
    "odisha-coast",
    "andhra-pradesh-coast",
    "karnataka-coast",
    "goa-coast",
    "maharashtra-coast",
    "lakshadweep",
    "andaman-nicobar",
];

pub const TIME_PERIODS: &[&str] = &[
    "last-month",
    "last-3-months",
    "last-6-months",
    "last-year",
    "last-2-years",
    "last-5-years",
    "monsoon-2024",
    "winter-2024",
    "summer-2024",
    "post-monsoon-2024",
    "all-time",
];

pub const CLASSES: &[&str] = &["actinopterygii", "chondrichthyes", "mammalia"];
pub const ORDERS: &[&str] = &["perciformes", "clupeiformes", "gadiformes"];
pub const FAMILIES: &[&str] = &["scombridae", "clupeidae", "stromateidae"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vocabulary {
    Location,
    TimePeriod,
    Class,
    Order,
    Family,
    Parameter,
}

impl Vocabulary {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::TimePeriod => "time period",
            Self::Class => "class",
            Self::Order => "order",
            Self::Family => "family",
            Self::Parameter => "parameter",
        }
    }

    pub fn terms(self) -> &'static [&'static str] {
        match self {
            Self::Location => GAZETTEER,
            Self::TimePeriod => TIME_PERIODS,
            Self::Class => CLASSES,
            Self::Order => ORDERS,
            Self::Family => FAMILIES,
            Self::Parameter => EnvParameter::TERMS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VocabError {
    #[error("{vocabulary} must not be empty")]
    Empty { vocabulary: &'static str },
    #[error("unknown {vocabulary}: {value}")]
    Unknown {
        vocabulary: &'static str,
        value: String,
    },
    #[error("{vocabulary} must be spelled `{canonical}` (got `{value}`)")]
    NotCanonical {
        vocabulary: &'static str,
        value: String,
        canonical: &'static str,
    },
}

/// Resolves `raw` to the canonical spelling of a term in `vocabulary`.
///
/// Matching trims and lower-cases the input; the returned slice is the
/// vocabulary's own `'static` entry so callers can hold it without allocating.
pub fn lookup(vocabulary: Vocabulary, raw: &str) -> Result<&'static str, VocabError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(VocabError::Empty {
            vocabulary: vocabulary.as_str(),
        });
    }
    let lowered = trimmed.to_ascii_lowercase();
    vocabulary
        .terms()
        .iter()
        .copied()
        .find(|term| *term == lowered)
        .ok_or_else(|| VocabError::Unknown {
            vocabulary: vocabulary.as_str(),
            value: trimmed.to_string(),
        })
}

/// Like [`lookup`], but stored data must already use the canonical spelling
/// because filtering compares tags by exact equality.
pub fn require_canonical(vocabulary: Vocabulary, raw: &str) -> Result<&'static str, VocabError> {
    let canonical = lookup(vocabulary, raw)?;
    if canonical != raw {
        return Err(VocabError::NotCanonical {
            vocabulary: vocabulary.as_str(),
            value: raw.to_string(),
            canonical,
        });
    }
    Ok(canonical)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Location(&'static str);

impl Location {
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn try_new(value: &str) -> Result<Self, VocabError> {
        lookup(Vocabulary::Location, value).map(Self)
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimePeriod(&'static str);

impl TimePeriod {
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn try_new(value: &str) -> Result<Self, VocabError> {
        lookup(Vocabulary::TimePeriod, value).map(Self)
    }
}

impl Serialize for TimePeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rank {
    Class,
    Order,
    Family,
}

impl Rank {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Order => "order",
            Self::Family => "family",
        }
    }

    fn vocabulary(self) -> Vocabulary {
        match self {
            Self::Class => Vocabulary::Class,
            Self::Order => Vocabulary::Order,
            Self::Family => Vocabulary::Family,
        }
    }
}

/// A classification term bound to the rank it was validated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Taxon {
    rank: Rank,
    name: &'static str,
}

impl Taxon {
    pub fn try_new(rank: Rank, value: &str) -> Result<Self, VocabError> {
        let name = lookup(rank.vocabulary(), value)?;
        Ok(Self { rank, name })
    }

    pub fn class(value: &str) -> Result<Self, VocabError> {
        Self::try_new(Rank::Class, value)
    }

    pub fn order(value: &str) -> Result<Self, VocabError> {
        Self::try_new(Rank::Order, value)
    }

    pub fn family(value: &str) -> Result<Self, VocabError> {
        Self::try_new(Rank::Family, value)
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn as_str(&self) -> &'static str {
        self.name
    }
}

impl Serialize for Taxon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// Environmental parameters offered by the comparison selectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnvParameter {
    Temperature,
    Salinity,
    CurrentSpeed,
    Depth,
    Turbidity,
    Ph,
    Oxygen,
}

impl EnvParameter {
    pub const ALL: [EnvParameter; 7] = [
        Self::Temperature,
        Self::Salinity,
        Self::CurrentSpeed,
        Self::Depth,
        Self::Turbidity,
        Self::Ph,
        Self::Oxygen,
    ];

    const TERMS: &'static [&'static str] = &[
        "temperature",
        "salinity",
        "current-speed",
        "depth",
        "turbidity",
        "ph",
        "oxygen",
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Salinity => "salinity",
            Self::CurrentSpeed => "current-speed",
            Self::Depth => "depth",
            Self::Turbidity => "turbidity",
            Self::Ph => "ph",
            Self::Oxygen => "oxygen",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Salinity => "Salinity",
            Self::CurrentSpeed => "Current Speed",
            Self::Depth => "Depth",
            Self::Turbidity => "Turbidity",
            Self::Ph => "pH Level",
            Self::Oxygen => "Dissolved Oxygen",
        }
    }

    pub fn try_new(value: &str) -> Result<Self, VocabError> {
        let term = lookup(Vocabulary::Parameter, value)?;
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == term)
            .ok_or_else(|| VocabError::Unknown {
                vocabulary: Vocabulary::Parameter.as_str(),
                value: term.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_and_trimmed() {
        assert_eq!(
            Location::try_new("  Bay-Of-Bengal ").unwrap().as_str(),
            "bay-of-bengal"
        );
        assert_eq!(
            TimePeriod::try_new("MONSOON-2024").unwrap().as_str(),
            "monsoon-2024"
        );
    }

    #[test]
    fn unknown_and_empty_terms_are_rejected() {
        assert_eq!(
            Location::try_new("").unwrap_err(),
            VocabError::Empty {
                vocabulary: "location"
            }
        );
        assert!(matches!(
            Location::try_new("north-sea").unwrap_err(),
            VocabError::Unknown { .. }
        ));
    }

    #[test]
    fn stored_tags_must_be_canonical() {
        assert_eq!(
            require_canonical(Vocabulary::Location, "goa-coast"),
            Ok("goa-coast")
        );
        assert!(matches!(
            require_canonical(Vocabulary::Location, "Goa-Coast"),
            Err(VocabError::NotCanonical {
                canonical: "goa-coast",
                ..
            })
        ));
    }

    #[test]
    fn taxa_are_validated_per_rank() {
        assert_eq!(Taxon::family("Clupeidae").unwrap().as_str(), "clupeidae");
        assert!(Taxon::order("clupeidae").is_err());
        assert_eq!(Taxon::class("mammalia").unwrap().rank(), Rank::Class);
    }

    #[test]
    fn parameters_round_trip_through_their_terms() {
        for parameter in EnvParameter::ALL {
            assert_eq!(EnvParameter::try_new(parameter.as_str()), Ok(parameter));
        }
        assert!(EnvParameter::try_new("pressure").is_err());
    }
}
