#![forbid(unsafe_code)]

mod registry;

pub use registry::*;

use crate::vocab::{VocabError, Vocabulary, require_canonical};
use serde::{Deserialize, Serialize};

/// Facets a dataset may declare as filterable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FacetKind {
    Location,
    TimePeriod,
    Class,
    Order,
    Family,
    Parameter1,
    Parameter2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetName {
    Species,
    Biomass,
    Trends,
    LocationDensity,
    Comparison,
    SearchIndex,
    OtolithMatches,
    EdnaMatches,
}

impl DatasetName {
    pub const ALL: [DatasetName; 8] = [
        Self::Species,
        Self::Biomass,
        Self::Trends,
        Self::LocationDensity,
        Self::Comparison,
        Self::SearchIndex,
        Self::OtolithMatches,
        Self::EdnaMatches,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Species => "species",
            Self::Biomass => "biomass",
            Self::Trends => "trends",
            Self::LocationDensity => "location-density",
            Self::Comparison => "comparison",
            Self::SearchIndex => "search-index",
            Self::OtolithMatches => "otolith-matches",
            Self::EdnaMatches => "edna-matches",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == value.trim())
    }

    pub fn schema(self) -> DatasetSchema {
        const TAGGED: &[FacetKind] = &[FacetKind::Location, FacetKind::TimePeriod];
        let filterable: &'static [FacetKind] = match self {
            Self::Species => &[
                FacetKind::Location,
                FacetKind::TimePeriod,
                FacetKind::Class,
                FacetKind::Order,
                FacetKind::Family,
            ],
            Self::Biomass | Self::Trends | Self::LocationDensity => TAGGED,
            Self::Comparison => &[
                FacetKind::Parameter1,
                FacetKind::Parameter2,
                FacetKind::Location,
            ],
            Self::SearchIndex => &[FacetKind::Location],
            Self::OtolithMatches | Self::EdnaMatches => &[],
        };
        DatasetSchema {
            name: self,
            filterable,
        }
    }
}

/// Which facets constrain a dataset. Facets outside `filterable` never affect it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatasetSchema {
    pub name: DatasetName,
    pub filterable: &'static [FacetKind],
}

impl DatasetSchema {
    pub fn filters_on(&self, kind: FacetKind) -> bool {
        self.filterable.contains(&kind)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub name: String,
    pub scientific: String,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomassRecord {
    pub month: String,
    pub biomass: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    pub year: i32,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DensityRecord {
    pub location: String,
    pub density: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub parameter1: String,
    pub parameter2: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub name: String,
    pub scientific: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub category: String,
}

/// One row of an identification result table. `confidence` is a percentage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    pub name: String,
    pub confidence: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "kebab-case")]
pub enum Record {
    Species(SpeciesRecord),
    Biomass(BiomassRecord),
    Trend(TrendRecord),
    Density(DensityRecord),
    Comparison(ComparisonRecord),
    SearchEntry(SearchEntry),
    Match(MatchRecord),
}

impl Record {
    /// The dataset a record of this shape belongs to. Match rows may live in
    /// either match dataset, so they report `None`.
    pub fn home_dataset(&self) -> Option<DatasetName> {
        match self {
            Self::Species(_) => Some(DatasetName::Species),
            Self::Biomass(_) => Some(DatasetName::Biomass),
            Self::Trend(_) => Some(DatasetName::Trends),
            Self::Density(_) => Some(DatasetName::LocationDensity),
            Self::Comparison(_) => Some(DatasetName::Comparison),
            Self::SearchEntry(_) => Some(DatasetName::SearchIndex),
            Self::Match(_) => None,
        }
    }

    pub fn belongs_to(&self, dataset: DatasetName) -> bool {
        match self.home_dataset() {
            Some(home) => home == dataset,
            None => matches!(
                dataset,
                DatasetName::OtolithMatches | DatasetName::EdnaMatches
            ),
        }
    }

    pub fn tag(&self, kind: FacetKind) -> Option<&str> {
        match (self, kind) {
            (Self::Species(r), FacetKind::Location) => r.location.as_deref(),
            (Self::Species(r), FacetKind::TimePeriod) => r.time_period.as_deref(),
            (Self::Species(r), FacetKind::Class) => r.class.as_deref(),
            (Self::Species(r), FacetKind::Order) => r.order.as_deref(),
            (Self::Species(r), FacetKind::Family) => r.family.as_deref(),
            (Self::Biomass(r), FacetKind::Location) => r.location.as_deref(),
            (Self::Biomass(r), FacetKind::TimePeriod) => r.time_period.as_deref(),
            (Self::Trend(r), FacetKind::Location) => r.location.as_deref(),
            (Self::Trend(r), FacetKind::TimePeriod) => r.time_period.as_deref(),
            (Self::Density(r), FacetKind::Location) => Some(r.location.as_str()),
            (Self::Density(r), FacetKind::TimePeriod) => r.time_period.as_deref(),
            (Self::Comparison(r), FacetKind::Parameter1) => Some(r.parameter1.as_str()),
            (Self::Comparison(r), FacetKind::Parameter2) => Some(r.parameter2.as_str()),
            (Self::Comparison(r), FacetKind::Location) => r.location.as_deref(),
            (Self::SearchEntry(r), FacetKind::Location) => r.location.as_deref(),
            _ => None,
        }
    }

    /// Text fields consulted by free-text search. Empty for non-searchable records.
    pub fn search_fields(&self) -> Vec<&str> {
        match self {
            Self::Species(r) => {
                let mut fields = vec![r.name.as_str(), r.scientific.as_str()];
                fields.extend(r.location.as_deref());
                fields
            }
            Self::SearchEntry(r) => {
                let mut fields = vec![r.name.as_str(), r.scientific.as_str()];
                fields.extend(r.location.as_deref());
                fields.push(r.category.as_str());
                fields
            }
            _ => Vec::new(),
        }
    }

    /// Checks every present categorical tag against its vocabulary, in canonical spelling.
    pub fn validate_tags(&self) -> Result<(), VocabError> {
        const CHECKS: [(FacetKind, Vocabulary); 7] = [
            (FacetKind::Location, Vocabulary::Location),
            (FacetKind::TimePeriod, Vocabulary::TimePeriod),
            (FacetKind::Class, Vocabulary::Class),
            (FacetKind::Order, Vocabulary::Order),
            (FacetKind::Family, Vocabulary::Family),
            (FacetKind::Parameter1, Vocabulary::Parameter),
            (FacetKind::Parameter2, Vocabulary::Parameter),
        ];
        for (kind, vocabulary) in CHECKS {
            if let Some(value) = self.tag(kind) {
                require_canonical(vocabulary, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
