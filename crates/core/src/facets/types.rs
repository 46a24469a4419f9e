#![forbid(unsafe_code)]

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Search,
    Visualization,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Visualization => "visualization",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "search" => Some(Self::Search),
            "visualization" | "visualisation" => Some(Self::Visualization),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchType {
    Otolith,
    Taxonomy,
    Edna,
}

impl SearchType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Otolith => "otolith",
            Self::Taxonomy => "taxonomy",
            Self::Edna => "edna",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "otolith" => Some(Self::Otolith),
            "taxonomy" => Some(Self::Taxonomy),
            "edna" => Some(Self::Edna),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OtolithType {
    Image,
    Text,
}

impl OtolithType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Text => "text",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "image" => Some(Self::Image),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaxonomyType {
    BySpecies,
    ByClassification,
}

impl TaxonomyType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BySpecies => "by-species",
            Self::ByClassification => "by-classification",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "by-species" | "species" => Some(Self::BySpecies),
            "by-classification" | "class" => Some(Self::ByClassification),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualizationType {
    Simulation,
    Ecology,
    Species,
}

impl VisualizationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simulation => "simulation",
            Self::Ecology => "ecology",
            Self::Species => "species",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "simulation" => Some(Self::Simulation),
            "ecology" => Some(Self::Ecology),
            "species" => Some(Self::Species),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimulationType {
    Predictive,
    Comparison,
}

impl SimulationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Predictive => "predictive",
            Self::Comparison => "comparison",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "predictive" => Some(Self::Predictive),
            "comparison" => Some(Self::Comparison),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EcologyType {
    Temperature,
    Salinity,
    CurrentSpeed,
    Depth,
    Turbidity,
    ParameterComparison,
}

impl EcologyType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Salinity => "salinity",
            Self::CurrentSpeed => "current-speed",
            Self::Depth => "depth",
            Self::Turbidity => "turbidity",
            Self::ParameterComparison => "parameter-comparison",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "temperature" => Some(Self::Temperature),
            "salinity" => Some(Self::Salinity),
            "current-speed" => Some(Self::CurrentSpeed),
            "depth" => Some(Self::Depth),
            "turbidity" => Some(Self::Turbidity),
            "parameter-comparison" => Some(Self::ParameterComparison),
            _ => None,
        }
    }

    pub fn is_named_parameter(self) -> bool {
        self != Self::ParameterComparison
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeciesScope {
    All,
    Specific,
}

impl SpeciesScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Specific => "specific",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "specific" => Some(Self::Specific),
            _ => None,
        }
    }
}

/// Chart style preference; passed through to the renderer untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GraphType {
    Heatmap,
    TimeSeries,
    Bar,
    Pie,
}

impl GraphType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heatmap => "heatmap",
            Self::TimeSeries => "time-series",
            Self::Bar => "bar",
            Self::Pie => "pie",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "heatmap" => Some(Self::Heatmap),
            "time-series" | "timeseries" => Some(Self::TimeSeries),
            "bar" => Some(Self::Bar),
            "pie" => Some(Self::Pie),
            _ => None,
        }
    }
}

/// Which partition of every dataset is visible. A display toggle, not access control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataSource {
    Uploaded,
    #[default]
    Platform,
    Select,
}

impl DataSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Platform => "platform",
            Self::Select => "select",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "uploaded" => Some(Self::Uploaded),
            "platform" => Some(Self::Platform),
            "select" => Some(Self::Select),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UploadSlot {
    OtolithImage,
    EdnaSequence,
}

impl UploadSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OtolithImage => "otolith-image",
            Self::EdnaSequence => "edna-sequence",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "otolith-image" | "otolith" => Some(Self::OtolithImage),
            "edna-sequence" | "edna" => Some(Self::EdnaSequence),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "family", content = "type", rename_all = "kebab-case")]
pub enum TopLevel {
    Search(SearchType),
    Visualization(VisualizationType),
}

impl TopLevel {
    pub fn mode(self) -> Mode {
        match self {
            Self::Search(_) => Mode::Search,
            Self::Visualization(_) => Mode::Visualization,
        }
    }

    /// Parses a top-level type name in the family selected by `mode`.
    pub fn parse_for(mode: Mode, value: &str) -> Option<Self> {
        match mode {
            Mode::Search => SearchType::parse(value).map(Self::Search),
            Mode::Visualization => VisualizationType::parse(value).map(Self::Visualization),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "family", content = "type", rename_all = "kebab-case")]
pub enum SubType {
    Otolith(OtolithType),
    Taxonomy(TaxonomyType),
    Simulation(SimulationType),
    Ecology(EcologyType),
    Species(SpeciesScope),
}
