#![forbid(unsafe_code)]

use super::sliders::{Slider, Sliders};
use super::types::*;
use crate::vocab::{EnvParameter, Location, Rank, Taxon, TimePeriod};
use serde::Serialize;
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub class: Option<Taxon>,
    pub order: Option<Taxon>,
    pub family: Option<Taxon>,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.class.is_none() && self.order.is_none() && self.family.is_none()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonParameters {
    pub parameter1: Option<EnvParameter>,
    pub parameter2: Option<EnvParameter>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UploadFlags {
    pub otolith_image: bool,
    pub edna_sequence: bool,
}

impl UploadFlags {
    pub fn has(&self, slot: UploadSlot) -> bool {
        match slot {
            UploadSlot::OtolithImage => self.otolith_image,
            UploadSlot::EdnaSequence => self.edna_sequence,
        }
    }

    fn set(&mut self, slot: UploadSlot, present: bool) {
        match slot {
            UploadSlot::OtolithImage => self.otolith_image = present,
            UploadSlot::EdnaSequence => self.edna_sequence = present,
        }
    }
}

/// A leaf facet assignment. Applying one never clears other facets.
#[derive(Clone, Debug, PartialEq)]
pub enum SubFacet {
    OtolithType(Option<OtolithType>),
    TaxonomyType(Option<TaxonomyType>),
    SimulationType(Option<SimulationType>),
    EcologyType(Option<EcologyType>),
    SpeciesType(Option<SpeciesScope>),
    GraphType(Option<GraphType>),
    DataSource(DataSource),
    Location(Option<Location>),
    TimePeriod(Option<TimePeriod>),
    Taxon(Rank, Option<Taxon>),
    Parameter1(Option<EnvParameter>),
    Parameter2(Option<EnvParameter>),
    Slider(Slider, f64),
    FreeText(String),
    Upload(UploadSlot, bool),
}

impl SubFacet {
    /// The mode this facet belongs to, or `None` for facets shared by both modes.
    pub fn family(&self) -> Option<Mode> {
        match self {
            Self::OtolithType(_) | Self::TaxonomyType(_) | Self::Taxon(..) | Self::Upload(..) => {
                Some(Mode::Search)
            }
            Self::SimulationType(_)
            | Self::EcologyType(_)
            | Self::SpeciesType(_)
            | Self::GraphType(_)
            | Self::Parameter1(_)
            | Self::Parameter2(_)
            | Self::Slider(..) => Some(Mode::Visualization),
            Self::DataSource(_) | Self::Location(_) | Self::TimePeriod(_) | Self::FreeText(_) => {
                None
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OtolithType(_) => "otolith_type",
            Self::TaxonomyType(_) => "taxonomy_type",
            Self::SimulationType(_) => "simulation_type",
            Self::EcologyType(_) => "ecology_type",
            Self::SpeciesType(_) => "species_type",
            Self::GraphType(_) => "graph_type",
            Self::DataSource(_) => "data_source",
            Self::Location(_) => "location",
            Self::TimePeriod(_) => "time_period",
            Self::Taxon(rank, _) => rank.as_str(),
            Self::Parameter1(_) => "parameter1",
            Self::Parameter2(_) => "parameter2",
            Self::Slider(slider, _) => slider.as_str(),
            Self::FreeText(_) => "free_text_query",
            Self::Upload(slot, _) => slot.as_str(),
        }
    }
}

/// The session's query intent.
///
/// Fields are only reachable through the setters below, which keep the
/// one-active-family invariant: search facets are unset outside
/// [`Mode::Search`] and visualization facets are unset outside
/// [`Mode::Visualization`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FacetState {
    mode: Mode,
    search_type: Option<SearchType>,
    otolith_type: Option<OtolithType>,
    taxonomy_type: Option<TaxonomyType>,
    visualization_type: Option<VisualizationType>,
    simulation_type: Option<SimulationType>,
    ecology_type: Option<EcologyType>,
    species_type: Option<SpeciesScope>,
    graph_type: Option<GraphType>,
    data_source: DataSource,
    location: Option<Location>,
    time_period: Option<TimePeriod>,
    classification: Classification,
    comparison: ComparisonParameters,
    free_text_query: String,
    sliders: Sliders,
    uploads: UploadFlags,
}

impl FacetState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches mode. Everything except `data_source` returns to its default.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        let next = Self {
            mode,
            data_source: self.data_source,
            ..Self::default()
        };
        self.replace(next, "mode")
    }

    /// Sets (or clears) the top-level type of the active family and drops its dependents.
    ///
    /// A value from the inactive family leaves the state untouched.
    pub fn set_top_level(&mut self, value: Option<TopLevel>) -> bool {
        let mut next = self.clone();
        match (self.mode, value) {
            (Mode::Search, None) => {
                next.search_type = None;
                next.clear_search_dependents();
            }
            (Mode::Search, Some(TopLevel::Search(search_type))) => {
                next.search_type = Some(search_type);
                next.clear_search_dependents();
            }
            (Mode::Visualization, None) => {
                next.visualization_type = None;
                next.clear_visualization_dependents();
            }
            (Mode::Visualization, Some(TopLevel::Visualization(visualization_type))) => {
                next.visualization_type = Some(visualization_type);
                next.clear_visualization_dependents();
            }
            (mode, Some(other)) => {
                debug!(
                    mode = mode.as_str(),
                    family = other.mode().as_str(),
                    "ignoring top-level type from inactive family"
                );
                return false;
            }
        }
        self.replace(next, "top_level")
    }

    /// Sets a single leaf facet. Facets of the inactive family are ignored.
    pub fn set_sub_facet(&mut self, facet: SubFacet) -> bool {
        if let Some(family) = facet.family()
            && family != self.mode
        {
            debug!(
                facet = facet.name(),
                mode = self.mode.as_str(),
                "ignoring facet from inactive family"
            );
            return false;
        }

        let name = facet.name();
        let mut next = self.clone();
        match facet {
            SubFacet::OtolithType(v) => next.otolith_type = v,
            SubFacet::TaxonomyType(v) => next.taxonomy_type = v,
            SubFacet::SimulationType(v) => next.simulation_type = v,
            SubFacet::EcologyType(v) => next.ecology_type = v,
            SubFacet::SpeciesType(v) => next.species_type = v,
            SubFacet::GraphType(v) => next.graph_type = v,
            SubFacet::DataSource(v) => next.data_source = v,
            SubFacet::Location(v) => next.location = v,
            SubFacet::TimePeriod(v) => next.time_period = v,
            SubFacet::Taxon(rank, taxon) => {
                if let Some(taxon) = taxon
                    && taxon.rank() != rank
                {
                    debug!(
                        rank = rank.as_str(),
                        taxon = taxon.as_str(),
                        "ignoring taxon of a different rank"
                    );
                    return false;
                }
                match rank {
                    Rank::Class => next.classification.class = taxon,
                    Rank::Order => next.classification.order = taxon,
                    Rank::Family => next.classification.family = taxon,
                }
            }
            SubFacet::Parameter1(v) => next.comparison.parameter1 = v,
            SubFacet::Parameter2(v) => next.comparison.parameter2 = v,
            SubFacet::Slider(slider, value) => {
                next.sliders.set(slider, value);
            }
            SubFacet::FreeText(v) => next.free_text_query = v,
            SubFacet::Upload(slot, present) => next.uploads.set(slot, present),
        }
        self.replace(next, name)
    }

    /// Restores every facet, including mode, data source and slider defaults.
    pub fn reset_all(&mut self) -> bool {
        self.replace(Self::default(), "reset_all")
    }

    fn clear_search_dependents(&mut self) {
        self.otolith_type = None;
        self.taxonomy_type = None;
        self.uploads = UploadFlags::default();
        self.classification = Classification::default();
        self.comparison = ComparisonParameters::default();
    }

    fn clear_visualization_dependents(&mut self) {
        self.simulation_type = None;
        self.ecology_type = None;
        self.species_type = None;
        self.uploads = UploadFlags::default();
        self.classification = Classification::default();
        self.comparison = ComparisonParameters::default();
    }

    fn replace(&mut self, next: Self, facet: &'static str) -> bool {
        if *self == next {
            return false;
        }
        debug!(facet, mode = next.mode.as_str(), "facet state changed");
        *self = next;
        true
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn search_type(&self) -> Option<SearchType> {
        self.search_type
    }

    pub fn otolith_type(&self) -> Option<OtolithType> {
        self.otolith_type
    }

    pub fn taxonomy_type(&self) -> Option<TaxonomyType> {
        self.taxonomy_type
    }

    pub fn visualization_type(&self) -> Option<VisualizationType> {
        self.visualization_type
    }

    pub fn simulation_type(&self) -> Option<SimulationType> {
        self.simulation_type
    }

    pub fn ecology_type(&self) -> Option<EcologyType> {
        self.ecology_type
    }

    pub fn species_type(&self) -> Option<SpeciesScope> {
        self.species_type
    }

    pub fn graph_type(&self) -> Option<GraphType> {
        self.graph_type
    }

    pub fn data_source(&self) -> DataSource {
        self.data_source
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn time_period(&self) -> Option<TimePeriod> {
        self.time_period
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn comparison(&self) -> &ComparisonParameters {
        &self.comparison
    }

    pub fn free_text_query(&self) -> &str {
        &self.free_text_query
    }

    pub fn sliders(&self) -> &Sliders {
        &self.sliders
    }

    pub fn uploads(&self) -> &UploadFlags {
        &self.uploads
    }

    /// The top-level type of the active family.
    pub fn top_level(&self) -> Option<TopLevel> {
        match self.mode {
            Mode::Search => self.search_type.map(TopLevel::Search),
            Mode::Visualization => self.visualization_type.map(TopLevel::Visualization),
        }
    }

    /// The sub-type that belongs to the active top-level type.
    pub fn sub_type(&self) -> Option<SubType> {
        match self.top_level()? {
            TopLevel::Search(SearchType::Otolith) => self.otolith_type.map(SubType::Otolith),
            TopLevel::Search(SearchType::Taxonomy) => self.taxonomy_type.map(SubType::Taxonomy),
            TopLevel::Search(SearchType::Edna) => None,
            TopLevel::Visualization(VisualizationType::Simulation) => {
                self.simulation_type.map(SubType::Simulation)
            }
            TopLevel::Visualization(VisualizationType::Ecology) => {
                self.ecology_type.map(SubType::Ecology)
            }
            TopLevel::Visualization(VisualizationType::Species) => {
                self.species_type.map(SubType::Species)
            }
        }
    }
}
