#![forbid(unsafe_code)]

use crate::facets::*;
use serde::Serialize;

/// The lookup key for view selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ViewKey {
    pub mode: Mode,
    pub top: Option<TopLevel>,
    pub sub: Option<SubType>,
}

impl ViewKey {
    pub fn of(facets: &FacetState) -> Self {
        Self {
            mode: facets.mode(),
            top: facets.top_level(),
            sub: facets.sub_type(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TopPattern {
    Unset,
    Is(TopLevel),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SubPattern {
    Any,
    Unset,
    Is(SubType),
    /// Any ecology sub-type naming a single parameter.
    NamedParameter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Route {
    FreeText,
    Upload(UploadSlot),
    NameSearch,
    SpeciesDetail,
    Classification,
    Survival,
    SpeciesComparison,
    EcologyPrompt,
    ParameterComparison,
    ParameterProfile,
    SpeciesDashboard,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct ViewRule {
    pub(crate) mode: Mode,
    pub(crate) top: TopPattern,
    pub(crate) sub: SubPattern,
    pub(crate) route: Route,
}

impl ViewRule {
    fn matches(&self, key: &ViewKey) -> bool {
        if self.mode != key.mode {
            return false;
        }
        let top_ok = match self.top {
            TopPattern::Unset => key.top.is_none(),
            TopPattern::Is(top) => key.top == Some(top),
        };
        if !top_ok {
            return false;
        }
        match self.sub {
            SubPattern::Any => true,
            SubPattern::Unset => key.sub.is_none(),
            SubPattern::Is(sub) => key.sub == Some(sub),
            SubPattern::NamedParameter => matches!(
                key.sub,
                Some(SubType::Ecology(ecology)) if ecology.is_named_parameter()
            ),
        }
    }
}

const fn rule(mode: Mode, top: TopPattern, sub: SubPattern, route: Route) -> ViewRule {
    ViewRule {
        mode,
        top,
        sub,
        route,
    }
}

use Mode::{Search, Visualization};
use SubPattern::{Any, NamedParameter, Unset};

const OTOLITH: TopPattern = TopPattern::Is(TopLevel::Search(SearchType::Otolith));
const TAXONOMY: TopPattern = TopPattern::Is(TopLevel::Search(SearchType::Taxonomy));
const EDNA: TopPattern = TopPattern::Is(TopLevel::Search(SearchType::Edna));
const SIMULATION: TopPattern =
    TopPattern::Is(TopLevel::Visualization(VisualizationType::Simulation));
const ECOLOGY: TopPattern = TopPattern::Is(TopLevel::Visualization(VisualizationType::Ecology));
const SPECIES: TopPattern = TopPattern::Is(TopLevel::Visualization(VisualizationType::Species));

/// First matching row wins; keys matching no row render the placeholder.
pub(crate) const VIEW_TABLE: &[ViewRule] = &[
    rule(Search, TopPattern::Unset, Any, Route::FreeText),
    rule(
        Search,
        OTOLITH,
        SubPattern::Is(SubType::Otolith(OtolithType::Image)),
        Route::Upload(UploadSlot::OtolithImage),
    ),
    rule(
        Search,
        OTOLITH,
        SubPattern::Is(SubType::Otolith(OtolithType::Text)),
        Route::NameSearch,
    ),
    rule(
        Search,
        TAXONOMY,
        SubPattern::Is(SubType::Taxonomy(TaxonomyType::BySpecies)),
        Route::SpeciesDetail,
    ),
    rule(
        Search,
        TAXONOMY,
        SubPattern::Is(SubType::Taxonomy(TaxonomyType::ByClassification)),
        Route::Classification,
    ),
    rule(Search, EDNA, Any, Route::Upload(UploadSlot::EdnaSequence)),
    rule(Visualization, TopPattern::Unset, Any, Route::FreeText),
    rule(
        Visualization,
        SIMULATION,
        SubPattern::Is(SubType::Simulation(SimulationType::Predictive)),
        Route::Survival,
    ),
    rule(
        Visualization,
        SIMULATION,
        SubPattern::Is(SubType::Simulation(SimulationType::Comparison)),
        Route::SpeciesComparison,
    ),
    rule(Visualization, ECOLOGY, Unset, Route::EcologyPrompt),
    rule(
        Visualization,
        ECOLOGY,
        SubPattern::Is(SubType::Ecology(EcologyType::ParameterComparison)),
        Route::ParameterComparison,
    ),
    rule(
        Visualization,
        ECOLOGY,
        NamedParameter,
        Route::ParameterProfile,
    ),
    rule(Visualization, SPECIES, Any, Route::SpeciesDashboard),
];

pub(crate) fn route_for(key: &ViewKey) -> Option<Route> {
    VIEW_TABLE
        .iter()
        .find(|rule| rule.matches(key))
        .map(|rule| rule.route)
}

/// The facet a user still has to pick when no row matches.
pub(crate) fn missing_selection(key: &ViewKey) -> &'static str {
    match key.top {
        None => "type",
        Some(TopLevel::Search(SearchType::Otolith)) => "otolith_type",
        Some(TopLevel::Search(SearchType::Taxonomy)) => "taxonomy_type",
        Some(TopLevel::Search(SearchType::Edna)) => "edna",
        Some(TopLevel::Visualization(VisualizationType::Simulation)) => "simulation_type",
        Some(TopLevel::Visualization(VisualizationType::Ecology)) => "ecology_type",
        Some(TopLevel::Visualization(VisualizationType::Species)) => "species_type",
    }
}
