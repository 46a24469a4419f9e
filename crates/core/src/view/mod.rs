#![forbid(unsafe_code)]

mod table;

pub use table::ViewKey;

use crate::facets::{EcologyType, FacetState, GraphType, Mode, UploadSlot};
use crate::filter::{PartitionPolicy, filter, normalize_query, text_search};
use crate::metrics::{self, MatchBand, StatisticsSummary, SurvivalScore, Tally};
use crate::records::{DatasetName, DatasetRegistry, Record};
use serde::Serialize;
use table::Route;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "kebab-case")]
pub enum ViewVariant {
    FreeTextPrompt,
    UploadGate(UploadSlot),
    ResultTable(UploadSlot),
    NameSearch,
    SpeciesDetail,
    ClassificationBrowser,
    SurvivalSimulator,
    SpeciesComparison,
    EcologyPrompt,
    ParameterPrompt,
    ParameterCorrelation,
    ParameterProfile(EcologyType),
    SpeciesDashboard,
    Placeholder,
}

/// Distinguishes "nothing entered yet", "required input missing" and
/// "filters matched nothing" from a populated view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    Ready,
    NoMatches,
    AwaitingInput { missing: Vec<&'static str> },
    Idle,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DerivedMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub survival: Option<SurvivalScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<StatisticsSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tallies: Vec<Tally>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bands: Vec<MatchBand>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewResult {
    pub key: ViewKey,
    pub variant: ViewVariant,
    pub state: ViewState,
    pub records: Vec<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived: Option<DerivedMetrics>,
    /// Visualization-mode chart style preference, passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_hint: Option<GraphType>,
}

impl ViewResult {
    fn new(key: ViewKey, variant: ViewVariant, state: ViewState) -> Self {
        Self {
            key,
            variant,
            state,
            records: Vec::new(),
            derived: None,
            chart_hint: None,
        }
    }

    fn awaiting(key: ViewKey, variant: ViewVariant, missing: Vec<&'static str>) -> Self {
        Self::new(key, variant, ViewState::AwaitingInput { missing })
    }

    fn with_records(key: ViewKey, variant: ViewVariant, records: Vec<Record>) -> Self {
        let state = if records.is_empty() {
            ViewState::NoMatches
        } else {
            ViewState::Ready
        };
        Self {
            records,
            ..Self::new(key, variant, state)
        }
    }

    fn derived(mut self, derived: DerivedMetrics) -> Self {
        self.derived = Some(derived);
        self
    }
}

struct Context<'a, R: DatasetRegistry + ?Sized> {
    facets: &'a FacetState,
    registry: &'a R,
    policy: &'a PartitionPolicy,
}

impl<R: DatasetRegistry + ?Sized> Context<'_, R> {
    fn filtered(&self, name: DatasetName) -> Vec<Record> {
        filter(
            self.registry.dataset(name),
            &name.schema(),
            self.facets,
            self.policy,
        )
    }

    fn searched(&self, name: DatasetName, query: &str) -> Vec<Record> {
        text_search(
            self.registry.dataset(name),
            &name.schema(),
            self.facets,
            self.policy,
            query,
        )
    }

    fn concat(&self, names: &[DatasetName]) -> Vec<Record> {
        names.iter().flat_map(|name| self.filtered(*name)).collect()
    }
}

/// Maps the facet state to exactly one presentation variant and its data.
///
/// Total over every facet combination: combinations without a table row get
/// [`ViewVariant::Placeholder`].
pub fn select<R: DatasetRegistry + ?Sized>(
    facets: &FacetState,
    registry: &R,
    policy: &PartitionPolicy,
) -> ViewResult {
    let key = ViewKey::of(facets);
    let ctx = Context {
        facets,
        registry,
        policy,
    };
    let mut view = match table::route_for(&key) {
        Some(route) => build(&ctx, key, route),
        None => ViewResult::awaiting(
            key,
            ViewVariant::Placeholder,
            vec![table::missing_selection(&key)],
        ),
    };
    if facets.mode() == Mode::Visualization {
        view.chart_hint = facets.graph_type();
    }
    debug!(
        variant = ?view.variant,
        state = ?view.state,
        records = view.records.len(),
        "view selected"
    );
    view
}

fn free_text<R: DatasetRegistry + ?Sized>(
    ctx: &Context<'_, R>,
    key: ViewKey,
    variant: ViewVariant,
    dataset: DatasetName,
) -> Option<ViewResult> {
    let query = normalize_query(ctx.facets.free_text_query())?;
    Some(ViewResult::with_records(
        key,
        variant,
        ctx.searched(dataset, &query),
    ))
}

fn build<R: DatasetRegistry + ?Sized>(
    ctx: &Context<'_, R>,
    key: ViewKey,
    route: Route,
) -> ViewResult {
    let facets = ctx.facets;
    match route {
        Route::FreeText => {
            let variant = ViewVariant::FreeTextPrompt;
            free_text(ctx, key, variant, DatasetName::SearchIndex)
                .unwrap_or_else(|| ViewResult::new(key, variant, ViewState::Idle))
        }
        Route::NameSearch => {
            free_text(ctx, key, ViewVariant::NameSearch, DatasetName::SearchIndex)
                .unwrap_or_else(|| ViewResult::new(key, ViewVariant::NameSearch, ViewState::Idle))
        }
        Route::SpeciesDetail => {
            match free_text(ctx, key, ViewVariant::SpeciesDetail, DatasetName::Species) {
                Some(view) => {
                    let tally = metrics::species_tally(&view.records);
                    view.derived(DerivedMetrics {
                        tallies: vec![tally],
                        ..DerivedMetrics::default()
                    })
                }
                None => ViewResult::new(key, ViewVariant::SpeciesDetail, ViewState::Idle),
            }
        }
        Route::Upload(slot) => {
            if !facets.uploads().has(slot) {
                return ViewResult::awaiting(
                    key,
                    ViewVariant::UploadGate(slot),
                    vec![slot.as_str()],
                );
            }
            let dataset = match slot {
                UploadSlot::OtolithImage => DatasetName::OtolithMatches,
                UploadSlot::EdnaSequence => DatasetName::EdnaMatches,
            };
            let view = ViewResult::with_records(
                key,
                ViewVariant::ResultTable(slot),
                ctx.filtered(dataset),
            );
            let bands = metrics::match_bands(&view.records);
            view.derived(DerivedMetrics {
                bands,
                ..DerivedMetrics::default()
            })
        }
        Route::Classification => {
            if facets.classification().is_empty() {
                return ViewResult::awaiting(
                    key,
                    ViewVariant::ClassificationBrowser,
                    vec!["class", "order", "family"],
                );
            }
            let view = ViewResult::with_records(
                key,
                ViewVariant::ClassificationBrowser,
                ctx.filtered(DatasetName::Species),
            );
            let statistics = metrics::statistics_summary(&view.records);
            view.derived(DerivedMetrics {
                statistics: Some(statistics),
                ..DerivedMetrics::default()
            })
        }
        Route::Survival => ViewResult::with_records(
            key,
            ViewVariant::SurvivalSimulator,
            ctx.filtered(DatasetName::Trends),
        )
        .derived(DerivedMetrics {
            survival: Some(metrics::survival_score(facets.sliders())),
            ..DerivedMetrics::default()
        }),
        Route::SpeciesComparison => ViewResult::with_records(
            key,
            ViewVariant::SpeciesComparison,
            ctx.filtered(DatasetName::Comparison),
        ),
        Route::EcologyPrompt => {
            ViewResult::awaiting(key, ViewVariant::EcologyPrompt, vec!["ecology_type"])
        }
        Route::ParameterComparison => {
            let comparison = facets.comparison();
            let mut missing = Vec::new();
            if comparison.parameter1.is_none() {
                missing.push("parameter1");
            }
            if comparison.parameter2.is_none() {
                missing.push("parameter2");
            }
            if !missing.is_empty() {
                return ViewResult::awaiting(key, ViewVariant::ParameterPrompt, missing);
            }
            let view = ViewResult::with_records(
                key,
                ViewVariant::ParameterCorrelation,
                ctx.filtered(DatasetName::Comparison),
            );
            let correlation = metrics::correlation(&view.records);
            view.derived(DerivedMetrics {
                correlation,
                ..DerivedMetrics::default()
            })
        }
        Route::ParameterProfile => {
            let Some(parameter) = facets.ecology_type() else {
                return ViewResult::awaiting(key, ViewVariant::EcologyPrompt, vec!["ecology_type"]);
            };
            let view = ViewResult::with_records(
                key,
                ViewVariant::ParameterProfile(parameter),
                ctx.concat(&[
                    DatasetName::LocationDensity,
                    DatasetName::Trends,
                    DatasetName::Biomass,
                ]),
            );
            let tallies = vec![
                metrics::density_tally(&view.records),
                metrics::biomass_tally(&view.records),
            ];
            view.derived(DerivedMetrics {
                tallies,
                title: Some(metrics::chart_title(parameter)),
                ..DerivedMetrics::default()
            })
        }
        Route::SpeciesDashboard => {
            let view = ViewResult::with_records(
                key,
                ViewVariant::SpeciesDashboard,
                ctx.concat(&[
                    DatasetName::Trends,
                    DatasetName::LocationDensity,
                    DatasetName::Species,
                ]),
            );
            let tallies = vec![
                metrics::species_tally(&view.records),
                metrics::density_tally(&view.records),
            ];
            view.derived(DerivedMetrics {
                tallies,
                ..DerivedMetrics::default()
            })
        }
    }
}
