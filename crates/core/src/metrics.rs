#![forbid(unsafe_code)]

use crate::facets::{EcologyType, Sliders};
use crate::records::{FacetKind, Record};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

const OPTIMUM_TEMPERATURE: f64 = 25.0;
const OPTIMUM_SALINITY: f64 = 35.0;
const OPTIMUM_PH: f64 = 8.1;
const SATURATED_OXYGEN: f64 = 8.0;

/// Toy survival heuristic: each slider is scored against an optimum, then averaged.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SurvivalScore {
    pub temperature_score: f64,
    pub salinity_score: f64,
    pub ph_score: f64,
    pub oxygen_score: f64,
    pub survival: f64,
    /// `survival` with one decimal place, ties rounded up, e.g. `"93.4"`.
    pub display: String,
}

pub fn survival_score(sliders: &Sliders) -> SurvivalScore {
    let temperature_score =
        (100.0 - (sliders.temperature() - OPTIMUM_TEMPERATURE).abs() * 2.0).max(0.0);
    let salinity_score = (100.0 - (sliders.salinity() - OPTIMUM_SALINITY).abs() * 1.5).max(0.0);
    let ph_score = (100.0 - (sliders.ph() - OPTIMUM_PH).abs() * 10.0).max(0.0);
    let oxygen_score = (sliders.oxygen() / SATURATED_OXYGEN * 100.0).clamp(0.0, 100.0);
    let survival = (temperature_score + salinity_score + ph_score + oxygen_score) / 4.0;
    SurvivalScore {
        temperature_score,
        salinity_score,
        ph_score,
        oxygen_score,
        survival,
        display: format!("{:.1}", (survival * 10.0).round() / 10.0),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatisticsSummary {
    pub total_records: u64,
    pub species_found: usize,
    pub family_count: usize,
    pub order_count: usize,
}

/// Summary over the species records in `records`; other shapes are skipped.
pub fn statistics_summary(records: &[Record]) -> StatisticsSummary {
    let mut summary = StatisticsSummary::default();
    let mut families = BTreeSet::new();
    let mut orders = BTreeSet::new();
    for record in records {
        let Record::Species(species) = record else {
            continue;
        };
        summary.total_records += species.count;
        summary.species_found += 1;
        if let Some(family) = record.tag(FacetKind::Family) {
            families.insert(family);
        }
        if let Some(order) = record.tag(FacetKind::Order) {
            orders.insert(order);
        }
    }
    summary.family_count = families.len();
    summary.order_count = orders.len();
    summary
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TallyEntry {
    pub label: String,
    pub value: f64,
}

/// A labelled distinct-value tally, ordered by label.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tally {
    pub name: &'static str,
    pub entries: Vec<TallyEntry>,
}

fn tally_by<'a>(
    name: &'static str,
    records: &'a [Record],
    pick: impl Fn(&'a Record) -> Option<(&'a str, f64)>,
) -> Tally {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for (label, value) in records.iter().filter_map(pick) {
        *sums.entry(label).or_insert(0.0) += value;
    }
    Tally {
        name,
        entries: sums
            .into_iter()
            .map(|(label, value)| TallyEntry {
                label: label.to_string(),
                value,
            })
            .collect(),
    }
}

/// Summed species counts per species name.
pub fn species_tally(records: &[Record]) -> Tally {
    tally_by("species", records, |record| match record {
        Record::Species(r) => Some((r.name.as_str(), r.count as f64)),
        _ => None,
    })
}

/// Summed density per location.
pub fn density_tally(records: &[Record]) -> Tally {
    tally_by("density", records, |record| match record {
        Record::Density(r) => Some((r.location.as_str(), r.density)),
        _ => None,
    })
}

/// Summed biomass per month label.
pub fn biomass_tally(records: &[Record]) -> Tally {
    tally_by("biomass", records, |record| match record {
        Record::Biomass(r) => Some((r.month.as_str(), r.biomass)),
        _ => None,
    })
}

/// Pearson correlation of the comparison points in `records`.
///
/// `None` with fewer than two points or when either axis is constant.
pub fn correlation(records: &[Record]) -> Option<f64> {
    let points = records
        .iter()
        .filter_map(|record| match record {
            Record::Comparison(r) => Some((r.x, r.y)),
            _ => None,
        })
        .collect::<Vec<_>>();
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &points {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

pub fn confidence_band(confidence: f64) -> ConfidenceBand {
    if confidence > 90.0 {
        ConfidenceBand::High
    } else if confidence > 80.0 {
        ConfidenceBand::Medium
    } else {
        ConfidenceBand::Low
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchBand {
    pub id: String,
    pub band: ConfidenceBand,
}

pub fn match_bands(records: &[Record]) -> Vec<MatchBand> {
    records
        .iter()
        .filter_map(|record| match record {
            Record::Match(r) => Some(MatchBand {
                id: r.id.clone(),
                band: confidence_band(r.confidence),
            }),
            _ => None,
        })
        .collect()
}

/// Chart title for a named ecology parameter: `current-speed` reads `current speed`.
pub fn chart_title(parameter: EcologyType) -> String {
    parameter.as_str().replacen('-', " ", 1)
}
