#![forbid(unsafe_code)]

use crate::facets::{DataSource, FacetState};
use crate::records::{DatasetSchema, FacetKind, Record};
use serde::{Deserialize, Serialize};

pub const DEFAULT_UPLOADED_CAP: usize = 2;
pub const DEFAULT_SELECT_STRIDE: usize = 2;

/// How each [`DataSource`] narrows a dataset before facets apply.
///
/// This is a display-mode toggle over the same records, not an access-control mechanism.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionPolicy {
    /// `Uploaded` shows the first `uploaded_cap` records.
    pub uploaded_cap: usize,
    /// `Select` shows every `select_stride`-th record, starting at the first.
    pub select_stride: usize,
}

impl Default for PartitionPolicy {
    fn default() -> Self {
        Self {
            uploaded_cap: DEFAULT_UPLOADED_CAP,
            select_stride: DEFAULT_SELECT_STRIDE,
        }
    }
}

impl PartitionPolicy {
    pub fn new(uploaded_cap: usize, select_stride: usize) -> Self {
        Self {
            uploaded_cap,
            select_stride: select_stride.max(1),
        }
    }

    pub fn visible<'a>(
        &self,
        records: &'a [Record],
        source: DataSource,
    ) -> Box<dyn Iterator<Item = &'a Record> + 'a> {
        match source {
            DataSource::Platform => Box::new(records.iter()),
            DataSource::Uploaded => Box::new(records.iter().take(self.uploaded_cap)),
            DataSource::Select => Box::new(records.iter().step_by(self.select_stride.max(1))),
        }
    }
}

fn facet_value(facets: &FacetState, kind: FacetKind) -> Option<&'static str> {
    match kind {
        FacetKind::Location => facets.location().map(|v| v.as_str()),
        FacetKind::TimePeriod => facets.time_period().map(|v| v.as_str()),
        FacetKind::Class => facets.classification().class.map(|v| v.as_str()),
        FacetKind::Order => facets.classification().order.map(|v| v.as_str()),
        FacetKind::Family => facets.classification().family.map(|v| v.as_str()),
        FacetKind::Parameter1 => facets.comparison().parameter1.map(|v| v.as_str()),
        FacetKind::Parameter2 => facets.comparison().parameter2.map(|v| v.as_str()),
    }
}

/// True when `record` carries every set facet the schema declares filterable.
///
/// A missing tag on a declared facet is a non-match.
pub fn matches_facets(record: &Record, schema: &DatasetSchema, facets: &FacetState) -> bool {
    schema.filterable.iter().all(|kind| match facet_value(facets, *kind) {
        None => true,
        Some(wanted) => record.tag(*kind) == Some(wanted),
    })
}

/// The visible partition of `records` narrowed to the current facets, in dataset order.
pub fn filter(
    records: &[Record],
    schema: &DatasetSchema,
    facets: &FacetState,
    policy: &PartitionPolicy,
) -> Vec<Record> {
    policy
        .visible(records, facets.data_source())
        .filter(|record| matches_facets(record, schema, facets))
        .cloned()
        .collect()
}

/// Trimmed, lower-cased query, or `None` when nothing searchable was entered.
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

pub fn text_matches(record: &Record, normalized_query: &str) -> bool {
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(normalized_query))
}

/// Free-text search over the filtered view. Callers handle the empty query
/// (idle state) before calling; an empty `normalized_query` matches nothing.
pub fn text_search(
    records: &[Record],
    schema: &DatasetSchema,
    facets: &FacetState,
    policy: &PartitionPolicy,
    normalized_query: &str,
) -> Vec<Record> {
    if normalized_query.is_empty() {
        return Vec::new();
    }
    policy
        .visible(records, facets.data_source())
        .filter(|record| matches_facets(record, schema, facets))
        .filter(|record| text_matches(record, normalized_query))
        .cloned()
        .collect()
}
