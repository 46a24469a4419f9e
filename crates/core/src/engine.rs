#![forbid(unsafe_code)]

use crate::facets::FacetState;
use crate::filter::PartitionPolicy;
use crate::records::DatasetRegistry;
use crate::view::{ViewResult, select};
use tracing::debug;

/// Filters every dataset the selected view needs and picks the view.
///
/// Pure: the same facets, registry and policy always produce an equal result.
pub fn filter_and_select<R: DatasetRegistry + ?Sized>(
    facets: &FacetState,
    registry: &R,
    policy: &PartitionPolicy,
) -> ViewResult {
    select(facets, registry, policy)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Holds a registry and remembers the last computed view.
#[derive(Debug)]
pub struct Engine<R> {
    registry: R,
    policy: PartitionPolicy,
    last: Option<(FacetState, ViewResult)>,
    stats: CacheStats,
}

impl<R: DatasetRegistry> Engine<R> {
    pub fn new(registry: R, policy: PartitionPolicy) -> Self {
        Self {
            registry,
            policy,
            last: None,
            stats: CacheStats::default(),
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn view(&mut self, facets: &FacetState) -> &ViewResult {
        let hit = matches!(&self.last, Some((cached, _)) if cached == facets);
        if hit {
            self.stats.hits += 1;
            debug!(hits = self.stats.hits, "view cache hit");
        } else {
            self.stats.misses += 1;
            self.last = None;
        }
        let (_, view) = self.last.get_or_insert_with(|| {
            let view = filter_and_select(facets, &self.registry, &self.policy);
            (facets.clone(), view)
        });
        view
    }

    /// Drops the memoized view; the next call recomputes.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Swaps the partition policy. Cached output depends on it, so the cache is dropped.
    pub fn set_policy(&mut self, policy: PartitionPolicy) {
        if self.policy != policy {
            self.policy = policy;
            self.invalidate();
        }
    }
}
