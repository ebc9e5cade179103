//! Lifecycle of the active token metric set.

use std::sync::Arc;

use crate::metrics::TokenMetricSet;

/// Holds the metric set for the most recent assistant response.
///
/// The set is swapped as a whole; readers hold an `Arc` to whichever set was
/// active when they looked and never observe a half-replaced one.
#[derive(Debug, Clone, Default)]
pub struct MetricSession {
    active: Option<Arc<TokenMetricSet>>,
    generation: u64,
}

impl MetricSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in `set` and return its generation number.
    pub fn replace(&mut self, set: TokenMetricSet) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        tracing::info!(
            generation = self.generation,
            tokens = set.len(),
            epr = ?set.epr(),
            annotations = set.annotations().len(),
            "metric set replaced"
        );
        self.active = Some(Arc::new(set));
        self.generation
    }

    #[must_use]
    pub fn current(&self) -> Option<&Arc<TokenMetricSet>> {
        self.active.as_ref()
    }

    /// Identity of the active set; `0` before the first response.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Token count of the active set, `0` when absent.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.as_ref().map_or(0, |set| set.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
