//! Inspection facade: session + cursor + projection in one owned value.
//!
//! This is the only mutation surface exposed to render collaborators:
//! [`Inspector::on_new_response`] for data, and the four navigation
//! operations for the cursor. Everything else is read through
//! [`Inspector::view`].

use crate::config::RiskConfig;
use crate::cursor::{CursorState, SelectionCursor};
use crate::metrics::TokenMetricSet;
use crate::payload::ResponsePayload;
use crate::session::MetricSession;
use crate::view::{project, InspectionView};

#[derive(Debug, Clone)]
pub struct Inspector {
    session: MetricSession,
    cursor: SelectionCursor,
    risk: RiskConfig,
    cached: Option<((u64, CursorState), InspectionView)>,
}

impl Inspector {
    #[must_use]
    pub fn new(risk: RiskConfig) -> Self {
        Self {
            session: MetricSession::new(),
            cursor: SelectionCursor::new(),
            risk,
            cached: None,
        }
    }

    /// Ingest a new response: validate, replace the set, reset the cursor.
    ///
    /// Any active selection on the previous response is dropped here.
    pub fn on_new_response(&mut self, payload: ResponsePayload) -> u64 {
        let set = payload.into_metric_set();
        for violation in set.annotations() {
            tracing::warn!(%violation, "response data contract violation");
        }
        self.replace(set)
    }

    /// Replace the active set with an already-built one and reset the cursor.
    pub fn replace(&mut self, set: TokenMetricSet) -> u64 {
        let generation = self.session.replace(set);
        self.cursor.reset_to_none();
        self.cached = None;
        generation
    }

    pub fn select_by_position(&mut self, index: usize) -> bool {
        let len = self.session.len();
        self.cursor.select_by_position(index, len)
    }

    pub fn next(&mut self) -> bool {
        let len = self.session.len();
        self.cursor.next(len)
    }

    pub fn prev(&mut self) -> bool {
        let len = self.session.len();
        self.cursor.prev(len)
    }

    pub fn reset_to_none(&mut self) -> bool {
        self.cursor.reset_to_none()
    }

    #[must_use]
    pub fn cursor(&self) -> CursorState {
        self.cursor.state()
    }

    #[must_use]
    pub fn current(&self) -> Option<&TokenMetricSet> {
        self.session.current().map(|set| set.as_ref())
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.session.generation()
    }

    #[must_use]
    pub fn risk_config(&self) -> &RiskConfig {
        &self.risk
    }

    /// Current projection, recomputed only when the set or cursor changed.
    pub fn view(&mut self) -> &InspectionView {
        let key = (self.session.generation(), self.cursor.state());
        if !matches!(&self.cached, Some((cached_key, _)) if *cached_key == key) {
            self.cached = None;
        }
        let session = &self.session;
        let risk = &self.risk;
        &self
            .cached
            .get_or_insert_with(|| {
                let set = session.current().map(|set| set.as_ref());
                (key, project(set, key.1, risk))
            })
            .1
    }

    /// Fresh projection without touching the cache.
    #[must_use]
    pub fn snapshot(&self) -> InspectionView {
        project(self.current(), self.cursor.state(), &self.risk)
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(RiskConfig::default())
    }
}
