//! wepr-core: token uncertainty inspection core.
//!
//! Holds the per-response token metric data, the risk classifier, the
//! selection cursor state machine, the running aggregate, and the pure
//! projection every render surface reads from. No terminal or network code
//! lives here.

pub mod aggregate;
pub mod classifier;
pub mod config;
pub mod cursor;
pub mod error;
pub mod inspector;
pub mod logging;
pub mod metrics;
pub mod payload;
pub mod session;
pub mod validate;
pub mod view;

pub use config::{RiskConfig, WeprConfig};
pub use cursor::{CursorState, SelectionCursor};
pub use error::{AggregateError, WeprError, WeprResult};
pub use inspector::Inspector;
pub use metrics::{Candidate, RiskLevel, TokenMetric, TokenMetricSet};
pub use payload::ResponsePayload;
pub use view::{project, InspectionView};

/// Package name of this crate.
pub fn crate_label() -> &'static str {
    "wepr-core"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_label_is_stable() {
        assert_eq!(crate_label(), "wepr-core");
    }

    #[test]
    fn modules_are_accessible() {
        let _ = CursorState::None;
        let _ = RiskLevel::High;
        let _ = config::WeprConfig::default();
        let _ = error::WeprError::Payload("test".into());
        let _ = session::MetricSession::new();
        let _ = logging::LogFormat::Console;
    }
}
