//! wepr-tui: terminal surfaces for per-token uncertainty inspection.
//!
//! Every surface renders from one [`wepr_core::InspectionView`] into an
//! adapter `RenderFrame`; only [`runtime`] touches the terminal.

pub mod app;
pub mod distribution_chart;
pub mod entropy_chart;
pub mod metrics_panel;
pub mod runtime;
pub mod text_highlight;
pub mod theme;

pub use app::{Command, InspectApp, InspectLayout};

#[must_use]
pub fn crate_label() -> &'static str {
    "wepr-tui"
}

#[cfg(test)]
mod tests {
    use super::crate_label;

    #[test]
    fn crate_label_is_stable() {
        assert_eq!(crate_label(), "wepr-tui");
    }
}
