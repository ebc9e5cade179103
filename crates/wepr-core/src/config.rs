//! Configuration for the inspection core and its terminal front end.
//!
//! Precedence: defaults < YAML config file < `WEPR_*` environment variables.
//! Command-line overrides are applied by the binary on top of the result.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{WeprError, WeprResult};

pub const DEFAULT_RISK_SCALE: f64 = 2.5;
pub const DEFAULT_HIGH_EPR_THRESHOLD: f64 = 1.5;
pub const DEFAULT_TIER_HIGH: f64 = 0.6;
pub const DEFAULT_TIER_MEDIUM: f64 = 0.3;

// ---------------------------------------------------------------------------
// Root config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeprConfig {
    pub risk: RiskConfig,
    pub logging: LoggingConfig,
    pub tui: TuiConfig,
}

/// Calibration constants used by the risk classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskConfig {
    /// Divisor normalising `epr` into a 0..=1 risk score.
    pub risk_scale: f64,
    /// `epr` strictly above this is flagged "high uncertainty".
    pub high_epr_threshold: f64,
    /// Normalised entropy strictly above this derives a `high` tier.
    pub tier_high: f64,
    /// Normalised entropy strictly above this derives a `medium` tier.
    pub tier_medium: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            risk_scale: DEFAULT_RISK_SCALE,
            high_epr_threshold: DEFAULT_HIGH_EPR_THRESHOLD,
            tier_high: DEFAULT_TIER_HIGH,
            tier_medium: DEFAULT_TIER_MEDIUM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "console".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuiConfig {
    pub theme: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_owned(),
        }
    }
}

impl WeprConfig {
    /// Validates every section, returning the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let risk = &self.risk;
        if !risk.risk_scale.is_finite() || risk.risk_scale <= 0.0 {
            return Err(format!(
                "risk.risk_scale must be a positive number, got {}",
                risk.risk_scale
            ));
        }
        if !risk.high_epr_threshold.is_finite() || risk.high_epr_threshold < 0.0 {
            return Err(format!(
                "risk.high_epr_threshold must be zero or greater, got {}",
                risk.high_epr_threshold
            ));
        }
        if !(0.0..=1.0).contains(&risk.tier_high) {
            return Err(format!(
                "risk.tier_high must be in [0, 1], got {}",
                risk.tier_high
            ));
        }
        if !(0.0..=1.0).contains(&risk.tier_medium) {
            return Err(format!(
                "risk.tier_medium must be in [0, 1], got {}",
                risk.tier_medium
            ));
        }
        if risk.tier_medium > risk.tier_high {
            return Err(format!(
                "risk.tier_medium ({}) must not exceed risk.tier_high ({})",
                risk.tier_medium, risk.tier_high
            ));
        }

        match self.logging.level.to_lowercase().trim() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err("logging.level must be one of trace, debug, info, warn, error".into())
            }
        }
        match self.logging.format.to_lowercase().trim() {
            "console" | "json" => {}
            _ => return Err("logging.format must be one of console, json".into()),
        }

        match self.tui.theme.to_lowercase().trim() {
            "dark" | "light" | "high-contrast" => {}
            _ => return Err("tui.theme must be one of dark, light, high-contrast".into()),
        }
        Ok(())
    }

    /// Apply `WEPR_*` environment overrides using the given lookup.
    ///
    /// Taking the lookup as a closure keeps tests independent of the process
    /// environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("WEPR_RISK_SCALE") {
            self.risk.risk_scale = parse_f64("WEPR_RISK_SCALE", &raw)?;
        }
        if let Some(raw) = lookup("WEPR_HIGH_EPR_THRESHOLD") {
            self.risk.high_epr_threshold = parse_f64("WEPR_HIGH_EPR_THRESHOLD", &raw)?;
        }
        if let Some(raw) = lookup("WEPR_LOG_LEVEL").filter(|v| !v.trim().is_empty()) {
            self.logging.level = raw.trim().to_lowercase();
        }
        if let Some(raw) = lookup("WEPR_LOG_FORMAT").filter(|v| !v.trim().is_empty()) {
            self.logging.format = raw.trim().to_lowercase();
        }
        if let Some(raw) = lookup("WEPR_THEME").filter(|v| !v.trim().is_empty()) {
            self.tui.theme = raw.trim().to_lowercase();
        }
        Ok(())
    }
}

fn parse_f64(name: &str, raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|err| format!("{name}: invalid number {raw:?}: {err}"))
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    #[serde(default)]
    risk: PartialRiskConfig,
    #[serde(default)]
    logging: PartialLoggingConfig,
    #[serde(default)]
    tui: PartialTuiConfig,
}

#[derive(Debug, Default, Deserialize)]
struct PartialRiskConfig {
    #[serde(default, alias = "risk_scale_divisor")]
    risk_scale: Option<f64>,
    #[serde(default)]
    high_epr_threshold: Option<f64>,
    #[serde(default)]
    tier_high: Option<f64>,
    #[serde(default)]
    tier_medium: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialLoggingConfig {
    #[serde(default)]
    level: String,
    #[serde(default)]
    format: String,
}

#[derive(Debug, Default, Deserialize)]
struct PartialTuiConfig {
    #[serde(default)]
    theme: String,
}

/// Load config with precedence defaults < file < environment.
///
/// An explicit path that cannot be read is a hard error; a missing file at
/// the default location is not. Returns the config and the file actually used.
pub fn load_config(config_file: Option<&Path>) -> WeprResult<(WeprConfig, Option<PathBuf>)> {
    let mut cfg = WeprConfig::default();

    let explicit = config_file
        .filter(|path| !path.as_os_str().is_empty())
        .map(Path::to_path_buf);
    let (path_to_try, required) = match explicit {
        Some(path) => (Some(path), true),
        None => (default_config_path(), false),
    };

    let mut used = None;
    if let Some(path) = path_to_try {
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                apply_yaml(&mut cfg, &text)?;
                used = Some(path);
            }
            Err(err) if required => {
                return Err(WeprError::Config(format!(
                    "failed to load config file {}: {err}",
                    path.display()
                )));
            }
            Err(_) => {}
        }
    }

    cfg.apply_env(|key| std::env::var(key).ok())
        .map_err(WeprError::Config)?;
    cfg.validate().map_err(WeprError::Config)?;
    Ok((cfg, used))
}

/// Merge a YAML document into `cfg`. Absent keys keep their current value.
pub fn apply_yaml(cfg: &mut WeprConfig, text: &str) -> WeprResult<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    let parsed: PartialConfig = serde_yaml::from_str(text)
        .map_err(|err| WeprError::Config(format!("parse config: {err}")))?;

    let risk = parsed.risk;
    if let Some(value) = risk.risk_scale {
        cfg.risk.risk_scale = value;
    }
    if let Some(value) = risk.high_epr_threshold {
        cfg.risk.high_epr_threshold = value;
    }
    if let Some(value) = risk.tier_high {
        cfg.risk.tier_high = value;
    }
    if let Some(value) = risk.tier_medium {
        cfg.risk.tier_medium = value;
    }
    if !parsed.logging.level.trim().is_empty() {
        cfg.logging.level = parsed.logging.level.trim().to_lowercase();
    }
    if !parsed.logging.format.trim().is_empty() {
        cfg.logging.format = parsed.logging.format.trim().to_lowercase();
    }
    if !parsed.tui.theme.trim().is_empty() {
        cfg.tui.theme = parsed.tui.theme.trim().to_lowercase();
    }
    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    config_search_paths()
        .into_iter()
        .map(|dir| dir.join("config.yaml"))
        .find(|candidate| candidate.is_file())
}

fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.trim().is_empty() {
            paths.push(Path::new(&xdg).join("wepr"));
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        if !home.trim().is_empty() {
            paths.push(Path::new(&home).join(".config").join("wepr"));
        }
    }
    paths
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
