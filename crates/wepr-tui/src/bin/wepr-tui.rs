use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use wepr_core::config::load_config;
use wepr_core::payload::parse_batch;
use wepr_core::{logging, ResponsePayload, WeprConfig};
use wepr_ftui_adapter::input::{InputEvent, ResizeEvent};
use wepr_tui::app::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use wepr_tui::theme::resolve_theme;
use wepr_tui::{runtime, InspectApp};

#[derive(Parser, Debug)]
#[command(name = "wepr-tui")]
#[command(about = "Inspect per-token entropy and hallucination risk of model responses")]
struct Args {
    /// Response payload files: a JSON object, a JSON array, or JSON Lines.
    /// `-` reads standard input.
    payloads: Vec<PathBuf>,

    /// YAML config file (default: $XDG_CONFIG_HOME/wepr/config.yaml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Color theme: dark, light, high-contrast.
    #[arg(long)]
    theme: Option<String>,

    /// Divisor that maps EPR onto the 0..1 risk score.
    #[arg(long)]
    risk_scale: Option<f64>,

    /// EPR above which a response is flagged high uncertainty.
    #[arg(long)]
    high_epr_threshold: Option<f64>,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long)]
    log_level: Option<String>,

    /// Append logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print one frame of WIDTHxHEIGHT and exit instead of running interactively.
    #[arg(long, value_parser = parse_size)]
    snapshot: Option<(usize, usize)>,

    /// Token index to select before printing a snapshot.
    #[arg(long)]
    select: Option<usize>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("wepr-tui: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    let (mut cfg, _) = load_config(args.config.as_deref()).map_err(|err| err.to_string())?;
    apply_cli_overrides(&mut cfg, args)?;

    let interactive = args.snapshot.is_none()
        && std::io::stdin().is_terminal()
        && std::io::stdout().is_terminal();
    match &args.log_file {
        Some(path) => logging::init_to_file(&cfg.logging, path).map_err(|err| err.to_string())?,
        None if !interactive => logging::init(&cfg.logging),
        None => {}
    }

    let payloads = read_payloads(&args.payloads)?;
    tracing::info!(responses = payloads.len(), interactive, "payloads loaded");

    let mut app = InspectApp::new(cfg.risk, resolve_theme(&cfg.tui.theme));
    app.enqueue(payloads);

    if interactive {
        return runtime::run(&mut app);
    }

    let (width, height) = args.snapshot.unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT));
    let _ = app.update(InputEvent::Resize(ResizeEvent { width, height }));
    if let Some(index) = args.select {
        app.inspector_mut().select_by_position(index);
    }
    let snapshot = app.render().snapshot();
    for line in snapshot.lines() {
        println!("{}", line.trim_end());
    }
    Ok(())
}

fn apply_cli_overrides(cfg: &mut WeprConfig, args: &Args) -> Result<(), String> {
    if let Some(theme) = &args.theme {
        cfg.tui.theme = theme.clone();
    }
    if let Some(scale) = args.risk_scale {
        cfg.risk.risk_scale = scale;
    }
    if let Some(threshold) = args.high_epr_threshold {
        cfg.risk.high_epr_threshold = threshold;
    }
    if let Some(level) = &args.log_level {
        cfg.logging.level = level.clone();
    }
    cfg.validate()
}

fn read_payloads(paths: &[PathBuf]) -> Result<Vec<ResponsePayload>, String> {
    if paths.is_empty() {
        if std::io::stdin().is_terminal() {
            return Ok(Vec::new());
        }
        return read_source(Path::new("-"));
    }
    let mut payloads = Vec::new();
    for path in paths {
        payloads.extend(read_source(path)?);
    }
    Ok(payloads)
}

fn read_source(path: &Path) -> Result<Vec<ResponsePayload>, String> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|err| format!("read stdin: {err}"))?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|err| format!("read {}: {err}", path.display()))?
    };
    parse_batch(&raw).map_err(|err| format!("{}: {err}", path.display()))
}

fn parse_size(raw: &str) -> Result<(usize, usize), String> {
    let (width, height) = raw
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {raw:?}"))?;
    let width: usize = width
        .trim()
        .parse()
        .map_err(|err| format!("invalid width {width:?}: {err}"))?;
    let height: usize = height
        .trim()
        .parse()
        .map_err(|err| format!("invalid height {height:?}: {err}"))?;
    if width == 0 || height == 0 {
        return Err("snapshot size must be non-zero".to_owned());
    }
    Ok((width, height))
}
