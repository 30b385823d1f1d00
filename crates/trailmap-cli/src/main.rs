use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use trailmap_core::{ColorMode, RoadmapConfig, normalize_roadmap_with_diagnostics};
use trailmap_layout::model::Viewport;
use trailmap_layout::text::{DeterministicTextMeasurer, TextMeasurer};
use trailmap_layout::{LayoutOptions, layout_raw};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
    Core(trailmap_core::Error),
    Layout(trailmap_layout::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Yaml(err) => write!(f, "YAML error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}

impl From<trailmap_core::Error> for CliError {
    fn from(value: trailmap_core::Error) -> Self {
        Self::Core(value)
    }
}

impl From<trailmap_layout::Error> for CliError {
    fn from(value: trailmap_layout::Error) -> Self {
        Self::Layout(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Normalize,
    #[default]
    Layout,
}

#[derive(Debug, Clone, Copy, Default)]
enum TextMeasurerKind {
    #[default]
    Heuristic,
    Deterministic,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    pretty: bool,
    verbose: bool,
    hide_leaves: bool,
    color_mode: Option<ColorMode>,
    text_measurer: TextMeasurerKind,
    viewport: Viewport,
}

#[derive(Serialize)]
struct NormalizeOut<'a> {
    root: &'a trailmap_core::Node,
    diagnostics: &'a [trailmap_core::Diagnostic],
}

fn usage() -> &'static str {
    "trailmap-cli\n\
\n\
USAGE:\n\
  trailmap-cli normalize [--pretty] [--verbose] [<path>|-]\n\
  trailmap-cli [layout] [--pretty] [--verbose] [--config <path>] [--text-measurer heuristic|deterministic] [--viewport-width <w>] [--viewport-height <h>] [--hide-leaves] [--color-mode status|visibility] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Inputs (and --config files) ending in .yaml/.yml are parsed as YAML; anything else is\n\
    tried as JSON first and YAML second.\n\
  - Diagnostics for dropped items are logged to stderr and included in the JSON output.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "normalize" => args.command = Command::Normalize,
            "layout" => args.command = Command::Layout,
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--hide-leaves" => args.hide_leaves = true,
            "--config" => args.config = Some(next_value(&mut it)?.clone()),
            "--text-measurer" => {
                args.text_measurer = match next_value(&mut it)?.as_str() {
                    "heuristic" => TextMeasurerKind::Heuristic,
                    "deterministic" => TextMeasurerKind::Deterministic,
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--color-mode" => {
                args.color_mode = Some(match next_value(&mut it)?.as_str() {
                    "status" => ColorMode::Status,
                    "visibility" => ColorMode::Visibility,
                    _ => return Err(CliError::Usage(usage())),
                });
            }
            "--viewport-width" => {
                args.viewport.width = next_value(&mut it)?
                    .parse::<f64>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--viewport-height" => {
                args.viewport.height = next_value(&mut it)?
                    .parse::<f64>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn is_yaml_path(path: Option<&str>) -> bool {
    path.and_then(|p| Path::new(p).extension())
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
}

fn parse_record(text: &str, path: Option<&str>) -> Result<Value, CliError> {
    if is_yaml_path(path) {
        return Ok(serde_yaml::from_str(text)?);
    }
    match serde_json::from_str(text) {
        Ok(v) => Ok(v),
        Err(json_err) => serde_yaml::from_str(text).map_err(|_| CliError::Json(json_err)),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn build_config(args: &Args) -> Result<RoadmapConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            RoadmapConfig::from_value(&parse_record(&text, Some(path))?)?
        }
        None => RoadmapConfig::default(),
    };
    if args.hide_leaves {
        config.hide_leaves = true;
    }
    if let Some(mode) = args.color_mode {
        config.color_mode = mode;
    }
    Ok(config)
}

fn build_text_measurer(kind: TextMeasurerKind) -> Option<Arc<dyn TextMeasurer + Send + Sync>> {
    match kind {
        TextMeasurerKind::Heuristic => None,
        TextMeasurerKind::Deterministic => Some(Arc::new(DeterministicTextMeasurer::default())),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let raw = parse_record(&text, args.input.as_deref())?;

    match args.command {
        Command::Normalize => {
            let normalized = normalize_roadmap_with_diagnostics(&raw)?;
            write_json(
                &NormalizeOut {
                    root: &normalized.root,
                    diagnostics: &normalized.diagnostics,
                },
                args.pretty,
            )
        }
        Command::Layout => {
            let config = build_config(&args)?;
            let options = LayoutOptions {
                text_measurer: build_text_measurer(args.text_measurer),
                viewport: args.viewport,
                ..Default::default()
            };
            let layout = layout_raw(&raw, &config, &options)?;
            write_json(&layout, args.pretty)
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
