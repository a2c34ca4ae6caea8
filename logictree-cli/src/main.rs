use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

use logictree_cli::{init_logging, write_output, LogLevel};
use logictree_core::{Converter, ConverterConfig, DocumentBackend, OutputFormat, TreeValidator};

#[derive(Parser)]
#[command(name = "logictree")]
#[command(about = "Convert nested HTML decision tables into validated JSON logic trees")]
struct Args {
    /// Input HTML document (or JSON tree with --validate-only)
    input: PathBuf,

    /// Output file path
    #[arg(required_unless_present = "validate_only")]
    output: Option<PathBuf>,

    /// Wrap all retained claim types under this root condition
    #[arg(long)]
    root_condition: Option<String>,

    /// Exit with an error on unparseable rows or validation failures
    #[arg(long)]
    strict: bool,

    /// Do not skip the header row of the outermost table
    #[arg(long)]
    no_headers: bool,

    /// Logging level
    #[arg(long, value_enum, ignore_case = true, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// JSON indentation width (overrides config)
    #[arg(long)]
    indent: Option<usize>,

    /// Output format: json or outline
    #[arg(short = 'f', long, default_value = "json")]
    output_format: OutputFormat,

    /// Parse the input as well-formed XHTML instead of lenient HTML
    #[arg(long)]
    xhtml: bool,

    /// Only validate an existing JSON logic tree; nothing is written
    #[arg(long)]
    validate_only: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let config = load_config(args);

    if args.validate_only {
        return validate_only(args, &config);
    }

    let Some(output_path) = &args.output else {
        anyhow::bail!("an output path is required unless --validate-only is given");
    };

    if !args.input.exists() {
        anyhow::bail!("input file not found: {}", args.input.display());
    }

    let converter = Converter::new(config)?;
    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    info!(input = %args.input.display(), "converting");
    let conversion = converter.convert_bytes(&bytes, args.root_condition.as_deref())?;

    let rendered = conversion
        .tree
        .render(args.output_format, converter.config().indent_level)?;
    write_output(output_path, &rendered)?;

    info!(
        input = %args.input.display(),
        output = %output_path.display(),
        "successfully converted"
    );
    Ok(ExitCode::SUCCESS)
}

/// Config file first, then CLI flags on top
fn load_config(args: &Args) -> ConverterConfig {
    let mut config = ConverterConfig::load_with_fallback(args.config.as_deref());
    if let Some(path) = &args.config {
        info!(path = %path, "loaded config");
    }

    if args.strict {
        config.strict_validation = true;
    }
    if args.no_headers {
        config.skip_headers = false;
    }
    if let Some(indent) = args.indent {
        config.indent_level = indent;
    }
    if args.xhtml {
        config.backend = DocumentBackend::Xhtml;
    }
    config
}

fn validate_only(args: &Args, config: &ConverterConfig) -> Result<ExitCode> {
    let validator = TreeValidator::from_config(config)?;
    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", args.input.display()))?;

    let report = validator.validate_json(&value);
    if report.is_valid() {
        info!(input = %args.input.display(), "logic tree is valid");
        return Ok(ExitCode::SUCCESS);
    }

    for issue in &report.issues {
        warn!(path = issue.path(), "validation error: {issue}");
    }
    error!(errors = report.issues.len(), "logic tree is invalid");
    Ok(ExitCode::FAILURE)
}
