//! `matchkit run` / `validate` / `similarity`.

use std::path::{Path, PathBuf};

use log::{debug, info};

use matchkit_engine::engine::{load_records_file, MatchInput};
use matchkit_engine::similarity::sequence_ratio;
use matchkit_engine::{MatchConfig, MatchError};

use crate::exit_codes::{match_exit_code, EXIT_RUN_FIELDS_FAILED, EXIT_RUN_RUNTIME};
use crate::CliError;

fn engine_err(err: MatchError) -> CliError {
    let cli_err = CliError { code: match_exit_code(&err), message: err.to_string(), hint: None };
    match err {
        MatchError::UnsupportedFormat(_) => {
            cli_err.with_hint("JSON Lines files need a .jsonl or .ndjson extension")
        }
        MatchError::Coverage(_) => cli_err.with_hint("this is an engine bug; please report it with both input files"),
        _ => cli_err,
    }
}

fn run_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

/// Load the config file (or defaults), then apply command-line overrides.
fn resolve_config(
    config_path: Option<&Path>,
    fields: Vec<String>,
    compare: Vec<String>,
) -> Result<MatchConfig, CliError> {
    let mut config = match config_path {
        Some(path) => {
            let config_str = std::fs::read_to_string(path)
                .map_err(|e| CliError::io(format!("cannot read config {}: {e}", path.display())))?;
            MatchConfig::from_toml(&config_str).map_err(engine_err)?
        }
        None => MatchConfig::default(),
    };

    if !fields.is_empty() {
        config.fields = fields;
    }
    if !compare.is_empty() {
        config.compare.fields = compare;
    }
    config.validate().map_err(engine_err)?;
    Ok(config)
}

pub struct RunArgs {
    pub expected: PathBuf,
    pub actual: PathBuf,
    pub config: Option<PathBuf>,
    pub fields: Vec<String>,
    pub compare: Vec<String>,
    pub json: bool,
    pub output: Option<PathBuf>,
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let config = resolve_config(args.config.as_deref(), args.fields, args.compare)?;
    if config.fields.is_empty() {
        info!("no match fields given; field identity is skipped and fuzzy scores are 0");
    }

    let input = MatchInput {
        expected: load_records_file(&args.expected).map_err(engine_err)?,
        actual: load_records_file(&args.actual).map_err(engine_err)?,
    };
    debug!(
        "loaded {} expected record(s) from {}, {} actual record(s) from {}",
        input.expected.len(),
        args.expected.display(),
        input.actual.len(),
        args.actual.display()
    );

    let report = matchkit_engine::run(&config, &input).map_err(engine_err)?;

    // Output
    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| run_err(EXIT_RUN_RUNTIME, format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &json_str)
            .map_err(|e| run_err(EXIT_RUN_RUNTIME, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if args.json {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &report.summary;
    eprintln!(
        "{}: {} triple(s), {} paired, {} missing, {} extra",
        s.strategy, s.total, s.paired, s.missing, s.extra,
    );
    if let Some(ref comparison) = report.comparison {
        for field in &comparison.fields {
            eprintln!("  {}", field.rationale);
        }
    }

    if !report.passed() {
        return Err(run_err(EXIT_RUN_FIELDS_FAILED, "field comparison failed"));
    }
    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = resolve_config(Some(&config_path), Vec::new(), Vec::new())?;
    let name = if config.name.is_empty() { "(unnamed)" } else { config.name.as_str() };
    eprintln!(
        "valid: config '{}' with {} match field(s), {} compare field(s), thresholds field_identity={} fuzzy={}",
        name,
        config.fields.len(),
        config.compare.fields.len(),
        config.thresholds.field_identity,
        config.thresholds.fuzzy,
    );
    Ok(())
}

pub fn cmd_similarity(a: String, b: String, json: bool) -> Result<(), CliError> {
    let ratio = sequence_ratio(&a, &b);
    if json {
        println!("{}", serde_json::json!({ "a": a, "b": b, "ratio": ratio }));
    } else {
        println!("{ratio:.4}");
    }
    Ok(())
}
