// matchkit CLI - pair expected and actual structured output from the shell

mod exit_codes;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

use exit_codes::{EXIT_ERROR, EXIT_RUN_INPUT, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "matchkit")]
#[command(about = "Match expected records against produced records and explain the pairing")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match two record files and report the pairing (exit 0 = all compared fields matched)
    #[command(after_help = "\
Examples:
  matchkit run expected.json actual.json --field text
  matchkit run expected.json actual.jsonl --field text --field source --compare page
  matchkit run expected.csv actual.csv --config citations.match.toml --json
  matchkit run expected.json actual.json --config citations.match.toml --output result.json")]
    Run {
        /// Expected records (.json array, .jsonl/.ndjson, or .csv)
        expected: PathBuf,

        /// Actual records (.json array, .jsonl/.ndjson, or .csv)
        actual: PathBuf,

        /// TOML config with fields, thresholds and compare fields
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Match field, in priority order (repeatable; overrides config `fields`)
        #[arg(long = "field", short = 'f', value_name = "FIELD")]
        fields: Vec<String>,

        /// Field to compare on every pairing (repeatable; overrides config `compare.fields`)
        #[arg(long = "compare", value_name = "FIELD")]
        compare: Vec<String>,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Validate a match config without running
    #[command(after_help = "\
Examples:
  matchkit validate citations.match.toml")]
    Validate {
        /// Path to the TOML config file
        config: PathBuf,
    },

    /// Print the sequence similarity ratio of two strings
    #[command(after_help = "\
Examples:
  matchkit similarity 'abcd' 'bcde'
  matchkit similarity 'He 2016' 'He et al. 2016' --json")]
    Similarity {
        a: String,
        b: String,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  matchkit-engine ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

/// Set up logging. Library crates log through `log`; bridge it into tracing.
fn configure_tracing(verbose: u8, quiet: bool) -> Result<(), CliError> {
    use tracing_log::{AsLog, LogTracer};
    use tracing_subscriber::{filter::LevelFilter, EnvFilter};

    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    LogTracer::builder()
        .with_max_level(level_filter.as_log())
        .init()
        .map_err(|e| CliError::general(format!("cannot install log bridge: {e}")))?;

    // MATCHKIT_LOG overrides the level chosen by -v/-q
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("MATCHKIT_LOG")
        .from_env()
        .map_err(|e| CliError::args(format!("invalid MATCHKIT_LOG filter: {e}")))?;

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CliError::general(format!("cannot install log subscriber: {e}")))?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = configure_tracing(cli.verbose, cli.quiet).and_then(|()| match cli.command {
        Commands::Run { expected, actual, config, fields, compare, json, output } => {
            run::cmd_run(run::RunArgs { expected, actual, config, fields, compare, json, output })
        }
        Commands::Validate { config } => run::cmd_validate(config),
        Commands::Similarity { a, b, json } => run::cmd_similarity(a, b, json),
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_RUN_INPUT, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
