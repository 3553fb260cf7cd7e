// adcheck - ad group structure and activity check (headless)

mod check;
mod exit_codes;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use env_logger::Env;

use adcheck_recon::error::expected_schema;
use adcheck_recon::{ReconError, TableKind};

use exit_codes::{
    recon_exit_code, EXIT_ERROR, EXIT_INGEST, EXIT_OUTPUT, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "adcheck")]
#[command(about = "Check ad group structure and ad/keyword activity per account")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// The three report files plus an optional config.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Accounts list export (needs 'Customer ID')
    #[arg(long, value_name = "FILE")]
    pub accounts: PathBuf,

    /// Keyword report export (needs 'Ad group ID')
    #[arg(long, value_name = "FILE")]
    pub keywords: PathBuf,

    /// Ad group report export
    #[arg(long, value_name = "FILE")]
    pub ad_groups: PathBuf,

    /// TOML config overriding column names, templates, skip_rows
    #[arg(long, value_name = "FILE", env = "ADCHECK_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the three reports and emit the result table
    #[command(after_help = "\
Examples:
  adcheck run --accounts accounts.xlsx --keywords keywords.xlsx --ad-groups ads.xlsx
  adcheck run --accounts a.csv --keywords k.csv --ad-groups g.csv --output report.xlsx
  adcheck run --accounts a.csv --keywords k.csv --ad-groups g.csv --json")]
    Run {
        #[command(flatten)]
        inputs: InputArgs,

        /// Write the result to a file (.csv, .xlsx or .json)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Output the full report as JSON to stdout instead of CSV
        #[arg(long)]
        json: bool,

        /// Suppress the stderr summary
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// List accounts that have at least one valid ad group
    Accounts {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output JSON array
        #[arg(long)]
        json: bool,
    },

    /// Per-ad-group drill-down for one account
    #[command(after_help = "\
Examples:
  adcheck account --accounts a.csv --keywords k.csv --ad-groups g.csv --name 'Acme Motors'")]
    Account {
        #[command(flatten)]
        inputs: InputArgs,

        /// Account name, as listed by `adcheck accounts`
        #[arg(long)]
        name: String,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or validate configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show {
        /// Config file to merge over the defaults
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Parse and validate a config file
    Validate {
        /// Path to the config file
        file: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run { inputs, output, json, quiet } => {
            check::cmd_run(&inputs, output, json, quiet)
        }
        Commands::Accounts { inputs, json } => check::cmd_accounts(&inputs, json),
        Commands::Account { inputs, name, json } => check::cmd_account(&inputs, &name, json),
        Commands::Config(ConfigCommands::Show { config }) => check::cmd_config_show(config),
        Commands::Config(ConfigCommands::Validate { file }) => check::cmd_config_validate(&file),
    };

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

    pub fn output(msg: impl Into<String>) -> Self {
        Self { code: EXIT_OUTPUT, message: msg.into(), hint: None }
    }

    /// A file could not be loaded; the hint names the columns that file needs.
    pub fn ingest(table: TableKind, msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_INGEST,
            message: format!("failed to load {}: {}", table.file_label(), msg.into()),
            hint: Some(format!("expected {}", expected_schema(table))),
        }
    }

    /// Engine error. Schema errors carry the expected-columns hint.
    pub fn recon(err: ReconError) -> Self {
        let hint = err.table().map(|t| format!("expected {}", expected_schema(t)));
        Self { code: recon_exit_code(&err), message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
