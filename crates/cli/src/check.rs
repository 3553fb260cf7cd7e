//! `adcheck run|accounts|account|config`: load the reports, run the engine,
//! hand the result to the renderers.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::info;

use adcheck_recon::{
    reconcile, rollup_account, run, selectable_accounts, CheckConfig, ReconInput, TableKind,
};

use crate::render;
use crate::{CliError, InputArgs};

/// Output file formats chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Csv,
    Xlsx,
    Json,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Result<Self, CliError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") | None => Ok(Self::Csv),
            Some("xlsx") => Ok(Self::Xlsx),
            Some("json") => Ok(Self::Json),
            Some(other) => Err(CliError::args(format!("unsupported output format '.{other}'"))
                .with_hint("use .csv, .xlsx or .json")),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

fn load_config(path: Option<&Path>) -> Result<CheckConfig, CliError> {
    let Some(path) = path else {
        return Ok(CheckConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::args(format!("cannot read config {}: {e}", path.display())))?;
    let config = CheckConfig::from_toml(&text).map_err(CliError::recon)?;
    info!("using config {}", path.display());
    Ok(config)
}

fn load_inputs(inputs: &InputArgs) -> Result<(CheckConfig, ReconInput), CliError> {
    let config = load_config(inputs.config.as_deref())?;
    let load = |path: &Path, kind: TableKind| {
        adcheck_io::load_table(path, kind, config.skip_rows).map_err(|e| CliError::ingest(kind, e))
    };
    let input = ReconInput {
        accounts: load(&inputs.accounts, TableKind::Accounts)?,
        keywords: load(&inputs.keywords, TableKind::Keywords)?,
        ad_groups: load(&inputs.ad_groups, TableKind::AdGroups)?,
    };
    Ok((config, input))
}

// ============================================================================
// run
// ============================================================================

pub fn cmd_run(
    inputs: &InputArgs,
    output: Option<PathBuf>,
    json: bool,
    quiet: bool,
) -> Result<(), CliError> {
    // Validate the output path before doing any work
    let output_format = output.as_deref().map(OutputFormat::from_path).transpose()?;

    let (config, input) = load_inputs(inputs)?;
    let started = Instant::now();
    let report = run(&config, &input).map_err(CliError::recon)?;
    let elapsed = started.elapsed();

    if !quiet {
        for shape in &report.meta.tables {
            eprintln!("{}", render::shape_line(shape));
        }
    }

    if let (Some(path), Some(format)) = (output.as_deref(), output_format) {
        let written = match format {
            OutputFormat::Csv => adcheck_io::csv::export_records(&report.records, path),
            OutputFormat::Xlsx => adcheck_io::xlsx::export_records(&report.records, path),
            OutputFormat::Json => serde_json::to_string_pretty(&report)
                .map_err(|e| format!("JSON serialization error: {e}"))
                .and_then(|s| std::fs::write(path, s).map_err(|e| e.to_string())),
        };
        written.map_err(|e| CliError::output(format!("cannot write {}: {e}", path.display())))?;
        if !quiet {
            eprintln!("wrote {}", path.display());
        }
    }

    if json {
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    } else if output.is_none() {
        let stdout = io::stdout();
        adcheck_io::csv::write_records(&report.records, stdout.lock())
            .map_err(|e| CliError::output(format!("cannot write to stdout: {e}")))?;
    }

    if !quiet {
        eprintln!("{}", render::summary_line(&report.summary, elapsed));
    }
    Ok(())
}

// ============================================================================
// accounts / account
// ============================================================================

pub fn cmd_accounts(inputs: &InputArgs, json: bool) -> Result<(), CliError> {
    let (config, input) = load_inputs(inputs)?;
    let records = reconcile(&config, &input).map_err(CliError::recon)?;
    let names = selectable_accounts(&records);

    if json {
        let json_str = serde_json::to_string_pretty(&names)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
        return Ok(());
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for name in names {
        writeln!(handle, "{name}").map_err(|e| CliError::output(e.to_string()))?;
    }
    Ok(())
}

pub fn cmd_account(inputs: &InputArgs, name: &str, json: bool) -> Result<(), CliError> {
    let (config, input) = load_inputs(inputs)?;
    let records = reconcile(&config, &input).map_err(CliError::recon)?;
    let rollup = rollup_account(&config, &input, &records, name)
        .map_err(CliError::recon)?
        .ok_or_else(|| {
            CliError::general(format!("no valid ad groups found for account '{name}'"))
                .with_hint("run `adcheck accounts` to list accounts with valid ad groups")
        })?;

    if json {
        let json_str = serde_json::to_string_pretty(&rollup)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    } else {
        print!("{}", render::rollup_table(&rollup));
    }
    Ok(())
}

// ============================================================================
// config
// ============================================================================

pub fn cmd_config_show(path: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(path.as_deref())?;
    let text = config.to_toml().map_err(CliError::recon)?;
    print!("{text}");
    Ok(())
}

pub fn cmd_config_validate(path: &Path) -> Result<(), CliError> {
    let config = load_config(Some(path))?;
    // Templates compile lazily during a run; surface regex errors here too
    let templates = config.template_set().map_err(CliError::recon)?;
    eprintln!(
        "ok: {} ({} template(s), skip_rows = {})",
        path.display(),
        templates.templates().len(),
        config.skip_rows
    );
    Ok(())
}
