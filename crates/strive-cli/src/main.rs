// crates/strive-cli/src/main.rs
// ============================================================================
// Module: Strive CLI Entry Point
// Description: Command dispatcher for tool catalog generation and checking.
// Purpose: Keep the persisted tool catalog in lockstep with the live API.
// Dependencies: clap, reqwest, serde_json, strive-catalog, strive-contract,
//               strive-store, thiserror
// ============================================================================

//! ## Overview
//! The `strive` binary drives the tool catalog lifecycle from the command
//! line: `generate-tool-catalog` fetches the deployment's OpenAPI document,
//! regenerates the catalog, and persists it; `check-tool-catalog` regenerates
//! in memory, validates the required-field contract, and diffs against the
//! persisted artifact for CI drift detection.
//!
//! Unrecognized subcommands are acknowledged and skipped with exit code 0 so
//! this binary can sit inside a larger ops dispatcher without claiming
//! commands it does not own.
//!
//! Security posture: the OpenAPI document is fetched over HTTP from a
//! configured URL and treated as untrusted input; redirects are refused, the
//! response is size-capped, and generation fails closed on malformed schemas.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use serde_json::Value;
use strive_catalog::Catalog;
use strive_catalog::CatalogGenerator;
use strive_contract::validate_required_fields;
use strive_store::CatalogStore;
use strive_store::DEFAULT_CATALOG_PATH;
use strive_store::diff_catalogs;
use strive_store::serialize_catalog;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default OpenAPI document URL of a local Strive deployment.
const DEFAULT_API_URL: &str = "http://127.0.0.1:3000/api-json";
/// Maximum accepted OpenAPI document size.
const MAX_DOCUMENT_BYTES: u64 = 8 * 1024 * 1024;
/// OpenAPI fetch timeout in seconds.
const FETCH_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "strive", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Regenerate the tool catalog from the live API and persist it.
    GenerateToolCatalog(CatalogArgs),
    /// Check the persisted tool catalog for drift and contract violations.
    CheckToolCatalog(CheckArgs),
    /// Commands owned by other tooling; acknowledged and skipped.
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Shared catalog source and destination arguments.
#[derive(Args, Debug)]
struct CatalogArgs {
    /// URL of the deployment's OpenAPI document.
    #[arg(long = "api-url", value_name = "URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Path of the persisted catalog artifact.
    #[arg(long = "catalog", value_name = "PATH", default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,
}

/// Arguments for `check-tool-catalog`.
#[derive(Args, Debug)]
struct CheckArgs {
    /// Catalog source and destination.
    #[command(flatten)]
    catalog: CatalogArgs,
    /// Exit non-zero when the persisted catalog drifts from the regeneration.
    #[arg(long = "fail-on-diff")]
    fail_on_diff: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("strive {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::GenerateToolCatalog(args) => command_generate(&args),
        Commands::CheckToolCatalog(args) => command_check(&args),
        Commands::External(args) => command_external(&args),
    }
}

// ============================================================================
// SECTION: Generate Command
// ============================================================================

/// Executes the `generate-tool-catalog` command.
fn command_generate(args: &CatalogArgs) -> CliResult<ExitCode> {
    let catalog = regenerate(&args.api_url)?;
    let store = CatalogStore::new(&args.catalog);
    store.write(&catalog).map_err(|err| CliError::new(err.to_string()))?;
    write_stdout_line(&format!(
        "catalog written to {} ({} tools)",
        store.path().display(),
        catalog.tools.len()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Check Command
// ============================================================================

/// Executes the `check-tool-catalog` command.
///
/// Contract violations always fail the check; drift fails it only when
/// `--fail-on-diff` is set, so scheduled advisory runs and enforcing CI runs
/// share one code path.
fn command_check(args: &CheckArgs) -> CliResult<ExitCode> {
    let catalog = regenerate(&args.catalog.api_url)?;
    let violations = validate_required_fields(&catalog.tools);
    for violation in &violations {
        write_stderr_line(&format!("contract violation: {violation}"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    let regenerated = serialize_catalog(&catalog).map_err(|err| CliError::new(err.to_string()))?;
    let store = CatalogStore::new(&args.catalog.catalog);
    let persisted = store.read_raw().unwrap_or_default();
    let diff = diff_catalogs(&persisted, &regenerated);
    if diff.identical {
        write_stdout_line("catalog is up to date")
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    } else {
        write_stdout_line(&format!(
            "catalog drift detected at {}:\n{}",
            store.path().display(),
            diff.details
        ))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }

    if !violations.is_empty() || (args.fail_on_diff && !diff.identical) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: External Command
// ============================================================================

/// Acknowledges a subcommand owned by other tooling.
fn command_external(args: &[String]) -> CliResult<ExitCode> {
    let name = args.first().map_or("", String::as_str);
    write_stdout_line(&format!("command not handled: {name}"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Regeneration
// ============================================================================

/// Fetches the OpenAPI document and regenerates the catalog in memory.
fn regenerate(api_url: &str) -> CliResult<Catalog> {
    let document = fetch_document(api_url)?;
    CatalogGenerator::new(&document)
        .generate()
        .map_err(|err| CliError::new(format!("catalog generation failed: {err}")))
}

/// Fetches and parses the OpenAPI document from the deployment.
///
/// Single attempt, redirects refused, response size capped; a broken or slow
/// deployment fails the command rather than producing a partial catalog.
fn fetch_document(api_url: &str) -> CliResult<Value> {
    let client = Client::builder()
        .redirect(Policy::none())
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .map_err(|err| CliError::new(format!("http client setup failed: {err}")))?;
    let response = client
        .get(api_url)
        .send()
        .map_err(|err| CliError::new(format!("openapi fetch failed for {api_url}: {err}")))?;
    if !response.status().is_success() {
        return Err(CliError::new(format!(
            "openapi fetch failed for {api_url}: http status {}",
            response.status()
        )));
    }
    if let Some(length) = response.content_length()
        && length > MAX_DOCUMENT_BYTES
    {
        return Err(CliError::new(format!(
            "openapi document at {api_url} exceeds the size limit ({length} bytes)"
        )));
    }
    let mut limited = response.take(MAX_DOCUMENT_BYTES.saturating_add(1));
    let mut bytes = Vec::new();
    limited
        .read_to_end(&mut bytes)
        .map_err(|err| CliError::new(format!("openapi fetch failed for {api_url}: {err}")))?;
    if u64::try_from(bytes.len()).is_ok_and(|length| length > MAX_DOCUMENT_BYTES) {
        return Err(CliError::new(format!(
            "openapi document at {api_url} exceeds the size limit"
        )));
    }
    serde_json::from_slice(&bytes)
        .map_err(|err| CliError::new(format!("openapi document at {api_url} is malformed: {err}")))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    Cli::command()
        .print_help()
        .map_err(|err| CliError::new(output_error("stdout", &err)))
}
