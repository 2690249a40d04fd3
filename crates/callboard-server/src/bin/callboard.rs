// crates/callboard-server/src/bin/callboard.rs
// ============================================================================
// Module: Callboard Entry Point
// Description: Binary entry point for the Callboard CFP server.
// Purpose: Load configuration and run the serve loop.
// Dependencies: callboard-config, callboard-server, clap, tokio
// ============================================================================

//! ## Overview
//! Thin binary wrapper: parse the command line, load and validate the TOML
//! configuration, and hand off to [`CallboardServer`]. All failures are
//! reported on stderr with a non-zero exit code.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use callboard_config::CallboardConfig;
use callboard_server::CallboardServer;
use clap::Parser;

// ============================================================================
// SECTION: Command Line
// ============================================================================

/// Command-line arguments of the Callboard server.
#[derive(Debug, Parser)]
#[command(name = "callboard", about = "Callboard CFP server", version)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Binary entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => emit_error(&message),
    }
}

/// Loads configuration and serves until the process exits.
async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let config = CallboardConfig::load(cli.config.as_deref()).map_err(|err| err.to_string())?;
    CallboardServer::from_config(config)
        .serve()
        .await
        .map_err(|err| err.to_string())
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
