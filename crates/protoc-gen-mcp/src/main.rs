// crates/protoc-gen-mcp/src/main.rs
// ============================================================================
// Module: protoc-gen-mcp Binary
// Description: protoc plugin entry point.
// Purpose: Read the request from stdin, write the response to stdout.
// Dependencies: clap, prost, protoc-gen-mcp
// ============================================================================

//! ## Overview
//! protoc runs the plugin as `protoc-gen-mcp` with no arguments when invoked
//! via `--mcp_out`. The flags exist for debugging captured requests:
//! `--request` reads the encoded request from a file and `--parameter`
//! replaces its parameter string. Per-file failures are reported through the
//! response, which protoc surfaces; the process exits non-zero only when the
//! response cannot be produced or written.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use prost::Message;
use protoc_gen_mcp::MAX_REQUEST_BYTES;
use protoc_gen_mcp::PluginError;
use protoc_gen_mcp::read_request;
use protoc_gen_mcp::run;

// ============================================================================
// SECTION: CLI
// ============================================================================

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "protoc-gen-mcp", version, about = "protoc plugin emitting MCP tool catalogs")]
struct Cli {
    /// Read the encoded `CodeGeneratorRequest` from a file instead of stdin.
    #[arg(long, value_name = "FILE")]
    request: Option<PathBuf>,
    /// Override the parameter string carried by the request.
    #[arg(long, value_name = "PARAMS")]
    parameter: Option<String>,
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Binary entry point.
fn main() -> ExitCode {
    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes one plugin invocation.
fn execute() -> Result<(), PluginError> {
    let cli = Cli::parse();
    let bytes = match &cli.request {
        Some(path) => {
            let file = File::open(path)
                .map_err(|err| PluginError::Io(format!("{}: {err}", path.display())))?;
            read_request(file, MAX_REQUEST_BYTES)?
        }
        None => read_request(std::io::stdin().lock(), MAX_REQUEST_BYTES)?,
    };
    let response = run(&bytes, cli.parameter.as_deref());
    write_stdout_bytes(&response.encode_to_vec()).map_err(|err| PluginError::Io(err.to_string()))
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Writes raw bytes to stdout.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)?;
    stdout.flush()
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "protoc-gen-mcp: {message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
