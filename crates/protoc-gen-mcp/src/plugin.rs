// crates/protoc-gen-mcp/src/plugin.rs
// ============================================================================
// Module: Plugin Driver
// Description: One protoc plugin invocation from request bytes to response.
// Purpose: Wire decoding, configuration, assembly, and rendering together.
// Dependencies: prost, prost-types, protoc-gen-mcp-{core,config,render}
// ============================================================================

//! ## Overview
//! A run decodes the request, resolves the configuration from the parameter
//! string, ingests descriptors, and generates one output file per requested
//! schema file. Failures scoped to one file are collected into the
//! response's `error` field while other files still emit output. Request
//! decoding and configuration failures abort the whole run with a response
//! that carries only `error`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;

use prost::Message;
use prost_types::compiler::CodeGeneratorResponse;
use prost_types::compiler::code_generator_response::File;
use protoc_gen_mcp_config::DiagnosticsMode;
use protoc_gen_mcp_config::GeneratorConfig;
use protoc_gen_mcp_core::Diagnostic;
use protoc_gen_mcp_core::DiagnosticKind;
use protoc_gen_mcp_core::DiagnosticLevel;
use protoc_gen_mcp_core::DiagnosticSink;
use protoc_gen_mcp_core::ToolAssembler;
use protoc_gen_mcp_core::diagnostics::FileDiagnosticSink;
use protoc_gen_mcp_core::diagnostics::LevelFilterSink;
use protoc_gen_mcp_core::diagnostics::StderrDiagnosticSink;
use protoc_gen_mcp_render::render_file;
use thiserror::Error;

use crate::ingest::ingest;
use crate::wire::CodeGeneratorRequest;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum encoded request size accepted from protoc.
pub const MAX_REQUEST_BYTES: usize = 64 * 1024 * 1024;
/// `CodeGeneratorResponse.Feature.FEATURE_PROTO3_OPTIONAL`.
pub const FEATURE_PROTO3_OPTIONAL: u64 = 1;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that abort a plugin run.
#[derive(Debug, Error)]
pub enum PluginError {
    /// I/O failure reading the request or writing the response.
    #[error("io error: {0}")]
    Io(String),
    /// The request exceeds [`MAX_REQUEST_BYTES`].
    #[error("request exceeds {limit} bytes")]
    RequestTooLarge {
        /// Allowed limit in bytes.
        limit: usize,
    },
    /// The request bytes are not a valid `CodeGeneratorRequest`.
    #[error("failed to decode code generator request: {0}")]
    Decode(String),
    /// The parameter string or its base file is invalid.
    #[error("{0}")]
    Config(String),
    /// The diagnostics file could not be opened.
    #[error("failed to open diagnostics file: {0}")]
    Diagnostics(String),
}

// ============================================================================
// SECTION: Diagnostics
// ============================================================================

/// Sink forwarding every diagnostic to each configured destination.
struct DiagnosticFanout {
    /// Destinations in configuration order.
    sinks: Vec<Box<dyn DiagnosticSink>>,
}

impl DiagnosticFanout {
    /// Builds the sinks selected by the configuration.
    ///
    /// The default stderr mode forwards warnings and errors only.
    fn from_config(config: &GeneratorConfig) -> Result<Self, PluginError> {
        let mut sinks: Vec<Box<dyn DiagnosticSink>> = Vec::new();
        match config.diagnostics {
            DiagnosticsMode::Stderr => {
                sinks.push(Box::new(LevelFilterSink::new(
                    StderrDiagnosticSink,
                    DiagnosticLevel::Warning,
                )));
            }
            DiagnosticsMode::Verbose => sinks.push(Box::new(StderrDiagnosticSink)),
            DiagnosticsMode::Off => {}
        }
        if let Some(path) = &config.diagnostics_file {
            let sink = FileDiagnosticSink::new(path)
                .map_err(|err| PluginError::Diagnostics(format!("{}: {err}", path.display())))?;
            sinks.push(Box::new(sink));
        }
        Ok(Self {
            sinks,
        })
    }
}

impl DiagnosticSink for DiagnosticFanout {
    fn record(&self, diagnostic: &Diagnostic) {
        for sink in &self.sinks {
            sink.record(diagnostic);
        }
    }
}

// ============================================================================
// SECTION: Driver
// ============================================================================

/// Runs one plugin invocation, folding run-level failures into the response.
#[must_use]
pub fn run(request_bytes: &[u8], parameter_override: Option<&str>) -> CodeGeneratorResponse {
    generate(request_bytes, parameter_override).unwrap_or_else(|err| error_response(err.to_string()))
}

/// Runs one plugin invocation.
///
/// `parameter_override` replaces the parameter string carried by the request.
///
/// # Errors
///
/// Returns [`PluginError`] when the request cannot be decoded, the
/// configuration is invalid, or the diagnostics file cannot be opened.
/// Per-file generation failures are reported in the response instead.
pub fn generate(
    request_bytes: &[u8],
    parameter_override: Option<&str>,
) -> Result<CodeGeneratorResponse, PluginError> {
    let request = CodeGeneratorRequest::decode(request_bytes)
        .map_err(|err| PluginError::Decode(err.to_string()))?;
    let parameter = parameter_override.or(request.parameter.as_deref()).unwrap_or_default();
    let config =
        GeneratorConfig::from_parameter(parameter).map_err(|err| PluginError::Config(err.to_string()))?;
    let sink = DiagnosticFanout::from_config(&config)?;

    let ingested = ingest(&request);
    let assembler = ToolAssembler::new(&ingested.pool, &ingested.required)
        .with_options(config.assembler_options())
        .with_sink(&sink);

    let mut files = Vec::new();
    let mut errors = Vec::new();
    for file in &ingested.files {
        let artifact = match assembler.generate_file(file) {
            Ok(Some(artifact)) => artifact,
            Ok(None) => continue,
            Err(err) => {
                errors.push(err.to_string());
                continue;
            }
        };
        match render_file(&artifact, &config) {
            Ok(rendered) => files.push(File {
                name: Some(rendered.name),
                content: Some(rendered.content),
                ..File::default()
            }),
            Err(err) => {
                sink.record(&Diagnostic::file(
                    DiagnosticKind::FileFailed,
                    DiagnosticLevel::Error,
                    &file.path,
                    err.to_string(),
                ));
                errors.push(format!("{}: {err}", file.path));
            }
        }
    }

    Ok(CodeGeneratorResponse {
        error: (!errors.is_empty()).then(|| errors.join("\n")),
        supported_features: Some(FEATURE_PROTO3_OPTIONAL),
        file: files,
        ..CodeGeneratorResponse::default()
    })
}

/// Builds a response carrying only an error message.
fn error_response(message: String) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        error: Some(message),
        supported_features: Some(FEATURE_PROTO3_OPTIONAL),
        ..CodeGeneratorResponse::default()
    }
}

// ============================================================================
// SECTION: Input
// ============================================================================

/// Reads the encoded request while enforcing [`MAX_REQUEST_BYTES`].
///
/// # Errors
///
/// Returns [`PluginError::Io`] on read failure and
/// [`PluginError::RequestTooLarge`] when the input exceeds `limit`.
pub fn read_request(reader: impl Read, limit: usize) -> Result<Vec<u8>, PluginError> {
    let read_limit = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    let mut bytes = Vec::new();
    reader
        .take(read_limit)
        .read_to_end(&mut bytes)
        .map_err(|err| PluginError::Io(err.to_string()))?;
    if bytes.len() > limit {
        return Err(PluginError::RequestTooLarge {
            limit,
        });
    }
    Ok(bytes)
}
