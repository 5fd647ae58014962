// crates/protoc-gen-mcp-render/src/lib.rs
// ============================================================================
// Module: Catalog Renderer Library
// Description: Deterministic rendering of tool catalogs into output files.
// Purpose: Turn a generated file artifact into the file protoc writes.
// Dependencies: protoc-gen-mcp-core, protoc-gen-mcp-config, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Each generated schema file becomes one output file named after the source
//! path with `.proto` replaced by the configured suffix. Two formats exist:
//! a pretty-printed JSON catalog and a self-contained Rust source module.
//!
//! ### Design Notes
//! - Output is deterministic: catalogs iterate ordered maps and schema
//!   payloads are the canonical bytes computed during assembly.
//! - Rendering performs no I/O; the plugin owns the response.
//!
//! ## Index
//! - Public API: [`render_file`], [`output_name`], [`RenderedFile`], [`RenderError`]
//! - Formats: JSON ([`json`]), Rust ([`rust`])

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod json;
pub mod rust;

// ============================================================================
// SECTION: Imports
// ============================================================================

use protoc_gen_mcp_config::GeneratorConfig;
use protoc_gen_mcp_config::OutputFormat;
use protoc_gen_mcp_core::FileArtifact;
use thiserror::Error;

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Generator identifier embedded in rendered output.
pub const GENERATOR: &str = concat!("protoc-gen-mcp ", env!("CARGO_PKG_VERSION"));

/// Source file extension replaced by the output suffix.
const PROTO_EXTENSION: &str = ".proto";

/// Errors raised while rendering a file.
///
/// # Invariants
/// - Messages do not include the source path; callers add it.
#[derive(Debug, Error)]
pub enum RenderError {
    /// JSON serialization failed.
    #[error("json render error: {0}")]
    Json(String),
    /// Two catalog entries map to the same generated identifier.
    #[error("identifier collision: {0}")]
    IdentifierCollision(String),
}

/// Rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Output path relative to the protoc output directory.
    pub name: String,
    /// File content.
    pub content: String,
}

/// Renders a file artifact in the configured format.
///
/// # Errors
///
/// Returns [`RenderError`] when serialization fails or generated identifiers
/// collide.
pub fn render_file(
    artifact: &FileArtifact,
    config: &GeneratorConfig,
) -> Result<RenderedFile, RenderError> {
    let content = match config.format {
        OutputFormat::Json => json::render_json(artifact)?,
        OutputFormat::Rust => rust::render_rust(artifact)?,
    };
    Ok(RenderedFile {
        name: output_name(&artifact.source_path, config.effective_suffix()),
        content,
    })
}

/// Returns the output path for a source schema path.
#[must_use]
pub fn output_name(source_path: &str, suffix: &str) -> String {
    let stem = source_path.strip_suffix(PROTO_EXTENSION).unwrap_or(source_path);
    format!("{stem}{suffix}")
}
