// crates/protoc-gen-mcp-render/src/json.rs
// ============================================================================
// Module: JSON Catalog Rendering
// Description: Pretty-printed JSON documents describing a file's tools.
// Purpose: Emit a language-neutral catalog with schema digests.
// Dependencies: protoc-gen-mcp-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The document carries both indexes of the catalog: `services` (service,
//! then method) and `tools` (flattened key). Each entry includes a SHA-256
//! digest of the canonical input schema so consumers can detect drift.

use std::collections::BTreeMap;

use protoc_gen_mcp_core::FileArtifact;
use protoc_gen_mcp_core::Tool;
use protoc_gen_mcp_core::hashing::HashDigest;
use protoc_gen_mcp_core::hashing::sha256_digest;
use serde::Serialize;
use serde_json::Value;

use crate::GENERATOR;
use crate::RenderError;

/// Top-level JSON catalog document.
#[derive(Debug, Serialize)]
struct CatalogDocument<'a> {
    /// Generator name and version.
    generator: &'static str,
    /// Protobuf package.
    package: &'a str,
    /// Source schema path.
    source_path: &'a str,
    /// Derived module name.
    module_name: &'a str,
    /// Tools keyed by service, then method.
    services: BTreeMap<&'a str, BTreeMap<&'a str, ToolEntry<'a>>>,
    /// Tools keyed by flattened `Service_Method` key.
    tools: BTreeMap<&'a str, ToolEntry<'a>>,
}

/// One tool as written to the catalog.
#[derive(Debug, Serialize)]
struct ToolEntry<'a> {
    /// Tool name.
    name: &'a str,
    /// Tool description.
    description: &'a str,
    /// Input JSON Schema.
    input_schema: &'a Value,
    /// Digest of the canonical input schema.
    input_schema_digest: HashDigest,
    /// Fully qualified request message.
    request_type: &'a str,
    /// Fully qualified response message.
    response_type: &'a str,
}

impl<'a> ToolEntry<'a> {
    /// Borrows a tool for rendering.
    fn new(tool: &'a Tool) -> Self {
        Self {
            name: &tool.name,
            description: &tool.description,
            input_schema: &tool.input_schema,
            input_schema_digest: sha256_digest(&tool.raw_input_schema),
            request_type: &tool.request_type,
            response_type: &tool.response_type,
        }
    }
}

/// Renders the JSON catalog for a file artifact.
///
/// # Errors
///
/// Returns [`RenderError::Json`] when serialization fails.
pub fn render_json(artifact: &FileArtifact) -> Result<String, RenderError> {
    let catalog = &artifact.catalog;
    let services = catalog
        .services()
        .iter()
        .map(|(service, methods)| {
            let entries = methods
                .iter()
                .map(|(method, tool)| (method.as_str(), ToolEntry::new(tool)))
                .collect();
            (service.as_str(), entries)
        })
        .collect();
    let tools = catalog.tools().iter().map(|(key, tool)| (key.as_str(), ToolEntry::new(tool))).collect();
    let document = CatalogDocument {
        generator: GENERATOR,
        package: &artifact.package,
        source_path: &artifact.source_path,
        module_name: &artifact.module_name,
        services,
        tools,
    };
    let mut out =
        serde_json::to_string_pretty(&document).map_err(|err| RenderError::Json(err.to_string()))?;
    out.push('\n');
    Ok(out)
}
