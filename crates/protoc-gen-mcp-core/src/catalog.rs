// crates/protoc-gen-mcp-core/src/catalog.rs
// ============================================================================
// Module: Tool Catalog
// Description: Tool records and the per-file catalog handed to renderers.
// Purpose: Canonical shapes for generated MCP tool definitions.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`ToolCatalog`] indexes tools twice: per service (service name, then
//! method name) and by flattened `Service_Method` key. Both indexes use
//! ordered maps so iteration, and therefore rendering, is deterministic.
//! Catalogs are populated by [`crate::ToolAssembler`] and read-only afterwards.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use crate::GenerationError;
use crate::diagnostics::Diagnostic;

// ============================================================================
// SECTION: Tool
// ============================================================================

/// MCP tool definition for one unary RPC method.
///
/// # Invariants
/// - `name` fits the configured maximum length and is unique in its catalog.
/// - `raw_input_schema` is the RFC 8785 canonical form of `input_schema`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tool {
    /// Tool name.
    pub name: String,
    /// Sanitized method documentation.
    pub description: String,
    /// JSON Schema for the request message.
    pub input_schema: Value,
    /// Canonical JSON text of `input_schema`.
    #[serde(skip)]
    pub raw_input_schema: String,
    /// Fully qualified request message name.
    pub request_type: String,
    /// Fully qualified response message name.
    pub response_type: String,
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Tools generated for one schema file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCatalog {
    /// Tools keyed by service name, then method name.
    services: BTreeMap<String, BTreeMap<String, Tool>>,
    /// Tools keyed by flattened `Service_Method` key.
    tools: BTreeMap<String, Tool>,
    /// Tool names already in use.
    names: BTreeSet<String>,
}

impl ToolCatalog {
    /// Returns the per-service index.
    #[must_use]
    pub const fn services(&self) -> &BTreeMap<String, BTreeMap<String, Tool>> {
        &self.services
    }

    /// Returns the flattened index.
    #[must_use]
    pub const fn tools(&self) -> &BTreeMap<String, Tool> {
        &self.tools
    }

    /// Looks up a tool by flattened key.
    #[must_use]
    pub fn tool(&self, key: &str) -> Option<&Tool> {
        self.tools.get(key)
    }

    /// Returns the number of tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true when no tools were generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Registers a service so it appears even without unary methods.
    pub(crate) fn ensure_service(&mut self, service: &str) {
        self.services.entry(service.to_string()).or_default();
    }

    /// Inserts a tool under both indexes, rejecting key or name collisions.
    pub(crate) fn insert(
        &mut self,
        file: &str,
        service: &str,
        method: &str,
        tool: Tool,
    ) -> Result<(), GenerationError> {
        let key = format!("{service}_{method}");
        if self.tools.contains_key(&key) {
            return Err(GenerationError::DuplicateToolKey {
                file: file.to_string(),
                key,
            });
        }
        if self.names.contains(&tool.name) {
            return Err(GenerationError::DuplicateToolName {
                file: file.to_string(),
                name: tool.name,
            });
        }
        self.names.insert(tool.name.clone());
        self.services
            .entry(service.to_string())
            .or_default()
            .insert(method.to_string(), tool.clone());
        self.tools.insert(key, tool);
        Ok(())
    }
}

// ============================================================================
// SECTION: File Artifact
// ============================================================================

/// Generation result for one schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileArtifact {
    /// Protobuf package name.
    pub package: String,
    /// Source path of the schema file.
    pub source_path: String,
    /// Package identifier declared for the generated artifact.
    pub module_name: String,
    /// Generated tools.
    pub catalog: ToolCatalog,
    /// Diagnostics raised while generating this file.
    pub diagnostics: Vec<Diagnostic>,
}
