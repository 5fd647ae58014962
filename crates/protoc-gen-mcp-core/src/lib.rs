// crates/protoc-gen-mcp-core/src/lib.rs
// ============================================================================
// Module: protoc-gen-mcp Core Library
// Description: Protobuf descriptor to JSON Schema translation and tool catalogs.
// Purpose: Expose the descriptor model, schema builder, and tool assembler.
// Dependencies: crate::{assembler, catalog, descriptor, schema, ...}, thiserror
// ============================================================================

//! ## Overview
//! The core translates protobuf message descriptors into JSON Schema and
//! assembles one MCP tool per unary RPC method. It performs no I/O: callers
//! supply a [`DescriptorPool`], a [`RequiredFieldLookup`], and file
//! descriptors, and receive a [`FileArtifact`] per generated file.
//!
//! Output is deterministic: object keys are ordered, catalogs use ordered
//! maps, and schema payloads are RFC 8785 canonical JSON.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod assembler;
pub mod catalog;
pub mod comments;
pub mod descriptor;
pub mod diagnostics;
pub mod hashing;
pub mod map_key;
pub mod naming;
pub mod schema;
pub mod type_map;
pub mod well_known;

// ============================================================================
// SECTION: Errors
// ============================================================================

use thiserror::Error;

/// Fatal errors raised while generating a file.
///
/// # Invariants
/// - Variants always name the offending source file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Two methods flatten to the same `Service_Method` key.
    #[error("{file}: duplicate tool key {key}")]
    DuplicateToolKey {
        /// Source file path.
        file: String,
        /// Colliding flattened key.
        key: String,
    },
    /// Two methods produce the same tool name after mangling.
    #[error("{file}: duplicate tool name {name}")]
    DuplicateToolName {
        /// Source file path.
        file: String,
        /// Colliding tool name.
        name: String,
    },
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use assembler::AssemblerOptions;
pub use assembler::ToolAssembler;
pub use catalog::FileArtifact;
pub use catalog::Tool;
pub use catalog::ToolCatalog;
pub use comments::clean_comment;
pub use descriptor::Cardinality;
pub use descriptor::DescriptorPool;
pub use descriptor::EnumDescriptor;
pub use descriptor::FieldDescriptor;
pub use descriptor::FieldKind;
pub use descriptor::FileDescriptor;
pub use descriptor::MessageDescriptor;
pub use descriptor::MethodDescriptor;
pub use descriptor::NoRequiredFields;
pub use descriptor::OneofRef;
pub use descriptor::RequiredFieldLookup;
pub use descriptor::ServiceDescriptor;
pub use diagnostics::Diagnostic;
pub use diagnostics::DiagnosticKind;
pub use diagnostics::DiagnosticLevel;
pub use diagnostics::DiagnosticSink;
pub use naming::DEFAULT_MAX_TOOL_NAME_LEN;
pub use naming::mangle;
pub use schema::SchemaBuilder;
pub use schema::message_schema;
pub use type_map::kind_to_type;
