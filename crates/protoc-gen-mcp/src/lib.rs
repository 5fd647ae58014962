// crates/protoc-gen-mcp/src/lib.rs
// ============================================================================
// Module: protoc-gen-mcp Plugin Library
// Description: protoc plugin that emits MCP tool catalogs for unary RPCs.
// Purpose: Expose the plugin driver for the binary and for tests.
// Dependencies: prost, prost-types, protoc-gen-mcp-{core,config,render}
// ============================================================================

//! ## Overview
//! protoc invokes the plugin with an encoded `CodeGeneratorRequest` on stdin
//! and reads an encoded `CodeGeneratorResponse` from stdout. [`run`] performs
//! one invocation over in-memory bytes; the binary adds stdin and stdout
//! handling.
//!
//! ## Index
//! - Wire types: [`wire`]
//! - Descriptor ingestion: [`ingest`]
//! - Driver: [`plugin`]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod ingest;
pub mod plugin;
pub mod wire;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use ingest::IngestedRequest;
pub use ingest::RequiredFieldSet;
pub use plugin::FEATURE_PROTO3_OPTIONAL;
pub use plugin::MAX_REQUEST_BYTES;
pub use plugin::PluginError;
pub use plugin::generate;
pub use plugin::read_request;
pub use plugin::run;
