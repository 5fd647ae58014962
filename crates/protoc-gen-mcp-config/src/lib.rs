// crates/protoc-gen-mcp-config/src/lib.rs
// ============================================================================
// Module: protoc-gen-mcp Config Library
// Description: Generator options model and validation.
// Purpose: Single source of truth for plugin parameter semantics.
// Dependencies: protoc-gen-mcp-core, serde, toml
// ============================================================================

//! ## Overview
//! `protoc-gen-mcp-config` parses the plugin parameter string and optional
//! TOML base file into a validated [`GeneratorConfig`]. Validation fails
//! closed: unknown keys and out-of-range values are errors.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
