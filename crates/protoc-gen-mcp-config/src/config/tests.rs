// crates/protoc-gen-mcp-config/src/config/tests.rs
// ============================================================================
// Module: Generator Configuration Unit Tests
// Description: Pair splitting, suffix rules, and defaults.
// Purpose: Pin private parsing helpers that integration tests cannot reach.
// Dependencies: protoc-gen-mcp-config
// ============================================================================

//! ## Overview
//! Exercises the private helpers behind parameter parsing.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions use panic-based helpers for clarity."
)]

use super::*;

#[test]
fn pairs_are_trimmed_and_empty_segments_ignored() {
    let pairs = parse_pairs(" format = rust ,, suffix=.x.json, ").unwrap();
    assert_eq!(pairs, vec![("format", "rust"), ("suffix", ".x.json")]);
}

#[test]
fn values_may_contain_equals_signs() {
    let pairs = parse_pairs("diagnostics_file=logs/a=b.jsonl").unwrap();
    assert_eq!(pairs, vec![("diagnostics_file", "logs/a=b.jsonl")]);
}

#[test]
fn pairs_without_equals_are_rejected() {
    let err = parse_pairs("format").unwrap_err();
    assert!(err.to_string().contains("expected key=value"), "{err}");
}

#[test]
fn empty_keys_are_rejected() {
    let err = parse_pairs("=json").unwrap_err();
    assert!(err.to_string().contains("empty key"), "{err}");
}

#[test]
fn duplicate_keys_are_rejected() {
    let err = parse_pairs("format=json,format=rust").unwrap_err();
    assert!(err.to_string().contains("duplicate parameter key format"), "{err}");
}

#[test]
fn suffix_rules() {
    assert!(validate_suffix(".pb.mcp.json").is_ok());
    assert!(validate_suffix("").is_err());
    assert!(validate_suffix("../escape.json").is_err());
    assert!(validate_suffix(r"..\escape.json").is_err());
    assert!(validate_suffix(&".x".repeat(MAX_SUFFIX_LENGTH)).is_err());
}

#[test]
fn defaults_match_generator_defaults() {
    let config = GeneratorConfig::default();
    assert_eq!(config.max_tool_name_len, DEFAULT_MAX_TOOL_NAME_LEN);
    assert_eq!(config.format, OutputFormat::Json);
    assert_eq!(config.diagnostics, DiagnosticsMode::Stderr);
    assert_eq!(config.effective_suffix(), JSON_SUFFIX);
    assert!(config.validate().is_ok());
}

#[test]
fn format_selects_default_suffix() {
    let config = GeneratorConfig {
        format: OutputFormat::Rust,
        ..GeneratorConfig::default()
    };
    assert_eq!(config.effective_suffix(), RUST_SUFFIX);
    let custom = GeneratorConfig {
        suffix: Some(".tools.rs".to_string()),
        ..config
    };
    assert_eq!(custom.effective_suffix(), ".tools.rs");
}

#[test]
fn assembler_options_carry_name_limit() {
    let config = GeneratorConfig {
        max_tool_name_len: 48,
        ..GeneratorConfig::default()
    };
    assert_eq!(config.assembler_options().max_tool_name_len, 48);
}
