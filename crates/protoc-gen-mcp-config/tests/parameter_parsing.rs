//! Parameter parsing tests for protoc-gen-mcp-config.
// crates/protoc-gen-mcp-config/tests/parameter_parsing.rs
// =============================================================================
// Module: Parameter Parsing Tests
// Description: protoc parameter strings, overrides, and bounds.
// Purpose: Ensure option parsing is strict and fail-closed.
// =============================================================================

use std::io::Write;
use std::path::PathBuf;

use protoc_gen_mcp_config::ConfigError;
use protoc_gen_mcp_config::DiagnosticsMode;
use protoc_gen_mcp_config::GeneratorConfig;
use protoc_gen_mcp_config::MAX_TOOL_NAME_LEN;
use protoc_gen_mcp_config::MIN_TOOL_NAME_LEN;
use protoc_gen_mcp_config::OutputFormat;
use tempfile::NamedTempFile;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<GeneratorConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(config) => Err(format!("expected invalid parameter, got {}", config.effective_suffix())),
    }
}

fn base_file(content: &str) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(content.as_bytes()).map_err(|err| err.to_string())?;
    Ok(file)
}

// ============================================================================
// SECTION: Inline Parameters
// ============================================================================

#[test]
fn empty_parameter_yields_defaults() -> TestResult {
    let config = GeneratorConfig::from_parameter("").map_err(|err| err.to_string())?;
    if config != GeneratorConfig::default() {
        return Err("empty parameter must produce the default config".to_string());
    }
    Ok(())
}

#[test]
fn all_inline_keys_are_applied() -> TestResult {
    let config = GeneratorConfig::from_parameter(
        "format=rust,suffix=.tools.rs,max_tool_name_len=40,diagnostics=off,diagnostics_file=gen.jsonl",
    )
    .map_err(|err| err.to_string())?;
    let expected = GeneratorConfig {
        suffix: Some(".tools.rs".to_string()),
        max_tool_name_len: 40,
        format: OutputFormat::Rust,
        diagnostics: DiagnosticsMode::Off,
        diagnostics_file: Some(PathBuf::from("gen.jsonl")),
    };
    if config != expected {
        return Err("inline keys were not all applied".to_string());
    }
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> TestResult {
    assert_invalid(GeneratorConfig::from_parameter("paths=source_relative"), "unknown parameter key paths")
}

#[test]
fn unknown_format_is_rejected() -> TestResult {
    assert_invalid(GeneratorConfig::from_parameter("format=yaml"), "format must be one of")
}

#[test]
fn unknown_diagnostics_mode_is_rejected() -> TestResult {
    assert_invalid(GeneratorConfig::from_parameter("diagnostics=stdout"), "diagnostics must be one of")
}

#[test]
fn verbose_diagnostics_mode_is_accepted() -> TestResult {
    let config = GeneratorConfig::from_parameter("diagnostics=verbose").map_err(|err| err.to_string())?;
    if config.diagnostics != DiagnosticsMode::Verbose {
        return Err("diagnostics=verbose must select the verbose mode".to_string());
    }
    Ok(())
}

#[test]
fn non_numeric_name_limit_is_rejected() -> TestResult {
    assert_invalid(GeneratorConfig::from_parameter("max_tool_name_len=-3"), "non-negative integer")
}

#[test]
fn name_limit_bounds_are_inclusive() -> TestResult {
    for value in [MIN_TOOL_NAME_LEN, MAX_TOOL_NAME_LEN] {
        GeneratorConfig::from_parameter(&format!("max_tool_name_len={value}"))
            .map_err(|err| format!("{value}: {err}"))?;
    }
    assert_invalid(
        GeneratorConfig::from_parameter(&format!("max_tool_name_len={}", MIN_TOOL_NAME_LEN - 1)),
        "max_tool_name_len must be between",
    )?;
    assert_invalid(
        GeneratorConfig::from_parameter(&format!("max_tool_name_len={}", MAX_TOOL_NAME_LEN + 1)),
        "max_tool_name_len must be between",
    )
}

// ============================================================================
// SECTION: Base Files
// ============================================================================

#[test]
fn base_file_is_loaded_and_inline_keys_override() -> TestResult {
    let file = base_file("format = \"rust\"\nmax_tool_name_len = 32\nsuffix = \".base.rs\"\n")?;
    let parameter = format!("config={},suffix=.inline.rs", file.path().display());
    let config = GeneratorConfig::from_parameter(&parameter).map_err(|err| err.to_string())?;
    if config.format != OutputFormat::Rust || config.max_tool_name_len != 32 {
        return Err("base file values were not loaded".to_string());
    }
    if config.effective_suffix() != ".inline.rs" {
        return Err(format!("inline suffix did not override: {}", config.effective_suffix()));
    }
    Ok(())
}

#[test]
fn base_file_order_does_not_matter() -> TestResult {
    let file = base_file("max_tool_name_len = 32\n")?;
    let parameter = format!("max_tool_name_len=20,config={}", file.path().display());
    let config = GeneratorConfig::from_parameter(&parameter).map_err(|err| err.to_string())?;
    if config.max_tool_name_len != 20 {
        return Err(format!("expected inline override, got {}", config.max_tool_name_len));
    }
    Ok(())
}

#[test]
fn missing_base_file_is_an_io_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let parameter = format!("config={}", dir.path().join("absent.toml").display());
    assert_invalid(GeneratorConfig::from_parameter(&parameter), "config io error")
}

#[test]
fn base_file_with_unknown_field_is_rejected() -> TestResult {
    let file = base_file("output_dir = \"gen\"\n")?;
    let parameter = format!("config={}", file.path().display());
    assert_invalid(GeneratorConfig::from_parameter(&parameter), "config parse error")
}
