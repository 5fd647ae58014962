//! Config load validation tests for protoc-gen-mcp-config.
// crates/protoc-gen-mcp-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

use std::io::Write;
use std::path::Path;

use protoc_gen_mcp_config::ConfigError;
use protoc_gen_mcp_config::GeneratorConfig;
use protoc_gen_mcp_config::MAX_CONFIG_FILE_SIZE;
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
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    assert_invalid(GeneratorConfig::load(Path::new(&long_path)), "config path exceeds max length")
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    assert_invalid(
        GeneratorConfig::load(Path::new(&long_component)),
        "config path component too long",
    )
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'#'; MAX_CONFIG_FILE_SIZE + 1];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_invalid(GeneratorConfig::load(file.path()), "config file exceeds size limit")
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(GeneratorConfig::load(file.path()), "config file must be utf-8")
}

#[test]
fn load_validates_bounds() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"max_tool_name_len = 4\n").map_err(|err| err.to_string())?;
    assert_invalid(GeneratorConfig::load(file.path()), "max_tool_name_len must be between")
}

#[test]
fn load_rejects_empty_diagnostics_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"diagnostics_file = \"  \"\n").map_err(|err| err.to_string())?;
    assert_invalid(GeneratorConfig::load(file.path()), "diagnostics_file must be non-empty")
}

#[test]
fn load_accepts_empty_file_as_defaults() -> TestResult {
    let file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let config = GeneratorConfig::load(file.path()).map_err(|err| err.to_string())?;
    if config != GeneratorConfig::default() {
        return Err("empty config file must produce defaults".to_string());
    }
    Ok(())
}
