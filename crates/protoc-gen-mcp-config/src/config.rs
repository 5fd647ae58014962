// crates/protoc-gen-mcp-config/src/config.rs
// ============================================================================
// Module: Generator Configuration
// Description: Options model, TOML loading, and protoc parameter parsing.
// Purpose: Provide strict, fail-closed option parsing with hard limits.
// Dependencies: protoc-gen-mcp-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Options reach the generator through protoc's parameter string
//! (`--mcp_opt=key=value,...`). A `config=<path>` entry names a TOML file that
//! provides the base configuration; every other entry overrides the base.
//! Unknown keys, malformed pairs, and out-of-range values are rejected rather
//! than ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use protoc_gen_mcp_core::AssemblerOptions;
use protoc_gen_mcp_core::DEFAULT_MAX_TOOL_NAME_LEN;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Smallest accepted tool name limit; leaves room for the hash prefix.
pub const MIN_TOOL_NAME_LEN: usize = 8;
/// Largest accepted tool name limit.
pub const MAX_TOOL_NAME_LEN: usize = 1024;
/// Default output suffix for JSON catalogs.
pub const JSON_SUFFIX: &str = ".pb.mcp.json";
/// Default output suffix for Rust source modules.
pub const RUST_SUFFIX: &str = ".pb.mcp.rs";
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum output suffix length.
const MAX_SUFFIX_LENGTH: usize = 64;

/// Parameter key naming the TOML base file.
const KEY_CONFIG: &str = "config";
/// Parameter key for the output suffix.
const KEY_SUFFIX: &str = "suffix";
/// Parameter key for the tool name limit.
const KEY_MAX_TOOL_NAME_LEN: &str = "max_tool_name_len";
/// Parameter key for the output format.
const KEY_FORMAT: &str = "format";
/// Parameter key for the diagnostics mode.
const KEY_DIAGNOSTICS: &str = "diagnostics";
/// Parameter key for the diagnostics log file.
const KEY_DIAGNOSTICS_FILE: &str = "diagnostics_file";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Pretty-printed JSON catalog.
    #[default]
    Json,
    /// Self-contained Rust source module.
    Rust,
}

impl OutputFormat {
    /// Returns the output suffix used when none is configured.
    #[must_use]
    pub const fn default_suffix(self) -> &'static str {
        match self {
            Self::Json => JSON_SUFFIX,
            Self::Rust => RUST_SUFFIX,
        }
    }

    /// Parses a parameter value.
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "json" => Ok(Self::Json),
            "rust" => Ok(Self::Rust),
            other => Err(ConfigError::Invalid(format!(
                "format must be one of json, rust (got {other})"
            ))),
        }
    }
}

/// Where generation diagnostics are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticsMode {
    /// Warnings and errors as JSON lines on stderr.
    #[default]
    Stderr,
    /// Every diagnostic, informational ones included, on stderr.
    Verbose,
    /// Diagnostics are discarded.
    Off,
}

impl DiagnosticsMode {
    /// Parses a parameter value.
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "stderr" => Ok(Self::Stderr),
            "verbose" => Ok(Self::Verbose),
            "off" => Ok(Self::Off),
            other => Err(ConfigError::Invalid(format!(
                "diagnostics must be one of stderr, verbose, off (got {other})"
            ))),
        }
    }
}

/// Generator configuration.
///
/// # Invariants
/// - `max_tool_name_len` lies in `MIN_TOOL_NAME_LEN..=MAX_TOOL_NAME_LEN` once
///   validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Output file suffix; defaults by format.
    #[serde(default)]
    pub suffix: Option<String>,
    /// Maximum tool name length in bytes.
    #[serde(default = "default_max_tool_name_len")]
    pub max_tool_name_len: usize,
    /// Output file format.
    #[serde(default)]
    pub format: OutputFormat,
    /// Diagnostics destination.
    #[serde(default)]
    pub diagnostics: DiagnosticsMode,
    /// Optional JSON-lines diagnostics file, written in addition to the mode.
    #[serde(default)]
    pub diagnostics_file: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            suffix: None,
            max_tool_name_len: DEFAULT_MAX_TOOL_NAME_LEN,
            format: OutputFormat::default(),
            diagnostics: DiagnosticsMode::default(),
            diagnostics_file: None,
        }
    }
}

impl GeneratorConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, or validation fails.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        validate_path(path)?;
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses protoc's comma-separated `key=value` parameter string.
    ///
    /// An empty parameter yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed pairs, unknown or duplicate keys,
    /// invalid values, or a failing `config=` base file.
    pub fn from_parameter(parameter: &str) -> Result<Self, ConfigError> {
        let pairs = parse_pairs(parameter)?;
        let mut config = match pairs.iter().find(|(key, _)| *key == KEY_CONFIG) {
            Some((_, path)) => Self::load(Path::new(path))?,
            None => Self::default(),
        };
        for (key, value) in pairs {
            config.apply(key, value)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TOOL_NAME_LEN..=MAX_TOOL_NAME_LEN).contains(&self.max_tool_name_len) {
            return Err(ConfigError::Invalid(format!(
                "max_tool_name_len must be between {MIN_TOOL_NAME_LEN} and {MAX_TOOL_NAME_LEN}"
            )));
        }
        if let Some(suffix) = &self.suffix {
            validate_suffix(suffix)?;
        }
        if let Some(path) = &self.diagnostics_file {
            validate_path_string(KEY_DIAGNOSTICS_FILE, &path.to_string_lossy())?;
        }
        Ok(())
    }

    /// Returns the configured suffix, or the format's default.
    #[must_use]
    pub fn effective_suffix(&self) -> &str {
        match &self.suffix {
            Some(suffix) => suffix,
            None => self.format.default_suffix(),
        }
    }

    /// Returns the tool assembly options derived from this configuration.
    #[must_use]
    pub const fn assembler_options(&self) -> AssemblerOptions {
        AssemblerOptions {
            max_tool_name_len: self.max_tool_name_len,
        }
    }

    /// Applies one parameter override.
    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            KEY_CONFIG => {}
            KEY_SUFFIX => self.suffix = Some(value.to_string()),
            KEY_MAX_TOOL_NAME_LEN => {
                self.max_tool_name_len = value.parse().map_err(|_| {
                    ConfigError::Invalid(format!(
                        "max_tool_name_len must be a non-negative integer (got {value})"
                    ))
                })?;
            }
            KEY_FORMAT => self.format = OutputFormat::parse(value)?,
            KEY_DIAGNOSTICS => self.diagnostics = DiagnosticsMode::parse(value)?,
            KEY_DIAGNOSTICS_FILE => self.diagnostics_file = Some(PathBuf::from(value)),
            other => {
                return Err(ConfigError::Invalid(format!("unknown parameter key {other}")));
            }
        }
        Ok(())
    }
}

/// Serde default for `max_tool_name_len`.
const fn default_max_tool_name_len() -> usize {
    DEFAULT_MAX_TOOL_NAME_LEN
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Splits the parameter string into trimmed `(key, value)` pairs.
fn parse_pairs(parameter: &str) -> Result<Vec<(&str, &str)>, ConfigError> {
    let mut seen = BTreeSet::new();
    let mut pairs = Vec::new();
    for segment in parameter.split(',').map(str::trim).filter(|segment| !segment.is_empty()) {
        let Some((key, value)) = segment.split_once('=') else {
            return Err(ConfigError::Invalid(format!(
                "malformed parameter {segment}; expected key=value"
            )));
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() {
            return Err(ConfigError::Invalid(format!("parameter {segment} has an empty key")));
        }
        if !seen.insert(key) {
            return Err(ConfigError::Invalid(format!("duplicate parameter key {key}")));
        }
        pairs.push((key, value));
    }
    Ok(pairs)
}

/// Validates the output suffix.
fn validate_suffix(suffix: &str) -> Result<(), ConfigError> {
    if suffix.is_empty() {
        return Err(ConfigError::Invalid("suffix must be non-empty".to_string()));
    }
    if suffix.len() > MAX_SUFFIX_LENGTH {
        return Err(ConfigError::Invalid("suffix exceeds max length".to_string()));
    }
    if suffix.contains(['/', '\\']) {
        return Err(ConfigError::Invalid("suffix must not contain path separators".to_string()));
    }
    Ok(())
}

/// Validates the config path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
