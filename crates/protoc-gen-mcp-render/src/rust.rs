// crates/protoc-gen-mcp-render/src/rust.rs
// ============================================================================
// Module: Rust Module Rendering
// Description: Self-contained Rust source exposing tools as constants.
// Purpose: Let Rust MCP servers embed tool definitions at compile time.
// Dependencies: protoc-gen-mcp-core
// ============================================================================

//! ## Overview
//! The rendered module declares a `McpTool` struct, one `pub const` per tool
//! named after its flattened key in `SCREAMING_SNAKE_CASE`, one `pub mod` per
//! service listing its tools by method name, and a `TOOLS` slice over the
//! whole file. The module uses only plain comments so it can be pulled in
//! with `include!`.
//!
//! Identifiers are derived by case folding, so distinct keys such as
//! `FooBar_Get` and `Foo_Bar_Get` can map to the same constant. Such
//! collisions fail the render instead of producing uncompilable output.

use std::collections::BTreeMap;

use protoc_gen_mcp_core::FileArtifact;
use protoc_gen_mcp_core::Tool;

use crate::GENERATOR;
use crate::RenderError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Rust keywords that cannot be used as module names.
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true",
    "try", "type", "unsafe", "use", "where", "while", "yield",
];

/// Struct definition emitted at the top of every module.
const MCP_TOOL_STRUCT: &str = "\
/// MCP tool generated from a unary RPC method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McpTool {
    /// Tool name (possibly shortened to the configured limit).
    pub name: &'static str,
    /// Method documentation.
    pub description: &'static str,
    /// Canonical JSON Schema for the request message.
    pub input_schema: &'static str,
    /// Fully qualified request message name.
    pub request_type: &'static str,
    /// Fully qualified response message name.
    pub response_type: &'static str,
}
";

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the Rust module for a file artifact.
///
/// # Errors
///
/// Returns [`RenderError::IdentifierCollision`] when two flattened keys or
/// two service names fold to the same identifier.
pub fn render_rust(artifact: &FileArtifact) -> Result<String, RenderError> {
    let catalog = &artifact.catalog;
    let constants = assign_identifiers(catalog.tools().keys(), screaming_snake_case)?;
    let modules = assign_identifiers(catalog.services().keys(), module_identifier)?;

    let mut out = String::new();
    out.push_str("// @generated by ");
    out.push_str(GENERATOR);
    out.push_str(". DO NOT EDIT.\n");
    out.push_str("// source: ");
    out.push_str(&artifact.source_path);
    out.push('\n');
    if !artifact.package.is_empty() {
        out.push_str("// package: ");
        out.push_str(&artifact.package);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(MCP_TOOL_STRUCT);

    for (key, tool) in catalog.tools() {
        out.push('\n');
        render_tool_constant(&mut out, &constants[key.as_str()], tool);
    }

    for (service, methods) in catalog.services() {
        out.push('\n');
        out.push_str("/// Tools exposed by service `");
        out.push_str(service);
        out.push_str("`, keyed by method name.\n");
        out.push_str("pub mod ");
        out.push_str(&modules[service.as_str()]);
        out.push_str(" {\n");
        out.push_str("    /// Tools keyed by method name.\n");
        out.push_str("    pub const TOOLS: &[(&str, &super::McpTool)] = &[");
        if !methods.is_empty() {
            out.push('\n');
        }
        for method in methods.keys() {
            let constant = &constants[format!("{service}_{method}").as_str()];
            out.push_str("        (");
            out.push_str(&rust_string_literal(method));
            out.push_str(", &super::");
            out.push_str(constant);
            out.push_str("),\n");
        }
        if !methods.is_empty() {
            out.push_str("    ");
        }
        out.push_str("];\n");
        out.push_str("}\n");
    }

    out.push('\n');
    out.push_str("/// Every tool in this file, ordered by `Service_Method` key.\n");
    out.push_str("pub const TOOLS: &[&McpTool] = &[");
    if !constants.is_empty() {
        out.push('\n');
    }
    for key in catalog.tools().keys() {
        out.push_str("    &");
        out.push_str(&constants[key.as_str()]);
        out.push_str(",\n");
    }
    out.push_str("];\n");
    Ok(out)
}

/// Appends one tool constant.
fn render_tool_constant(out: &mut String, identifier: &str, tool: &Tool) {
    out.push_str("/// `");
    out.push_str(&tool.request_type);
    out.push_str("` -> `");
    out.push_str(&tool.response_type);
    out.push_str("`\n");
    out.push_str("pub const ");
    out.push_str(identifier);
    out.push_str(": McpTool = McpTool {\n");
    for (field, value) in [
        ("name", tool.name.as_str()),
        ("description", tool.description.as_str()),
        ("input_schema", tool.raw_input_schema.as_str()),
        ("request_type", tool.request_type.as_str()),
        ("response_type", tool.response_type.as_str()),
    ] {
        out.push_str("    ");
        out.push_str(field);
        out.push_str(": ");
        out.push_str(&rust_string_literal(value));
        out.push_str(",\n");
    }
    out.push_str("};\n");
}

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Maps each name to a derived identifier, rejecting collisions.
fn assign_identifiers<'a>(
    names: impl Iterator<Item = &'a String>,
    derive: fn(&str) -> String,
) -> Result<BTreeMap<&'a str, String>, RenderError> {
    let mut owners: BTreeMap<String, &str> = BTreeMap::new();
    let mut assigned = BTreeMap::new();
    for name in names {
        let identifier = derive(name);
        if let Some(previous) = owners.insert(identifier.clone(), name) {
            return Err(RenderError::IdentifierCollision(format!(
                "{previous} and {name} both render as {identifier}"
            )));
        }
        assigned.insert(name.as_str(), identifier);
    }
    Ok(assigned)
}

/// Splits a name into lowercase words at case boundaries and non-alphanumerics.
fn words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (index, ch) in chars.iter().copied().enumerate() {
        if !ch.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if ch.is_ascii_uppercase() && !current.is_empty() {
            let previous = chars[index - 1];
            let next_is_lower = chars.get(index + 1).is_some_and(char::is_ascii_lowercase);
            if previous.is_ascii_lowercase()
                || previous.is_ascii_digit()
                || (previous.is_ascii_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch.to_ascii_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Converts a flattened key such as `Greeter_SayHello` to `GREETER_SAY_HELLO`.
fn screaming_snake_case(name: &str) -> String {
    let identifier = words(name).join("_").to_ascii_uppercase();
    leading_digit_guard(identifier)
}

/// Converts a service name to a `snake_case` module name.
fn module_identifier(name: &str) -> String {
    let identifier = leading_digit_guard(words(name).join("_"));
    if RUST_KEYWORDS.contains(&identifier.as_str()) {
        format!("{identifier}_")
    } else {
        identifier
    }
}

/// Prefixes identifiers that would start with a digit; names without any
/// alphanumeric character become `_unnamed`.
fn leading_digit_guard(identifier: String) -> String {
    match identifier.chars().next() {
        None => "_unnamed".to_string(),
        Some(first) if first.is_ascii_digit() => format!("_{identifier}"),
        Some(_) => identifier,
    }
}

/// Renders a Rust string literal.
fn rust_string_literal(value: &str) -> String {
    format!("\"{}\"", value.escape_default())
}
