// crates/protoc-gen-mcp-core/src/well_known.rs
// ============================================================================
// Module: Well-Known Type Overrides
// Description: Hand-written schemas for google.protobuf well-known types.
// Purpose: Short-circuit structural translation for types with a JSON mapping.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The protobuf JSON mapping encodes well-known types specially (timestamps as
//! RFC 3339 strings, wrappers as bare nullable scalars, and so on). These
//! schemas are consulted before any recursive message expansion; any type not
//! listed here falls through to the generic path.

use serde_json::Value;
use serde_json::json;

/// Returns the override schema for a fully qualified message name, if any.
#[must_use]
pub fn well_known_schema(full_name: &str) -> Option<Value> {
    let schema = match full_name {
        "google.protobuf.Timestamp" => json!({
            "type": "string",
            "format": "date-time",
        }),
        "google.protobuf.Duration" => json!({
            "type": "string",
            "pattern": r"^-?[0-9]+(\.[0-9]+)?s$",
        }),
        "google.protobuf.Struct" => json!({
            "type": "object",
            "additionalProperties": true,
        }),
        "google.protobuf.Value" => json!({}),
        "google.protobuf.ListValue" => json!({
            "type": "array",
            "items": {},
        }),
        "google.protobuf.FieldMask" => json!({
            "type": "string",
        }),
        "google.protobuf.Any" => json!({
            "type": "object",
            "properties": {
                "@type": { "type": "string" },
                "value": {},
            },
            "required": ["@type"],
        }),
        "google.protobuf.DoubleValue"
        | "google.protobuf.FloatValue"
        | "google.protobuf.Int32Value"
        | "google.protobuf.UInt32Value" => json!({
            "type": "number",
            "nullable": true,
        }),
        "google.protobuf.Int64Value" | "google.protobuf.UInt64Value" => json!({
            "type": "string",
            "nullable": true,
        }),
        "google.protobuf.StringValue" => json!({
            "type": "string",
            "nullable": true,
        }),
        "google.protobuf.BoolValue" => json!({
            "type": "boolean",
            "nullable": true,
        }),
        "google.protobuf.BytesValue" => json!({
            "type": "string",
            "format": "byte",
            "nullable": true,
        }),
        _ => return None,
    };
    Some(schema)
}
