// crates/protoc-gen-mcp-core/src/map_key.rs
// ============================================================================
// Module: Map Key Constraints
// Description: JSON Schema `propertyNames` constraints for protobuf map keys.
// Purpose: Preserve key-kind semantics when maps become JSON objects.
// Dependencies: crate::descriptor, serde_json
// ============================================================================

//! ## Overview
//! JSON object keys are always strings, so protobuf map keys are encoded as
//! strings constrained by pattern or enumeration. Protobuf only allows
//! integral, boolean and string key kinds; anything else gets a plain string
//! constraint.

use serde_json::Value;
use serde_json::json;

use crate::descriptor::FieldKind;

/// Pattern for non-negative decimal integers without leading zeros.
pub const UNSIGNED_KEY_PATTERN: &str = r"^(0|[1-9]\d*)$";
/// Pattern for decimal integers without leading zeros.
pub const SIGNED_KEY_PATTERN: &str = r"^-?(0|[1-9]\d*)$";

/// Returns the `propertyNames` constraint for a map key kind.
#[must_use]
pub fn key_constraint(key: FieldKind) -> Value {
    if key == FieldKind::Bool {
        json!({ "type": "string", "enum": ["true", "false"] })
    } else if key.is_unsigned_integer() {
        json!({ "type": "string", "pattern": UNSIGNED_KEY_PATTERN })
    } else if key.is_signed_integer() {
        json!({ "type": "string", "pattern": SIGNED_KEY_PATTERN })
    } else {
        json!({ "type": "string" })
    }
}

/// Builds the object schema for a map field from its key kind and value schema.
#[must_use]
pub fn map_schema(key: FieldKind, value_schema: Value) -> Value {
    json!({
        "type": "object",
        "propertyNames": key_constraint(key),
        "additionalProperties": value_schema,
    })
}
