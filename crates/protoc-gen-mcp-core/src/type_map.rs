// crates/protoc-gen-mcp-core/src/type_map.rs
// ============================================================================
// Module: Scalar Type Mapping
// Description: Protobuf field kind to JSON Schema primitive type names.
// Purpose: Single source of truth for the numeric encoding policy.
// Dependencies: crate::descriptor
// ============================================================================

//! ## Overview
//! 64-bit integers map to `"string"` because JSON numbers are commonly decoded
//! as IEEE-754 doubles, which cannot represent the full 64-bit range. Kinds
//! without a scalar mapping (messages, groups, unknown wire values) fall back
//! to `"string"`; callers handle composite kinds before reaching this table.

use crate::descriptor::FieldKind;

/// JSON Schema `type` for booleans.
pub const JSON_BOOLEAN: &str = "boolean";
/// JSON Schema `type` for strings.
pub const JSON_STRING: &str = "string";
/// JSON Schema `type` for integers.
pub const JSON_INTEGER: &str = "integer";
/// JSON Schema `type` for numbers.
pub const JSON_NUMBER: &str = "number";

/// Returns the JSON Schema primitive type name for a field kind.
#[must_use]
pub const fn kind_to_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Bool => JSON_BOOLEAN,
        FieldKind::Int32
        | FieldKind::Sint32
        | FieldKind::Sfixed32
        | FieldKind::Uint32
        | FieldKind::Fixed32 => JSON_INTEGER,
        FieldKind::Float | FieldKind::Double => JSON_NUMBER,
        FieldKind::String
        | FieldKind::Bytes
        | FieldKind::Enum
        | FieldKind::Int64
        | FieldKind::Sint64
        | FieldKind::Sfixed64
        | FieldKind::Uint64
        | FieldKind::Fixed64
        | FieldKind::Message
        | FieldKind::Group
        | FieldKind::Unknown(_) => JSON_STRING,
    }
}
