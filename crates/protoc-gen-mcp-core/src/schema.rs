// crates/protoc-gen-mcp-core/src/schema.rs
// ============================================================================
// Module: Message Schema Builder
// Description: Recursive translation of message descriptors into JSON Schema.
// Purpose: Produce the input schema for each tool from its request message.
// Dependencies: crate::{descriptor, map_key, type_map, well_known}, serde_json
// ============================================================================

//! ## Overview
//! [`SchemaBuilder`] walks a message's fields in declaration order. Ordinary
//! fields become `properties` (and `required` entries when the required-field
//! lookup says so). Fields of a declared oneof become alternatives of shape
//! `{properties: {field: schema}, required: [field]}`; the alternatives of one
//! group form a `oneOf`, and each group becomes one entry of a top-level
//! `anyOf`. Synthetic oneofs (proto3 `optional`) are ordinary fields.
//!
//! ### Recursion
//! The builder keeps the chain of messages currently being expanded. A field
//! that refers back to a message on that chain gets an unconstrained schema
//! carrying a `$comment` instead of being expanded again. The same message
//! reached through sibling fields is expanded each time.
//!
//! ### Determinism
//! Object keys serialize in sorted order; `required` follows field order and
//! `anyOf` follows the order in which each oneof group is first declared.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::descriptor::Cardinality;
use crate::descriptor::DescriptorPool;
use crate::descriptor::FieldDescriptor;
use crate::descriptor::FieldKind;
use crate::descriptor::MessageDescriptor;
use crate::descriptor::RequiredFieldLookup;
use crate::map_key::map_schema;
use crate::type_map::JSON_STRING;
use crate::type_map::kind_to_type;
use crate::well_known::well_known_schema;

/// `$comment` attached to each `anyOf` entry produced from a oneof group.
pub const ONEOF_GROUP_COMMENT: &str =
    "One oneOf group per protobuf oneof block in the message; each alternative sets one field.";

// ============================================================================
// SECTION: Schema Builder
// ============================================================================

/// Builds JSON Schema documents for messages resolved through a pool.
pub struct SchemaBuilder<'a> {
    /// Pool used to resolve message and enum references.
    pool: &'a DescriptorPool,
    /// Required-field capability.
    required: &'a dyn RequiredFieldLookup,
    /// Messages currently being expanded, outermost first.
    path: Vec<String>,
    /// Messages that were cut off as recursive back-references.
    recursive: BTreeSet<String>,
}

impl<'a> SchemaBuilder<'a> {
    /// Creates a builder over the given pool and required-field lookup.
    #[must_use]
    pub fn new(pool: &'a DescriptorPool, required: &'a dyn RequiredFieldLookup) -> Self {
        Self {
            pool,
            required,
            path: Vec::new(),
            recursive: BTreeSet::new(),
        }
    }

    /// Returns the names of messages replaced by open schemas so far.
    #[must_use]
    pub const fn recursive_references(&self) -> &BTreeSet<String> {
        &self.recursive
    }

    /// Builds the object schema for a message.
    pub fn message_schema(&mut self, message: &MessageDescriptor) -> Value {
        self.path.push(message.full_name.clone());

        let mut properties = Map::new();
        let mut required = Vec::new();
        let mut groups: Vec<(String, Vec<Value>)> = Vec::new();

        for field in &message.fields {
            let schema = self.field_schema(field);
            if let Some(group) = field.declared_oneof() {
                let alternative = oneof_alternative(&field.name, schema);
                match groups.iter_mut().find(|(name, _)| name == group) {
                    Some((_, alternatives)) => alternatives.push(alternative),
                    None => groups.push((group.to_string(), vec![alternative])),
                }
            } else {
                properties.insert(field.name.clone(), schema);
                if self.required.is_required(field) {
                    required.push(Value::String(field.name.clone()));
                }
            }
        }

        self.path.pop();

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert("required".to_string(), Value::Array(required));
        if !groups.is_empty() {
            let any_of = groups
                .into_iter()
                .map(|(_, alternatives)| {
                    json!({
                        "$comment": ONEOF_GROUP_COMMENT,
                        "oneOf": alternatives,
                    })
                })
                .collect();
            schema.insert("anyOf".to_string(), Value::Array(any_of));
        }
        Value::Object(schema)
    }

    /// Builds the schema for a single field, honouring its cardinality.
    pub fn field_schema(&mut self, field: &FieldDescriptor) -> Value {
        match &field.cardinality {
            Cardinality::Map {
                key,
                value,
            } => {
                let value_schema = self.field_schema(value);
                map_schema(*key, value_schema)
            }
            Cardinality::List => json!({
                "type": "array",
                "items": self.singular_schema(field),
            }),
            Cardinality::Singular => self.singular_schema(field),
        }
    }

    /// Builds the schema for one value of the field's kind.
    fn singular_schema(&mut self, field: &FieldDescriptor) -> Value {
        if field.kind.is_message() {
            return self.message_reference(field.type_name.as_deref());
        }
        if field.kind == FieldKind::Enum {
            return self.enum_reference(field.type_name.as_deref());
        }
        let mut schema = Map::new();
        schema.insert("type".to_string(), json!(kind_to_type(field.kind)));
        if field.kind == FieldKind::Bytes {
            schema.insert("contentEncoding".to_string(), json!("base64"));
            schema.insert("format".to_string(), json!("byte"));
        }
        Value::Object(schema)
    }

    /// Resolves a message reference through overrides, the recursion guard, and the pool.
    fn message_reference(&mut self, type_name: Option<&str>) -> Value {
        let Some(type_name) = type_name else {
            return json!({});
        };
        if let Some(schema) = well_known_schema(type_name) {
            return schema;
        }
        if self.path.iter().any(|entry| entry == type_name) {
            self.recursive.insert(type_name.to_string());
            return json!({ "$comment": format!("recursive reference to {type_name}") });
        }
        let pool = self.pool;
        pool.message(type_name).map_or_else(|| json!({}), |message| self.message_schema(message))
    }

    /// Resolves an enum reference into a string enumeration.
    fn enum_reference(&self, type_name: Option<&str>) -> Value {
        let descriptor = type_name.and_then(|name| self.pool.enumeration(name));
        descriptor.map_or_else(
            || json!({ "type": JSON_STRING }),
            |descriptor| {
                json!({
                    "type": JSON_STRING,
                    "enum": descriptor.values,
                })
            },
        )
    }
}

/// Builds one `oneOf` alternative requiring exactly the given field.
fn oneof_alternative(name: &str, schema: Value) -> Value {
    let mut properties = Map::new();
    properties.insert(name.to_string(), schema);
    json!({
        "properties": properties,
        "required": [name],
    })
}

/// Builds the schema for a message without tracking recursion diagnostics.
#[must_use]
pub fn message_schema(
    pool: &DescriptorPool,
    required: &dyn RequiredFieldLookup,
    message: &MessageDescriptor,
) -> Value {
    SchemaBuilder::new(pool, required).message_schema(message)
}
