// crates/protoc-gen-mcp/src/ingest.rs
// ============================================================================
// Module: Descriptor Ingestion
// Description: Conversion of decoded plugin requests into the core model.
// Purpose: Build the descriptor pool, file list, and required-field set.
// Dependencies: protoc-gen-mcp-core, crate::wire
// ============================================================================

//! ## Overview
//! Every file in the request contributes its messages and enums (nested ones
//! included) to a single [`DescriptorPool`], so cross-file references
//! resolve. Only files listed in `file_to_generate` are marked for
//! generation.
//!
//! Map fields appear on the wire as repeated fields of a synthesized
//! `*Entry` message flagged `map_entry`; those entries are folded into
//! [`Cardinality::Map`](protoc_gen_mcp_core::Cardinality::Map) and never
//! enter the pool themselves.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;

use protoc_gen_mcp_core::DescriptorPool;
use protoc_gen_mcp_core::EnumDescriptor;
use protoc_gen_mcp_core::FieldDescriptor;
use protoc_gen_mcp_core::FieldKind;
use protoc_gen_mcp_core::FileDescriptor;
use protoc_gen_mcp_core::MessageDescriptor;
use protoc_gen_mcp_core::MethodDescriptor;
use protoc_gen_mcp_core::OneofRef;
use protoc_gen_mcp_core::RequiredFieldLookup;
use protoc_gen_mcp_core::ServiceDescriptor;

use crate::wire::CodeGeneratorRequest;
use crate::wire::DescriptorProto;
use crate::wire::EnumDescriptorProto;
use crate::wire::FIELD_BEHAVIOR_REQUIRED;
use crate::wire::FILE_SERVICE_FIELD;
use crate::wire::FieldDescriptorProto;
use crate::wire::FileDescriptorProto;
use crate::wire::LABEL_REPEATED;
use crate::wire::SERVICE_METHOD_FIELD;
use crate::wire::SourceCodeInfo;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Field number of a map entry's key.
const MAP_KEY_NUMBER: i32 = 1;
/// Field number of a map entry's value.
const MAP_VALUE_NUMBER: i32 = 2;
/// Name given to a map entry's value field.
const MAP_VALUE_NAME: &str = "value";

// ============================================================================
// SECTION: Required Fields
// ============================================================================

/// Fully qualified names of fields annotated `field_behavior = REQUIRED`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredFieldSet {
    /// Required field names.
    fields: BTreeSet<String>,
}

impl RequiredFieldSet {
    /// Marks a field as required.
    pub fn insert(&mut self, full_name: impl Into<String>) {
        self.fields.insert(full_name.into());
    }

    /// Returns true when the named field is required.
    #[must_use]
    pub fn contains(&self, full_name: &str) -> bool {
        self.fields.contains(full_name)
    }

    /// Returns the number of required fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when no field is required.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl RequiredFieldLookup for RequiredFieldSet {
    fn is_required(&self, field: &FieldDescriptor) -> bool {
        self.contains(&field.full_name)
    }
}

// ============================================================================
// SECTION: Ingestion
// ============================================================================

/// Core model built from a plugin request.
#[derive(Debug, Clone, Default)]
pub struct IngestedRequest {
    /// Every message and enum across the request.
    pub pool: DescriptorPool,
    /// Required-field annotations.
    pub required: RequiredFieldSet,
    /// Files in request order.
    pub files: Vec<FileDescriptor>,
}

/// Converts a decoded request into the core model.
#[must_use]
pub fn ingest(request: &CodeGeneratorRequest) -> IngestedRequest {
    let mut messages = Vec::new();
    let mut enums = Vec::new();
    for file in &request.proto_file {
        let package = file.package.as_deref().unwrap_or_default();
        collect_scope(package, &file.message_type, &file.enum_type, &mut messages, &mut enums);
    }

    let entries: BTreeMap<String, &DescriptorProto> = messages
        .iter()
        .filter(|(_, message)| is_map_entry(message))
        .map(|(full_name, message)| (full_name.clone(), *message))
        .collect();

    let mut ingested = IngestedRequest::default();
    for descriptor in enums {
        ingested.pool.add_enum(descriptor);
    }
    for (full_name, message) in &messages {
        if is_map_entry(message) {
            continue;
        }
        let fields = message
            .field
            .iter()
            .map(|field| convert_field(full_name, message, field, &entries, &mut ingested.required))
            .collect();
        ingested.pool.add_message(MessageDescriptor::new(full_name.clone(), fields));
    }

    let requested: BTreeSet<&str> = request.file_to_generate.iter().map(String::as_str).collect();
    ingested.files = request
        .proto_file
        .iter()
        .map(|file| {
            let path = file.name.as_deref().unwrap_or_default();
            convert_file(file, requested.contains(path))
        })
        .collect();
    ingested
}

/// Collects messages and enums declared in a scope, depth first.
fn collect_scope<'a>(
    scope: &str,
    messages: &'a [DescriptorProto],
    enums: &[EnumDescriptorProto],
    out_messages: &mut Vec<(String, &'a DescriptorProto)>,
    out_enums: &mut Vec<EnumDescriptor>,
) {
    for enumeration in enums {
        let full_name = qualify(scope, enumeration.name.as_deref().unwrap_or_default());
        let values =
            enumeration.value.iter().map(|value| value.name.clone().unwrap_or_default()).collect();
        out_enums.push(EnumDescriptor::new(full_name, values));
    }
    for message in messages {
        let full_name = qualify(scope, message.name.as_deref().unwrap_or_default());
        collect_scope(&full_name, &message.nested_type, &message.enum_type, out_messages, out_enums);
        out_messages.push((full_name, message));
    }
}

/// Converts one field, recording its required marker.
fn convert_field(
    scope: &str,
    message: &DescriptorProto,
    field: &FieldDescriptorProto,
    entries: &BTreeMap<String, &DescriptorProto>,
    required: &mut RequiredFieldSet,
) -> FieldDescriptor {
    let name = field.name.clone().unwrap_or_default();
    let full_name = qualify(scope, &name);
    if field
        .options
        .as_ref()
        .is_some_and(|options| options.field_behavior.contains(&FIELD_BEHAVIOR_REQUIRED))
    {
        required.insert(full_name.clone());
    }

    let repeated = field.label == Some(LABEL_REPEATED);
    let type_name = field.type_name.as_deref().map(strip_leading_dot);
    let entry =
        type_name.and_then(|type_name| entries.get(type_name).map(|entry| (type_name, *entry)));
    let mut descriptor = match entry {
        Some((entry_name, entry)) if repeated => {
            map_field(&name, entry_name, entry, entries, required)
        }
        _ => {
            let mut descriptor =
                FieldDescriptor::new(&name, FieldKind::from_wire(field.r#type.unwrap_or_default()));
            if let Some(type_name) = type_name {
                descriptor = descriptor.with_type_name(type_name);
            }
            if repeated {
                descriptor = descriptor.repeated();
            }
            descriptor
        }
    }
    .with_full_name(full_name);

    if let Some(oneof) = oneof_ref(message, field) {
        descriptor = descriptor.in_oneof(oneof);
    }
    descriptor
}

/// Folds a map entry message into a map field.
fn map_field(
    name: &str,
    entry_name: &str,
    entry: &DescriptorProto,
    entries: &BTreeMap<String, &DescriptorProto>,
    required: &mut RequiredFieldSet,
) -> FieldDescriptor {
    let key = entry
        .field
        .iter()
        .find(|field| field.number == Some(MAP_KEY_NUMBER))
        .map_or(FieldKind::String, |field| FieldKind::from_wire(field.r#type.unwrap_or_default()));
    let value = entry.field.iter().find(|field| field.number == Some(MAP_VALUE_NUMBER)).map_or_else(
        || FieldDescriptor::new(MAP_VALUE_NAME, FieldKind::String),
        |field| convert_field(entry_name, entry, field, entries, required),
    );
    FieldDescriptor::map(name, key, value)
}

/// Resolves the oneof a field belongs to.
fn oneof_ref(message: &DescriptorProto, field: &FieldDescriptorProto) -> Option<OneofRef> {
    let index = usize::try_from(field.oneof_index?).ok()?;
    let name = message.oneof_decl.get(index)?.name.clone().unwrap_or_default();
    if field.proto3_optional == Some(true) {
        Some(OneofRef::synthetic(name))
    } else {
        Some(OneofRef::declared(name))
    }
}

/// Converts one file's services.
fn convert_file(file: &FileDescriptorProto, generate: bool) -> FileDescriptor {
    let path = file.name.clone().unwrap_or_default();
    let package = file.package.clone().unwrap_or_default();
    let comments = method_comments(file.source_code_info.as_ref());
    let services = file
        .service
        .iter()
        .enumerate()
        .map(|(service_index, service)| {
            let name = service.name.clone().unwrap_or_default();
            let full_name = qualify(&package, &name);
            let methods = service
                .method
                .iter()
                .enumerate()
                .map(|(method_index, method)| {
                    let method_name = method.name.clone().unwrap_or_default();
                    let input_type = method.input_type.as_deref().unwrap_or_default();
                    let output_type = method.output_type.as_deref().unwrap_or_default();
                    MethodDescriptor {
                        full_name: qualify(&full_name, &method_name),
                        name: method_name,
                        input_type: strip_leading_dot(input_type).to_string(),
                        output_type: strip_leading_dot(output_type).to_string(),
                        client_streaming: method.client_streaming.unwrap_or(false),
                        server_streaming: method.server_streaming.unwrap_or(false),
                        leading_comments: comments
                            .get(&(service_index, method_index))
                            .cloned()
                            .unwrap_or_default(),
                    }
                })
                .collect();
            ServiceDescriptor {
                name,
                full_name,
                methods,
            }
        })
        .collect();
    FileDescriptor {
        module_name: module_name(&package, &path),
        path,
        package,
        generate,
        services,
    }
}

/// Indexes leading method comments by `(service, method)` position.
fn method_comments(info: Option<&SourceCodeInfo>) -> BTreeMap<(usize, usize), String> {
    let mut comments = BTreeMap::new();
    let Some(info) = info else {
        return comments;
    };
    for location in &info.location {
        if let [FILE_SERVICE_FIELD, service, SERVICE_METHOD_FIELD, method] = location.path.as_slice()
            && let Some(text) = &location.leading_comments
            && let (Ok(service), Ok(method)) = (usize::try_from(*service), usize::try_from(*method))
        {
            comments.insert((service, method), text.clone());
        }
    }
    comments
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true for synthesized map entry messages.
fn is_map_entry(message: &DescriptorProto) -> bool {
    message.options.as_ref().and_then(|options| options.map_entry).unwrap_or(false)
}

/// Joins a scope and a simple name.
fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() { name.to_string() } else { format!("{scope}.{name}") }
}

/// Drops the leading `.` of a fully qualified wire type name.
fn strip_leading_dot(name: &str) -> &str {
    name.strip_prefix('.').unwrap_or(name)
}

/// Derives the module name: the package with dots replaced, else the file stem.
fn module_name(package: &str, path: &str) -> String {
    if package.is_empty() {
        Path::new(path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        package.replace('.', "_")
    }
}
