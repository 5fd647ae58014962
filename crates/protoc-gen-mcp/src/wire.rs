// crates/protoc-gen-mcp/src/wire.rs
// ============================================================================
// Module: Plugin Request Wire Types
// Description: Decoding subset of the protoc plugin request descriptors.
// Purpose: Capture descriptor fields and the field_behavior extension.
// Dependencies: prost
// ============================================================================

//! ## Overview
//! These messages mirror `google.protobuf.compiler.CodeGeneratorRequest` and
//! the descriptor messages it embeds, restricted to the fields generation
//! needs. `prost_types::FieldOptions` drops extension fields, so the
//! `google.api.field_behavior` extension (field 1052) is declared directly on
//! [`FieldOptions`]. Unlisted fields are skipped by the decoder.
//!
//! Enum-typed descriptor fields are decoded as raw `int32` values so unknown
//! enum numbers survive decoding.

/// `google.api.FieldBehavior.REQUIRED`.
pub const FIELD_BEHAVIOR_REQUIRED: i32 = 2;
/// `FieldDescriptorProto.Label.LABEL_REPEATED`.
pub const LABEL_REPEATED: i32 = 3;
/// `FileDescriptorProto.service` field number, used in source paths.
pub const FILE_SERVICE_FIELD: i32 = 6;
/// `ServiceDescriptorProto.method` field number, used in source paths.
pub const SERVICE_METHOD_FIELD: i32 = 2;

/// Request sent by protoc to a plugin.
#[derive(Clone, PartialEq, prost::Message)]
pub struct CodeGeneratorRequest {
    /// Files explicitly listed on the command line.
    #[prost(string, repeated, tag = "1")]
    pub file_to_generate: Vec<String>,
    /// Plugin parameter string.
    #[prost(string, optional, tag = "2")]
    pub parameter: Option<String>,
    /// Every file in `file_to_generate` plus its imports, in topological order.
    #[prost(message, repeated, tag = "15")]
    pub proto_file: Vec<FileDescriptorProto>,
}

/// Schema file descriptor.
#[derive(Clone, PartialEq, prost::Message)]
pub struct FileDescriptorProto {
    /// Source path.
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    /// Package name.
    #[prost(string, optional, tag = "2")]
    pub package: Option<String>,
    /// Top-level messages.
    #[prost(message, repeated, tag = "4")]
    pub message_type: Vec<DescriptorProto>,
    /// Top-level enums.
    #[prost(message, repeated, tag = "5")]
    pub enum_type: Vec<EnumDescriptorProto>,
    /// Services.
    #[prost(message, repeated, tag = "6")]
    pub service: Vec<ServiceDescriptorProto>,
    /// Source locations and comments.
    #[prost(message, optional, tag = "9")]
    pub source_code_info: Option<SourceCodeInfo>,
}

/// Message descriptor.
#[derive(Clone, PartialEq, prost::Message)]
pub struct DescriptorProto {
    /// Message name.
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    /// Fields in declaration order.
    #[prost(message, repeated, tag = "2")]
    pub field: Vec<FieldDescriptorProto>,
    /// Nested messages.
    #[prost(message, repeated, tag = "3")]
    pub nested_type: Vec<DescriptorProto>,
    /// Nested enums.
    #[prost(message, repeated, tag = "4")]
    pub enum_type: Vec<EnumDescriptorProto>,
    /// Message options.
    #[prost(message, optional, tag = "7")]
    pub options: Option<MessageOptions>,
    /// Oneof declarations.
    #[prost(message, repeated, tag = "8")]
    pub oneof_decl: Vec<OneofDescriptorProto>,
}

/// Message options.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MessageOptions {
    /// Set on the synthesized entry message of a map field.
    #[prost(bool, optional, tag = "7")]
    pub map_entry: Option<bool>,
}

/// Field descriptor.
#[derive(Clone, PartialEq, prost::Message)]
pub struct FieldDescriptorProto {
    /// Field name.
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    /// Field number.
    #[prost(int32, optional, tag = "3")]
    pub number: Option<i32>,
    /// Label (optional, required, repeated).
    #[prost(int32, optional, tag = "4")]
    pub label: Option<i32>,
    /// Wire type.
    #[prost(int32, optional, tag = "5")]
    pub r#type: Option<i32>,
    /// Referenced message or enum, fully qualified with a leading dot.
    #[prost(string, optional, tag = "6")]
    pub type_name: Option<String>,
    /// Field options.
    #[prost(message, optional, tag = "8")]
    pub options: Option<FieldOptions>,
    /// Index into the containing message's `oneof_decl`.
    #[prost(int32, optional, tag = "9")]
    pub oneof_index: Option<i32>,
    /// True for proto3 `optional` fields.
    #[prost(bool, optional, tag = "17")]
    pub proto3_optional: Option<bool>,
}

/// Field options, including the `field_behavior` extension.
#[derive(Clone, PartialEq, prost::Message)]
pub struct FieldOptions {
    /// `google.api.field_behavior` values, carried as extension 1052.
    #[prost(int32, repeated, tag = "1052")]
    pub field_behavior: Vec<i32>,
}

/// Oneof declaration.
#[derive(Clone, PartialEq, prost::Message)]
pub struct OneofDescriptorProto {
    /// Oneof name.
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
}

/// Enum descriptor.
#[derive(Clone, PartialEq, prost::Message)]
pub struct EnumDescriptorProto {
    /// Enum name.
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    /// Values in declaration order.
    #[prost(message, repeated, tag = "2")]
    pub value: Vec<EnumValueDescriptorProto>,
}

/// Enum value descriptor.
#[derive(Clone, PartialEq, prost::Message)]
pub struct EnumValueDescriptorProto {
    /// Value name.
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
}

/// Service descriptor.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ServiceDescriptorProto {
    /// Service name.
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    /// Methods in declaration order.
    #[prost(message, repeated, tag = "2")]
    pub method: Vec<MethodDescriptorProto>,
}

/// Method descriptor.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MethodDescriptorProto {
    /// Method name.
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    /// Request type, fully qualified with a leading dot.
    #[prost(string, optional, tag = "2")]
    pub input_type: Option<String>,
    /// Response type, fully qualified with a leading dot.
    #[prost(string, optional, tag = "3")]
    pub output_type: Option<String>,
    /// True when the client streams.
    #[prost(bool, optional, tag = "5")]
    pub client_streaming: Option<bool>,
    /// True when the server streams.
    #[prost(bool, optional, tag = "6")]
    pub server_streaming: Option<bool>,
}

/// Source locations for a file.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SourceCodeInfo {
    /// Locations with optional comments.
    #[prost(message, repeated, tag = "1")]
    pub location: Vec<Location>,
}

/// One source location.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Location {
    /// Descriptor path identifying the element.
    #[prost(int32, repeated, tag = "1")]
    pub path: Vec<i32>,
    /// Comment preceding the element.
    #[prost(string, optional, tag = "3")]
    pub leading_comments: Option<String>,
}
