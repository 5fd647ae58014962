// crates/protoc-gen-mcp-core/src/descriptor.rs
// ============================================================================
// Module: Descriptor Model
// Description: Read-only protobuf schema descriptors consumed by the translator.
// Purpose: Decouple schema translation from any particular wire decoding crate.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Descriptors are plain owned values produced by an ingestion layer (the
//! plugin crate decodes them from a `CodeGeneratorRequest`). Message and enum
//! references are stored by fully qualified name and resolved through a
//! [`DescriptorPool`], so self-referential message graphs need no shared
//! ownership.
//!
//! Fully qualified names never carry the leading `.` used on the wire.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

// ============================================================================
// SECTION: Field Kinds
// ============================================================================

/// Scalar or composite kind of a protobuf field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `bool`.
    Bool,
    /// `string`.
    String,
    /// `bytes`.
    Bytes,
    /// `int32`.
    Int32,
    /// `sint32`.
    Sint32,
    /// `sfixed32`.
    Sfixed32,
    /// `uint32`.
    Uint32,
    /// `fixed32`.
    Fixed32,
    /// `int64`.
    Int64,
    /// `sint64`.
    Sint64,
    /// `sfixed64`.
    Sfixed64,
    /// `uint64`.
    Uint64,
    /// `fixed64`.
    Fixed64,
    /// `float`.
    Float,
    /// `double`.
    Double,
    /// Enum reference.
    Enum,
    /// Message reference.
    Message,
    /// Proto2 group, structurally a nested message.
    Group,
    /// Wire type value this generator does not recognise.
    Unknown(i32),
}

impl FieldKind {
    /// Returns the kind for a `FieldDescriptorProto.Type` wire value.
    #[must_use]
    pub const fn from_wire(value: i32) -> Self {
        match value {
            1 => Self::Double,
            2 => Self::Float,
            3 => Self::Int64,
            4 => Self::Uint64,
            5 => Self::Int32,
            6 => Self::Fixed64,
            7 => Self::Fixed32,
            8 => Self::Bool,
            9 => Self::String,
            10 => Self::Group,
            11 => Self::Message,
            12 => Self::Bytes,
            13 => Self::Uint32,
            14 => Self::Enum,
            15 => Self::Sfixed32,
            16 => Self::Sfixed64,
            17 => Self::Sint32,
            18 => Self::Sint64,
            other => Self::Unknown(other),
        }
    }

    /// Returns true for message-shaped kinds that are expanded recursively.
    #[must_use]
    pub const fn is_message(self) -> bool {
        matches!(self, Self::Message | Self::Group)
    }

    /// Returns true for signed integer kinds of any width.
    #[must_use]
    pub const fn is_signed_integer(self) -> bool {
        matches!(
            self,
            Self::Int32
                | Self::Sint32
                | Self::Sfixed32
                | Self::Int64
                | Self::Sint64
                | Self::Sfixed64
        )
    }

    /// Returns true for unsigned integer kinds of any width.
    #[must_use]
    pub const fn is_unsigned_integer(self) -> bool {
        matches!(self, Self::Uint32 | Self::Fixed32 | Self::Uint64 | Self::Fixed64)
    }
}

// ============================================================================
// SECTION: Field Descriptors
// ============================================================================

/// Field cardinality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cardinality {
    /// Singular field (including proto3 `optional`).
    Singular,
    /// `repeated` field that is not a map.
    List,
    /// `map<K, V>` field.
    Map {
        /// Map key kind.
        key: FieldKind,
        /// Map value descriptor (always singular).
        value: Box<FieldDescriptor>,
    },
}

/// Reference to the oneof group containing a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneofRef {
    /// Oneof group name.
    pub name: String,
    /// True for oneofs synthesized for proto3 `optional` fields.
    pub synthetic: bool,
}

impl OneofRef {
    /// Creates a reference to a declared (non-synthetic) oneof group.
    #[must_use]
    pub fn declared(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            synthetic: false,
        }
    }

    /// Creates a reference to a synthetic oneof produced by proto3 `optional`.
    #[must_use]
    pub fn synthetic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            synthetic: true,
        }
    }
}

/// Field within a message.
///
/// # Invariants
/// - `type_name` is set for [`FieldKind::Enum`], [`FieldKind::Message`] and
///   [`FieldKind::Group`] fields when produced by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name as declared.
    pub name: String,
    /// Fully qualified field name (`package.Message.field`).
    pub full_name: String,
    /// Field kind.
    pub kind: FieldKind,
    /// Field cardinality.
    pub cardinality: Cardinality,
    /// Fully qualified referenced type for enum and message kinds.
    pub type_name: Option<String>,
    /// Containing oneof, if any.
    pub oneof: Option<OneofRef>,
}

impl FieldDescriptor {
    /// Creates a singular field of the given kind.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            full_name: name.clone(),
            name,
            kind,
            cardinality: Cardinality::Singular,
            type_name: None,
            oneof: None,
        }
    }

    /// Creates a singular message-typed field.
    #[must_use]
    pub fn message(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Message).with_type_name(type_name)
    }

    /// Creates a singular enum-typed field.
    #[must_use]
    pub fn enumeration(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Enum).with_type_name(type_name)
    }

    /// Creates a map field with the given key kind and value descriptor.
    #[must_use]
    pub fn map(name: impl Into<String>, key: FieldKind, value: Self) -> Self {
        let mut field = Self::new(name, FieldKind::Message);
        field.cardinality = Cardinality::Map {
            key,
            value: Box::new(value),
        };
        field
    }

    /// Sets the fully qualified field name.
    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    /// Sets the referenced type name.
    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Marks the field as `repeated`.
    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.cardinality = Cardinality::List;
        self
    }

    /// Places the field in a oneof group.
    #[must_use]
    pub fn in_oneof(mut self, oneof: OneofRef) -> Self {
        self.oneof = Some(oneof);
        self
    }

    /// Returns the declared oneof group name, ignoring synthetic oneofs.
    #[must_use]
    pub fn declared_oneof(&self) -> Option<&str> {
        self.oneof.as_ref().filter(|oneof| !oneof.synthetic).map(|oneof| oneof.name.as_str())
    }
}

// ============================================================================
// SECTION: Message and Enum Descriptors
// ============================================================================

/// Message type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDescriptor {
    /// Fully qualified message name.
    pub full_name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl MessageDescriptor {
    /// Creates a message descriptor.
    #[must_use]
    pub fn new(full_name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            full_name: full_name.into(),
            fields,
        }
    }
}

/// Enum type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    /// Fully qualified enum name.
    pub full_name: String,
    /// Value names in declaration order.
    pub values: Vec<String>,
}

impl EnumDescriptor {
    /// Creates an enum descriptor.
    #[must_use]
    pub fn new(full_name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            full_name: full_name.into(),
            values,
        }
    }
}

/// Lookup table of every message and enum reachable in a generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorPool {
    /// Messages keyed by fully qualified name.
    messages: BTreeMap<String, MessageDescriptor>,
    /// Enums keyed by fully qualified name.
    enums: BTreeMap<String, EnumDescriptor>,
}

impl DescriptorPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a message, replacing any earlier message with the same name.
    pub fn add_message(&mut self, message: MessageDescriptor) {
        self.messages.insert(message.full_name.clone(), message);
    }

    /// Registers an enum, replacing any earlier enum with the same name.
    pub fn add_enum(&mut self, descriptor: EnumDescriptor) {
        self.enums.insert(descriptor.full_name.clone(), descriptor);
    }

    /// Builder-style variant of [`DescriptorPool::add_message`].
    #[must_use]
    pub fn with_message(mut self, message: MessageDescriptor) -> Self {
        self.add_message(message);
        self
    }

    /// Builder-style variant of [`DescriptorPool::add_enum`].
    #[must_use]
    pub fn with_enum(mut self, descriptor: EnumDescriptor) -> Self {
        self.add_enum(descriptor);
        self
    }

    /// Looks up a message by fully qualified name.
    #[must_use]
    pub fn message(&self, full_name: &str) -> Option<&MessageDescriptor> {
        self.messages.get(full_name)
    }

    /// Looks up an enum by fully qualified name.
    #[must_use]
    pub fn enumeration(&self, full_name: &str) -> Option<&EnumDescriptor> {
        self.enums.get(full_name)
    }

    /// Returns the number of registered messages.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

// ============================================================================
// SECTION: Services and Files
// ============================================================================

/// RPC method descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Method name.
    pub name: String,
    /// Fully qualified method name (`package.Service.Method`).
    pub full_name: String,
    /// Fully qualified request message name.
    pub input_type: String,
    /// Fully qualified response message name.
    pub output_type: String,
    /// True when the client streams requests.
    pub client_streaming: bool,
    /// True when the server streams responses.
    pub server_streaming: bool,
    /// Leading documentation comment, verbatim.
    pub leading_comments: String,
}

impl MethodDescriptor {
    /// Returns true when either side of the call streams.
    #[must_use]
    pub const fn is_streaming(&self) -> bool {
        self.client_streaming || self.server_streaming
    }
}

/// RPC service descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Service name.
    pub name: String,
    /// Fully qualified service name.
    pub full_name: String,
    /// Methods in declaration order.
    pub methods: Vec<MethodDescriptor>,
}

/// Schema source file descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Source path as given to the compiler.
    pub path: String,
    /// Protobuf package name (may be empty).
    pub package: String,
    /// Package identifier declared for the generated artifact.
    pub module_name: String,
    /// True when this file was requested for generation.
    pub generate: bool,
    /// Services in declaration order.
    pub services: Vec<ServiceDescriptor>,
}

// ============================================================================
// SECTION: Required-Field Capability
// ============================================================================

/// Decides whether a field is marked as required by an external annotation.
pub trait RequiredFieldLookup {
    /// Returns true when the field must be present in tool input.
    fn is_required(&self, field: &FieldDescriptor) -> bool;
}

impl<F> RequiredFieldLookup for F
where
    F: Fn(&FieldDescriptor) -> bool,
{
    fn is_required(&self, field: &FieldDescriptor) -> bool {
        self(field)
    }
}

/// Lookup that treats every field as optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRequiredFields;

impl RequiredFieldLookup for NoRequiredFields {
    fn is_required(&self, _field: &FieldDescriptor) -> bool {
        false
    }
}
