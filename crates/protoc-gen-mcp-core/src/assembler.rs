// crates/protoc-gen-mcp-core/src/assembler.rs
// ============================================================================
// Module: Tool Assembler
// Description: Builds the tool catalog for each schema file.
// Purpose: Compose schema building, naming, and comment cleanup per method.
// Dependencies: crate::{catalog, comments, descriptor, diagnostics, hashing, naming, schema}
// ============================================================================

//! ## Overview
//! For every service method in declaration order the assembler skips
//! streaming calls, names the tool from the method's fully qualified name,
//! cleans its leading comment, and builds the request message schema.
//!
//! Failure handling:
//! - streaming methods are excluded with an informational diagnostic;
//! - a schema that cannot be canonicalized drops that tool with a warning;
//! - a duplicate flattened key or tool name fails the whole file.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::GenerationError;
use crate::catalog::FileArtifact;
use crate::catalog::Tool;
use crate::catalog::ToolCatalog;
use crate::comments::clean_comment;
use crate::descriptor::DescriptorPool;
use crate::descriptor::FileDescriptor;
use crate::descriptor::MessageDescriptor;
use crate::descriptor::MethodDescriptor;
use crate::descriptor::RequiredFieldLookup;
use crate::descriptor::ServiceDescriptor;
use crate::diagnostics::Diagnostic;
use crate::diagnostics::DiagnosticKind;
use crate::diagnostics::DiagnosticLevel;
use crate::diagnostics::DiagnosticSink;
use crate::diagnostics::NoopDiagnosticSink;
use crate::hashing::HashError;
use crate::hashing::canonical_json_string;
use crate::naming::DEFAULT_MAX_TOOL_NAME_LEN;
use crate::naming::flattened_method_name;
use crate::naming::mangle;
use crate::schema::SchemaBuilder;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Tunables for tool assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerOptions {
    /// Maximum tool name length in bytes.
    pub max_tool_name_len: usize,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            max_tool_name_len: DEFAULT_MAX_TOOL_NAME_LEN,
        }
    }
}

// ============================================================================
// SECTION: Assembler
// ============================================================================

/// Produces the canonical payload stored as a tool's raw input schema.
type SchemaSerializer = fn(&Value) -> Result<String, HashError>;

/// Builds tool catalogs from file descriptors.
pub struct ToolAssembler<'a> {
    /// Pool used to resolve request messages and their fields.
    pool: &'a DescriptorPool,
    /// Required-field capability.
    required: &'a dyn RequiredFieldLookup,
    /// Diagnostic destination.
    sink: &'a dyn DiagnosticSink,
    /// Assembly tunables.
    options: AssemblerOptions,
    /// Canonical schema serializer.
    serialize: SchemaSerializer,
}

impl<'a> ToolAssembler<'a> {
    /// Creates an assembler with default options and no diagnostic sink.
    #[must_use]
    pub fn new(pool: &'a DescriptorPool, required: &'a dyn RequiredFieldLookup) -> Self {
        Self {
            pool,
            required,
            sink: &NoopDiagnosticSink,
            options: AssemblerOptions::default(),
            serialize: canonical_json_string::<Value>,
        }
    }

    /// Replaces the canonical schema serializer.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn with_serializer(mut self, serialize: SchemaSerializer) -> Self {
        self.serialize = serialize;
        self
    }

    /// Sets the assembly options.
    #[must_use]
    pub fn with_options(mut self, options: AssemblerOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the diagnostic sink.
    #[must_use]
    pub fn with_sink(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.sink = sink;
        self
    }

    /// Generates the artifact for one file.
    ///
    /// Returns `Ok(None)` for files that are not marked for generation or
    /// declare no services.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when two tools collide on their flattened
    /// key or name.
    pub fn generate_file(
        &self,
        file: &FileDescriptor,
    ) -> Result<Option<FileArtifact>, GenerationError> {
        if !file.generate {
            self.record(&Diagnostic::file(
                DiagnosticKind::FileSkipped,
                DiagnosticLevel::Info,
                &file.path,
                "file not requested for generation",
            ));
            return Ok(None);
        }
        if file.services.is_empty() {
            self.record(&Diagnostic::file(
                DiagnosticKind::FileSkipped,
                DiagnosticLevel::Info,
                &file.path,
                "file declares no services",
            ));
            return Ok(None);
        }

        let mut diagnostics = Vec::new();
        let mut catalog = ToolCatalog::default();
        for service in &file.services {
            if let Err(err) = self.add_service(file, service, &mut catalog, &mut diagnostics) {
                self.record(&Diagnostic::file(
                    DiagnosticKind::FileFailed,
                    DiagnosticLevel::Error,
                    &file.path,
                    err.to_string(),
                ));
                return Err(err);
            }
        }

        self.push(
            &mut diagnostics,
            Diagnostic::file(
                DiagnosticKind::FileGenerated,
                DiagnosticLevel::Info,
                &file.path,
                format!("generated {} tool(s)", catalog.len()),
            ),
        );
        Ok(Some(FileArtifact {
            package: file.package.clone(),
            source_path: file.path.clone(),
            module_name: file.module_name.clone(),
            catalog,
            diagnostics,
        }))
    }

    /// Adds every unary method of a service to the catalog.
    fn add_service(
        &self,
        file: &FileDescriptor,
        service: &ServiceDescriptor,
        catalog: &mut ToolCatalog,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), GenerationError> {
        catalog.ensure_service(&service.name);
        for method in &service.methods {
            if method.is_streaming() {
                self.push(
                    diagnostics,
                    Diagnostic::file(
                        DiagnosticKind::MethodSkipped,
                        DiagnosticLevel::Info,
                        &file.path,
                        "streaming methods are not exposed as tools",
                    )
                    .with_method(&service.name, &method.name),
                );
                continue;
            }
            let Some(tool) = self.build_tool(file, service, method, diagnostics) else {
                continue;
            };
            catalog.insert(&file.path, &service.name, &method.name, tool)?;
        }
        Ok(())
    }

    /// Builds the tool for a unary method, or `None` when its schema cannot be serialized.
    fn build_tool(
        &self,
        file: &FileDescriptor,
        service: &ServiceDescriptor,
        method: &MethodDescriptor,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Tool> {
        let name = mangle(&flattened_method_name(&method.full_name), self.options.max_tool_name_len);
        let description = clean_comment(&method.leading_comments);

        let placeholder;
        let request = match self.pool.message(&method.input_type) {
            Some(message) => message,
            None => {
                placeholder = MessageDescriptor::new(method.input_type.clone(), Vec::new());
                &placeholder
            }
        };
        let mut builder = SchemaBuilder::new(self.pool, self.required);
        let input_schema = builder.message_schema(request);
        for type_name in builder.recursive_references() {
            self.push(
                diagnostics,
                Diagnostic::file(
                    DiagnosticKind::RecursiveReference,
                    DiagnosticLevel::Info,
                    &file.path,
                    format!("recursive reference to {type_name} emitted as an open schema"),
                )
                .with_method(&service.name, &method.name),
            );
        }

        let raw_input_schema = match (self.serialize)(&input_schema) {
            Ok(raw) => raw,
            Err(err) => {
                self.push(
                    diagnostics,
                    Diagnostic::file(
                        DiagnosticKind::ToolSkipped,
                        DiagnosticLevel::Warning,
                        &file.path,
                        err.to_string(),
                    )
                    .with_method(&service.name, &method.name),
                );
                return None;
            }
        };

        Some(Tool {
            name,
            description,
            input_schema,
            raw_input_schema,
            request_type: method.input_type.clone(),
            response_type: method.output_type.clone(),
        })
    }

    /// Records a diagnostic on the artifact and mirrors it to the sink.
    fn push(&self, diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
        self.record(&diagnostic);
        diagnostics.push(diagnostic);
    }

    /// Mirrors a diagnostic to the sink.
    fn record(&self, diagnostic: &Diagnostic) {
        self.sink.record(diagnostic);
    }
}
