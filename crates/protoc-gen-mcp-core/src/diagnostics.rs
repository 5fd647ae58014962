// crates/protoc-gen-mcp-core/src/diagnostics.rs
// ============================================================================
// Module: Generation Diagnostics
// Description: Structured diagnostic events emitted during a generation pass.
// Purpose: Report skipped methods, degraded schemas, and per-file outcomes.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Diagnostics are collected on each generated file artifact and mirrored to a
//! [`DiagnosticSink`]. Sinks write one JSON object per line. The plugin protocol
//! owns stdout, so the default sink writes to stderr.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticLevel {
    /// Informational; output is complete.
    Info,
    /// Output was degraded but generation continued.
    Warning,
    /// Generation of a file failed.
    Error,
}

/// Diagnostic event classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A file artifact was produced.
    FileGenerated,
    /// A file was skipped (not requested or no services).
    FileSkipped,
    /// A file failed with a fatal error.
    FileFailed,
    /// A streaming method was excluded from the catalog.
    MethodSkipped,
    /// A tool was dropped because its schema could not be serialized.
    ToolSkipped,
    /// A recursive message reference was replaced by an open schema.
    RecursiveReference,
}

/// Diagnostic produced while generating a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Event classification.
    pub event: DiagnosticKind,
    /// Severity.
    pub level: DiagnosticLevel,
    /// Source file path.
    pub file: String,
    /// Service name, when scoped to a service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Method name, when scoped to a method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Human-readable detail.
    pub message: String,
}

impl Diagnostic {
    /// Creates a file-scoped diagnostic.
    #[must_use]
    pub fn file(
        event: DiagnosticKind,
        level: DiagnosticLevel,
        file: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            event,
            level,
            file: file.into(),
            service: None,
            method: None,
            message: message.into(),
        }
    }

    /// Scopes the diagnostic to a service method.
    #[must_use]
    pub fn with_method(mut self, service: impl Into<String>, method: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self.method = Some(method.into());
        self
    }
}

/// Timestamped event payload written by sinks.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationEvent<'a> {
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Diagnostic payload.
    #[serde(flatten)]
    pub diagnostic: &'a Diagnostic,
}

impl<'a> GenerationEvent<'a> {
    /// Stamps a diagnostic with the current time.
    #[must_use]
    pub fn new(diagnostic: &'a Diagnostic) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            timestamp_ms,
            diagnostic,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Destination for generation diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Record a diagnostic.
    fn record(&self, diagnostic: &Diagnostic);
}

/// Sink that logs JSON lines to stderr.
pub struct StderrDiagnosticSink;

impl DiagnosticSink for StderrDiagnosticSink {
    fn record(&self, diagnostic: &Diagnostic) {
        if let Ok(payload) = serde_json::to_string(&GenerationEvent::new(diagnostic)) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Sink that appends JSON lines to a file.
pub struct FileDiagnosticSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileDiagnosticSink {
    /// Opens the log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl DiagnosticSink for FileDiagnosticSink {
    fn record(&self, diagnostic: &Diagnostic) {
        if let Ok(payload) = serde_json::to_string(&GenerationEvent::new(diagnostic))
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Sink forwarding only diagnostics at or above a minimum level.
pub struct LevelFilterSink<S> {
    /// Wrapped destination.
    inner: S,
    /// Lowest level forwarded.
    min_level: DiagnosticLevel,
}

impl<S: DiagnosticSink> LevelFilterSink<S> {
    /// Wraps a sink so that lower-severity diagnostics are dropped.
    #[must_use]
    pub const fn new(inner: S, min_level: DiagnosticLevel) -> Self {
        Self {
            inner,
            min_level,
        }
    }
}

impl<S: DiagnosticSink> DiagnosticSink for LevelFilterSink<S> {
    fn record(&self, diagnostic: &Diagnostic) {
        if diagnostic.level >= self.min_level {
            self.inner.record(diagnostic);
        }
    }
}

/// No-op sink.
pub struct NoopDiagnosticSink;

impl DiagnosticSink for NoopDiagnosticSink {
    fn record(&self, _diagnostic: &Diagnostic) {}
}
