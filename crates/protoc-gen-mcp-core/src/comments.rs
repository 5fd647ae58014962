// crates/protoc-gen-mcp-core/src/comments.rs
// ============================================================================
// Module: Comment Sanitizer
// Description: Strips tooling directives from RPC documentation comments.
// Purpose: Turn leading method comments into tool descriptions.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Leading comments often carry lint directives that are noise to tool
//! consumers. Each line is trimmed; lines starting with a directive prefix are
//! dropped and the rest are rejoined with `\n` in their original order.

/// Line prefixes removed from documentation comments.
pub const STRIPPED_COMMENT_PREFIXES: &[&str] = &["buf:lint:", "@ignore-comment"];

/// Returns the comment with directive lines removed and lines trimmed.
#[must_use]
pub fn clean_comment(comment: &str) -> String {
    comment
        .split('\n')
        .map(str::trim)
        .filter(|line| !STRIPPED_COMMENT_PREFIXES.iter().any(|prefix| line.starts_with(prefix)))
        .collect::<Vec<_>>()
        .join("\n")
}
