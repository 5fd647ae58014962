// crates/protoc-gen-mcp-core/src/naming.rs
// ============================================================================
// Module: Tool Naming
// Description: Flattened tool names and length-bounded name mangling.
// Purpose: Derive deterministic, collision-resistant tool identifiers.
// Dependencies: num-bigint, sha1
// ============================================================================

//! ## Overview
//! Tool names are built from the last two components of a method's fully
//! qualified name (`Service_Method`). Names longer than the configured limit
//! keep their most specific tail and gain a short hash prefix:
//! `<6 base-36 chars of SHA-1(name)>_<tail>`.
//!
//! The base-36 text is the SHA-1 digest read as one big-endian unsigned
//! integer, so generated names are stable across releases and match names
//! produced by earlier generators using the same scheme.

use num_bigint::BigUint;
use sha1::Digest;
use sha1::Sha1;

/// Default upper bound on tool name length.
pub const DEFAULT_MAX_TOOL_NAME_LEN: usize = 64;

/// Number of base-36 digest characters used as the mangled prefix.
pub const HASH_PREFIX_LEN: usize = 6;

/// Returns the flattened tool name for a fully qualified method name.
///
/// The last two dot-separated components are joined with `_`; names with a
/// single component are returned unchanged.
#[must_use]
pub fn flattened_method_name(full_name: &str) -> String {
    let mut components = full_name.rsplit('.');
    match (components.next(), components.next()) {
        (Some(method), Some(service)) => format!("{service}_{method}"),
        _ => full_name.to_string(),
    }
}

/// Returns the base-36 rendering of SHA-1 over `name`.
#[must_use]
pub fn sha1_base36(name: &str) -> String {
    let digest = Sha1::digest(name.as_bytes());
    BigUint::from_bytes_be(&digest).to_str_radix(36)
}

/// Shortens `name` to at most `max_len` bytes, keeping its tail.
///
/// Names that already fit are returned unchanged. When the limit leaves no
/// room for a tail, the (possibly truncated) hash prefix is returned alone.
#[must_use]
pub fn mangle(name: &str, max_len: usize) -> String {
    if name.len() <= max_len {
        return name.to_string();
    }

    let digest = sha1_base36(name);
    let prefix_len = digest.len().min(HASH_PREFIX_LEN).min(max_len);
    let prefix = &digest[.. prefix_len];

    let available = max_len.saturating_sub(prefix.len() + 1);
    if available == 0 {
        return prefix.to_string();
    }

    let mut start = name.len() - available;
    while !name.is_char_boundary(start) {
        start += 1;
    }
    format!("{prefix}_{}", &name[start ..])
}
