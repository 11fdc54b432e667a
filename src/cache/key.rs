//! Cache key encoding.
//!
//! Zero-argument endpoints share one fixed slot. Endpoints with arguments
//! encode the full argument tuple with serde_json: field order is the tuple
//! order at the call site, values stringify deterministically, and equal
//! argument values produce byte-identical keys regardless of call site.
//! Keys must be injective per endpoint; a collision silently corrupts
//! results.

use serde::Serialize;

/// The single slot used by endpoints that take no arguments.
pub const SINGULAR: &str = "singular";

/// Deterministic encoding of an argument tuple.
#[must_use]
pub fn composite<T: Serialize>(args: &T) -> String {
    // Tuples of strings and integers cannot fail to serialize.
    serde_json::to_string(args).expect("cache key serialization")
}
