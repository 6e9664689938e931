//! Typed attribute access.
//!
//! Every accessor treats a malformed value exactly like a missing one: a
//! single bad attribute must never abort the cascade it is part of.

use super::node::Node;

/// Fast integer parsing using atoi_simd
#[inline]
pub fn parse_int(value: &str) -> Option<i64> {
    let value = value.trim();
    let value = value.strip_prefix('+').unwrap_or(value);
    atoi_simd::parse::<i64, false, false>(value.as_bytes()).ok()
}

/// Fast float parsing using fast_float2
#[inline]
pub fn parse_float(value: &str) -> Option<f64> {
    let parsed: f64 = fast_float2::parse(value.trim()).ok()?;
    parsed.is_finite().then_some(parsed)
}

/// OOXML boolean (`1`/`true`/`on`, `0`/`false`/`off`).
#[inline]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

impl Node {
    /// Integer attribute, `None` when absent or not an integer.
    pub fn attr_i64(&self, key: &str) -> Option<i64> {
        let raw = self.attr(key)?;
        let parsed = parse_int(raw);
        if parsed.is_none() {
            tracing::debug!(element = self.name(), attr = key, value = raw, "ignoring non-integer attribute");
        }
        parsed
    }

    /// Float attribute, `None` when absent, non-numeric or not finite.
    pub fn attr_f64(&self, key: &str) -> Option<f64> {
        let raw = self.attr(key)?;
        let parsed = parse_float(raw);
        if parsed.is_none() {
            tracing::debug!(element = self.name(), attr = key, value = raw, "ignoring non-numeric attribute");
        }
        parsed
    }

    /// Boolean attribute, `None` when absent or unrecognized.
    pub fn attr_bool(&self, key: &str) -> Option<bool> {
        self.attr(key).and_then(parse_bool)
    }

    /// Boolean attribute that counts as false unless explicitly set.
    #[inline]
    pub fn flag(&self, key: &str) -> bool {
        self.attr_bool(key).unwrap_or(false)
    }
}
