//! Common types used throughout rest-pager
//!
//! Shared type aliases and small enums used across multiple modules.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// Shared immutable empty query-parameter map.
///
/// Callers that have no parameters borrow this instead of each site building
/// its own empty map. It is never handed out mutably, so state cannot leak
/// between requests through it.
pub static EMPTY_PARAMS: Lazy<StringMap> = Lazy::new(StringMap::new);

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for transport retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}
