//! Resource factory trait and collection naming

use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use serde::de::DeserializeOwned;

/// Construct a domain object from a raw field mapping.
///
/// This is the seam between the paging layer and concrete resource types:
/// the iterator draws raw item objects from page responses and hands each to
/// `from_fields`. Any `DeserializeOwned` type gets this for free.
pub trait FromFields: Sized {
    /// Build an instance from one raw item's fields.
    fn from_fields(fields: JsonObject) -> Result<Self>;
}

impl<T: DeserializeOwned> FromFields for T {
    fn from_fields(fields: JsonObject) -> Result<Self> {
        let value = JsonValue::Object(fields);
        Ok(serde_json::from_value(value)?)
    }
}

/// Derive the collection key for a resource type from its type name.
///
/// `Contact` becomes `contacts`, `SegmentCompany` becomes `segment_companies`.
/// Derived once at collection construction and immutable afterwards.
pub fn collection_name<T>() -> String {
    let full = std::any::type_name::<T>();
    // Drop the module path and any generic arguments.
    let base = full.split('<').next().unwrap_or(full);
    let base = base.rsplit("::").next().unwrap_or(base);
    pluralize(&camel_to_snake(base))
}

/// Convert a CamelCase type name to snake_case.
fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Naive English pluralization, matching the API's collection naming.
fn pluralize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix('y') {
        format!("{stem}ies")
    } else if name.ends_with('s') {
        format!("{name}es")
    } else {
        format!("{name}s")
    }
}
