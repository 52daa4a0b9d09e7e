//! Decoding of fields that may be missing, a single record or an array.
//!
//! Rejseplanen serialises a list of records as a JSON array when there are
//! several, as a bare object when there is exactly one, and leaves the key
//! out when there are none. [`decode_list`] turns all three into a `Vec`.
//!
//! Decoding is lenient: a record that does not fit the expected shape is
//! dropped and logged, and never aborts decoding of the surrounding response.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

/// Shape of a field, determined before any typed decoding is attempted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldShape<'a> {
    /// The field holds an array of candidate records.
    Array(&'a [Value]),
    /// The field holds a single object.
    Single(&'a Value),
    /// The field is absent, `null`, or a scalar that cannot be a record.
    Missing,
}

/// Classify `container[field]`.
pub fn probe<'a>(container: &'a Map<String, Value>, field: &str) -> FieldShape<'a> {
    match container.get(field) {
        Some(Value::Array(items)) => FieldShape::Array(items),
        Some(value @ Value::Object(_)) => FieldShape::Single(value),
        _ => FieldShape::Missing,
    }
}

/// Decode `container[field]` into a list of records.
///
/// - absent, `null` or scalar: empty list
/// - single well-formed object: one-element list
/// - array: every element that decodes as `T`, in order; malformed elements
///   are skipped individually
pub fn decode_list<T: DeserializeOwned>(container: &Map<String, Value>, field: &str) -> Vec<T> {
    match probe(container, field) {
        FieldShape::Array(items) => items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| decode_record(item, field, Some(idx)))
            .collect(),
        FieldShape::Single(item) => decode_record(item, field, None).into_iter().collect(),
        FieldShape::Missing => Vec::new(),
    }
}

fn decode_record<T: DeserializeOwned>(value: &Value, field: &str, idx: Option<usize>) -> Option<T> {
    match T::deserialize(value) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!(field, ?idx, error = %e, "skipping malformed record");
            None
        }
    }
}
