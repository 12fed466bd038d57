//! String-normalized id matching
//!
//! Record identity is defined on the string representation of the `id`
//! field: a record with numeric id `7` and a request for `"7"` refer to
//! the same record. Records that are not JSON objects, or whose `id` is
//! absent, null, or compound, never match anything.

use serde_json::Value;
use std::collections::HashSet;

/// Canonical string form of an id value
///
/// Scalars stringify (`7` and `"7"` both become `"7"`); null and
/// compound values have no canonical form.
pub fn id_repr(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// The canonical id of a record, if it has one
pub fn record_id(record: &Value) -> Option<String> {
    record.as_object()?.get("id").and_then(id_repr)
}

/// Whether a record's id matches a requested id in canonical form
pub fn ids_match(record: &Value, requested: &str) -> bool {
    record_id(record).as_deref() == Some(requested)
}

/// Index of the first record in sequence order whose id matches
pub fn find_first(records: &[Value], requested: &str) -> Option<usize> {
    records.iter().position(|record| ids_match(record, requested))
}

/// Canonicalize a set of requested ids, dropping values with no id form
pub fn id_set(ids: &[Value]) -> HashSet<String> {
    ids.iter().filter_map(id_repr).collect()
}
