//! Single-record operations: replace, create, delete
//!
//! Replace and delete are deliberately asymmetric in the presence of
//! duplicate ids: replace touches only the first sequence match, delete
//! removes every match.

use super::matcher;
use crate::app::models::Record;
use crate::constants::LIST_FIELDS;
use serde_json::Value;

/// Replace the first record whose id matches, wholesale
///
/// The replacement is stored as-is; no fields from the old record are
/// carried over. Later records sharing the id remain untouched. Returns
/// the stored replacement, or `None` when nothing matched.
pub fn replace(records: &mut [Value], requested: &str, replacement: Record) -> Option<Value> {
    let position = matcher::find_first(records, requested)?;
    records[position] = Value::Object(replacement);
    Some(records[position].clone())
}

/// Append a new record to the end of the sequence
///
/// The list-valued fields are defaulted to empty lists when absent. No
/// id uniqueness check is performed; duplicate ids are permitted.
pub fn create(records: &mut Vec<Value>, mut record: Record) -> Value {
    for field in LIST_FIELDS {
        record
            .entry(field.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
    }
    let stored = Value::Object(record);
    records.push(stored.clone());
    stored
}

/// Remove every record whose id matches
///
/// Returns `true` iff the sequence shrank.
pub fn delete(records: &mut Vec<Value>, requested: &str) -> bool {
    let before = records.len();
    records.retain(|record| !matcher::ids_match(record, requested));
    records.len() < before
}
