//! Bulk list-field mutation
//!
//! Applies one `add`/`remove` action with a batch of values against a
//! single list-valued field across every record whose id is in the
//! requested set.

use super::matcher;
use serde_json::Value;
use std::collections::HashSet;

/// Apply a bulk list update to the record sequence
///
/// For each matched record the target field is repaired to an empty list
/// if absent or wrong-typed, then the values are processed in order:
/// `add` appends a value iff it is not already present (set-like,
/// first-seen order preserved), `remove` drops the first occurrence iff
/// present.
///
/// Returns the ids of records that had at least one successful add or
/// remove, deduplicated by value, in first-seen order. Repeating an `add`
/// of an already-present value is a no-op and does not report the id.
///
/// An `action` outside `add`/`remove` mutates nothing and reports no ids;
/// whether that case should fail loudly instead is deliberately left as
/// a documented no-op.
pub fn apply(
    records: &mut [Value],
    ids: &HashSet<String>,
    field: &str,
    action: &str,
    values: &[Value],
) -> Vec<Value> {
    let mut updated_ids: Vec<Value> = Vec::new();

    for record in records.iter_mut() {
        let Some(record_id) = matcher::record_id(record) else {
            continue;
        };
        if !ids.contains(&record_id) {
            continue;
        }
        // record_id() only returns Some for objects
        let Some(fields) = record.as_object_mut() else {
            continue;
        };

        // Repair: the target field must hold a list before mutation
        if !fields.get(field).map(Value::is_array).unwrap_or(false) {
            fields.insert(field.to_string(), Value::Array(Vec::new()));
        }
        let Some(Value::Array(list)) = fields.get_mut(field) else {
            continue;
        };

        let mut touched = false;
        for value in values {
            match action {
                "add" => {
                    if !list.contains(value) {
                        list.push(value.clone());
                        touched = true;
                    }
                }
                "remove" => {
                    if let Some(pos) = list.iter().position(|item| item == value) {
                        list.remove(pos);
                        touched = true;
                    }
                }
                _ => {}
            }
        }

        if touched {
            let id_value = fields.get("id").cloned().unwrap_or(Value::Null);
            if !updated_ids.contains(&id_value) {
                updated_ids.push(id_value);
            }
        }
    }

    updated_ids
}
