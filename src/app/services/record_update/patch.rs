//! Multi-record partial update
//!
//! Merges per-entry change sets into matched records and reports, per
//! entry, whether the id was found. Entries are processed in input order
//! but are independent of each other.

use super::matcher;
use crate::app::models::{PatchEntry, PatchOutcome};
use serde_json::Value;
use std::collections::HashMap;

/// Apply an ordered batch of `{id, changes}` entries to the record sequence
///
/// Changes are merged shallowly: each change field overwrites the
/// same-named record field wholesale, nested structures are not merged.
/// When several records share an id, the last occurrence in sequence
/// order receives the merge.
pub fn apply(records: &mut [Value], entries: &[PatchEntry]) -> PatchOutcome {
    // Index records by canonical id; later occurrences shadow earlier ones
    let mut index: HashMap<String, usize> = HashMap::new();
    for (position, record) in records.iter().enumerate() {
        if let Some(record_id) = matcher::record_id(record) {
            index.insert(record_id, position);
        }
    }

    let mut updated_ids = Vec::new();
    let mut not_found_ids = Vec::new();

    for entry in entries {
        let target = matcher::id_repr(&entry.id)
            .and_then(|requested| index.get(&requested).copied());

        match target {
            Some(position) => {
                if let Some(fields) = records[position].as_object_mut() {
                    for (name, value) in &entry.changes {
                        fields.insert(name.clone(), value.clone());
                    }
                }
                updated_ids.push(entry.id.clone());
            }
            None => not_found_ids.push(entry.id.clone()),
        }
    }

    PatchOutcome {
        updated_ids,
        not_found_ids,
    }
}
