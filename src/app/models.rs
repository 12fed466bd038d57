//! Data models for marker collections
//!
//! This module contains the core data structures for representing marker
//! (station) records and the named collections that own them, plus the
//! request and outcome contracts of the update operations.
//!
//! Records are deliberately loose: a record is an ordered mapping from
//! field name to JSON value, and fields may appear or disappear freely.
//! Only the `id` field has meaning to the system, and only through its
//! string representation.

use crate::constants::{LIST_FIELDS, STATION_KEY};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// A single marker record: an ordered mapping of field name to JSON value
pub type Record = Map<String, Value>;

// =============================================================================
// Collection Keys
// =============================================================================

/// The closed set of collection keys, each mapping to one persisted document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKey {
    Default,
    Admin,
    AdminFleet,
}

impl CollectionKey {
    /// Every valid collection key
    pub const ALL: [CollectionKey; 3] = [
        CollectionKey::Default,
        CollectionKey::Admin,
        CollectionKey::AdminFleet,
    ];

    /// The key as it appears in URLs and CLI arguments
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::Default => "default",
            CollectionKey::Admin => "admin",
            CollectionKey::AdminFleet => "admin_fleet",
        }
    }

    /// File name of the persisted document for this key
    pub fn file_name(&self) -> &'static str {
        match self {
            CollectionKey::Default => "markers.json",
            CollectionKey::Admin => "markers_admin.json",
            CollectionKey::AdminFleet => "markers_admin_fleet.json",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CollectionKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::configuration(format!("Invalid collection key '{}'", s)))
    }
}

// =============================================================================
// Collection
// =============================================================================

/// A named collection: the record sequence plus any extra document keys
///
/// The persisted document must hold an array under `STATION`. Top-level
/// keys other than `STATION` are carried through a load/save round trip
/// untouched. The invariant "`STATION` is an array" is established at
/// construction and every mutation path preserves it.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    records: Vec<Value>,
    extra: Map<String, Value>,
}

impl Collection {
    /// Create an empty collection (`{"STATION": []}`)
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Build a collection from a parsed document, validating the invariant
    pub fn from_document(document: Value) -> Result<Self> {
        let Value::Object(mut document) = document else {
            return Err(Error::structure(format!(
                "Collection document must be a JSON object with a '{}' array",
                STATION_KEY
            )));
        };

        match document.shift_remove(STATION_KEY) {
            Some(Value::Array(records)) => Ok(Self {
                records,
                extra: document,
            }),
            Some(_) => Err(Error::structure(format!(
                "Collection key '{}' must hold an array",
                STATION_KEY
            ))),
            None => Err(Error::structure(format!(
                "Collection document is missing the '{}' key",
                STATION_KEY
            ))),
        }
    }

    /// Reassemble the full document for persistence
    pub fn to_document(&self) -> Value {
        let mut document = Map::new();
        document.insert(STATION_KEY.to_string(), Value::Array(self.records.clone()));
        for (key, value) in &self.extra {
            document.insert(key.clone(), value.clone());
        }
        Value::Object(document)
    }

    /// The record sequence
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Mutable access to the record sequence
    pub fn records_mut(&mut self) -> &mut Vec<Value> {
        &mut self.records
    }

    /// Number of records in the collection
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// =============================================================================
// Update Request and Outcome Contracts
// =============================================================================

/// Inbound bulk list-field update request
///
/// All four parameters are required and must be non-empty; the dispatcher
/// validates the contract before any I/O happens. Fields are optional at
/// the deserialization layer so that an incomplete body still produces a
/// `Validation` error rather than a framework rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkUpdateRequest {
    /// Target record ids (numbers and strings compare by string form)
    #[serde(default)]
    pub ids: Vec<Value>,

    /// The list-valued field to mutate (one of `LIST_FIELDS`)
    #[serde(default)]
    pub field: Option<String>,

    /// `"add"` or `"remove"`
    #[serde(default)]
    pub action: Option<String>,

    /// Values applied in order against the target field
    #[serde(default)]
    pub values: Option<Value>,
}

/// Outcome of a bulk list-field update
#[derive(Debug, Clone, Serialize)]
pub struct BulkUpdateOutcome {
    /// Human-readable completion message
    pub message: String,

    /// Number of distinct record ids that actually changed
    pub updated_count: usize,

    /// The record ids that actually changed, first-seen order
    pub updated_ids: Vec<Value>,
}

/// One entry of a multi-record partial update
#[derive(Debug, Clone, Deserialize)]
pub struct PatchEntry {
    /// Target record id
    pub id: Value,

    /// Fields merged over the matched record (shallow, overwriting)
    pub changes: Record,
}

/// Outcome of a multi-record partial update
#[derive(Debug, Clone, Serialize)]
pub struct PatchOutcome {
    /// Ids of entries whose record was found and merged, in input order
    pub updated_ids: Vec<Value>,

    /// Ids of entries that matched no record, in input order
    pub not_found_ids: Vec<Value>,
}

/// Whether a record field name is one of the list-valued fields
pub fn is_list_field(field: &str) -> bool {
    LIST_FIELDS.contains(&field)
}
