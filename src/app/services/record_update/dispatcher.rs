//! Update dispatch and request contracts
//!
//! [`MarkerService`] is the single entry point for every collection
//! operation. It validates request contracts before any I/O, serializes
//! writers to the same collection key, runs the load-mutate-save cycle
//! against the store, and assembles the outcome payloads.

use super::{bulk, ops, patch};
use crate::app::models::{
    BulkUpdateOutcome, BulkUpdateRequest, CollectionKey, PatchEntry, PatchOutcome, Record,
};
use crate::app::services::export;
use crate::app::services::marker_store::MarkerStore;
use crate::constants::LIST_FIELDS;
use crate::{Error, Result};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Per-collection-key write serialization
///
/// Lazily creates one async mutex per key and returns the same `Arc` for
/// repeated lookups. Writers to the same key queue behind each other;
/// different keys proceed independently.
struct KeyLocks {
    locks: StdMutex<HashMap<CollectionKey, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    fn new() -> Self {
        Self {
            locks: StdMutex::new(HashMap::new()),
        }
    }

    fn get(&self, key: CollectionKey) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Validated form of a bulk update request
struct ValidBulkUpdate {
    id_set: HashSet<String>,
    field: String,
    action: String,
    values: Vec<Value>,
}

/// Dispatcher for all marker collection operations
pub struct MarkerService {
    store: MarkerStore,
    locks: KeyLocks,
}

impl MarkerService {
    /// Create a service over the given store
    pub fn new(store: MarkerStore) -> Self {
        Self {
            store,
            locks: KeyLocks::new(),
        }
    }

    /// The underlying document store
    pub fn store(&self) -> &MarkerStore {
        &self.store
    }

    /// List every record in a collection
    pub async fn list(&self, key: CollectionKey) -> Result<Vec<Value>> {
        let collection = self.store.load(key)?;
        Ok(collection.records().to_vec())
    }

    /// Apply a bulk list-field update
    ///
    /// The request contract is validated before the collection is loaded;
    /// a violation yields `Error::Validation` and no mutation. The
    /// document is rewritten even when zero records changed.
    pub async fn bulk_update(
        &self,
        key: CollectionKey,
        request: &BulkUpdateRequest,
    ) -> Result<BulkUpdateOutcome> {
        let valid = validate_bulk(request)?;

        let lock = self.locks.get(key);
        let _guard = lock.lock().await;

        let mut collection = self.store.load(key)?;
        let updated_ids = bulk::apply(
            collection.records_mut(),
            &valid.id_set,
            &valid.field,
            &valid.action,
            &valid.values,
        );
        self.store.save(key, &collection)?;

        info!(
            "Bulk '{}' on '{}.{}' updated {} record(s)",
            valid.action,
            key,
            valid.field,
            updated_ids.len()
        );

        Ok(BulkUpdateOutcome {
            message: format!(
                "Action '{}' completed on field '{}'.",
                valid.action, valid.field
            ),
            updated_count: updated_ids.len(),
            updated_ids,
        })
    }

    /// Apply a multi-record partial update
    ///
    /// Not-found ids are a per-entry outcome, not an error; partial
    /// success is the norm.
    pub async fn patch(&self, key: CollectionKey, entries: &[PatchEntry]) -> Result<PatchOutcome> {
        let lock = self.locks.get(key);
        let _guard = lock.lock().await;

        let mut collection = self.store.load(key)?;
        let outcome = patch::apply(collection.records_mut(), entries);
        self.store.save(key, &collection)?;

        info!(
            "Patch on '{}': {} updated, {} not found",
            key,
            outcome.updated_ids.len(),
            outcome.not_found_ids.len()
        );

        Ok(outcome)
    }

    /// Create a new record
    ///
    /// The payload must carry an `id` field with a scalar value. List
    /// fields are defaulted to empty lists; duplicate ids are permitted.
    pub async fn create(&self, key: CollectionKey, record: Record) -> Result<Value> {
        if record.get("id").and_then(super::matcher::id_repr).is_none() {
            return Err(Error::validation(
                "Record payload must include a scalar 'id' field",
            ));
        }

        let lock = self.locks.get(key);
        let _guard = lock.lock().await;

        let mut collection = self.store.load(key)?;
        let stored = ops::create(collection.records_mut(), record);
        self.store.save(key, &collection)?;

        info!("Created record in '{}' ({} total)", key, collection.len());
        Ok(stored)
    }

    /// Replace the first record matching an id, wholesale
    ///
    /// Returns the stored replacement, or `None` when no record matched
    /// (nothing is persisted in that case).
    pub async fn replace(
        &self,
        key: CollectionKey,
        id: &str,
        replacement: Record,
    ) -> Result<Option<Value>> {
        let lock = self.locks.get(key);
        let _guard = lock.lock().await;

        let mut collection = self.store.load(key)?;
        match ops::replace(collection.records_mut(), id, replacement) {
            Some(stored) => {
                self.store.save(key, &collection)?;
                info!("Replaced record '{}' in '{}'", id, key);
                Ok(Some(stored))
            }
            None => {
                debug!("Replace target '{}' not found in '{}'", id, key);
                Ok(None)
            }
        }
    }

    /// Delete every record matching an id
    ///
    /// Returns `true` iff at least one record was removed (nothing is
    /// persisted otherwise).
    pub async fn delete(&self, key: CollectionKey, id: &str) -> Result<bool> {
        let lock = self.locks.get(key);
        let _guard = lock.lock().await;

        let mut collection = self.store.load(key)?;
        if ops::delete(collection.records_mut(), id) {
            self.store.save(key, &collection)?;
            info!("Deleted record(s) '{}' from '{}'", id, key);
            Ok(true)
        } else {
            debug!("Delete target '{}' not found in '{}'", id, key);
            Ok(false)
        }
    }

    /// Render a collection's tabular projection as xlsx workbook bytes
    ///
    /// Read-only; the persisted collection is never touched.
    pub async fn export(&self, key: CollectionKey) -> Result<Vec<u8>> {
        let collection = self.store.load(key)?;
        let table = export::project(collection.records());
        export::render_xlsx(&table)
    }
}

/// Validate the bulk update contract
///
/// All four parameters must be present and non-empty, `values` must be a
/// list, and `field` must be one of the recognized list-valued fields.
/// The `action` string itself is not constrained here: an unrecognized
/// action passes validation and no-ops in the mutator.
fn validate_bulk(request: &BulkUpdateRequest) -> Result<ValidBulkUpdate> {
    let field = request.field.as_deref().unwrap_or("");
    let action = request.action.as_deref().unwrap_or("");

    let values_missing = match &request.values {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(_) => false,
    };

    if request.ids.is_empty() || field.is_empty() || action.is_empty() || values_missing {
        return Err(Error::validation(
            "Missing required parameters: ids, field, action, values",
        ));
    }

    let values = match &request.values {
        Some(Value::Array(items)) => items.clone(),
        _ => return Err(Error::validation("'values' must be a list")),
    };

    if !LIST_FIELDS.contains(&field) {
        return Err(Error::validation(format!(
            "Invalid field '{}'. Must be one of: {}",
            field,
            LIST_FIELDS.join(", ")
        )));
    }

    Ok(ValidBulkUpdate {
        id_set: super::matcher::id_set(&request.ids),
        field: field.to_string(),
        action: action.to_string(),
        values,
    })
}
