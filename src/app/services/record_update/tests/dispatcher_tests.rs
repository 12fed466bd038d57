//! Tests for the update dispatcher and request contracts

use crate::app::models::{BulkUpdateRequest, CollectionKey, PatchEntry};
use crate::app::services::marker_store::MarkerStore;
use crate::app::services::record_update::MarkerService;
use crate::Error;
use serde_json::{json, Value};
use tempfile::TempDir;

fn service(temp_dir: &TempDir) -> MarkerService {
    MarkerService::new(MarkerStore::new(temp_dir.path()))
}

fn bulk_request(ids: Value, field: &str, action: &str, values: Value) -> BulkUpdateRequest {
    BulkUpdateRequest {
        ids: ids.as_array().cloned().unwrap_or_default(),
        field: Some(field.to_string()),
        action: Some(action.to_string()),
        values: Some(values),
    }
}

fn seed(temp_dir: &TempDir, key: CollectionKey, document: Value) {
    std::fs::write(
        temp_dir.path().join(key.file_name()),
        serde_json::to_string(&document).unwrap(),
    )
    .unwrap();
}

#[tokio::test]
async fn test_bulk_update_scenario_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    seed(
        &temp_dir,
        CollectionKey::Default,
        json!({"STATION": [{"id": 1, "product": []}]}),
    );
    let service = service(&temp_dir);

    let request = bulk_request(json!(["1"]), "product", "add", json!(["A", "B"]));
    let outcome = service
        .bulk_update(CollectionKey::Default, &request)
        .await
        .unwrap();

    assert_eq!(outcome.updated_count, 1);
    assert_eq!(outcome.updated_ids, vec![json!(1)]);
    assert_eq!(outcome.message, "Action 'add' completed on field 'product'.");

    // Mutation is durable and the structural invariant holds on reload
    let records = service.list(CollectionKey::Default).await.unwrap();
    assert_eq!(records[0]["product"], json!(["A", "B"]));
}

#[tokio::test]
async fn test_bulk_update_is_idempotent_across_persisted_calls() {
    let temp_dir = TempDir::new().unwrap();
    seed(
        &temp_dir,
        CollectionKey::Default,
        json!({"STATION": [{"id": 1}]}),
    );
    let service = service(&temp_dir);
    let request = bulk_request(json!(["1"]), "product", "add", json!(["A"]));

    let first = service
        .bulk_update(CollectionKey::Default, &request)
        .await
        .unwrap();
    assert_eq!(first.updated_count, 1);

    let second = service
        .bulk_update(CollectionKey::Default, &request)
        .await
        .unwrap();
    assert_eq!(second.updated_count, 0);
    assert!(second.updated_ids.is_empty());

    let records = service.list(CollectionKey::Default).await.unwrap();
    assert_eq!(records[0]["product"], json!(["A"]));
}

#[tokio::test]
async fn test_bulk_validation_rejects_missing_parameters() {
    let temp_dir = TempDir::new().unwrap();
    let service = service(&temp_dir);

    let missing: [BulkUpdateRequest; 4] = [
        bulk_request(json!([]), "product", "add", json!(["A"])),
        bulk_request(json!(["1"]), "", "add", json!(["A"])),
        bulk_request(json!(["1"]), "product", "", json!(["A"])),
        bulk_request(json!(["1"]), "product", "add", json!([])),
    ];

    for request in missing {
        let error = service
            .bulk_update(CollectionKey::Default, &request)
            .await
            .unwrap_err();
        assert!(matches!(error, Error::Validation { .. }));
    }

    // Validation fails before any I/O: no document was created
    assert!(!temp_dir.path().join("markers.json").exists());
}

#[tokio::test]
async fn test_bulk_validation_rejects_unknown_field() {
    let temp_dir = TempDir::new().unwrap();
    let service = service(&temp_dir);

    let request = bulk_request(json!(["1"]), "name", "add", json!(["A"]));
    let error = service
        .bulk_update(CollectionKey::Default, &request)
        .await
        .unwrap_err();
    assert!(matches!(error, Error::Validation { .. }));
}

#[tokio::test]
async fn test_bulk_validation_rejects_non_list_values() {
    let temp_dir = TempDir::new().unwrap();
    let service = service(&temp_dir);

    let request = bulk_request(json!(["1"]), "product", "add", json!("scalar"));
    let error = service
        .bulk_update(CollectionKey::Default, &request)
        .await
        .unwrap_err();
    assert!(matches!(error, Error::Validation { .. }));
}

#[tokio::test]
async fn test_bulk_unknown_action_is_reported_noop() {
    let temp_dir = TempDir::new().unwrap();
    seed(
        &temp_dir,
        CollectionKey::Default,
        json!({"STATION": [{"id": 1, "product": ["A"]}]}),
    );
    let service = service(&temp_dir);

    let request = bulk_request(json!(["1"]), "product", "toggle", json!(["A"]));
    let outcome = service
        .bulk_update(CollectionKey::Default, &request)
        .await
        .unwrap();

    assert_eq!(outcome.updated_count, 0);
    assert!(outcome.updated_ids.is_empty());

    let records = service.list(CollectionKey::Default).await.unwrap();
    assert_eq!(records[0]["product"], json!(["A"]));
}

#[tokio::test]
async fn test_patch_reports_per_entry_outcomes() {
    let temp_dir = TempDir::new().unwrap();
    seed(
        &temp_dir,
        CollectionKey::Default,
        json!({"STATION": [{"id": 1}]}),
    );
    let service = service(&temp_dir);

    let entries = vec![
        PatchEntry {
            id: json!(2),
            changes: json!({"description": ["x"]}).as_object().unwrap().clone(),
        },
        PatchEntry {
            id: json!("1"),
            changes: json!({"name": "patched"}).as_object().unwrap().clone(),
        },
    ];

    let outcome = service.patch(CollectionKey::Default, &entries).await.unwrap();
    assert_eq!(outcome.updated_ids, vec![json!("1")]);
    assert_eq!(outcome.not_found_ids, vec![json!(2)]);

    let records = service.list(CollectionKey::Default).await.unwrap();
    assert_eq!(records[0]["name"], json!("patched"));
}

#[tokio::test]
async fn test_create_requires_scalar_id() {
    let temp_dir = TempDir::new().unwrap();
    let service = service(&temp_dir);

    let error = service
        .create(CollectionKey::Default, json!({"name": "no id"}).as_object().unwrap().clone())
        .await
        .unwrap_err();
    assert!(matches!(error, Error::Validation { .. }));
    assert!(!temp_dir.path().join("markers.json").exists());
}

#[tokio::test]
async fn test_create_persists_with_defaulted_list_fields() {
    let temp_dir = TempDir::new().unwrap();
    let service = service(&temp_dir);

    let stored = service
        .create(
            CollectionKey::Default,
            json!({"id": 1, "name": "Alpha"}).as_object().unwrap().clone(),
        )
        .await
        .unwrap();
    assert_eq!(stored["promotion"], json!([]));

    let records = service.list(CollectionKey::Default).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], json!("Alpha"));
}

#[tokio::test]
async fn test_replace_only_first_duplicate_and_persists() {
    let temp_dir = TempDir::new().unwrap();
    seed(
        &temp_dir,
        CollectionKey::Default,
        json!({"STATION": [
            {"id": "X", "name": "first"},
            {"id": "X", "name": "second"}
        ]}),
    );
    let service = service(&temp_dir);

    let replaced = service
        .replace(
            CollectionKey::Default,
            "X",
            json!({"id": "X", "name": "replaced"}).as_object().unwrap().clone(),
        )
        .await
        .unwrap();
    assert!(replaced.is_some());

    let records = service.list(CollectionKey::Default).await.unwrap();
    assert_eq!(records[0]["name"], json!("replaced"));
    assert_eq!(records[1]["name"], json!("second"));
}

#[tokio::test]
async fn test_replace_miss_returns_none_and_persists_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let service = service(&temp_dir);

    let replaced = service
        .replace(
            CollectionKey::Default,
            "9",
            json!({"id": 9}).as_object().unwrap().clone(),
        )
        .await
        .unwrap();
    assert!(replaced.is_none());
    assert!(!temp_dir.path().join("markers.json").exists());
}

#[tokio::test]
async fn test_delete_removes_all_matches_and_persists() {
    let temp_dir = TempDir::new().unwrap();
    seed(
        &temp_dir,
        CollectionKey::Default,
        json!({"STATION": [{"id": "X"}, {"id": "X"}, {"id": "Y"}]}),
    );
    let service = service(&temp_dir);

    assert!(service.delete(CollectionKey::Default, "X").await.unwrap());

    let records = service.list(CollectionKey::Default).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], json!("Y"));

    // Second delete finds nothing
    assert!(!service.delete(CollectionKey::Default, "X").await.unwrap());
}

#[tokio::test]
async fn test_delete_normalizes_numeric_ids() {
    let temp_dir = TempDir::new().unwrap();
    seed(
        &temp_dir,
        CollectionKey::Default,
        json!({"STATION": [{"id": 42}]}),
    );
    let service = service(&temp_dir);

    assert!(service.delete(CollectionKey::Default, "42").await.unwrap());
    assert!(service.list(CollectionKey::Default).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_structural_error_aborts_before_mutation() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(CollectionKey::Default.file_name()),
        r#"{"no_station": true}"#,
    )
    .unwrap();
    let service = service(&temp_dir);

    let request = bulk_request(json!(["1"]), "product", "add", json!(["A"]));
    let error = service
        .bulk_update(CollectionKey::Default, &request)
        .await
        .unwrap_err();
    assert!(matches!(error, Error::Structure { .. }));

    // The corrupt document is untouched
    let raw = std::fs::read_to_string(temp_dir.path().join("markers.json")).unwrap();
    assert_eq!(raw, r#"{"no_station": true}"#);
}

#[tokio::test]
async fn test_operations_keep_keys_independent() {
    let temp_dir = TempDir::new().unwrap();
    let service = service(&temp_dir);

    service
        .create(
            CollectionKey::Admin,
            json!({"id": 1}).as_object().unwrap().clone(),
        )
        .await
        .unwrap();

    assert!(service.list(CollectionKey::Default).await.unwrap().is_empty());
    assert_eq!(service.list(CollectionKey::Admin).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_export_produces_workbook_bytes() {
    let temp_dir = TempDir::new().unwrap();
    seed(
        &temp_dir,
        CollectionKey::Default,
        json!({"STATION": [{"id": 1, "product": ["A", "B"]}]}),
    );
    let service = service(&temp_dir);

    let bytes = service.export(CollectionKey::Default).await.unwrap();
    // xlsx files are zip archives
    assert_eq!(&bytes[..2], b"PK");
}
