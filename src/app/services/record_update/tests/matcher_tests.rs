//! Tests for string-normalized id matching

use super::station;
use crate::app::services::record_update::matcher::{
    find_first, id_repr, id_set, ids_match, record_id,
};
use serde_json::json;

#[test]
fn test_id_repr_scalars() {
    assert_eq!(id_repr(&json!("7")), Some("7".to_string()));
    assert_eq!(id_repr(&json!(7)), Some("7".to_string()));
    assert_eq!(id_repr(&json!(7.5)), Some("7.5".to_string()));
    assert_eq!(id_repr(&json!(true)), Some("true".to_string()));
}

#[test]
fn test_id_repr_rejects_null_and_compound_values() {
    assert_eq!(id_repr(&json!(null)), None);
    assert_eq!(id_repr(&json!([1])), None);
    assert_eq!(id_repr(&json!({"id": 1})), None);
}

#[test]
fn test_numeric_and_string_ids_share_canonical_form() {
    let numeric = station(json!(42), &[]);
    let stringy = station(json!("42"), &[]);

    assert_eq!(record_id(&numeric), record_id(&stringy));
    assert!(ids_match(&numeric, "42"));
    assert!(ids_match(&stringy, "42"));
}

#[test]
fn test_record_id_requires_object_with_scalar_id() {
    assert_eq!(record_id(&json!("not an object")), None);
    assert_eq!(record_id(&json!({"name": "no id"})), None);
    assert_eq!(record_id(&station(json!(null), &[])), None);
}

#[test]
fn test_find_first_in_sequence_order() {
    let records = vec![
        station(json!(1), &[("name", json!("first"))]),
        station(json!("1"), &[("name", json!("second"))]),
        station(json!(2), &[]),
    ];

    assert_eq!(find_first(&records, "1"), Some(0));
    assert_eq!(find_first(&records, "2"), Some(2));
    assert_eq!(find_first(&records, "3"), None);
}

#[test]
fn test_id_set_canonicalizes_and_drops_unusable_values() {
    let set = id_set(&[json!(1), json!("2"), json!(null), json!([3])]);
    assert_eq!(set.len(), 2);
    assert!(set.contains("1"));
    assert!(set.contains("2"));
}
