//! Shared test utilities and fixtures for record update tests

use serde_json::{Map, Value};

pub mod dispatcher_tests;
pub mod matcher_tests;

/// Build a record from an id and extra fields
pub fn station(id: Value, fields: &[(&str, Value)]) -> Value {
    let mut record = Map::new();
    record.insert("id".to_string(), id);
    for (name, value) in fields {
        record.insert((*name).to_string(), value.clone());
    }
    Value::Object(record)
}

/// Extract a record's object map for assertions
pub fn fields(record: &Value) -> &Map<String, Value> {
    record.as_object().expect("record should be an object")
}
