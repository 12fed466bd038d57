//! Shared test utilities and fixtures for store tests

use crate::app::models::CollectionKey;
use std::fs;
use std::path::Path;


/// Write a raw document for a collection key into a data directory
pub fn write_document(data_dir: &Path, key: CollectionKey, raw: &str) {
    fs::create_dir_all(data_dir).unwrap();
    fs::write(data_dir.join(key.file_name()), raw).unwrap();
}
