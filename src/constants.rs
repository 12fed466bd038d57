//! Application constants for the marker server
//!
//! This module contains all configuration constants, default values,
//! and field name tables used throughout the marker server.

// =============================================================================
// Collection Document Layout
// =============================================================================

/// Top-level document key holding a collection's record sequence
pub const STATION_KEY: &str = "STATION";

/// Record fields treated as list-valued when present
///
/// Bulk list updates may only target one of these fields, and newly
/// created records receive an empty list for each of them when absent.
pub const LIST_FIELDS: &[&str] = &[
    "description",
    "product",
    "other_product",
    "service",
    "promotion",
];

// =============================================================================
// Server Defaults
// =============================================================================

/// Default bind address for the HTTP API
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default TCP port for the HTTP API
pub const DEFAULT_PORT: u16 = 7000;

/// Default directory holding the collection JSON documents
pub const DEFAULT_DATA_DIR: &str = "data";

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Environment override for the bind address
pub const ENV_HOST: &str = "MARKER_HOST";

/// Environment override for the TCP port
pub const ENV_PORT: &str = "MARKER_PORT";

/// Environment override for the data directory
pub const ENV_DATA_DIR: &str = "MARKER_DATA_DIR";

// =============================================================================
// Export
// =============================================================================

/// Worksheet name used in exported workbooks
pub const EXPORT_SHEET_NAME: &str = "Stations";

/// MIME type for xlsx attachments
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
