//! Tabular export projection
//!
//! Flattens a collection snapshot into a rectangular table (one row per
//! record, one column per distinct field key) and renders it as an xlsx
//! workbook. List-valued fields are joined into a single delimited cell;
//! everything else passes through unchanged. The projection is read-only
//! and shares no state with in-flight writes.

use crate::app::models::is_list_field;
use crate::constants::EXPORT_SHEET_NAME;
use crate::{Error, Result};
use rust_xlsxwriter::Workbook;
use serde_json::Value;
use tracing::debug;

#[cfg(test)]
pub mod tests;

/// Delimiter joining list elements into one cell
const LIST_DELIMITER: &str = ", ";

/// A rectangular projection of a record sequence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportTable {
    /// Column names, ordered by first appearance across the records
    pub columns: Vec<String>,

    /// One row per record; `None` cells are fields absent on that record
    pub rows: Vec<Vec<Option<Value>>>,
}

/// Project a record sequence into a table
///
/// Columns are the union of field keys across all records, in order of
/// first appearance. List values in the list-valued fields are joined
/// with `", "`; other values pass through. Records that are not objects
/// produce an all-empty row.
pub fn project(records: &[Value]) -> ExportTable {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        if let Some(fields) = record.as_object() {
            for key in fields.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
    }

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| {
                    record
                        .as_object()
                        .and_then(|fields| fields.get(column))
                        .map(|value| flatten(column, value))
                })
                .collect()
        })
        .collect();

    debug!(
        "Projected {} record(s) into {} column(s)",
        records.len(),
        columns.len()
    );

    ExportTable { columns, rows }
}

/// Flatten one cell: list fields join their elements, the rest pass through
fn flatten(column: &str, value: &Value) -> Value {
    match value {
        Value::Array(items) if is_list_field(column) => Value::String(
            items
                .iter()
                .map(element_text)
                .collect::<Vec<_>>()
                .join(LIST_DELIMITER),
        ),
        other => other.clone(),
    }
}

/// Text form of a list element (strings unquoted, the rest as JSON)
fn element_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render a table as xlsx workbook bytes
///
/// Single worksheet named `Stations` with a header row of column names.
pub fn render_xlsx(table: &ExportTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(EXPORT_SHEET_NAME)
        .map_err(|e| Error::export(format!("Failed to name worksheet: {}", e)))?;

    for (col, name) in table.columns.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, name)
            .map_err(|e| Error::export(format!("Failed to write header '{}': {}", name, e)))?;
    }

    for (row, cells) in table.rows.iter().enumerate() {
        let row = (row + 1) as u32;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            let result = match cell {
                None | Some(Value::Null) => continue,
                Some(Value::String(s)) => worksheet.write_string(row, col, s),
                Some(Value::Number(n)) => {
                    worksheet.write_number(row, col, n.as_f64().unwrap_or(f64::NAN))
                }
                Some(Value::Bool(b)) => worksheet.write_boolean(row, col, *b),
                Some(other) => worksheet.write_string(row, col, other.to_string()),
            };
            result.map_err(|e| Error::export(format!("Failed to write cell: {}", e)))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| Error::export(format!("Failed to render workbook: {}", e)))
}
