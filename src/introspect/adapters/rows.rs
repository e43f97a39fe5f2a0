//! Decoding of catalog rows shared by both dialects.
//!
//! Adapter queries alias their result columns to the names used here and
//! cast every value to text.

use crate::database::DatabaseRow;
use crate::introspect::{
    Result,
    definitions::{ColumnRow, ConstraintKind, ConstraintRow},
    errors::{metadata_query_error, query_error},
};

fn text(row: &dyn DatabaseRow, table: &str, column: &str) -> Result<String> {
    row.get_string(column).map_err(|e| query_error(Some(table), e))
}

fn optional_text(row: &dyn DatabaseRow, table: &str, column: &str) -> Result<Option<String>> {
    row.try_get_string(column).map_err(|e| query_error(Some(table), e))
}

/// Decode a `table_name` row of a table listing
pub fn table_name(row: &dyn DatabaseRow) -> Result<String> {
    row.get_string("table_name")
        .map_err(|e| query_error(None, e))
}

/// Decode a key constraint row
pub fn constraint_row(row: &dyn DatabaseRow, table: &str) -> Result<ConstraintRow> {
    let ordinal = text(row, table, "ordinal_position")?;
    let ordinal_position = ordinal.trim().parse::<u32>().map_err(|_| {
        metadata_query_error(table, format!("unreadable ordinal position '{}'", ordinal))
    })?;

    Ok(ConstraintRow {
        kind: ConstraintKind::from_catalog(&text(row, table, "constraint_type")?),
        column_name: text(row, table, "column_name")?,
        ref_schema: optional_text(row, table, "referenced_table_schema")?,
        ref_table: optional_text(row, table, "referenced_table_name")?,
        ref_column: optional_text(row, table, "referenced_column_name")?,
        ordinal_position,
    })
}

/// Decode a column metadata row
pub fn column_row(row: &dyn DatabaseRow, table: &str) -> Result<ColumnRow> {
    Ok(ColumnRow {
        name: text(row, table, "column_name")?,
        data_type: text(row, table, "data_type")?,
        column_type: text(row, table, "column_type")?,
        is_nullable: text(row, table, "is_nullable")? == "YES",
        default: optional_text(row, table, "column_default")?,
        extra: optional_text(row, table, "extra")?.unwrap_or_default(),
        comment: optional_text(row, table, "column_comment")?,
    })
}
