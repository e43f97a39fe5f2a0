use thiserror::Error;

use crate::database::DatabaseError;

/// Error types for schema introspection
///
/// Every variant is fatal for the run: the builder never hands a partially
/// populated model to its caller.
#[derive(Debug, Error)]
pub enum Error {
    /// The schema source could not be reached or authenticated against
    #[error("connection error: {0}")]
    Connection(String),

    /// A catalog query failed or returned unreadable rows
    #[error("metadata query failed{}: {message}", table_suffix(.table))]
    MetadataQuery {
        table: Option<String>,
        message: String,
    },

    /// The dialect's type map has no entry for a native type
    #[error(
        "data type '{native_type}' not found{}",
        location_suffix(.table, .column)
    )]
    UnknownType {
        native_type: String,
        table: Option<String>,
        column: Option<String>,
    },

    /// A structural pattern did not match a raw column type string
    #[error("cannot extract size/precision of column '{column}' from type '{raw_type}'")]
    Extraction { column: String, raw_type: String },

    /// The run was set up inconsistently
    #[error("configuration error: {0}")]
    Configuration(String),
}

fn table_suffix(table: &Option<String>) -> String {
    match table {
        Some(t) => format!(" for table '{}'", t),
        None => String::new(),
    }
}

fn location_suffix(table: &Option<String>, column: &Option<String>) -> String {
    match (table, column) {
        (Some(t), Some(c)) => format!(" (column {}.{})", t, c),
        (None, Some(c)) => format!(" (column {})", c),
        (Some(t), None) => format!(" (table {})", t),
        (None, None) => String::new(),
    }
}

impl Error {
    /// Attach table/column context to an UnknownType error
    pub fn at_column(self, table: &str, column: &str) -> Self {
        match self {
            Error::UnknownType { native_type, .. } => Error::UnknownType {
                native_type,
                table: Some(table.to_string()),
                column: Some(column.to_string()),
            },
            other => other,
        }
    }
}

impl From<DatabaseError> for Error {
    fn from(err: DatabaseError) -> Self {
        query_error(None, err)
    }
}

/// Convenience Result type for introspection operations
pub type Result<T> = std::result::Result<T, Error>;

/// Classify a failed catalog query, keeping connection failures distinct
pub fn query_error(table: Option<&str>, err: DatabaseError) -> Error {
    match err {
        DatabaseError::Connection(msg) => Error::Connection(msg),
        DatabaseError::Configuration(msg) => Error::Configuration(msg),
        DatabaseError::Query(message) => Error::MetadataQuery {
            table: table.map(str::to_string),
            message,
        },
    }
}

/// Helper to create a MetadataQuery error
pub fn metadata_query_error<S: Into<String>>(table: &str, msg: S) -> Error {
    Error::MetadataQuery {
        table: Some(table.to_string()),
        message: msg.into(),
    }
}

/// Helper to create an UnknownType error without location
pub fn unknown_type_error<S: Into<String>>(native_type: S) -> Error {
    Error::UnknownType {
        native_type: native_type.into(),
        table: None,
        column: None,
    }
}

/// Helper to create an Extraction error
pub fn extraction_error(column: &str, raw_type: &str) -> Error {
    Error::Extraction {
        column: column.to_string(),
        raw_type: raw_type.to_string(),
    }
}

/// Helper to create a Configuration error
pub fn configuration_error<S: Into<String>>(msg: S) -> Error {
    Error::Configuration(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_names_type_and_location() {
        let err = unknown_type_error("money").at_column("orders", "total");
        let msg = err.to_string();
        assert!(msg.contains("'money'"));
        assert!(msg.contains("orders.total"));
    }

    #[test]
    fn test_extraction_names_column_and_raw_string() {
        let msg = extraction_error("name", "varchar").to_string();
        assert!(msg.contains("'name'"));
        assert!(msg.contains("'varchar'"));
    }

    #[test]
    fn test_database_error_classification() {
        assert!(matches!(
            query_error(Some("users"), DatabaseError::Connection("refused".into())),
            Error::Connection(_)
        ));
        match query_error(Some("users"), DatabaseError::Query("syntax".into())) {
            Error::MetadataQuery { table, message } => {
                assert_eq!(table.as_deref(), Some("users"));
                assert_eq!(message, "syntax");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(Error::from(DatabaseError::Query("boom".into()))
            .to_string()
            .starts_with("metadata query failed: boom"));
    }

    #[test]
    fn test_at_column_leaves_other_errors_untouched() {
        let err = extraction_error("price", "decimal").at_column("items", "price");
        assert!(matches!(err, Error::Extraction { .. }));
    }
}
