// MySQL catalog adapter

use async_trait::async_trait;

use crate::database::{DatabaseConnection, DatabaseType, DatabaseValue};
use crate::introspect::{
    Result,
    adapters::{DialectAdapter, rows},
    definitions::{ColumnRow, ConstraintRow},
    derive::ColumnRules,
    errors::query_error,
};

const LIST_TABLES: &str = r#"
SELECT CAST(table_name AS CHAR) AS table_name
FROM information_schema.tables
WHERE table_schema = DATABASE() AND table_type = 'BASE TABLE'
ORDER BY table_name"#;

const CONSTRAINTS: &str = r#"
SELECT
    CAST(c.constraint_type AS CHAR) AS constraint_type,
    CAST(u.column_name AS CHAR) AS column_name,
    CAST(u.referenced_table_schema AS CHAR) AS referenced_table_schema,
    CAST(u.referenced_table_name AS CHAR) AS referenced_table_name,
    CAST(u.referenced_column_name AS CHAR) AS referenced_column_name,
    CAST(u.ordinal_position AS CHAR) AS ordinal_position
FROM information_schema.table_constraints c
INNER JOIN information_schema.key_column_usage u
    ON c.constraint_name = u.constraint_name
WHERE c.table_schema = DATABASE() AND c.table_name = ?
    AND u.table_schema = DATABASE() AND u.table_name = ?
ORDER BY c.constraint_type, u.ordinal_position"#;

const COLUMNS: &str = r#"
SELECT
    CAST(column_name AS CHAR) AS column_name,
    CAST(data_type AS CHAR) AS data_type,
    CAST(column_type AS CHAR) AS column_type,
    CAST(is_nullable AS CHAR) AS is_nullable,
    CAST(column_default AS CHAR) AS column_default,
    CAST(extra AS CHAR) AS extra,
    CAST(column_comment AS CHAR) AS column_comment
FROM information_schema.columns
WHERE table_schema = DATABASE() AND table_name = ?
ORDER BY ordinal_position"#;

/// MySQL catalog adapter
///
/// Reads `information_schema` of the connection's current database. Works
/// with MariaDB as well, which reports the same views.
#[derive(Debug, Default)]
pub struct MySqlAdapter;

impl MySqlAdapter {
    /// Create a new adapter instance
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DialectAdapter for MySqlAdapter {
    fn dialect(&self) -> DatabaseType {
        DatabaseType::MySql
    }

    fn column_rules(&self) -> &ColumnRules {
        &ColumnRules::MYSQL
    }

    async fn list_tables(&self, conn: &dyn DatabaseConnection) -> Result<Vec<String>> {
        conn.query(LIST_TABLES, &[])
            .await
            .map_err(|e| query_error(None, e))?
            .iter()
            .map(|row| rows::table_name(row.as_ref()))
            .collect()
    }

    async fn fetch_constraint_rows(
        &self,
        conn: &dyn DatabaseConnection,
        table: &str,
    ) -> Result<Vec<ConstraintRow>> {
        let params = [DatabaseValue::from(table), DatabaseValue::from(table)];
        conn.query(CONSTRAINTS, &params)
            .await
            .map_err(|e| query_error(Some(table), e))?
            .iter()
            .map(|row| rows::constraint_row(row.as_ref(), table))
            .collect()
    }

    async fn fetch_column_rows(
        &self,
        conn: &dyn DatabaseConnection,
        table: &str,
    ) -> Result<Vec<ColumnRow>> {
        conn.query(COLUMNS, &[DatabaseValue::from(table)])
            .await
            .map_err(|e| query_error(Some(table), e))?
            .iter()
            .map(|row| rows::column_row(row.as_ref(), table))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_and_rules() {
        let adapter = MySqlAdapter::new();
        assert_eq!(adapter.dialect(), DatabaseType::MySql);
        assert!(adapter.column_rules().unsigned_modifier);
        assert!(adapter.column_rules().comments);
        assert_eq!(
            adapter.map_type("int unsigned").unwrap(),
            crate::introspect::SemanticType::U32
        );
    }

    #[test]
    fn test_queries_bind_by_position() {
        assert_eq!(CONSTRAINTS.matches('?').count(), 2);
        assert_eq!(COLUMNS.matches('?').count(), 1);
        assert!(COLUMNS.contains("ORDER BY ordinal_position"));
    }
}
