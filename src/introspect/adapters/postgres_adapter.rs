// PostgreSQL catalog adapter

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
SELECT table_name::text AS table_name
FROM information_schema.tables
WHERE table_catalog = current_database()
    AND table_type = 'BASE TABLE'
    AND table_schema NOT IN ('pg_catalog', 'information_schema')
ORDER BY table_name"#;

// key_column_usage carries no referenced columns. Foreign keys are paired
// with the referenced unique key column by position, so composite keys
// keep their column pairing.
const CONSTRAINTS: &str = r#"
SELECT
    c.constraint_type::text AS constraint_type,
    u.column_name::text AS column_name,
    r.table_schema::text AS referenced_table_schema,
    r.table_name::text AS referenced_table_name,
    r.column_name::text AS referenced_column_name,
    u.ordinal_position::text AS ordinal_position
FROM information_schema.table_constraints c
INNER JOIN information_schema.key_column_usage u
    ON c.constraint_name = u.constraint_name
    AND c.constraint_schema = u.constraint_schema
    AND c.table_name = u.table_name
LEFT JOIN information_schema.referential_constraints rc
    ON rc.constraint_name = c.constraint_name
    AND rc.constraint_schema = c.constraint_schema
LEFT JOIN information_schema.key_column_usage r
    ON r.constraint_name = rc.unique_constraint_name
    AND r.constraint_schema = rc.unique_constraint_schema
    AND r.ordinal_position = u.position_in_unique_constraint
WHERE c.table_catalog = current_database()
    AND c.table_schema NOT IN ('pg_catalog', 'information_schema')
    AND c.table_name = $1
ORDER BY c.constraint_type, u.ordinal_position"#;

// column_type and extra are synthesized to match the MySQL catalog shape.
const COLUMNS: &str = r#"
SELECT
    column_name::text AS column_name,
    data_type::text AS data_type,
    data_type::text ||
    CASE
        WHEN data_type = 'character' AND character_maximum_length IS NOT NULL
            THEN '(' || character_maximum_length || ')'
        WHEN data_type = 'numeric' AND numeric_precision IS NOT NULL
            THEN '(' || numeric_precision || ',' || numeric_scale || ')'
        ELSE ''
    END AS column_type,
    is_nullable::text AS is_nullable,
    column_default::text AS column_default,
    CASE
        WHEN is_identity = 'YES' OR column_default LIKE 'nextval(%' THEN 'auto_increment'
        ELSE ''
    END AS extra,
    NULL::text AS column_comment
FROM information_schema.columns
WHERE table_catalog = current_database()
    AND table_schema NOT IN ('pg_catalog', 'information_schema')
    AND table_name = $1
ORDER BY ordinal_position"#;

/// PostgreSQL catalog adapter
///
/// Reads every non-system schema of the current database.
#[derive(Debug, Default)]
pub struct PostgresAdapter;

impl PostgresAdapter {
    /// Create a new adapter instance
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DialectAdapter for PostgresAdapter {
    fn dialect(&self) -> DatabaseType {
        DatabaseType::Postgres
    }

    fn column_rules(&self) -> &ColumnRules {
        &ColumnRules::POSTGRES
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
        conn.query(CONSTRAINTS, &[DatabaseValue::from(table)])
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
