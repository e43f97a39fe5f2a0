//! In-memory catalog connection for tests.
//!
//! Answers the adapters' catalog queries from canned rows and records which
//! query ran for which table, so pass ordering can be asserted.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::database::{
    DatabaseConnection, DatabaseError, DatabaseResult, DatabaseRow, DatabaseType, DatabaseValue,
};
use crate::introspect::definitions::{ColumnRow, ConstraintKind, ConstraintRow};

/// Row backed by a map of nullable text values
pub struct MapRow(HashMap<String, Option<String>>);

impl MapRow {
    fn new<I: IntoIterator<Item = (&'static str, Option<String>)>>(values: I) -> Self {
        Self(values.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

impl DatabaseRow for MapRow {
    fn get_string(&self, column: &str) -> DatabaseResult<String> {
        self.try_get_string(column)?
            .ok_or_else(|| DatabaseError::Query(format!("column {} is NULL", column)))
    }

    fn try_get_string(&self, column: &str) -> DatabaseResult<Option<String>> {
        self.0
            .get(column)
            .cloned()
            .ok_or_else(|| DatabaseError::Query(format!("no column named {}", column)))
    }
}

/// Catalog query kinds the fixture recognises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogQuery {
    Tables,
    Constraints,
    Columns,
}

/// Canned catalog of one database
pub struct CatalogFixture {
    dialect: DatabaseType,
    tables: Vec<String>,
    constraints: HashMap<String, Vec<ConstraintRow>>,
    columns: HashMap<String, Vec<ColumnRow>>,
    failing_table: Option<String>,
    disconnected: bool,
    log: Mutex<Vec<(CatalogQuery, String)>>,
}

/// Column row with the given types, not nullable and without extras
pub fn column(name: &str, data_type: &str, column_type: &str) -> ColumnRow {
    ColumnRow {
        name: name.to_string(),
        data_type: data_type.to_string(),
        column_type: column_type.to_string(),
        is_nullable: false,
        default: None,
        extra: String::new(),
        comment: None,
    }
}

impl CatalogFixture {
    pub fn new(dialect: DatabaseType) -> Self {
        Self {
            dialect,
            tables: Vec::new(),
            constraints: HashMap::new(),
            columns: HashMap::new(),
            failing_table: None,
            disconnected: false,
            log: Mutex::new(Vec::new()),
        }
    }

    /// Add a table with its columns, in native order
    pub fn table(mut self, name: &str, columns: Vec<ColumnRow>) -> Self {
        self.tables.push(name.to_string());
        self.columns.insert(name.to_string(), columns);
        self
    }

    /// Add primary-key rows, one per key column in key order
    pub fn primary_key(mut self, table: &str, key_columns: &[&str]) -> Self {
        let rows = self.constraints.entry(table.to_string()).or_default();
        for (i, column) in key_columns.iter().enumerate() {
            rows.push(ConstraintRow {
                kind: ConstraintKind::PrimaryKey,
                column_name: column.to_string(),
                ref_schema: None,
                ref_table: None,
                ref_column: None,
                ordinal_position: i as u32 + 1,
            });
        }
        self
    }

    pub fn unique(mut self, table: &str, column: &str) -> Self {
        self.constraints
            .entry(table.to_string())
            .or_default()
            .push(ConstraintRow {
                kind: ConstraintKind::Unique,
                column_name: column.to_string(),
                ref_schema: None,
                ref_table: None,
                ref_column: None,
                ordinal_position: 1,
            });
        self
    }

    pub fn foreign_key(mut self, table: &str, column: &str, ref_table: &str, ref_column: &str) -> Self {
        self.constraints
            .entry(table.to_string())
            .or_default()
            .push(ConstraintRow {
                kind: ConstraintKind::ForeignKey,
                column_name: column.to_string(),
                ref_schema: Some("app".to_string()),
                ref_table: Some(ref_table.to_string()),
                ref_column: Some(ref_column.to_string()),
                ordinal_position: 1,
            });
        self
    }

    /// Replace the constraint rows of a table verbatim
    pub fn constraint_rows(mut self, table: &str, rows: Vec<ConstraintRow>) -> Self {
        self.constraints.insert(table.to_string(), rows);
        self
    }

    /// Make every query about this table fail
    pub fn fail_on(mut self, table: &str) -> Self {
        self.failing_table = Some(table.to_string());
        self
    }

    /// Make every query fail as if the server were unreachable
    pub fn disconnected(mut self) -> Self {
        self.disconnected = true;
        self
    }

    /// Queries served so far, in order
    pub fn queries(&self) -> Vec<(CatalogQuery, String)> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    fn classify(query: &str) -> Option<CatalogQuery> {
        if query.contains("table_constraints") {
            Some(CatalogQuery::Constraints)
        } else if query.contains("information_schema.columns") {
            Some(CatalogQuery::Columns)
        } else if query.contains("information_schema.tables") {
            Some(CatalogQuery::Tables)
        } else {
            None
        }
    }

    fn constraint_map_row(row: &ConstraintRow) -> Box<dyn DatabaseRow> {
        Box::new(MapRow::new([
            ("constraint_type", Some(row.kind.as_catalog().to_string())),
            ("column_name", Some(row.column_name.clone())),
            ("referenced_table_schema", row.ref_schema.clone()),
            ("referenced_table_name", row.ref_table.clone()),
            ("referenced_column_name", row.ref_column.clone()),
            ("ordinal_position", Some(row.ordinal_position.to_string())),
        ]))
    }

    fn column_map_row(row: &ColumnRow) -> Box<dyn DatabaseRow> {
        let nullable = if row.is_nullable { "YES" } else { "NO" };
        Box::new(MapRow::new([
            ("column_name", Some(row.name.clone())),
            ("data_type", Some(row.data_type.clone())),
            ("column_type", Some(row.column_type.clone())),
            ("is_nullable", Some(nullable.to_string())),
            ("column_default", row.default.clone()),
            ("extra", Some(row.extra.clone())),
            ("column_comment", row.comment.clone()),
        ]))
    }
}

#[async_trait]
impl DatabaseConnection for CatalogFixture {
    async fn query(
        &self,
        query: &str,
        params: &[DatabaseValue],
    ) -> DatabaseResult<Vec<Box<dyn DatabaseRow>>> {
        if self.disconnected {
            return Err(DatabaseError::Connection("connection refused".to_string()));
        }
        let kind = Self::classify(query)
            .ok_or_else(|| DatabaseError::Query(format!("unexpected query: {}", query)))?;
        let table = match params.first() {
            Some(DatabaseValue::Text(t)) => t.clone(),
            _ => String::new(),
        };
        if let Ok(mut log) = self.log.lock() {
            log.push((kind, table.clone()));
        }
        if self.failing_table.as_deref() == Some(table.as_str()) {
            return Err(DatabaseError::Query(format!(
                "permission denied for table {}",
                table
            )));
        }

        let rows = match kind {
            CatalogQuery::Tables => self
                .tables
                .iter()
                .map(|t| {
                    Box::new(MapRow::new([("table_name", Some(t.clone()))])) as Box<dyn DatabaseRow>
                })
                .collect(),
            CatalogQuery::Constraints => self
                .constraints
                .get(&table)
                .map(|rows| rows.iter().map(Self::constraint_map_row).collect())
                .unwrap_or_default(),
            CatalogQuery::Columns => self
                .columns
                .get(&table)
                .map(|rows| rows.iter().map(Self::column_map_row).collect())
                .unwrap_or_default(),
        };
        Ok(rows)
    }

    fn get_database_type(&self) -> DatabaseType {
        self.dialect
    }

    async fn close(&self) -> DatabaseResult<()> {
        Ok(())
    }
}
