use async_trait::async_trait;
use tracing::debug;

use crate::database::{DatabaseConnection, DatabaseType};
use crate::introspect::{
    Result,
    blacklist::Blacklist,
    definitions::{ColumnRow, ConstraintRow, DroppedRelation, SemanticType, Table},
    derive::{ColumnRules, apply_constraint_rows, derive_columns},
    typemap::TypeMapper,
};

/// Dialect-specific catalog access behind one contract
///
/// Implementations only know how to query their dialect's information
/// schema; key resolution and tag derivation are shared.
#[async_trait]
pub trait DialectAdapter: Send + Sync {
    /// The dialect this adapter reads
    fn dialect(&self) -> DatabaseType;

    /// Switches applied while deriving columns
    fn column_rules(&self) -> &ColumnRules;

    /// The dialect's curated type map
    fn type_mapper(&self) -> &'static TypeMapper {
        TypeMapper::for_dialect(self.dialect())
    }

    /// Map a native type name to its semantic type
    fn map_type(&self, native_type: &str) -> Result<SemanticType> {
        self.type_mapper().resolve(native_type)
    }

    /// List the user tables of the connected database
    async fn list_tables(&self, conn: &dyn DatabaseConnection) -> Result<Vec<String>>;

    /// Fetch the key constraint rows of a table
    async fn fetch_constraint_rows(
        &self,
        conn: &dyn DatabaseConnection,
        table: &str,
    ) -> Result<Vec<ConstraintRow>>;

    /// Fetch the column rows of a table in native order
    async fn fetch_column_rows(
        &self,
        conn: &dyn DatabaseConnection,
        table: &str,
    ) -> Result<Vec<ColumnRow>>;

    /// Resolve primary, unique and foreign keys of a table
    async fn resolve_constraints(
        &self,
        conn: &dyn DatabaseConnection,
        table: &mut Table,
        blacklist: &mut Blacklist,
    ) -> Result<()> {
        let rows = self.fetch_constraint_rows(conn, &table.name).await?;
        debug!(table = %table.name, rows = rows.len(), "resolving constraints");
        apply_constraint_rows(table, &rows, blacklist);
        Ok(())
    }

    /// Resolve the columns of a table against the finished blacklist
    async fn resolve_columns(
        &self,
        conn: &dyn DatabaseConnection,
        table: &mut Table,
        blacklist: &Blacklist,
    ) -> Result<Vec<DroppedRelation>> {
        let rows = self.fetch_column_rows(conn, &table.name).await?;
        debug!(table = %table.name, rows = rows.len(), "resolving columns");
        derive_columns(
            table,
            &rows,
            blacklist,
            self.type_mapper(),
            self.column_rules(),
        )
    }
}
