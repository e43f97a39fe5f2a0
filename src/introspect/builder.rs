use tracing::{debug, info, warn};

use crate::database::DatabaseConnection;
use crate::introspect::{
    Result,
    adapters::DialectAdapter,
    blacklist::Blacklist,
    definitions::{DroppedRelation, SchemaModel, Table},
    errors::configuration_error,
};

/// Builds the schema model in two passes over the table set
///
/// Pass one resolves the keys of every table and fills the blacklist; pass
/// two derives columns against the finished blacklist. The second pass
/// only receives a shared borrow of the blacklist, so it cannot start
/// while constraint resolution could still change it.
pub struct SchemaModelBuilder {
    /// The dialect strategy to query the catalog with
    adapter: Box<dyn DialectAdapter>,
}

impl SchemaModelBuilder {
    /// Create a new SchemaModelBuilder with the given adapter
    pub fn new(adapter: Box<dyn DialectAdapter>) -> Self {
        Self { adapter }
    }

    /// Build the model of the selected tables, or of every table when no
    /// selection is given. Any failure aborts the whole build.
    pub async fn build(
        &self,
        conn: &dyn DatabaseConnection,
        selection: Option<&[String]>,
    ) -> Result<SchemaModel> {
        let dialect = self.adapter.dialect();
        if conn.get_database_type() != dialect {
            return Err(configuration_error(format!(
                "connection dialect {} does not match adapter dialect {}",
                conn.get_database_type(),
                dialect
            )));
        }

        let names = match selection {
            Some(tables) => tables.to_vec(),
            None => self.adapter.list_tables(conn).await?,
        };
        info!(dialect = %dialect, tables = names.len(), "introspecting schema");

        let (mut tables, blacklist) = self.resolve_all_constraints(conn, &names).await?;
        let dropped_relations = self
            .resolve_all_columns(conn, &mut tables, &blacklist)
            .await?;

        info!(
            tables = tables.len(),
            blacklisted = blacklist.len(),
            dropped_relations = dropped_relations.len(),
            "schema model built"
        );

        Ok(SchemaModel {
            dialect,
            tables,
            blacklisted: blacklist.iter().map(str::to_string).collect(),
            dropped_relations,
        })
    }

    /// First pass: keys of every table, returning the finished blacklist
    pub async fn resolve_all_constraints(
        &self,
        conn: &dyn DatabaseConnection,
        names: &[String],
    ) -> Result<(Vec<Table>, Blacklist)> {
        let mut blacklist = Blacklist::new();
        let mut tables = Vec::with_capacity(names.len());

        for name in names {
            let mut table = Table::new(name.as_str());
            self.adapter
                .resolve_constraints(conn, &mut table, &mut blacklist)
                .await?;
            debug!(
                table = %table.name,
                primary_key = ?table.primary_key,
                foreign_keys = table.foreign_keys.len(),
                "constraints resolved"
            );
            tables.push(table);
        }

        Ok((tables, blacklist))
    }

    /// Second pass: columns of every table against the finished blacklist
    pub async fn resolve_all_columns(
        &self,
        conn: &dyn DatabaseConnection,
        tables: &mut [Table],
        blacklist: &Blacklist,
    ) -> Result<Vec<DroppedRelation>> {
        let mut dropped = Vec::new();

        for table in tables.iter_mut() {
            dropped.extend(
                self.adapter
                    .resolve_columns(conn, table, blacklist)
                    .await?,
            );
            if table.columns.is_empty() {
                warn!(table = %table.name, "table has no columns");
            }
        }

        Ok(dropped)
    }
}
