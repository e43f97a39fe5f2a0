// Schema introspection
//
// This module reads a live MySQL or PostgreSQL catalog and turns it into a
// dialect-independent model of tables, columns, keys and tag annotations.

pub mod adapters;
pub mod blacklist;
pub mod builder;
pub mod config;
pub mod definitions;
pub mod derive;
pub mod errors;
pub mod extract;
pub mod naming;
pub mod typemap;

#[cfg(test)]
pub mod testing;


// Re-export core types for convenience
pub use adapters::{DialectAdapter, MySqlAdapter, PostgresAdapter};
pub use blacklist::Blacklist;
pub use builder::SchemaModelBuilder;
pub use config::IntrospectConfig;
pub use definitions::{
    AutoTimestamp, Column, ColumnRow, ConstraintKind, ConstraintRow, DroppedRelation, FieldType,
    ForeignKey, OrmTag, SchemaModel, SemanticType, Table,
};
pub use errors::{Error, Result};
pub use typemap::TypeMapper;

use crate::database::DatabaseConnection;

/// Build the schema model of an open connection.
///
/// The connection stays owned by the caller and is only read from.
pub async fn build_schema_model(
    conn: &dyn DatabaseConnection,
    config: &IntrospectConfig,
) -> Result<SchemaModel> {
    SchemaModelBuilder::new(config.get_adapter())
        .build(conn, config.tables.as_deref())
        .await
}
