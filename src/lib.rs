//! Reverse-engineering of live MySQL and PostgreSQL schemas into a typed,
//! dialect-independent table model for code generation.

pub mod build;
pub mod database;
pub mod error;
pub mod introspect;
pub mod logging;
pub mod utils;

// Database re-exports
pub use database::{
    DatabaseConfig, DatabaseConnection, DatabaseError, DatabaseResult, DatabaseRow, DatabaseType,
    DatabaseValue, PoolConfig, extensions,
};
#[cfg(feature = "database")]
pub use database::create_database_connection;

// Re-export introspection entry points
pub use introspect::{IntrospectConfig, SchemaModel, SchemaModelBuilder, build_schema_model};

pub use error::{Error, Result};
pub use logging::{LogFormat, init_logging};
pub use utils::{OutputFormat, render_model};

/// Prelude module, exposing the most commonly used items.
pub mod prelude {
    pub use crate::{
        DatabaseConfig, DatabaseConnection, DatabaseType, Error, IntrospectConfig, LogFormat,
        OutputFormat, Result, SchemaModel, SchemaModelBuilder, build, build_schema_model,
        init_logging, render_model,
    };

    pub use crate::introspect::{
        Column, DialectAdapter, FieldType, ForeignKey, OrmTag, SemanticType, Table,
    };

    #[cfg(feature = "database")]
    pub use crate::create_database_connection;
}
