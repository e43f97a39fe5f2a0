use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};
use std::sync::Arc;
use std::time::Duration;

use crate::database::{
    DatabaseConfig, DatabaseConnection, DatabaseError, DatabaseResult, DatabaseRow, DatabaseType,
    DatabaseValue,
};

/// PostgreSQL implementation of the schema connection
pub struct PostgresConnection {
    pool: Arc<PgPool>,
}

impl PostgresConnection {
    /// Create a new PostgreSQL connection from a configuration
    pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<Self> {
        let database_url = config.connection_url()?;

        let pool = PgPoolOptions::new()
            .max_connections(config.pool.max_connections)
            .acquire_timeout(Duration::from_secs(config.pool.acquire_timeout_seconds))
            .connect(&database_url)
            .await
            .map_err(|e| {
                DatabaseError::Connection(format!(
                    "could not connect to '{}': {}",
                    config.redacted_url(),
                    e
                ))
            })?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }
}

/// Bind catalog query parameters
fn bind_params<'q>(
    mut query_builder: Query<'q, Postgres, PgArguments>,
    params: &[DatabaseValue],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query_builder = match param {
            DatabaseValue::Text(s) => query_builder.bind(s.clone()),
        };
    }
    query_builder
}

/// PostgreSQL implementation of the catalog row interface
pub struct PostgresRow {
    row: sqlx::postgres::PgRow,
}

impl DatabaseRow for PostgresRow {
    fn get_string(&self, column: &str) -> DatabaseResult<String> {
        self.row.try_get(column).map_err(|e| {
            DatabaseError::Query(format!("Failed to get string column {}: {}", column, e))
        })
    }

    fn try_get_string(&self, column: &str) -> DatabaseResult<Option<String>> {
        self.row.try_get::<Option<String>, _>(column).map_err(|e| {
            DatabaseError::Query(format!("Failed to get string column {}: {}", column, e))
        })
    }
}

#[async_trait]
impl DatabaseConnection for PostgresConnection {
    async fn query(
        &self,
        query: &str,
        params: &[DatabaseValue],
    ) -> DatabaseResult<Vec<Box<dyn DatabaseRow>>> {
        bind_params(sqlx::query(query), params)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))
            .map(|rows| {
                rows.into_iter()
                    .map(|row| Box::new(PostgresRow { row }) as Box<dyn DatabaseRow>)
                    .collect()
            })
    }

    fn get_database_type(&self) -> DatabaseType {
        DatabaseType::Postgres
    }

    async fn close(&self) -> DatabaseResult<()> {
        self.pool.close().await;
        Ok(())
    }
}
