use async_trait::async_trait;
use sqlx::mysql::{MySqlArguments, MySqlPoolOptions};
use sqlx::query::Query;
use sqlx::{MySql, MySqlPool, Row};
use std::sync::Arc;
use std::time::Duration;

use crate::database::{
    DatabaseConfig, DatabaseConnection, DatabaseError, DatabaseResult, DatabaseRow, DatabaseType,
    DatabaseValue,
};

/// MySQL implementation of the schema connection
#[derive(Clone)]
pub struct MySqlConnection {
    pool: Arc<MySqlPool>,
}

impl MySqlConnection {
    /// Create a new MySQL connection from a configuration
    pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<Self> {
        let database_url = config.connection_url()?;

        let pool = MySqlPoolOptions::new()
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
    mut query_builder: Query<'q, MySql, MySqlArguments>,
    params: &[DatabaseValue],
) -> Query<'q, MySql, MySqlArguments> {
    for param in params {
        query_builder = match param {
            DatabaseValue::Text(s) => query_builder.bind(s.clone()),
        };
    }
    query_builder
}

/// MySQL implementation of the catalog row interface
pub struct MySqlRow {
    row: sqlx::mysql::MySqlRow,
}

impl DatabaseRow for MySqlRow {
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
impl DatabaseConnection for MySqlConnection {
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
                    .map(|row| Box::new(MySqlRow { row }) as Box<dyn DatabaseRow>)
                    .collect()
            })
    }

    fn get_database_type(&self) -> DatabaseType {
        DatabaseType::MySql
    }

    async fn close(&self) -> DatabaseResult<()> {
        self.pool.close().await;
        Ok(())
    }
}
