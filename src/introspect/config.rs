use serde::{Deserialize, Serialize};

use crate::database::DatabaseType;
use crate::introspect::adapters::{DialectAdapter, MySqlAdapter, PostgresAdapter};

/// Configuration of an introspection run, selecting the dialect adapter
/// and the tables to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectConfig {
    /// The dialect of the schema connection
    pub database_type: DatabaseType,

    /// Explicit table selection; every table when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<String>>,
}

impl IntrospectConfig {
    /// Create a new `IntrospectConfig` covering every table.
    pub fn new(database_type: DatabaseType) -> Self {
        Self {
            database_type,
            tables: None,
        }
    }

    /// Restrict the run to a comma-separated table list.
    ///
    /// Entries are trimmed, empty entries skipped and repeats dropped,
    /// keeping the first occurrence. A list with no entries left selects
    /// every table.
    pub fn with_tables(mut self, list: &str) -> Self {
        let mut tables: Vec<String> = Vec::new();
        for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            if !tables.iter().any(|t| t == name) {
                tables.push(name.to_string());
            }
        }
        self.tables = if tables.is_empty() { None } else { Some(tables) };
        self
    }

    /// Get the dialect adapter for the configured database type.
    pub fn get_adapter(&self) -> Box<dyn DialectAdapter> {
        match self.database_type {
            DatabaseType::MySql => Box::new(MySqlAdapter::new()),
            DatabaseType::Postgres => Box::new(PostgresAdapter::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_tables_keeps_first_occurrence() {
        let config = IntrospectConfig::new(DatabaseType::MySql).with_tables(" users, orders,,users ,items");
        assert_eq!(
            config.tables,
            Some(vec![
                "users".to_string(),
                "orders".to_string(),
                "items".to_string()
            ])
        );
    }

    #[test]
    fn test_blank_selection_means_all_tables() {
        let config = IntrospectConfig::new(DatabaseType::Postgres).with_tables(" , ");
        assert_eq!(config.tables, None);
    }

    #[test]
    fn test_adapter_matches_dialect() {
        for dialect in [DatabaseType::MySql, DatabaseType::Postgres] {
            assert_eq!(IntrospectConfig::new(dialect).get_adapter().dialect(), dialect);
        }
    }

    #[test]
    fn test_deserialize_from_toml() {
        let config: IntrospectConfig =
            toml::from_str("database_type = \"postgres\"\ntables = [\"users\"]").unwrap();
        assert_eq!(config.database_type, DatabaseType::Postgres);
        assert_eq!(config.tables, Some(vec!["users".to_string()]));
    }
}
