pub mod mysql_adapter;
pub mod postgres_adapter;
mod rows;
mod trait_def;

// Re-export the trait
pub use trait_def::DialectAdapter;

pub use mysql_adapter::MySqlAdapter;
pub use postgres_adapter::PostgresAdapter;
