//! Curated native-type tables for each dialect.
//!
//! Keys are data type names exactly as the dialect's catalog reports them,
//! without length or precision. Lookups never fall back to a default: an
//! unmapped type is always an error so the tables stay exhaustive.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::definitions::SemanticType;
use super::errors::{Result, unknown_type_error};
use crate::database::DatabaseType;

use SemanticType::*;

const MYSQL_TYPES: &[(&str, SemanticType)] = &[
    // int signed
    ("int", I32),
    ("integer", I32),
    ("tinyint", I8),
    ("smallint", I16),
    ("mediumint", I32),
    ("bigint", I64),
    // int unsigned
    ("int unsigned", U32),
    ("integer unsigned", U32),
    ("tinyint unsigned", U8),
    ("smallint unsigned", U16),
    ("mediumint unsigned", U32),
    ("bigint unsigned", U64),
    ("bit", U64),
    ("bool", Bool),
    // enum, set, string & text
    ("enum", String),
    ("set", String),
    ("varchar", String),
    ("char", String),
    ("tinytext", String),
    ("mediumtext", String),
    ("text", String),
    ("longtext", String),
    // blob
    ("blob", Binary),
    ("tinyblob", Binary),
    ("mediumblob", Binary),
    ("longblob", Binary),
    // time
    ("date", Time),
    ("datetime", Time),
    ("timestamp", Time),
    ("time", Time),
    // float & decimal
    ("float", F32),
    ("double", F64),
    ("decimal", Decimal),
    // binary
    ("binary", Binary),
    ("varbinary", Binary),
    ("year", I16),
];

const POSTGRES_TYPES: &[(&str, SemanticType)] = &[
    ("serial", I32),
    ("big serial", I64),
    // int
    ("smallint", I16),
    ("integer", I32),
    ("bigint", I64),
    ("boolean", Bool),
    // string
    ("char", String),
    ("character", String),
    ("character varying", String),
    ("varchar", String),
    ("text", String),
    // time
    ("date", Time),
    ("time", Time),
    ("time without time zone", Time),
    ("time with time zone", Time),
    ("timestamp", Time),
    ("timestamp without time zone", Time),
    ("timestamp with time zone", Time),
    // time interval, string for now
    ("interval", String),
    // float & decimal
    ("real", F32),
    ("double precision", F64),
    ("decimal", Decimal),
    ("numeric", Decimal),
    ("money", Decimal),
    ("bytea", Binary),
    // fulltext, arrays, user defined, uuid, json, ip address
    ("tsvector", String),
    ("ARRAY", String),
    ("USER-DEFINED", String),
    ("uuid", String),
    ("json", String),
    ("jsonb", String),
    ("inet", String),
];

static MYSQL_MAPPER: Lazy<TypeMapper> =
    Lazy::new(|| TypeMapper::from_entries(DatabaseType::MySql, MYSQL_TYPES));
static POSTGRES_MAPPER: Lazy<TypeMapper> =
    Lazy::new(|| TypeMapper::from_entries(DatabaseType::Postgres, POSTGRES_TYPES));

/// Immutable lookup from native type name to semantic type
#[derive(Debug, Clone)]
pub struct TypeMapper {
    dialect: DatabaseType,
    entries: &'static [(&'static str, SemanticType)],
    index: HashMap<&'static str, SemanticType>,
}

impl TypeMapper {
    /// Build a mapper over a fixed entry table
    pub fn from_entries(
        dialect: DatabaseType,
        entries: &'static [(&'static str, SemanticType)],
    ) -> Self {
        Self {
            dialect,
            entries,
            index: entries.iter().copied().collect(),
        }
    }

    /// The shared mapper of a dialect
    pub fn for_dialect(dialect: DatabaseType) -> &'static TypeMapper {
        match dialect {
            DatabaseType::MySql => &MYSQL_MAPPER,
            DatabaseType::Postgres => &POSTGRES_MAPPER,
        }
    }

    pub fn dialect(&self) -> DatabaseType {
        self.dialect
    }

    /// Resolve a native type name (case-sensitive)
    pub fn resolve(&self, native_type: &str) -> Result<SemanticType> {
        self.index
            .get(native_type)
            .copied()
            .ok_or_else(|| unknown_type_error(native_type))
    }

    /// All entries in declaration order
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, SemanticType)> + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspect::errors::Error;

    #[test]
    fn test_every_entry_resolves_deterministically() {
        for dialect in [DatabaseType::MySql, DatabaseType::Postgres] {
            let mapper = TypeMapper::for_dialect(dialect);
            for (name, expected) in mapper.entries() {
                assert_eq!(mapper.resolve(name).unwrap(), expected, "{}", name);
                assert_eq!(mapper.resolve(name).unwrap(), expected, "{}", name);
            }
        }
    }

    #[test]
    fn test_unmapped_type_is_an_error() {
        let mapper = TypeMapper::for_dialect(DatabaseType::MySql);
        for name in ["money", "geometry", "json", "", "INT"] {
            match mapper.resolve(name) {
                Err(Error::UnknownType { native_type, .. }) => assert_eq!(native_type, name),
                other => panic!("expected UnknownType for {:?}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mapper = TypeMapper::for_dialect(DatabaseType::Postgres);
        assert_eq!(mapper.resolve("ARRAY").unwrap(), SemanticType::String);
        assert!(mapper.resolve("array").is_err());
    }

    #[test]
    fn test_selected_mappings() {
        let mysql = TypeMapper::for_dialect(DatabaseType::MySql);
        assert_eq!(mysql.resolve("tinyint").unwrap(), I8);
        assert_eq!(mysql.resolve("bigint unsigned").unwrap(), U64);
        assert_eq!(mysql.resolve("decimal").unwrap(), Decimal);
        assert_eq!(mysql.resolve("longblob").unwrap(), Binary);
        assert_eq!(mysql.resolve("year").unwrap(), I16);

        let pg = TypeMapper::for_dialect(DatabaseType::Postgres);
        assert_eq!(pg.resolve("double precision").unwrap(), F64);
        assert_eq!(pg.resolve("timestamp with time zone").unwrap(), Time);
        assert_eq!(pg.resolve("money").unwrap(), Decimal);
        assert_eq!(pg.dialect(), DatabaseType::Postgres);
    }

    #[test]
    fn test_entry_tables_have_no_duplicates() {
        for entries in [MYSQL_TYPES, POSTGRES_TYPES] {
            let mut names: Vec<&str> = entries.iter().map(|(n, _)| *n).collect();
            names.sort_unstable();
            let before = names.len();
            names.dedup();
            assert_eq!(before, names.len());
        }
    }
}
