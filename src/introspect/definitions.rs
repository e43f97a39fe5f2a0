use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::database::DatabaseType;

/// Portable, dialect-independent column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    Bool,
    String,
    /// Binary or blob payload carried as a string
    Binary,
    F32,
    F64,
    /// Fixed-point decimal carried as a 64-bit float
    Decimal,
    /// Timestamp, date or time of day
    Time,
}

impl SemanticType {
    /// Name of the target-language type the emitter writes
    pub fn type_name(&self) -> &'static str {
        match self {
            SemanticType::I8 => "int8",
            SemanticType::I16 => "int16",
            SemanticType::I32 => "int",
            SemanticType::I64 => "int64",
            SemanticType::U8 => "uint8",
            SemanticType::U16 => "uint16",
            SemanticType::U32 => "uint",
            SemanticType::U64 => "uint64",
            SemanticType::Bool => "bool",
            SemanticType::String | SemanticType::Binary => "string",
            SemanticType::F32 => "float32",
            SemanticType::F64 | SemanticType::Decimal => "float64",
            SemanticType::Time => "time.Time",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Type of a generated field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "type", rename_all = "snake_case")]
pub enum FieldType {
    /// Plain value of a semantic type
    Scalar(SemanticType),
    /// Nullable reference to another entity, by entity name
    Reference(String),
}

impl FieldType {
    pub fn as_scalar(&self) -> Option<SemanticType> {
        match self {
            FieldType::Scalar(t) => Some(*t),
            FieldType::Reference(_) => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Scalar(t) => write!(f, "{}", t),
            FieldType::Reference(entity) => write!(f, "*{}", entity),
        }
    }
}

/// Timestamp automation of a temporal column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoTimestamp {
    /// Set once when the row is created
    OnCreate,
    /// Refreshed by the database on every update
    OnUpdate,
}

/// Derived annotations of a single column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrmTag {
    /// Identity value generated by the database
    #[serde(default)]
    pub auto: bool,
    /// Primary key without database-side generation
    #[serde(default)]
    pub pk: bool,
    #[serde(default)]
    pub null: bool,
    #[serde(default)]
    pub index: bool,
    #[serde(default)]
    pub unique: bool,
    /// Source column name
    pub column: String,
    pub size: Option<u32>,
    pub digits: Option<u32>,
    pub decimals: Option<u32>,
    pub auto_timestamp: Option<AutoTimestamp>,
    /// Native type string override
    pub type_override: Option<String>,
    /// Default value expression
    pub default: Option<String>,
    /// Referenced table of a live foreign key
    pub foreign_key: Option<String>,
    pub comment: Option<String>,
}

impl OrmTag {
    /// Tag for the given source column with every annotation unset
    pub fn for_column(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ..Default::default()
        }
    }

    pub fn auto_now(&self) -> bool {
        self.auto_timestamp == Some(AutoTimestamp::OnUpdate)
    }

    pub fn auto_now_add(&self) -> bool {
        self.auto_timestamp == Some(AutoTimestamp::OnCreate)
    }
}

impl fmt::Display for OrmTag {
    /// Renders the struct-tag literal embedded by the emitter,
    /// e.g. `` `json:"name" gorm:"column:name;size:50:;not null"` ``.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut orm_options: Vec<String> = Vec::new();
        let mut sql_options: Vec<String> = Vec::new();

        if !self.column.is_empty() {
            orm_options.push(format!("column:{}", self.column));
        }
        if self.auto {
            orm_options.push("AUTO_INCREMENT".to_string());
        }
        if let Some(size) = self.size {
            orm_options.push(format!("size:{}:", size));
        }
        if let Some(ty) = &self.type_override {
            orm_options.push(format!("type:{}", ty));
        }
        if !self.null {
            orm_options.push("not null".to_string());
        }
        if self.auto_timestamp.is_some() {
            sql_options.push("default:current_timestamp".to_string());
        }
        if let Some(table) = &self.foreign_key {
            orm_options.push(format!("ForeignKey:{}", table));
        }
        if self.pk {
            orm_options.push("primary_key".to_string());
        }
        if self.unique {
            orm_options.push("unique".to_string());
        }
        if let Some(default) = &self.default {
            orm_options.push(format!("default:{}", default));
        }

        if orm_options.is_empty() {
            return Ok(());
        }
        let orm = orm_options.join(";");
        if let Some(comment) = &self.comment {
            return write!(
                f,
                "`json:\"{}\" gorm:\"{}\" description:\"{}\"`",
                self.column, orm, comment
            );
        }
        if !sql_options.is_empty() {
            return write!(
                f,
                "`json:\"{}\" gorm:\"{}\" sql:\"{}\"`",
                self.column,
                orm,
                sql_options.join(";")
            );
        }
        write!(f, "`json:\"{}\" gorm:\"{}\"`", self.column, orm)
    }
}

/// A generated field, one per native column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Field name after canonicalization
    pub name: String,
    pub field_type: FieldType,
    pub tag: OrmTag,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.field_type, self.tag)
    }
}

/// Foreign key declared on a source column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Source column name
    pub name: String,
    pub ref_schema: String,
    pub ref_table: String,
    pub ref_column: String,
}

/// A table of the introspected schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    /// Single-column primary key; None when the table is blacklisted
    pub primary_key: Option<String>,
    pub pk_type: Option<SemanticType>,
    #[serde(default)]
    pub unique_keys: Vec<String>,
    /// Foreign keys by source column name
    #[serde(default)]
    pub foreign_keys: BTreeMap<String, ForeignKey>,
    /// Fields in native column order
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub import_time: bool,
    #[serde(default)]
    pub soft_delete: bool,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Entity name the emitter uses for this table
    pub fn entity_name(&self) -> String {
        super::naming::to_pascal_case(&self.name)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "type {} struct {{", self.entity_name())?;
        for column in &self.columns {
            writeln!(f, "{}", column)?;
        }
        writeln!(f, "}}")
    }
}

/// Kind of a key constraint row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    ForeignKey,
    /// CHECK and other kinds; ignored
    Other(String),
}

impl ConstraintKind {
    /// Classify an `information_schema.table_constraints.constraint_type` value
    pub fn from_catalog(value: &str) -> Self {
        match value {
            "PRIMARY KEY" => ConstraintKind::PrimaryKey,
            "UNIQUE" => ConstraintKind::Unique,
            "FOREIGN KEY" => ConstraintKind::ForeignKey,
            other => ConstraintKind::Other(other.to_string()),
        }
    }

    pub fn as_catalog(&self) -> &str {
        match self {
            ConstraintKind::PrimaryKey => "PRIMARY KEY",
            ConstraintKind::Unique => "UNIQUE",
            ConstraintKind::ForeignKey => "FOREIGN KEY",
            ConstraintKind::Other(other) => other,
        }
    }
}

/// One constraint/key-usage row for a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintRow {
    pub kind: ConstraintKind,
    pub column_name: String,
    pub ref_schema: Option<String>,
    pub ref_table: Option<String>,
    pub ref_column: Option<String>,
    /// 1-based position of the column within its key
    pub ordinal_position: u32,
}

/// One column metadata row for a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    pub name: String,
    /// Native type name without length or precision
    pub data_type: String,
    /// Full native type string, e.g. `varchar(50)` or `int(10) unsigned`
    pub column_type: String,
    pub is_nullable: bool,
    pub default: Option<String>,
    /// Auto-generation / on-update marker
    pub extra: String,
    pub comment: Option<String>,
}

/// A foreign key degraded to a scalar because its target is blacklisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedRelation {
    pub table: String,
    pub column: String,
    pub referenced_table: String,
}

/// The finished intermediate model handed to the emitter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaModel {
    pub dialect: DatabaseType,
    pub tables: Vec<Table>,
    /// Tables without a usable single-column primary key, sorted
    #[serde(default)]
    pub blacklisted: Vec<String>,
    #[serde(default)]
    pub dropped_relations: Vec<DroppedRelation>,
}

impl SchemaModel {
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}
