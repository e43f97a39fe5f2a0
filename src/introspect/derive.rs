//! Key resolution and per-column tag derivation.
//!
//! Both steps are pure functions over catalog rows so they can be driven by
//! any adapter, or directly from tests.

use tracing::{debug, warn};

use super::blacklist::Blacklist;
use super::definitions::{
    AutoTimestamp, Column, ColumnRow, ConstraintKind, ConstraintRow, DroppedRelation, FieldType,
    ForeignKey, OrmTag, Table,
};
use super::errors::Result;
use super::extract::{Signedness, column_size, decimal_precision, int_signedness};
use super::naming::{
    IDENTITY_COLUMN, IDENTITY_FIELD, RENAMED_IDENTITY_FIELD, SOFT_DELETE_COLUMN, to_pascal_case,
};
use super::typemap::TypeMapper;

/// Extra marker of a database-generated identity column
pub const AUTO_INCREMENT_MARKER: &str = "auto_increment";

/// Default expression of a creation timestamp
pub const CURRENT_TIMESTAMP: &str = "CURRENT_TIMESTAMP";

/// Extra marker of a timestamp refreshed on update
pub const ON_UPDATE_MARKER: &str = "on update CURRENT_TIMESTAMP";

/// Dialect-specific switches of the column derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRules {
    /// Re-resolve signed integer types carrying an `unsigned` modifier
    pub unsigned_modifier: bool,
    /// Extract a size bound for binary and bit columns
    pub binary_sized: bool,
    /// Treat any data type starting with `time` as temporal, covering the
    /// zoned `timestamp` and `time` variants
    pub time_prefix: bool,
    /// Types whose native name is kept verbatim as a type override
    pub unusual_types: &'static [&'static str],
    /// Attach column comments to tags
    pub comments: bool,
}

impl ColumnRules {
    pub const MYSQL: ColumnRules = ColumnRules {
        unsigned_modifier: true,
        binary_sized: true,
        time_prefix: false,
        unusual_types: &[],
        comments: true,
    };

    pub const POSTGRES: ColumnRules = ColumnRules {
        unsigned_modifier: false,
        binary_sized: false,
        time_prefix: true,
        unusual_types: &["interval", "uuid", "json"],
        comments: false,
    };

    fn is_temporal(&self, data_type: &str) -> bool {
        is_temporal_type(data_type) || (self.time_prefix && data_type.starts_with("time"))
    }
}

fn is_signed_int_type(t: &str) -> bool {
    matches!(t, "int" | "tinyint" | "smallint" | "mediumint" | "bigint")
}

fn is_string_type(t: &str) -> bool {
    matches!(t, "char" | "varchar")
}

fn is_temporal_type(t: &str) -> bool {
    matches!(t, "date" | "datetime" | "timestamp" | "time")
}

fn is_decimal_type(t: &str) -> bool {
    t == "decimal"
}

fn is_binary_type(t: &str) -> bool {
    matches!(t, "binary" | "varbinary" | "bit")
}

/// Whether an extra marker flags database-side identity generation
pub fn is_auto_increment(extra: &str) -> bool {
    extra
        .split_whitespace()
        .any(|word| word.eq_ignore_ascii_case(AUTO_INCREMENT_MARKER))
}

/// Whether a default expression is the creation-timestamp sentinel.
///
/// MariaDB reports it as `current_timestamp()`, and fractional-second
/// columns carry a precision such as `CURRENT_TIMESTAMP(6)`.
pub fn is_current_timestamp(default: Option<&str>) -> bool {
    let Some(default) = default.map(str::trim) else {
        return false;
    };
    let Some(head) = default.get(..CURRENT_TIMESTAMP.len()) else {
        return false;
    };
    if !head.eq_ignore_ascii_case(CURRENT_TIMESTAMP) {
        return false;
    }
    let precision = &default[CURRENT_TIMESTAMP.len()..];
    precision.is_empty()
        || precision
            .strip_prefix('(')
            .and_then(|p| p.strip_suffix(')'))
            .is_some_and(|digits| digits.chars().all(|c| c.is_ascii_digit()))
}

/// Whether an extra marker carries the on-update trigger.
///
/// MySQL 8 prefixes it with `DEFAULT_GENERATED`.
pub fn is_update_trigger(extra: &str) -> bool {
    extra
        .to_ascii_lowercase()
        .contains(&ON_UPDATE_MARKER.to_ascii_lowercase())
}

/// Apply one table's constraint rows.
///
/// A primary-key row past ordinal 1 marks a composite key and blacklists
/// the table; that outcome does not depend on row order. A table left
/// without a primary key is blacklisted as well.
pub fn apply_constraint_rows(table: &mut Table, rows: &[ConstraintRow], blacklist: &mut Blacklist) {
    for row in rows {
        match &row.kind {
            ConstraintKind::PrimaryKey => {
                if row.ordinal_position == 1 {
                    table.primary_key = Some(row.column_name.clone());
                } else {
                    table.primary_key = None;
                    if blacklist.insert(&table.name) {
                        debug!(table = %table.name, "composite primary key, table blacklisted");
                    }
                }
            }
            ConstraintKind::Unique => {
                if !table.unique_keys.contains(&row.column_name) {
                    table.unique_keys.push(row.column_name.clone());
                }
            }
            ConstraintKind::ForeignKey => {
                table
                    .foreign_keys
                    .entry(row.column_name.clone())
                    .or_insert_with(|| ForeignKey {
                        name: row.column_name.clone(),
                        ref_schema: row.ref_schema.clone().unwrap_or_default(),
                        ref_table: row.ref_table.clone().unwrap_or_default(),
                        ref_column: row.ref_column.clone().unwrap_or_default(),
                    });
            }
            ConstraintKind::Other(kind) => {
                debug!(table = %table.name, kind = %kind, "ignoring constraint");
            }
        }
    }

    if blacklist.contains(&table.name) {
        table.primary_key = None;
    } else if table.primary_key.is_none() && blacklist.insert(&table.name) {
        debug!(table = %table.name, "no primary key, table blacklisted");
    }
}

/// Derive the fields of a table from its column rows, in native order.
///
/// Must only run once every table of the batch has gone through
/// [`apply_constraint_rows`]. Returns the foreign keys that were degraded
/// to scalars because their target is blacklisted.
pub fn derive_columns(
    table: &mut Table,
    rows: &[ColumnRow],
    blacklist: &Blacklist,
    mapper: &TypeMapper,
    rules: &ColumnRules,
) -> Result<Vec<DroppedRelation>> {
    let mut dropped = Vec::new();
    table.columns.clear();
    let plain_names: Vec<String> = rows.iter().map(|r| to_pascal_case(&r.name)).collect();

    for (index, row) in rows.iter().enumerate() {
        let at_column = |e: super::errors::Error| e.at_column(&table.name, &row.name);

        let mut semantic = mapper.resolve(&row.data_type).map_err(at_column)?;
        if rules.unsigned_modifier
            && is_signed_int_type(&row.data_type)
            && int_signedness(&row.column_type) == Signedness::Unsigned
        {
            semantic = mapper
                .resolve(&format!("{} unsigned", row.data_type))
                .map_err(at_column)?;
        }

        if row.name == SOFT_DELETE_COLUMN {
            table.soft_delete = true;
        }

        let mut tag = OrmTag::for_column(&row.name);
        let mut name = to_pascal_case(&row.name);
        let mut field_type = FieldType::Scalar(semantic);

        let live_fk = match table.foreign_keys.get(&row.name) {
            Some(fk) if blacklist.contains(&fk.ref_table) => {
                warn!(
                    table = %table.name,
                    column = %row.name,
                    referenced_table = %fk.ref_table,
                    "referenced table has no usable primary key, relation dropped"
                );
                dropped.push(DroppedRelation {
                    table: table.name.clone(),
                    column: row.name.clone(),
                    referenced_table: fk.ref_table.clone(),
                });
                None
            }
            Some(fk) => Some(fk.ref_table.clone()),
            None => None,
        };

        if table.primary_key.as_deref() == Some(row.name.as_str()) {
            name = IDENTITY_FIELD.to_string();
            table.pk_type = Some(semantic);
            if is_auto_increment(&row.extra) {
                tag.auto = true;
            } else {
                tag.pk = true;
            }
        } else if let Some(ref_table) = live_fk {
            let entity = to_pascal_case(&ref_table);
            // Earlier fields are final; later ones are matched by their plain name
            let taken = table.columns.iter().any(|c| c.name == entity)
                || plain_names[index + 1..].contains(&entity);
            if taken {
                debug!(table = %table.name, column = %row.name, "field name taken, keeping column name");
            } else {
                name = entity.clone();
            }
            field_type = FieldType::Reference(entity);
            tag.foreign_key = Some(ref_table);
        } else {
            if row.name == IDENTITY_COLUMN {
                name = RENAMED_IDENTITY_FIELD.to_string();
            }
            tag.null = row.is_nullable;

            let data_type = row.data_type.as_str();
            if is_string_type(data_type) {
                tag.size = Some(column_size(&row.name, &row.column_type)?);
            }
            if rules.is_temporal(data_type) {
                tag.type_override = Some(row.data_type.clone());
                if is_current_timestamp(row.default.as_deref()) {
                    tag.auto_timestamp = Some(if is_update_trigger(&row.extra) {
                        AutoTimestamp::OnUpdate
                    } else {
                        AutoTimestamp::OnCreate
                    });
                }
                table.import_time = true;
            }
            if is_decimal_type(data_type) {
                let (digits, decimals) = decimal_precision(&row.name, &row.column_type)?;
                tag.digits = Some(digits);
                tag.decimals = Some(decimals);
            }
            if rules.binary_sized && is_binary_type(data_type) {
                tag.size = Some(column_size(&row.name, &row.column_type)?);
            }
            if rules.unusual_types.contains(&data_type) {
                tag.type_override = Some(row.data_type.clone());
            }
        }

        if rules.comments {
            tag.comment = row.comment.clone().filter(|c| !c.is_empty());
        }

        table.columns.push(Column {
            name,
            field_type,
            tag,
        });
    }

    Ok(dropped)
}
