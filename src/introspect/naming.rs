//! Field-name canonicalization.

/// Field name given to the primary-key column of every entity.
pub const IDENTITY_FIELD: &str = "Id";

/// Field name given to a non-key column whose raw name is `id`.
pub const RENAMED_IDENTITY_FIELD: &str = "Id_RENAME";

/// Raw column name that collides with the identity field.
pub const IDENTITY_COLUMN: &str = "id";

/// Column whose presence switches the table to soft deletes.
pub const SOFT_DELETE_COLUMN: &str = "is_deleted";

/// Convert snake_case to PascalCase: `order_items` -> `OrderItems`.
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let word = word.trim();
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}
