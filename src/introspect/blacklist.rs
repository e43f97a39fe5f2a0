use std::collections::BTreeSet;

/// Tables that cannot be foreign-key targets because they lack a usable
/// single-column primary key.
///
/// Built during constraint resolution and only read during column
/// derivation. Membership is never revoked within a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    tables: BTreeSet<String>,
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a table as unusable. Returns true if it was not marked before.
    pub fn insert(&mut self, table: &str) -> bool {
        if self.tables.contains(table) {
            return false;
        }
        self.tables.insert(table.to_string())
    }

    pub fn contains(&self, table: &str) -> bool {
        self.tables.contains(table)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Blacklisted table names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(String::as_str)
    }
}
