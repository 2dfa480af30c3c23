//! Mock engine objects implementing the introspection traits.
//!
//! The boundary layer only ever queries the engine; these mocks expose the
//! same introspection surface plus test-side switches (`detach`,
//! `invalidate`) to simulate concurrent deletion by another thread.

use rivetdb_boundary::engine::{ColumnKey, ColumnType, ObjectIntrospect, TableIntrospect};
use std::cell::Cell;
use std::collections::BTreeMap;

/// Schema entry of a [`MockTable`] column.
#[derive(Debug, Clone)]
pub struct MockColumn {
    /// Schema name, reported through `column_name`.
    pub name: String,
    /// Declared type.
    pub column_type: ColumnType,
    /// Whether the column accepts nulls.
    pub nullable: bool,
    /// Whether the column holds a primitive list.
    pub list: bool,
}

/// A table standing in for the engine's table reference.
#[derive(Debug, Default)]
pub struct MockTable {
    columns: BTreeMap<u64, MockColumn>,
    detached: Cell<bool>,
}

impl MockTable {
    /// Creates an attached table with no columns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a non-nullable scalar column.
    #[must_use]
    pub fn with_column(self, key: ColumnKey, name: &str, column_type: ColumnType) -> Self {
        self.insert(key, name, column_type, false, false)
    }

    /// Adds a nullable scalar column.
    #[must_use]
    pub fn with_nullable_column(self, key: ColumnKey, name: &str, column_type: ColumnType) -> Self {
        self.insert(key, name, column_type, true, false)
    }

    /// Adds a primitive list column of the given element type.
    #[must_use]
    pub fn with_list_column(self, key: ColumnKey, name: &str, element_type: ColumnType) -> Self {
        self.insert(key, name, element_type, false, true)
    }

    /// Adds a link column.
    #[must_use]
    pub fn with_link_column(self, key: ColumnKey, name: &str) -> Self {
        self.insert(key, name, ColumnType::Link, false, false)
    }

    /// Adds a link-list column.
    #[must_use]
    pub fn with_link_list_column(self, key: ColumnKey, name: &str) -> Self {
        self.insert(key, name, ColumnType::LinkList, false, false)
    }

    fn insert(
        mut self,
        key: ColumnKey,
        name: &str,
        column_type: ColumnType,
        nullable: bool,
        list: bool,
    ) -> Self {
        self.columns.insert(
            key.as_u64(),
            MockColumn {
                name: name.to_owned(),
                column_type,
                nullable,
                list,
            },
        );
        self
    }

    /// Simulates the table being removed under the caller.
    pub fn detach(&self) {
        self.detached.set(true);
    }

    /// Number of columns in the schema; validators must not change it.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column(&self, key: ColumnKey) -> &MockColumn {
        self.columns
            .get(&key.as_u64())
            .expect("mock table has no such column")
    }
}

impl TableIntrospect for MockTable {
    fn is_attached(&self) -> bool {
        !self.detached.get()
    }

    fn column_type(&self, key: ColumnKey) -> ColumnType {
        self.column(key).column_type
    }

    fn column_name(&self, key: ColumnKey) -> String {
        self.column(key).name.clone()
    }

    fn is_column_nullable(&self, key: ColumnKey) -> bool {
        self.column(key).nullable
    }

    fn is_column_list(&self, key: ColumnKey) -> bool {
        self.column(key).list
    }
}

/// An object (row) standing in for the engine's object reference.
#[derive(Debug)]
pub struct MockObject {
    valid: Cell<bool>,
}

impl MockObject {
    /// Creates a valid object.
    #[must_use]
    pub fn new() -> Self {
        Self {
            valid: Cell::new(true),
        }
    }

    /// Simulates the row being deleted by another thread.
    pub fn invalidate(&self) {
        self.valid.set(false);
    }
}

impl Default for MockObject {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectIntrospect for MockObject {
    fn is_valid(&self) -> bool {
        self.valid.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_reports_schema() {
        let table = MockTable::new()
            .with_column(ColumnKey::new(1), "age", ColumnType::Int)
            .with_nullable_column(ColumnKey::new(2), "nickname", ColumnType::String)
            .with_list_column(ColumnKey::new(3), "scores", ColumnType::Int);

        assert!(table.is_attached());
        assert_eq!(table.column_type(ColumnKey::new(1)), ColumnType::Int);
        assert_eq!(table.column_name(ColumnKey::new(2)), "nickname");
        assert!(table.is_column_nullable(ColumnKey::new(2)));
        assert!(table.is_column_list(ColumnKey::new(3)));
        assert!(!table.is_column_list(ColumnKey::new(1)));
    }

    #[test]
    fn detach_flips_liveness() {
        let table = MockTable::new();
        assert!(table.is_attached());
        table.detach();
        assert!(!table.is_attached());
    }

    #[test]
    fn invalidate_flips_object_liveness() {
        let object = MockObject::new();
        assert!(object.is_valid());
        object.invalidate();
        assert!(!object.is_valid());
    }
}
