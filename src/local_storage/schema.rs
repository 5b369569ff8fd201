//! Known tables and columns of the storefront database.
//!
//! Table and column names are interpolated into statement text, so every
//! generic operation checks them against this list first.

use crate::error::{Result, StorageError};
use crate::local_storage::order::OrderTable;
use crate::local_storage::order_item::OrderItemTable;
use crate::local_storage::product::ProductTable;
use crate::local_storage::user::UserTable;

pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    /// Columns declared `REAL`; numbers bound to them are always sent as floats.
    pub real_columns: &'static [&'static str],
    pub create_table: fn() -> String,
}

/// All tables, in creation order (referenced tables first).
pub const TABLES: &[TableSchema] = &[
    TableSchema {
        name: UserTable::TABLE_NAME,
        columns: UserTable::COLUMNS,
        real_columns: &[],
        create_table: UserTable::create_table,
    },
    TableSchema {
        name: ProductTable::TABLE_NAME,
        columns: ProductTable::COLUMNS,
        real_columns: ProductTable::REAL_COLUMNS,
        create_table: ProductTable::create_table,
    },
    TableSchema {
        name: OrderTable::TABLE_NAME,
        columns: OrderTable::COLUMNS,
        real_columns: OrderTable::REAL_COLUMNS,
        create_table: OrderTable::create_table,
    },
    TableSchema {
        name: OrderItemTable::TABLE_NAME,
        columns: OrderItemTable::COLUMNS,
        real_columns: OrderItemTable::REAL_COLUMNS,
        create_table: OrderItemTable::create_table,
    },
];

pub fn table(name: &str) -> Result<&'static TableSchema> {
    TABLES
        .iter()
        .find(|table| table.name == name)
        .ok_or_else(|| StorageError::UnknownTable(name.to_string()))
}

impl TableSchema {
    pub fn check_column(&self, column: &str) -> Result<()> {
        if self.columns.contains(&column) {
            Ok(())
        } else {
            Err(StorageError::UnknownColumn {
                table: self.name.to_string(),
                column: column.to_string(),
            })
        }
    }

    pub fn is_real(&self, column: &str) -> bool {
        self.real_columns.contains(&column)
    }
}

pub fn create_statements() -> Vec<String> {
    TABLES.iter().map(|table| (table.create_table)()).collect()
}
