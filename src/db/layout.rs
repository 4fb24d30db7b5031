//! Reads the table layout SQLite actually holds, for operators and tests.

use diesel::prelude::*;
use diesel::sql_types::{Bool, Integer, Text};
use diesel::SqliteConnection;

use crate::error::Result;

/// One column as reported by `pragma_table_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub sql_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

/// A table and its columns in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

impl TableLayout {
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

#[derive(QueryableByName)]
struct ColumnRow {
    #[diesel(sql_type = Text)]
    table_name: String,
    #[diesel(sql_type = Text)]
    column_name: String,
    #[diesel(sql_type = Text)]
    column_type: String,
    #[diesel(sql_type = Bool)]
    not_null: bool,
    #[diesel(sql_type = Integer)]
    pk: i32,
}

#[derive(QueryableByName)]
struct TableName {
    #[diesel(sql_type = Text)]
    name: String,
}

/// Names of the application tables, sorted.
///
/// # Errors
/// Returns an error if `sqlite_master` cannot be read.
pub fn table_names(conn: &mut SqliteConnection) -> Result<Vec<String>> {
    let rows = diesel::sql_query(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
           AND name != '__diesel_schema_migrations' \
         ORDER BY name",
    )
    .load::<TableName>(conn)?;
    Ok(rows.into_iter().map(|r| r.name).collect())
}

/// Every application table with its columns, sorted by table name.
///
/// # Errors
/// Returns an error if the schema cannot be read.
pub fn table_layout(conn: &mut SqliteConnection) -> Result<Vec<TableLayout>> {
    let rows = diesel::sql_query(
        "SELECT m.name AS table_name, p.name AS column_name, p.type AS column_type, \
                p.\"notnull\" AS not_null, p.pk AS pk \
         FROM sqlite_master m JOIN pragma_table_info(m.name) p \
         WHERE m.type = 'table' AND m.name NOT LIKE 'sqlite_%' \
           AND m.name != '__diesel_schema_migrations' \
         ORDER BY m.name, p.cid",
    )
    .load::<ColumnRow>(conn)?;

    let mut tables: Vec<TableLayout> = Vec::new();
    for row in rows {
        let column = ColumnInfo {
            name: row.column_name,
            sql_type: row.column_type,
            not_null: row.not_null,
            primary_key: row.pk > 0,
        };
        match tables.last_mut() {
            Some(table) if table.name == row.table_name => table.columns.push(column),
            _ => tables.push(TableLayout {
                name: row.table_name,
                columns: vec![column],
            }),
        }
    }
    Ok(tables)
}
