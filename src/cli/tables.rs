//! Handler for the `tables` command.

use tabled::{Table, Tabled};

use crate::cli::{output, DatabaseArgs};
use crate::db::open_existing;
use crate::db::layout::{table_layout, ColumnInfo};
use crate::error::Result;

#[derive(Tabled)]
struct ColumnRow {
    #[tabled(rename = "Column")]
    name: String,
    #[tabled(rename = "Type")]
    sql_type: String,
    #[tabled(rename = "Null")]
    nullable: &'static str,
    #[tabled(rename = "Key")]
    key: &'static str,
}

impl From<&ColumnInfo> for ColumnRow {
    fn from(column: &ColumnInfo) -> Self {
        Self {
            name: column.name.clone(),
            sql_type: column.sql_type.clone(),
            nullable: if column.not_null { "NO" } else { "YES" },
            key: if column.primary_key { "PK" } else { "" },
        }
    }
}

/// Print each application table with its columns.
pub fn execute(args: &DatabaseArgs) -> Result<()> {
    let config = args.load_config()?;
    config.init_logging();

    let pool = open_existing(&config.database)?;
    let mut conn = pool.get()?;
    let tables = table_layout(&mut conn)?;

    if tables.is_empty() {
        output::warning("No tables found; run `photofeed migrate` first");
        return Ok(());
    }

    for table in &tables {
        output::section(&table.name);
        let rows: Vec<ColumnRow> = table.columns.iter().map(ColumnRow::from).collect();
        for line in Table::new(rows).to_string().lines() {
            println!("  {line}");
        }
    }
    println!();
    Ok(())
}
