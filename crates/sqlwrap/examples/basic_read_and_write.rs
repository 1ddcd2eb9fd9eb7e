//! Create, update, read and delete rows of a `people` table.
//!
//! Run with: cargo run --example basic_read_and_write -p sqlwrap
//!
//! Database files land in `SQLWRAP_DATA_DIR` (default `./data`). Set
//! `RUST_LOG=sqlwrap=debug` to see every statement.

use sqlwrap::qb::{DeleteQb, SelectQb, SetQb};
use sqlwrap::{Column, Row, SqlWrapResult, StoreConfig, Table, Value};
use tracing_subscriber::EnvFilter;

fn print_table(rows: &[Row]) {
    for row in rows {
        for value in row.values() {
            print!("{value}\t");
        }
        println!();
    }
}

#[tokio::main]
async fn main() -> SqlWrapResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let people = Table::builder("people", &["id"])
        .column(Column::new("name", "TEXT"))
        .column(Column::new("surname", "TEXT"))
        .database("test.db")
        .config(StoreConfig::from_env())
        .open()?;

    // create
    people
        .set(SetQb::from_values([
            ("id", Value::from(1)),
            ("name", Value::from("Safa")),
            ("surname", Value::from("Levent")),
        ]))
        .await?;

    // update by key
    people
        .set_by_key(
            1,
            SetQb::new()
                .value("name", "Definitely Not")
                .value("surname", "Safa"),
        )
        .await?;

    let found = people
        .get(&mut SelectQb::new().eq("surname", "Safa"))
        .await?;
    print_table(&found);

    people
        .delete(&mut DeleteQb::new().eq("surname", "Safa"))
        .await?;

    let left = people
        .get(&mut SelectQb::new().eq("surname", "Safa"))
        .await?;
    println!("{left:?}");

    Ok(())
}
