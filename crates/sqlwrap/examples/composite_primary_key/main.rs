//! Tables keyed by more than one column.
//!
//! Run with: cargo run --example composite_primary_key -p sqlwrap

use sqlwrap::qb::{DeleteQb, SetQb};
use sqlwrap::{Column, SqlWrapResult, StoreConfig, Table};

#[tokio::main]
async fn main() -> SqlWrapResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let enrollments = Table::builder("enrollments", &["user_id", "course_id"])
        .column(Column::new("status", "TEXT").modifier("NOT NULL DEFAULT 'active'"))
        .database("example.db")
        .config(StoreConfig::from_env())
        .open()?;

    println!("primary keys: {:?}", enrollments.primary_keys());
    println!("schema health: {:?}", enrollments.schema_health());

    enrollments.delete(&mut DeleteQb::new()).await?;

    enrollments.get_or_create((1, 101)).await?;
    enrollments
        .set_by_key((1, 102), SetQb::new().value("status", "dropped"))
        .await?;

    let row = enrollments.get_with((1, 101)).await?;
    println!("get_with (1, 101) => {row:?}");

    // A single value cannot address a two-column key.
    match enrollments.get_with(1).await {
        Err(e) => println!("get_with 1 => {e}"),
        Ok(row) => println!("get_with 1 => {row:?}"),
    }

    let deleted = enrollments
        .delete(&mut DeleteQb::new().eq("status", "dropped"))
        .await?;
    println!("deleted rows => {deleted}");

    let path = enrollments.write_to_file("enrollments", None).await?;
    println!("exported to {}", path.display());

    Ok(())
}
