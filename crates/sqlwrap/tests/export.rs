//! CSV export and copying rows into another database file.

use sqlwrap::qb::{SelectQb, SetQb};
use sqlwrap::{Column, SqlWrapError, StoreConfig, Table, Value};
use std::path::Path;

fn people(data_dir: &Path, table: &str, database: &str) -> Table {
    Table::builder(table, &["id"])
        .column(Column::new("name", "TEXT"))
        .column(Column::new("surname", "TEXT"))
        .database(database)
        .config(StoreConfig::new().data_dir(data_dir))
        .open()
        .unwrap()
}

async fn seed(table: &Table) {
    table
        .set_by_key(1, SetQb::new().value("name", "A").value("surname", "B"))
        .await
        .unwrap();
    table
        .set_by_key(2, SetQb::new().value("name", "C"))
        .await
        .unwrap();
}

#[tokio::test]
async fn write_to_file_formats_rows() {
    let tmp = tempfile::tempdir().unwrap();
    let table = people(tmp.path(), "people", "test.db");
    seed(&table).await;

    let path = table.write_to_file("people", None).await.unwrap();
    assert!(path.is_absolute());
    assert!(path.ends_with("people.csv"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "id; name; surname\n1;A;B\n2;C;\n"
    );
}

#[tokio::test]
async fn write_to_file_with_query() {
    let tmp = tempfile::tempdir().unwrap();
    let table = people(tmp.path(), "people", "test.db");
    seed(&table).await;

    let mut query = SelectQb::new().columns(&["name"]).eq("id", 2);
    let path = table.write_to_file("only_c.csv", Some(&mut query)).await.unwrap();
    assert!(path.ends_with("only_c.csv"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "name\nC\n");

    let mut nothing = SelectQb::new().eq("id", 99);
    let path = table.write_to_file("empty", Some(&mut nothing)).await.unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}

#[tokio::test]
async fn write_to_file_stays_in_data_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let data_dir = tmp.path().join("data");
    let table = people(&data_dir, "people", "test.db");
    seed(&table).await;

    let err = table.write_to_file("../escaped", None).await.unwrap_err();
    assert!(matches!(err, SqlWrapError::Validation(_)));
    assert!(!tmp.path().join("escaped.csv").exists());

    let err = table
        .copy_to_table_on_another_db("../other.db", "people")
        .await
        .unwrap_err();
    assert!(matches!(err, SqlWrapError::Validation(_)));
}

#[tokio::test]
async fn copy_rows_into_table_on_another_database() {
    let tmp = tempfile::tempdir().unwrap();
    let source = people(tmp.path(), "people", "source.db");
    let target = people(tmp.path(), "people_copy", "target.db");
    seed(&source).await;

    let copied = source
        .copy_to_table_on_another_db("target.db", "people_copy")
        .await
        .unwrap();
    assert_eq!(copied, 2);

    let rows = target.get_all().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("name"), Some(&Value::from("A")));
    assert_eq!(source.get_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn copy_rejects_invalid_target_name() {
    let tmp = tempfile::tempdir().unwrap();
    let source = people(tmp.path(), "people", "source.db");

    let err = source
        .copy_to_table_on_another_db("target.db", "x; DROP TABLE people")
        .await
        .unwrap_err();
    assert!(matches!(err, SqlWrapError::Validation(_)));
}
