//! Table open, schema migration and read paths against a temp data directory.

use sqlwrap::qb::{DeleteQb, SelectQb, SetQb};
use sqlwrap::{Column, SchemaIssueKind, SqlWrapError, StoreConfig, Table, Value};
use tempfile::TempDir;

fn people(dir: &TempDir, extra: &[Column]) -> Table {
    Table::builder("people", &["id"])
        .column(Column::new("name", "TEXT"))
        .column(Column::new("surname", "TEXT"))
        .columns(extra.iter().cloned())
        .database("test.db")
        .config(StoreConfig::new().data_dir(dir.path()))
        .open()
        .unwrap()
}

async fn add_person(table: &Table, id: i64, name: &str, surname: &str) {
    table
        .set(SetQb::from_values([
            ("id", Value::from(id)),
            ("name", Value::from(name)),
            ("surname", Value::from(surname)),
        ]))
        .await
        .unwrap();
}

// ============================================
// Scenario
// ============================================

#[tokio::test]
async fn people_scenario() {
    let tmp = tempfile::tempdir().unwrap();
    let people = people(&tmp, &[]);
    assert!(people.schema_health().created_table());
    assert!(!people.schema_health().is_degraded());

    add_person(&people, 1, "Safa", "Levent").await;
    people
        .set_by_key(
            1,
            SetQb::new()
                .value("name", "Definitely Not")
                .value("surname", "Safa"),
        )
        .await
        .unwrap();

    let rows = people
        .get(&mut SelectQb::new().eq("surname", "Safa"))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].values(),
        [Value::from(1), Value::from("Definitely Not"), Value::from("Safa")]
    );

    let deleted = people
        .delete(&mut DeleteQb::new().eq("surname", "Safa"))
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    assert!(
        people
            .get(&mut SelectQb::new().eq("surname", "Safa"))
            .await
            .unwrap()
            .is_empty()
    );
}

// ============================================
// Schema
// ============================================

#[tokio::test]
async fn redeclaring_adds_missing_column_and_keeps_rows() {
    let tmp = tempfile::tempdir().unwrap();
    let first = people(&tmp, &[]);
    add_person(&first, 1, "A", "B").await;

    let second = people(&tmp, &[Column::new("age", "INTEGER").modifier("DEFAULT 0")]);
    assert!(!second.schema_health().created_table());
    assert_eq!(second.schema_health().added_columns(), ["age"]);
    assert_eq!(
        second.get_column_list().await.unwrap(),
        ["id", "name", "surname", "age"]
    );

    let row = second.get_with(1).await.unwrap().unwrap();
    assert_eq!(row.get("name"), Some(&Value::from("A")));
    assert_eq!(row.get("age"), Some(&Value::from(0)));
}

#[tokio::test]
async fn reopening_unchanged_declaration_is_a_no_op() {
    let tmp = tempfile::tempdir().unwrap();
    people(&tmp, &[]);
    let again = people(&tmp, &[]);
    assert!(!again.schema_health().created_table());
    assert!(again.schema_health().added_columns().is_empty());
    assert!(!again.schema_health().is_degraded());
}

#[tokio::test]
async fn failed_column_add_is_reported_not_raised() {
    let tmp = tempfile::tempdir().unwrap();
    let first = people(&tmp, &[]);
    add_person(&first, 1, "A", "B").await;

    let table = people(&tmp, &[Column::new("required", "TEXT").modifier("NOT NULL")]);
    let health = table.schema_health();
    assert!(health.is_degraded());
    assert_eq!(health.issues()[0].kind, SchemaIssueKind::AddColumn);
    assert_eq!(table.check_schema().await.unwrap(), ["required"]);
}

#[tokio::test]
async fn add_column_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let table = people(&tmp, &[]);
    let nickname = Column::new("nickname", "TEXT");

    assert!(table.add_column(&nickname).await.unwrap());
    assert!(!table.check_column(&nickname).await.unwrap());
    assert!(table.get_column_list().await.unwrap().contains(&"nickname".to_string()));
}

#[tokio::test]
async fn drop_table_removes_it() {
    let tmp = tempfile::tempdir().unwrap();
    let table = people(&tmp, &[]);
    table.drop_table().await.unwrap();
    assert!(table.list_tables().await.unwrap().is_empty());
    assert!(table.get_column_list().await.unwrap().is_empty());
}

#[tokio::test]
async fn bracketed_names_work_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let orders = Table::builder("[order]", &["id"])
        .column(Column::new("[group]", "TEXT"))
        .database("test.db")
        .config(StoreConfig::new().data_dir(tmp.path()))
        .open()
        .unwrap();
    assert!(!orders.schema_health().is_degraded());

    orders
        .set_by_key(1, SetQb::new().value("[group]", "x"))
        .await
        .unwrap();
    assert_eq!(orders.get_column("[group]").await.unwrap(), [Value::from("x")]);
    assert_eq!(orders.get_column_list().await.unwrap(), ["id", "group"]);
    assert_eq!(orders.list_tables().await.unwrap(), ["order"]);
}

#[test]
fn invalid_declarations_fail_to_open() {
    let tmp = tempfile::tempdir().unwrap();
    let config = StoreConfig::new().data_dir(tmp.path());

    let err = Table::builder("people; DROP TABLE x", &["id"])
        .database("test.db")
        .config(config.clone())
        .open()
        .unwrap_err();
    assert!(matches!(err, SqlWrapError::Validation(_)));

    let err = Table::builder("people", &[])
        .database("test.db")
        .config(config)
        .open()
        .unwrap_err();
    assert!(matches!(err, SqlWrapError::Validation(_)));
}

// ============================================
// Reads
// ============================================

#[tokio::test]
async fn get_column_keeps_insertion_order() {
    let tmp = tempfile::tempdir().unwrap();
    let table = people(&tmp, &[]);
    add_person(&table, 1, "C", "B").await;
    add_person(&table, 2, "A", "C").await;
    add_person(&table, 3, "A", "B").await;

    assert_eq!(
        table.get_column("surname").await.unwrap(),
        [Value::from("B"), Value::from("C"), Value::from("B")]
    );
    assert_eq!(table.get_all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn get_with_query_narrows_by_extra_predicates() {
    let tmp = tempfile::tempdir().unwrap();
    let table = people(&tmp, &[]);
    add_person(&table, 1, "A", "Kaya").await;

    let mut query = SelectQb::new().eq("surname", "Demir");
    assert!(table.get_with_query(1, &mut query).await.unwrap().is_none());
    assert!(query.has_where("id"));
    assert_eq!(query.get_limit(), Some(1));

    let mut query = SelectQb::new().columns(&["name"]).eq("surname", "Kaya");
    let row = table.get_with_query(1, &mut query).await.unwrap().unwrap();
    assert_eq!(row.columns(), ["name"]);
    assert_eq!(row.try_get::<_, String>("name").unwrap(), "A");
}

#[tokio::test]
async fn get_one_forces_single_row() {
    let tmp = tempfile::tempdir().unwrap();
    let table = people(&tmp, &[]);
    add_person(&table, 1, "A", "Kaya").await;
    add_person(&table, 2, "B", "Kaya").await;

    let mut query = SelectQb::new().eq("surname", "Kaya").limit(10);
    let row = table.get_one(&mut query).await.unwrap().unwrap();
    assert_eq!(row.get("id"), Some(&Value::from(1)));
    assert_eq!(query.get_limit(), Some(1));
}

#[tokio::test]
async fn list_tables_returns_user_tables() {
    let tmp = tempfile::tempdir().unwrap();
    let table = Table::builder("counters", &["id"])
        .database("test.db")
        .auto_increment(true)
        .config(StoreConfig::new().data_dir(tmp.path()))
        .open()
        .unwrap();

    // AUTOINCREMENT creates sqlite_sequence, which is skipped.
    assert_eq!(table.list_tables().await.unwrap(), ["counters"]);
}

#[tokio::test]
async fn raw_predicates_filter_reads() {
    let tmp = tempfile::tempdir().unwrap();
    let table = people(&tmp, &[]);
    add_person(&table, 1, "A", "Kaya").await;
    add_person(&table, 2, "B", "Kaya").await;
    add_person(&table, 3, "C", "Demir").await;

    let rows = table
        .get(
            &mut SelectQb::new()
                .eq("surname", "Kaya")
                .raw("id > ?", vec![Value::from(1)]),
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("name"), Some(&Value::from("B")));
}
