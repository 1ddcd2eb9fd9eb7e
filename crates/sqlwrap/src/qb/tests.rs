//! Integration tests for the qb module.

use crate::qb::{delete, insert, select, set, update, DeleteQb, SelectQb, SqlQb};
use crate::value::Value;

#[test]
fn test_select_basic() {
    let qb = select("people");
    assert_eq!(qb.to_sql(), "SELECT * FROM people");
}

#[test]
fn test_select_with_conditions() {
    let qb = select("people")
        .eq("name", "A")
        .eq("surname", "B")
        .limit(10);

    let built = qb.build().unwrap();
    assert_eq!(
        built.sql,
        "SELECT * FROM people WHERE name = ? AND surname = ? LIMIT 10"
    );
    assert_eq!(built.params, vec![Value::from("A"), Value::from("B")]);
}

#[test]
fn test_predicate_order_is_insertion_order() {
    let qb = select("people").eq("surname", "B").eq("id", 1).eq("name", "A");
    assert_eq!(
        qb.to_sql(),
        "SELECT * FROM people WHERE surname = ? AND id = ? AND name = ?"
    );
}

#[test]
fn test_insert_basic() {
    let qb = insert("people").value("name", "A").value("surname", "B");
    assert_eq!(qb.to_sql(), "INSERT INTO people (name, surname) VALUES (?, ?)");
}

#[test]
fn test_update_basic() {
    let qb = update("people").value("name", "C").eq("id", 1i64);
    assert_eq!(qb.to_sql(), "UPDATE people SET name = ? WHERE id = ?");
}

#[test]
fn test_delete_basic() {
    let qb = delete("people").eq("id", 1i64);
    assert_eq!(qb.to_sql(), "DELETE FROM people WHERE id = ?");
}

#[test]
fn test_delete_all_is_not_blocked() {
    assert_eq!(delete("people").to_sql(), "DELETE FROM people");
}

#[test]
fn test_set_views() {
    let qb = set("people").value("name", "A").eq("id", 1);
    assert_eq!(qb.to_insert().to_sql(), "INSERT INTO people (name) VALUES (?)");
    assert_eq!(qb.to_update().to_sql(), "UPDATE people SET name = ? WHERE id = ?");
}

#[test]
fn test_builders_are_reusable_across_tables() {
    let mut first = SelectQb::new().eq("id", 1);
    let mut second = first.clone();
    first.fill_table("people");
    second.fill_table("pets");
    assert_eq!(first.to_sql(), "SELECT * FROM people WHERE id = ?");
    assert_eq!(second.to_sql(), "SELECT * FROM pets WHERE id = ?");
}

#[test]
fn test_invalid_identifiers_are_rejected() {
    assert!(select("people; DROP TABLE people").build().is_err());
    assert!(select("people").columns(&["name, secret"]).build().is_err());
    assert!(DeleteQb::from_table("people").eq("1=1 OR id", 1).build().is_err());
}

#[test]
fn test_to_sql_reports_invalid_state() {
    assert!(SelectQb::new().to_sql().starts_with("-- invalid query"));
}

#[test]
fn test_add_where_on_every_builder() {
    let mut find = select("people");
    assert!(find.add_where("id", 1));
    assert!(!find.add_where("id", 2));
    assert_eq!(find.to_sql(), "SELECT * FROM people WHERE id = ?");

    let mut rename = update("people").value("name", "A");
    assert!(rename.add_where("id", 1));
    assert!(rename.has_where("id"));
    assert_eq!(rename.to_sql(), "UPDATE people SET name = ? WHERE id = ?");

    let mut purge = delete("people");
    assert!(purge.add_where("surname", "B"));
    assert!(!purge.add_where("surname", "C"));
    assert_eq!(purge.build().unwrap().params, vec![Value::from("B")]);

    let mut upsert = set("people").value("name", "A");
    assert!(upsert.add_where("id", 1));
    assert!(upsert.has_where("id"));
    assert_eq!(upsert.to_update().build().unwrap().params, vec![Value::from("A"), Value::from(1)]);
}
