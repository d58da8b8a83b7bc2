//! End-to-end statement rendering through the public API.

use rdbql::{
    List, Row, SqlError, SqlStatement, Value, alias, array, condition, create_table, insert, lit,
    null, select, select_from, template, union, update,
};
use serde_json::json;

#[test]
fn recipe_search_with_joins_and_nested_conditions() {
    let q = select("r.id, r.name")
        .from(alias("recipe", "r"))
        .left_join(alias("recipe_ingredient", "ri"), "r.id = ri.recipe_id")
        .left_join(alias("ingredient", "i"), "ri.ingredient_id = i.id")
        .and_where(template("r.feeds >= ?", [4]).unwrap())
        .and_where(
            condition()
                .or(template("i.name = ?", ["egg"]).unwrap())
                .or(template("i.name = ?", ["milk"]).unwrap()),
        )
        .group_by("r.id, r.name")
        .order_by("r.name")
        .limit(20)
        .build()
        .unwrap();

    assert_eq!(
        q.sql,
        "SELECT r.id, r.name FROM recipe AS r \
         LEFT JOIN recipe_ingredient AS ri ON r.id = ri.recipe_id \
         LEFT JOIN ingredient AS i ON ri.ingredient_id = i.id \
         WHERE (r.feeds >= ? AND (i.name = ? OR i.name = ?)) \
         GROUP BY r.id, r.name ORDER BY r.name LIMIT ?"
    );
    assert_eq!(
        q.params,
        vec![
            Value::Int(4),
            Value::Text("egg".into()),
            Value::Text("milk".into()),
            Value::Int(20)
        ]
    );
}

#[test]
fn condition_grouping_is_left_associative() {
    let q = select_from("t")
        .and_where("a")
        .or_where("b")
        .and_where("c")
        .build()
        .unwrap();
    assert_eq!(q.sql, "SELECT * FROM t WHERE ((a OR b) AND c)");

    let q = select_from("t")
        .and_where("a")
        .and_where("b")
        .or_where("c")
        .and_where("d")
        .build()
        .unwrap();
    assert_eq!(q.sql, "SELECT * FROM t WHERE (((a AND b) OR c) AND d)");
}

#[test]
fn insert_infers_columns_and_fills_nulls() {
    let q = insert("t")
        .values(Row::keyed([("a", 1), ("b", 2)]))
        .values(Row::keyed([("a", 3)]))
        .build()
        .unwrap();
    assert_eq!(q.sql, "INSERT INTO t (a, b) VALUES (?, ?), (?, NULL)");
    assert_eq!(q.params, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
}

#[test]
fn insert_mixed_rows_is_ambiguous() {
    let err = insert("t")
        .values(Row::positional([1, 2]))
        .values(Row::keyed([("a", 3)]))
        .build()
        .unwrap_err();
    assert_eq!(err, SqlError::AmbiguousColumnMapping { table: "t".into() });
}

#[test]
fn insert_json_rows() {
    let q = insert("recipe")
        .columns(["name", "feeds"])
        .values_json(json!(["omelet", 2]))
        .unwrap()
        .values_json(json!({ "name": "salad" }))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(q.sql, "INSERT INTO recipe (name, feeds) VALUES (?, ?), (?, NULL)");
    assert_eq!(
        q.params,
        vec![
            Value::Text("omelet".into()),
            Value::Int(2),
            Value::Text("salad".into())
        ]
    );
}

#[test]
fn insert_explicit_null_and_raw_values() {
    let q = insert("recipe")
        .values(Row::keyed([
            ("name", lit("toast")),
            ("notes", null()),
            ("created_at", "CURRENT_TIMESTAMP".into()),
        ]))
        .build()
        .unwrap();
    assert_eq!(
        q.sql,
        "INSERT INTO recipe (name, notes, created_at) VALUES (?, NULL, CURRENT_TIMESTAMP)"
    );
    assert_eq!(q.params, vec![Value::Text("toast".into())]);
}

#[test]
fn update_with_raw_and_bound_values() {
    let q = update("stock")
        .set("quantity", "quantity * 2")
        .set("updated_by", lit("cron"))
        .and_where(template("ingredient_id IN (?)", [array([1, 2, 3])]).unwrap())
        .build()
        .unwrap();
    assert_eq!(
        q.sql,
        "UPDATE stock SET quantity = quantity * 2, updated_by = ? WHERE (ingredient_id IN (?, ?, ?))"
    );
    assert_eq!(q.params.len(), 4);
}

#[test]
fn union_of_selects() {
    let q = union([
        select("id").from("recipe").and_where(template("feeds = ?", [2]).unwrap()),
        select("id").from("archive"),
    ])
    .all()
    .build()
    .unwrap();
    assert_eq!(
        q.sql,
        "SELECT id FROM recipe WHERE (feeds = ?) UNION ALL SELECT id FROM archive"
    );
    assert_eq!(q.params, vec![Value::Int(2)]);
}

#[test]
fn create_table_if_not_exists() {
    let sql = create_table("ingredient")
        .if_not_exists()
        .columns(["id INTEGER PRIMARY KEY", "name TEXT UNIQUE"])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "CREATE TABLE IF NOT EXISTS ingredient (id INTEGER PRIMARY KEY, name TEXT UNIQUE)"
    );
}

#[test]
fn grouped_list_items_stay_nested() {
    let list = List::new().push_group([1, 2]).push_group([3, 4]);
    assert_eq!(list.len(), 2);
    let q = select_from("t")
        .and_where(template("(a, b) IN ((?), (?))", [list.get(0).cloned().unwrap(), list.get(1).cloned().unwrap()]).unwrap())
        .build()
        .unwrap();
    assert_eq!(q.sql, "SELECT * FROM t WHERE ((a, b) IN ((?, ?), (?, ?)))");
    assert_eq!(
        q.params,
        vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]
    );
}

#[test]
fn malformed_template_is_an_error() {
    let err = template("a = ? AND b = ?", [1]).unwrap_err();
    assert!(err.is_malformed_template());
}

#[test]
fn rendering_twice_is_identical() {
    let stmt = insert("t")
        .values(Row::positional([lit("x"), lit(1)]))
        .values(Row::positional([lit("y"), lit(2)]));
    assert_eq!(stmt.build().unwrap(), stmt.build().unwrap());
}

#[test]
fn rendering_from_threads_is_independent() {
    let stmt = select_from("t").and_where(template("id = ?", [9]).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let stmt = stmt.clone();
            std::thread::spawn(move || stmt.build())
        })
        .collect();
    for handle in handles {
        let q = handle.join().unwrap().unwrap();
        assert_eq!(q.params, vec![Value::Int(9)]);
    }
}
