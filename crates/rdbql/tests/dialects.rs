//! Dialect families: builtins, custom registration and overrides.

use rdbql::{
    Dialect, DialectConfig, IdentQuote, LimitStyle, PlaceholderStyle, RenderContext, Row, Select,
    SqlError, SqlResult, SqlStatement, Value, dialect, ident, lit, template,
};

#[test]
fn sqlite_emulates_multi_row_insert() {
    let q = dialect("sqlite")
        .insert("recipe")
        .values(Row::keyed([("name", lit("omelet")), ("feeds", lit(2))]))
        .values(Row::keyed([("name", lit("salad"))]))
        .build()
        .unwrap();
    assert_eq!(
        q.sql,
        "INSERT INTO recipe (name, feeds) SELECT ? AS name, ? AS feeds UNION ALL SELECT ?, NULL"
    );
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
fn sqlite_and_generic_bind_the_same_params() {
    let rows = || {
        [
            Row::keyed([("a", 1), ("b", 2)]),
            Row::keyed([("b", 3)]),
        ]
    };
    let generic = dialect("generic").insert("t").rows(rows()).build().unwrap();
    let sqlite = dialect("sqlite3").insert("t").rows(rows()).build().unwrap();
    assert_eq!(generic.params, sqlite.params);
    assert_ne!(generic.sql, sqlite.sql);
}

#[test]
fn sqlite_select_uses_generic_renderer() {
    let sql = dialect("sqlite3")
        .select("id")
        .from("recipe")
        .limit_offset(10, 5)
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT id FROM recipe LIMIT ? OFFSET ?");
}

#[test]
fn postgres_numbers_placeholders_across_clauses() {
    let q = dialect("postgres")
        .update("recipe")
        .set("name", lit("omelet"))
        .set("feeds", 2)
        .set("serves", lit(4))
        .and_where(template("id = ?", [7]).unwrap())
        .build()
        .unwrap();
    assert_eq!(
        q.sql,
        "UPDATE recipe SET name = $1, feeds = 2, serves = $2 WHERE (id = $3)"
    );
    assert_eq!(q.params.len(), 3);
}

#[test]
fn mysql_quotes_with_backticks() {
    let sql = dialect("mysql")
        .select(ident(r#""select".id"#).unwrap())
        .from(ident(r#""select""#).unwrap())
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT `select`.id FROM `select`");
}

#[test]
fn statements_remember_their_family() {
    let s = dialect("postgres").select("1");
    assert_eq!(s.dialect(), &dialect("postgres"));
    assert_ne!(s.dialect(), &dialect("generic"));
}

fn render_select_for_update(select: &Select, ctx: &mut RenderContext) -> SqlResult<String> {
    Ok(format!("{} FOR UPDATE", select.render_generic(ctx)?))
}

#[test]
fn registered_dialect_with_override() {
    let locking = Dialect::builder("it_locking")
        .config(
            DialectConfig::new()
                .placeholder(PlaceholderStyle::Numbered)
                .quote(IdentQuote::DoubleQuote),
        )
        .select(render_select_for_update)
        .register()
        .unwrap();

    let q = dialect("it_locking")
        .select_from("stock")
        .and_where(template("id = ?", [1]).unwrap())
        .build()
        .unwrap();
    assert_eq!(q.sql, "SELECT * FROM stock WHERE (id = $1) FOR UPDATE");
    assert_eq!(dialect("it_locking"), locking);

    let err = Dialect::builder("it_locking").register().unwrap_err();
    assert_eq!(err, SqlError::DialectExists("it_locking".into()));
}

#[test]
fn dialect_from_json_config() {
    let config =
        DialectConfig::from_json(r#"{ "limit_style": "offset_comma", "multi_row_values": false }"#)
            .unwrap();
    assert_eq!(config.limit_style, LimitStyle::OffsetComma);

    let d = Dialect::builder("it_from_json").config(config).build();
    let sql = d.select_from("t").limit_offset(10, 20).to_sql().unwrap();
    assert_eq!(sql, "SELECT * FROM t LIMIT ?, ?");

    let sql = d
        .insert("t")
        .values(Row::positional([1]))
        .values(Row::positional([2]))
        .to_sql()
        .unwrap();
    assert_eq!(sql, "INSERT INTO t SELECT ? UNION ALL SELECT ?");
}

#[test]
fn nesting_across_families_is_rejected() {
    let inner = dialect("sqlite3").select("id").from("recipe");
    let err = dialect("generic")
        .select_from("t")
        .and_where(template("id IN (?)", [inner]).unwrap())
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        SqlError::DialectMismatch {
            expected: "generic".into(),
            found: "sqlite3".into()
        }
    );
}

#[test]
fn render_arbitrary_nodes() {
    let q = dialect("postgres")
        .render(&rdbql::list([lit(1), lit("two")]))
        .unwrap();
    assert_eq!(q.sql, "$1, $2");
    assert_eq!(q.params, vec![Value::Int(1), Value::Text("two".into())]);
}
