//! # rdbql
//!
//! A dialect-aware SQL statement builder.
//!
//! Statements are in-memory trees of expressions (columns, tables, conditions,
//! joins, literals) rendered on demand to SQL text plus a positional parameter
//! list. Nothing is parsed, validated against a schema, or executed.
//!
//! ## Features
//!
//! - **Strings are SQL**: column lists, tables and conditions are written as text
//! - **Values are bound**: numbers, `Value`s and [`lit`] become placeholders
//! - **Templates**: `template("id IN (?) AND feeds > ?", [array([1, 2]), 4.into()])`
//! - **Left-associative AND/OR**: `and(a).or(b).and(c)` is `((a OR b) AND c)`
//! - **Dialects**: `?` or `$n` placeholders, LIMIT layout, identifier quoting,
//!   and per-statement render overrides (SQLite multi-row insert emulation)
//! - **Idempotent rendering**: building the same statement twice gives the same output
//!
//! ## Usage
//!
//! ```ignore
//! use rdbql::{SqlStatement, dialect, template};
//!
//! let db = dialect("sqlite3");
//!
//! // SELECT
//! let q = db
//!     .select("id")
//!     .distinct()
//!     .from("recipe")
//!     .and_where(template("feeds > ?", [2])?)
//!     .build()?;
//! assert_eq!(q.sql, "SELECT DISTINCT id FROM recipe WHERE (feeds > ?)");
//!
//! // INSERT
//! db.insert("recipe")
//!     .values(Row::keyed([("name", lit("omelet")), ("feeds", lit(2))]))
//!     .build()?;
//!
//! // UPDATE
//! db.update("stock")
//!     .set("quantity", "quantity * 2")
//!     .and_where("quantity < 10")
//!     .build()?;
//!
//! // DELETE
//! db.delete("recipe").and_where("archived").build()?;
//! ```

pub mod clause;
pub mod condition;
pub mod context;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod ident;
pub mod list;
pub mod render;
pub mod stmt;
pub mod value;

mod trace;

#[cfg(feature = "postgres")]
mod postgres;

pub use clause::{FromClause, GroupByClause, Join, JoinChain, JoinKind, LimitClause, OrderClause, WhereClause};
pub use condition::Condition;
pub use context::RenderContext;
pub use dialect::{
    Dialect, DialectBuilder, DialectConfig, IdentQuote, LimitStyle, Overrides, PlaceholderStyle,
    RenderFn, dialect, registered_dialects,
};
pub use error::{SqlError, SqlResult};
pub use expr::{Alias, Expr, Literal, alias, array, ident, lit, null, raw, template, wrap};
pub use ident::{Ident, IdentPart};
pub use list::List;
pub use render::{BuiltQuery, Render, SqlStatement};
pub use stmt::{CreateTable, Delete, Insert, Row, Select, SetValue, Statement, Union, Update};
pub use value::Value;

// ==================== Generic-dialect shortcuts ====================

/// `SELECT columns` in the generic dialect.
pub fn select(columns: impl Into<Expr>) -> Select {
    dialect("generic").select(columns)
}

/// `SELECT * FROM table` in the generic dialect.
pub fn select_from(table: impl Into<Expr>) -> Select {
    dialect("generic").select_from(table)
}

/// `INSERT INTO table` in the generic dialect.
pub fn insert(table: impl Into<Expr>) -> Insert {
    dialect("generic").insert(table)
}

/// `UPDATE table` in the generic dialect.
pub fn update(table: impl Into<Expr>) -> Update {
    dialect("generic").update(table)
}

/// `DELETE FROM table` in the generic dialect.
pub fn delete(table: impl Into<Expr>) -> Delete {
    dialect("generic").delete(table)
}

/// `CREATE TABLE name` in the generic dialect.
pub fn create_table(name: impl Into<Expr>) -> CreateTable {
    dialect("generic").create_table(name)
}

/// UNION of generic-dialect selects.
pub fn union<I>(selects: I) -> Union
where
    I: IntoIterator<Item = Select>,
{
    dialect("generic").union(selects)
}

/// Empty AND condition.
pub fn condition() -> Condition {
    Condition::new()
}

/// List of auto-wrapped items.
pub fn list<I>(items: I) -> List
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    items.into_iter().collect()
}
