//! Complete statements.
//!
//! Each statement carries the [`Dialect`] that created it. Rendering checks
//! that dialect against the one driving the pass, then uses the dialect's
//! override for that statement kind if one is installed, and the generic
//! `render_generic` otherwise.

mod create_table;
mod delete;
mod insert;
mod select;
mod union;
mod update;

pub use create_table::CreateTable;
pub use delete::Delete;
pub use insert::{Insert, Row};
pub use select::Select;
pub use union::Union;
pub use update::{SetValue, Update};

use crate::context::RenderContext;
use crate::dialect::Dialect;
use crate::error::SqlResult;
use crate::expr::Expr;
use crate::render::{Render, SqlStatement};

/// Any statement, for embedding as a sub-expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable(CreateTable),
    Insert(Insert),
    Select(Select),
    Union(Union),
    Update(Update),
    Delete(Delete),
}

impl Statement {
    /// The dialect family of the wrapped statement.
    pub fn dialect(&self) -> &Dialect {
        match self {
            Statement::CreateTable(s) => s.dialect(),
            Statement::Insert(s) => s.dialect(),
            Statement::Select(s) => s.dialect(),
            Statement::Union(s) => s.dialect(),
            Statement::Update(s) => s.dialect(),
            Statement::Delete(s) => s.dialect(),
        }
    }
}

impl Render for Statement {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        match self {
            Statement::CreateTable(s) => s.render(ctx),
            Statement::Insert(s) => s.render(ctx),
            Statement::Select(s) => s.render(ctx),
            Statement::Union(s) => s.render(ctx),
            Statement::Update(s) => s.render(ctx),
            Statement::Delete(s) => s.render(ctx),
        }
    }
}

impl SqlStatement for Statement {
    fn dialect(&self) -> &Dialect {
        Statement::dialect(self)
    }
}

/// Table name for error messages.
pub(crate) fn table_label(table: &Expr) -> String {
    match table {
        Expr::Raw(sql) => sql.clone(),
        Expr::Ident(ident) => {
            let mut out = String::new();
            ident.write_sql('"', &mut out);
            out
        }
        Expr::Alias(alias) => alias.name().to_string(),
        other => other.kind().to_string(),
    }
}
