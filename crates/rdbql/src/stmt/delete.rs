//! DELETE statement.

use crate::clause::WhereClause;
use crate::context::RenderContext;
use crate::dialect::Dialect;
use crate::error::SqlResult;
use crate::expr::Expr;
use crate::render::{Render, SqlStatement};

/// `DELETE FROM table [WHERE ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    dialect: Dialect,
    table: Expr,
    where_clause: WhereClause,
}

impl Delete {
    /// Create a DELETE from `table`.
    pub fn new(dialect: Dialect, table: impl Into<Expr>) -> Self {
        Self {
            dialect,
            table: table.into(),
            where_clause: WhereClause::new(),
        }
    }

    /// Strengthen WHERE with AND.
    pub fn and_where(mut self, condition: impl Into<Expr>) -> Self {
        self.where_clause.and(condition);
        self
    }

    /// Weaken WHERE with OR.
    pub fn or_where(mut self, condition: impl Into<Expr>) -> Self {
        self.where_clause.or(condition);
        self
    }

    /// Check if a WHERE condition has been added.
    pub fn has_where(&self) -> bool {
        !self.where_clause.is_empty()
    }

    /// Render ignoring the dialect's delete override.
    pub fn render_generic(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        let mut sql = format!("DELETE FROM {}", self.table.render(ctx)?);
        if !self.where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&self.where_clause.render(ctx)?);
        }
        Ok(sql)
    }
}

impl Render for Delete {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        ctx.check_dialect(&self.dialect)?;
        match self.dialect.overrides().delete {
            Some(render) => render(self, ctx),
            None => self.render_generic(ctx),
        }
    }
}

impl SqlStatement for Delete {
    fn dialect(&self) -> &Dialect {
        &self.dialect
    }
}
