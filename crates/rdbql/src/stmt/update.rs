//! UPDATE statement.

use super::table_label;
use crate::clause::WhereClause;
use crate::context::RenderContext;
use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, Literal};
use crate::render::{Render, SqlStatement};

/// Right-hand side of `SET column = ...`.
///
/// Strings and scalars are SQL text, never bound: `2` renders `2` and
/// `"quantity * 2"` renders as written. Expressions (`lit()`, `template()`,
/// `null()`, sub-statements) keep their own rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SetValue(Expr);

impl SetValue {
    /// The expression this value renders as.
    pub fn into_expr(self) -> Expr {
        self.0
    }
}

impl From<Expr> for SetValue {
    fn from(expr: Expr) -> Self {
        SetValue(expr)
    }
}

impl From<Literal> for SetValue {
    fn from(literal: Literal) -> Self {
        SetValue(Expr::Literal(literal))
    }
}

impl From<&str> for SetValue {
    fn from(sql: &str) -> Self {
        SetValue(Expr::Raw(sql.to_string()))
    }
}

impl From<String> for SetValue {
    fn from(sql: String) -> Self {
        SetValue(Expr::Raw(sql))
    }
}

impl From<&String> for SetValue {
    fn from(sql: &String) -> Self {
        SetValue(Expr::Raw(sql.clone()))
    }
}

impl From<bool> for SetValue {
    fn from(v: bool) -> Self {
        SetValue(Expr::Raw(if v { "TRUE" } else { "FALSE" }.to_string()))
    }
}

macro_rules! impl_inline_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for SetValue {
                fn from(v: $ty) -> Self {
                    SetValue(Expr::Raw(v.to_string()))
                }
            }
        )*
    };
}

impl_inline_number!(i8, i16, i32, i64, u8, u16, u32, f32, f64);

/// UPDATE builder.
///
/// Assignment right-hand sides are SQL fragments, see [`SetValue`]:
/// `set("quantity", "quantity * 2")` and `set("feeds", 2)` both render inline.
/// Use `lit()` to bind a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    dialect: Dialect,
    table: Expr,
    assignments: Vec<(String, Expr)>,
    where_clause: WhereClause,
}

impl Update {
    /// Create an UPDATE of `table`.
    pub fn new(dialect: Dialect, table: impl Into<Expr>) -> Self {
        Self {
            dialect,
            table: table.into(),
            assignments: Vec::new(),
            where_clause: WhereClause::new(),
        }
    }

    /// Assign `column = value`.
    ///
    /// Setting a column again replaces its value and keeps its position.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<SetValue>) -> Self {
        let column = column.into();
        let value = value.into().into_expr();
        match self.assignments.iter_mut().find(|(c, _)| *c == column) {
            Some((_, existing)) => *existing = value,
            None => self.assignments.push((column, value)),
        }
        self
    }

    /// Assign every `(column, value)` pair.
    pub fn set_map<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SetValue>,
    {
        for (column, value) in pairs {
            self = self.set(column, value);
        }
        self
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

    /// Render ignoring the dialect's update override.
    pub fn render_generic(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        if self.assignments.is_empty() {
            return Err(SqlError::EmptyUpdate {
                table: table_label(&self.table),
            });
        }

        let mut sql = format!("UPDATE {} SET ", self.table.render(ctx)?);
        for (i, (column, value)) in self.assignments.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(column);
            sql.push_str(" = ");
            sql.push_str(&value.render(ctx)?);
        }
        if !self.where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&self.where_clause.render(ctx)?);
        }
        Ok(sql)
    }
}

impl Render for Update {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        ctx.check_dialect(&self.dialect)?;
        match self.dialect.overrides().update {
            Some(render) => render(self, ctx),
            None => self.render_generic(ctx),
        }
    }
}

impl SqlStatement for Update {
    fn dialect(&self) -> &Dialect {
        &self.dialect
    }
}
