//! SELECT statement.

use crate::clause::{FromClause, GroupByClause, JoinChain, LimitClause, OrderClause, WhereClause};
use crate::context::RenderContext;
use crate::dialect::Dialect;
use crate::error::SqlResult;
use crate::expr::{Alias, Expr};
use crate::list::List;
use crate::render::{Render, SqlStatement};

/// SELECT builder.
///
/// Clauses render in the order
/// `SELECT [DISTINCT] cols [FROM] [JOIN] [WHERE] [GROUP BY] [HAVING] [ORDER BY] [LIMIT]`
/// regardless of the order the builder methods were called in. ORDER BY comes
/// before LIMIT so the output is valid SQL for every engine. Empty clauses are
/// omitted; no columns renders `*` when there is a FROM, and nothing otherwise.
///
/// # Example
/// ```ignore
/// let q = dialect("generic")
///     .select("r.id, r.name")
///     .from(alias("recipe", "r"))
///     .left_join(alias("recipe_ingredient", "ri"), "r.id = ri.recipe_id")
///     .and_where(template("r.feeds >= ?", [4])?)
///     .order_by("r.name")
///     .limit(10)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    dialect: Dialect,
    distinct: bool,
    columns: List,
    from: Option<FromClause>,
    joins: JoinChain,
    where_clause: WhereClause,
    group_by: GroupByClause,
    having: WhereClause,
    order: OrderClause,
    limit: Option<LimitClause>,
}

impl Select {
    /// Create an empty `SELECT *` for `dialect`.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            distinct: false,
            columns: List::new(),
            from: None,
            joins: JoinChain::new(),
            where_clause: WhereClause::new(),
            group_by: GroupByClause::default(),
            having: WhereClause::having(),
            order: OrderClause::default(),
            limit: None,
        }
    }

    // ==================== Columns ====================

    /// Emit `SELECT DISTINCT`.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Set or clear DISTINCT.
    pub fn set_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    /// Append one column expression.
    pub fn column(mut self, column: impl Into<Expr>) -> Self {
        let column = column.into();
        if !column.is_empty() {
            self.columns.add(column);
        }
        self
    }

    /// Append several column expressions.
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        for column in columns {
            self = self.column(column);
        }
        self
    }

    /// Append `(alias, expr)` pairs as `expr AS alias`.
    pub fn columns_map<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Expr>,
    {
        for (alias, expr) in pairs {
            self.columns.add(Alias::new(expr, alias));
        }
        self
    }

    // ==================== FROM / JOIN ====================

    /// Append a table to FROM.
    pub fn from(mut self, table: impl Into<Expr>) -> Self {
        match &mut self.from {
            Some(from) => from.add(table),
            None => self.from = Some(FromClause::new(table)),
        }
        self
    }

    /// Append `(alias, table)` pairs to FROM as `table AS alias`.
    pub fn from_map<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Expr>,
    {
        self.from
            .get_or_insert_with(FromClause::default)
            .add_aliased(pairs);
        self
    }

    /// `INNER JOIN table ON condition`
    pub fn join(self, table: impl Into<Expr>, on: impl Into<Expr>) -> Self {
        self.inner_join(table, on)
    }

    /// `INNER JOIN table ON condition`
    pub fn inner_join(mut self, table: impl Into<Expr>, on: impl Into<Expr>) -> Self {
        self.joins.inner(table, on);
        self
    }

    /// `LEFT JOIN table ON condition`
    pub fn left_join(mut self, table: impl Into<Expr>, on: impl Into<Expr>) -> Self {
        self.joins.left(table, on);
        self
    }

    /// `CROSS JOIN table`
    pub fn cross_join(mut self, table: impl Into<Expr>) -> Self {
        self.joins.cross(table);
        self
    }

    /// `NATURAL JOIN table`
    pub fn natural_join(mut self, table: impl Into<Expr>) -> Self {
        self.joins.natural(table);
        self
    }

    // ==================== WHERE / GROUP BY / HAVING ====================

    /// Strengthen WHERE with AND.
    pub fn and_where(mut self, condition: impl Into<Expr>) -> Self {
        self.where_clause.and(condition);
        self
    }

    /// Weaken WHERE with OR.
    ///
    /// On an empty WHERE this simply starts the condition.
    pub fn or_where(mut self, condition: impl Into<Expr>) -> Self {
        self.where_clause.or(condition);
        self
    }

    /// Append a GROUP BY term.
    pub fn group_by(mut self, term: impl Into<Expr>) -> Self {
        self.group_by.add(term);
        self
    }

    /// Strengthen HAVING with AND.
    pub fn having(mut self, condition: impl Into<Expr>) -> Self {
        self.having.and(condition);
        self
    }

    /// Weaken HAVING with OR.
    pub fn or_having(mut self, condition: impl Into<Expr>) -> Self {
        self.having.or(condition);
        self
    }

    // ==================== ORDER / LIMIT ====================

    /// Append an ORDER BY term (`"name DESC"`).
    pub fn order_by(mut self, term: impl Into<Expr>) -> Self {
        self.order.add(term);
        self
    }

    /// Set LIMIT, replacing any previous limit.
    pub fn limit(mut self, count: impl Into<Expr>) -> Self {
        self.limit = Some(LimitClause::new(count, None));
        self
    }

    /// Set LIMIT with an OFFSET, replacing any previous limit.
    pub fn limit_offset(mut self, count: impl Into<Expr>, offset: impl Into<Expr>) -> Self {
        self.limit = Some(LimitClause::new(count, Some(offset.into())));
        self
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1. The offset saturates at `i64::MAX`.
    pub fn paginate(self, page: i64, per_page: i64) -> Self {
        let p = page.max(1);
        let size = per_page.max(1);
        self.limit_offset(size, (p - 1).saturating_mul(size))
    }

    // ==================== Render ====================

    /// Check if any table has been added to FROM.
    pub fn has_from(&self) -> bool {
        self.from.is_some()
    }

    /// Render ignoring the dialect's select override.
    pub fn render_generic(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        let mut sql = String::from("SELECT");
        if self.distinct {
            sql.push_str(" DISTINCT");
        }
        if !self.columns.is_empty() {
            sql.push(' ');
            sql.push_str(&self.columns.render(ctx)?);
        } else if self.from.is_some() {
            sql.push_str(" *");
        }

        if let Some(from) = &self.from {
            sql.push(' ');
            sql.push_str(&from.render(ctx)?);
        }
        if !self.joins.is_empty() {
            sql.push(' ');
            sql.push_str(&self.joins.render(ctx)?);
        }
        if !self.where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&self.where_clause.render(ctx)?);
        }
        if !self.group_by.is_empty() {
            sql.push(' ');
            sql.push_str(&self.group_by.render(ctx)?);
        }
        if !self.having.is_empty() {
            sql.push(' ');
            sql.push_str(&self.having.render(ctx)?);
        }
        if !self.order.is_empty() {
            sql.push(' ');
            sql.push_str(&self.order.render(ctx)?);
        }
        if let Some(limit) = &self.limit {
            sql.push(' ');
            sql.push_str(&limit.render(ctx)?);
        }
        Ok(sql)
    }
}

impl Render for Select {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        ctx.check_dialect(&self.dialect)?;
        match self.dialect.overrides().select {
            Some(render) => render(self, ctx),
            None => self.render_generic(ctx),
        }
    }
}

impl SqlStatement for Select {
    fn dialect(&self) -> &Dialect {
        &self.dialect
    }
}
