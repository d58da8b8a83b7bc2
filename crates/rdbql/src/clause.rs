//! Clause nodes composed by statements.

use crate::condition::Condition;
use crate::context::RenderContext;
use crate::dialect::LimitStyle;
use crate::error::SqlResult;
use crate::expr::{Alias, Expr};
use crate::list::List;
use crate::render::Render;

// ==================== FROM ====================

/// `FROM t1, t2 AS a`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FromClause {
    tables: List,
}

impl FromClause {
    /// Create a FROM clause with one table.
    pub fn new(table: impl Into<Expr>) -> Self {
        let mut from = Self::default();
        from.add(table);
        from
    }

    /// Append a table (identifier, alias or sub-expression).
    pub fn add(&mut self, table: impl Into<Expr>) {
        self.tables.add(table);
    }

    /// Append `(alias, table)` pairs as `table AS alias`.
    pub fn add_aliased<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Expr>,
    {
        for (alias, table) in pairs {
            self.tables.add(Alias::new(table, alias));
        }
    }

    /// The tables, in order.
    pub fn tables(&self) -> &List {
        &self.tables
    }
}

impl Render for FromClause {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        Ok(format!("FROM {}", self.tables.render(ctx)?))
    }
}

// ==================== JOIN ====================

/// Supported join kinds.
///
/// RIGHT JOIN is left out: SQLite does not support it and a LEFT JOIN with the
/// tables swapped expresses the same thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Natural,
    Cross,
    Left,
    Inner,
}

impl JoinKind {
    /// SQL keyword for this join kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Natural => "NATURAL",
            JoinKind::Cross => "CROSS",
            JoinKind::Left => "LEFT",
            JoinKind::Inner => "INNER",
        }
    }
}

/// One entry of a join chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    kind: JoinKind,
    table: Expr,
    on: Option<Expr>,
}

impl Join {
    /// The join kind.
    pub fn kind(&self) -> JoinKind {
        self.kind
    }
}

/// Ordered chain of joins, rendered space-separated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinChain {
    joins: Vec<Join>,
}

impl JoinChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `LEFT JOIN table ON condition`.
    pub fn left(&mut self, table: impl Into<Expr>, on: impl Into<Expr>) {
        self.push(JoinKind::Left, table.into(), Some(on.into()));
    }

    /// Add `INNER JOIN table ON condition`.
    pub fn inner(&mut self, table: impl Into<Expr>, on: impl Into<Expr>) {
        self.push(JoinKind::Inner, table.into(), Some(on.into()));
    }

    /// Add `CROSS JOIN table`.
    pub fn cross(&mut self, table: impl Into<Expr>) {
        self.push(JoinKind::Cross, table.into(), None);
    }

    /// Add `NATURAL JOIN table`.
    pub fn natural(&mut self, table: impl Into<Expr>) {
        self.push(JoinKind::Natural, table.into(), None);
    }

    fn push(&mut self, kind: JoinKind, table: Expr, on: Option<Expr>) {
        self.joins.push(Join { kind, table, on });
    }

    /// Number of joins.
    pub fn len(&self) -> usize {
        self.joins.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.joins.is_empty()
    }

    /// The joins, in order.
    pub fn joins(&self) -> &[Join] {
        &self.joins
    }
}

impl Render for JoinChain {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        let mut parts = Vec::with_capacity(self.joins.len());
        for join in &self.joins {
            let table = join.table.render(ctx)?;
            let part = match &join.on {
                Some(on) => format!("{} JOIN {} ON {}", join.kind.as_str(), table, on.render(ctx)?),
                None => format!("{} JOIN {}", join.kind.as_str(), table),
            };
            parts.push(part);
        }
        Ok(parts.join(" "))
    }
}

// ==================== WHERE / HAVING ====================

/// `WHERE <condition>` or `HAVING <condition>` over one root condition.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    keyword: &'static str,
    condition: Condition,
}

impl WhereClause {
    /// Create an empty WHERE clause.
    pub fn new() -> Self {
        Self {
            keyword: "WHERE",
            condition: Condition::new(),
        }
    }

    /// Create an empty HAVING clause.
    pub fn having() -> Self {
        Self {
            keyword: "HAVING",
            condition: Condition::new(),
        }
    }

    /// Strengthen with AND.
    pub fn and(&mut self, operand: impl Into<Expr>) {
        self.condition.add_and(operand);
    }

    /// Weaken with OR.
    pub fn or(&mut self, operand: impl Into<Expr>) {
        self.condition.add_or(operand);
    }

    /// The root condition.
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Check if no condition has been added.
    pub fn is_empty(&self) -> bool {
        self.condition.is_empty()
    }
}

impl Default for WhereClause {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for WhereClause {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        Ok(format!("{} {}", self.keyword, self.condition.render(ctx)?))
    }
}

// ==================== LIMIT ====================

/// Row count with an optional offset.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitClause {
    count: Expr,
    offset: Option<Expr>,
}

impl LimitClause {
    /// Create a LIMIT clause.
    pub fn new(count: impl Into<Expr>, offset: Option<Expr>) -> Self {
        Self {
            count: count.into(),
            offset,
        }
    }
}

impl Render for LimitClause {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        let Some(offset) = &self.offset else {
            return Ok(format!("LIMIT {}", self.count.render(ctx)?));
        };
        // render in textual order so parameters line up with placeholders
        match ctx.dialect().config().limit_style {
            LimitStyle::LimitOffset => {
                let count = self.count.render(ctx)?;
                let offset = offset.render(ctx)?;
                Ok(format!("LIMIT {count} OFFSET {offset}"))
            }
            LimitStyle::OffsetComma => {
                let offset = offset.render(ctx)?;
                let count = self.count.render(ctx)?;
                Ok(format!("LIMIT {offset}, {count}"))
            }
        }
    }
}

// ==================== ORDER BY / GROUP BY ====================

/// `ORDER BY a, b DESC`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderClause {
    list: List,
}

impl OrderClause {
    /// Append an ordering term.
    pub fn add(&mut self, term: impl Into<Expr>) {
        self.list.add(term);
    }

    /// Check if no term has been added.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl Render for OrderClause {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        Ok(format!("ORDER BY {}", self.list.render(ctx)?))
    }
}

/// `GROUP BY a, b`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupByClause {
    list: List,
}

impl GroupByClause {
    /// Append a grouping term.
    pub fn add(&mut self, term: impl Into<Expr>) {
        self.list.add(term);
    }

    /// Check if no term has been added.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl Render for GroupByClause {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        Ok(format!("GROUP BY {}", self.list.render(ctx)?))
    }
}
