//! UNION of SELECT statements.

use super::Select;
use crate::context::RenderContext;
use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::render::{Render, SqlStatement};

/// `s1 UNION s2 UNION ...`, or `UNION ALL` after [`Union::all`].
#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    dialect: Dialect,
    selects: Vec<Select>,
    all: bool,
}

impl Union {
    /// Create an empty union.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            selects: Vec::new(),
            all: false,
        }
    }

    /// Append a SELECT.
    pub fn add(mut self, select: Select) -> Self {
        self.selects.push(select);
        self
    }

    /// Append a SELECT built from this union's dialect.
    pub fn select<F>(self, build: F) -> Self
    where
        F: FnOnce(Select) -> Select,
    {
        let select = build(Select::new(self.dialect.clone()));
        self.add(select)
    }

    /// Keep duplicates (`UNION ALL`).
    pub fn all(mut self) -> Self {
        self.all = true;
        self
    }

    /// Set or clear `ALL`.
    pub fn set_all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    /// The member selects, in order.
    pub fn selects(&self) -> &[Select] {
        &self.selects
    }

    /// Render ignoring the dialect's union override.
    pub fn render_generic(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        if self.selects.is_empty() {
            return Err(SqlError::EmptyUnion);
        }
        let sep = if self.all { " UNION ALL " } else { " UNION " };
        let parts = self
            .selects
            .iter()
            .map(|select| select.render(ctx))
            .collect::<SqlResult<Vec<_>>>()?;
        Ok(parts.join(sep))
    }
}

impl Render for Union {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        ctx.check_dialect(&self.dialect)?;
        match self.dialect.overrides().union {
            Some(render) => render(self, ctx),
            None => self.render_generic(ctx),
        }
    }
}

impl SqlStatement for Union {
    fn dialect(&self) -> &Dialect {
        &self.dialect
    }
}
