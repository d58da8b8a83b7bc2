//! The rendering protocol shared by every node.

use crate::context::RenderContext;
use crate::dialect::Dialect;
use crate::error::SqlResult;
use crate::value::Value;

/// A node that can be rendered to SQL text.
///
/// Implementations may only append to the context's parameter list; they never
/// mutate the tree, which is what makes rendering idempotent.
pub trait Render {
    /// Render this node, appending bound values to `ctx` in textual order.
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String>;
}

/// A complete statement bound to the dialect that created it.
pub trait SqlStatement: Render {
    /// The dialect family this statement belongs to.
    fn dialect(&self) -> &Dialect;

    /// Render with a fresh context into SQL text plus parameters.
    fn build(&self) -> SqlResult<BuiltQuery> {
        self.dialect().render(self)
    }

    /// Render and keep only the SQL text.
    fn to_sql(&self) -> SqlResult<String> {
        self.build().map(|q| q.sql)
    }

    /// Render and keep only the parameters.
    fn params(&self) -> SqlResult<Vec<Value>> {
        self.build().map(|q| q.params)
    }
}

/// The result of rendering: SQL text and its positional parameters.
///
/// `params[i]` binds the i-th placeholder of `sql`, counted left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl BuiltQuery {
    /// Create a new built query.
    pub fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }

    /// Get parameters as references for tokio-postgres.
    #[cfg(feature = "postgres")]
    pub fn params_ref(&self) -> Vec<&(dyn tokio_postgres::types::ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn tokio_postgres::types::ToSql + Sync))
            .collect()
    }
}

impl std::fmt::Display for BuiltQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}
