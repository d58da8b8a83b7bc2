//! Per-render parameter accumulator.

use crate::dialect::{Dialect, PlaceholderStyle};
use crate::error::{SqlError, SqlResult};
use crate::value::Value;

/// Mutable state threaded through one render pass.
///
/// A context is created fresh by every top-level render and never shared, so
/// rendering the same tree twice (or from two threads) yields independent
/// parameter lists. Parameters are appended in the exact left-to-right order
/// their placeholders appear in the output text.
#[derive(Debug)]
pub struct RenderContext {
    dialect: Dialect,
    params: Vec<Value>,
}

impl RenderContext {
    /// Create an empty context for `dialect`.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            params: Vec::new(),
        }
    }

    /// The dialect this pass renders for.
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Append a bound value and return its placeholder token.
    pub fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        match self.dialect.config().placeholder {
            PlaceholderStyle::Question => "?".to_string(),
            PlaceholderStyle::Numbered => format!("${}", self.params.len()),
        }
    }

    /// Parameters collected so far.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if no parameter has been bound yet.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Consume the context, returning the collected parameters.
    pub fn into_params(self) -> Vec<Value> {
        self.params
    }

    /// Fail unless `owner` is the dialect being rendered.
    pub(crate) fn check_dialect(&self, owner: &Dialect) -> SqlResult<()> {
        if *owner == self.dialect {
            Ok(())
        } else {
            Err(SqlError::DialectMismatch {
                expected: self.dialect.name().to_string(),
                found: owner.name().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::dialect;

    #[test]
    fn question_marks_for_generic() {
        let mut ctx = RenderContext::new(dialect("generic"));
        assert_eq!(ctx.bind(Value::Int(1)), "?");
        assert_eq!(ctx.bind(Value::Int(2)), "?");
        assert_eq!(ctx.params(), &[Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn numbered_for_postgres() {
        let mut ctx = RenderContext::new(dialect("postgres"));
        assert_eq!(ctx.bind(Value::Int(1)), "$1");
        assert_eq!(ctx.bind(Value::from("x")), "$2");
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn foreign_dialect_is_rejected() {
        let ctx = RenderContext::new(dialect("generic"));
        let err = ctx.check_dialect(&dialect("sqlite3")).unwrap_err();
        assert!(err.is_dialect_mismatch());
    }
}
