//! Boolean condition trees for WHERE / HAVING / JOIN ON.
//!
//! A [`Condition`] holds operands joined by a single combinator. Chaining the
//! same combinator appends; switching combinators captures everything so far
//! as the left operand and flips, which yields left-associative grouping with
//! no parentheses to manage by hand:
//!
//! ```ignore
//! Condition::new().and("a").or("b").and("c")   // ((a OR b) AND c)
//! Condition::new().and("a").and("b").or("c")   // ((a AND b) OR c)
//! ```

use crate::context::RenderContext;
use crate::error::SqlResult;
use crate::expr::Expr;
use crate::render::Render;

/// AND/OR condition node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Condition {
    operands: Vec<Expr>,
    is_or: bool,
}

impl Condition {
    /// Create an empty AND condition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operand with AND semantics.
    pub fn and(mut self, operand: impl Into<Expr>) -> Self {
        self.push(false, [operand.into()]);
        self
    }

    /// Add an operand with OR semantics.
    pub fn or(mut self, operand: impl Into<Expr>) -> Self {
        self.push(true, [operand.into()]);
        self
    }

    /// Add several operands with AND semantics in one step.
    pub fn and_all<I>(mut self, operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        self.push(false, operands.into_iter().map(Into::into));
        self
    }

    /// Add several operands with OR semantics in one step.
    pub fn or_any<I>(mut self, operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        self.push(true, operands.into_iter().map(Into::into));
        self
    }

    /// In-place form of [`Condition::and`].
    pub fn add_and(&mut self, operand: impl Into<Expr>) {
        self.push(false, [operand.into()]);
    }

    /// In-place form of [`Condition::or`].
    pub fn add_or(&mut self, operand: impl Into<Expr>) {
        self.push(true, [operand.into()]);
    }

    fn push(&mut self, is_or: bool, operands: impl IntoIterator<Item = Expr>) {
        let mut operands = operands.into_iter().filter(|e| !e.is_empty()).peekable();
        if operands.peek().is_none() {
            return;
        }
        if self.is_or != is_or && self.operands.len() > 1 {
            let left = Condition {
                operands: std::mem::take(&mut self.operands),
                is_or: self.is_or,
            };
            self.operands.push(Expr::Condition(left));
        }
        // a single operand has no combinator of its own yet
        self.is_or = is_or;
        self.operands.extend(operands);
    }

    /// Structurally independent duplicate of this node.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Whether operands are joined with OR.
    pub fn is_or(&self) -> bool {
        self.is_or
    }

    /// Check if no operand has been added.
    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }

    /// The operands, in order.
    pub fn operands(&self) -> &[Expr] {
        &self.operands
    }
}

impl Render for Condition {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        if self.operands.is_empty() {
            return Ok(String::new());
        }
        let op = if self.is_or { " OR " } else { " AND " };
        let parts = self
            .operands
            .iter()
            .map(|e| e.render(ctx))
            .collect::<SqlResult<Vec<_>>>()?;
        Ok(format!("({})", parts.join(op)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::dialect;
    use crate::expr::template;
    use crate::value::Value;

    fn sql(cond: &Condition) -> String {
        dialect("generic").render(cond).unwrap().sql
    }

    #[test]
    fn same_combinator_appends() {
        let cond = Condition::new().and("a").and("b").and("c");
        assert_eq!(sql(&cond), "(a AND b AND c)");
        assert_eq!(cond.operands().len(), 3);
    }

    #[test]
    fn alternation_groups_left_associatively() {
        let cond = Condition::new().and("a").or("b").and("c");
        assert_eq!(sql(&cond), "((a OR b) AND c)");

        let cond = Condition::new().and("a").and("b").or("c").and("d");
        assert_eq!(sql(&cond), "(((a AND b) OR c) AND d)");
    }

    #[test]
    fn three_consecutive_flips() {
        let cond = Condition::new().and("a").or("b").and("c").or("d");
        assert_eq!(sql(&cond), "(((a OR b) AND c) OR d)");
    }

    #[test]
    fn first_operand_takes_requested_combinator() {
        let cond = Condition::new().or("a").or("b");
        assert!(cond.is_or());
        assert_eq!(sql(&cond), "(a OR b)");
    }

    #[test]
    fn multi_operand_flip() {
        let cond = Condition::new().and_all(["a", "b"]).or_any(["c", "d"]);
        assert_eq!(sql(&cond), "((a AND b) OR c OR d)");
    }

    #[test]
    fn empty_operands_are_ignored() {
        let cond = Condition::new().and("").or(Condition::new());
        assert!(cond.is_empty());
        assert_eq!(sql(&cond), "");
    }

    #[test]
    fn nested_condition_keeps_params_in_order() {
        let inner = Condition::new()
            .or(template("feeds > ?", [2]).unwrap())
            .or(template("feeds < ?", [8]).unwrap());
        let cond = Condition::new()
            .and(template("id = ?", [1]).unwrap())
            .and(inner);
        let q = dialect("generic").render(&cond).unwrap();
        assert_eq!(q.sql, "(id = ? AND (feeds > ? OR feeds < ?))");
        assert_eq!(q.params, vec![Value::Int(1), Value::Int(2), Value::Int(8)]);
    }

    #[test]
    fn copy_is_independent() {
        let original = Condition::new().and("a");
        let copy = original.copy().and("b");
        assert_eq!(sql(&original), "(a)");
        assert_eq!(sql(&copy), "(a AND b)");
    }
}
