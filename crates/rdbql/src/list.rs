//! Ordered expression lists (column lists, value lists, IN-sets).

use crate::context::RenderContext;
use crate::error::{SqlError, SqlResult};
use crate::expr::Expr;
use crate::render::Render;

/// An ordered sequence of expressions rendered as `a, b, c`.
///
/// Insertion order is the only order. Grouped input is never merged into the
/// parent: [`List::push_group`] adds exactly one element, a nested list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    items: Vec<Expr>,
}

impl List {
    /// Create an empty list.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append one item, auto-wrapping it.
    pub fn push(mut self, item: impl Into<Expr>) -> Self {
        self.add(item);
        self
    }

    /// Append one nested list built from `items`.
    ///
    /// `List::new().push_group([a, b]).push_group([c, d])` has two elements,
    /// not four.
    pub fn push_group<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        self.add_group(items);
        self
    }

    /// Append one item in place.
    pub fn add(&mut self, item: impl Into<Expr>) {
        self.items.push(item.into());
    }

    /// Append one nested list in place.
    pub fn add_group<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        self.items.push(Expr::List(items.into_iter().collect()));
    }

    /// Set-union of this list with each operand, as a fresh list.
    ///
    /// Operands must be lists or array literals; their elements are appended in
    /// order, skipping entries value-equal to one already present. Neither
    /// `self` nor the operands are modified.
    pub fn union<I>(&self, operands: I) -> SqlResult<List>
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        let mut merged = List::new();
        merged.extend_unique(self.items.iter().cloned());
        for operand in operands {
            match operand.into() {
                Expr::List(list) => merged.extend_unique(list.items),
                Expr::Literal(lit) => match lit.array_elements() {
                    Some(elements) => merged.extend_unique(elements),
                    None => return Err(SqlError::InvalidUnionOperand("scalar literal".into())),
                },
                other => return Err(SqlError::InvalidUnionOperand(other.kind().into())),
            }
        }
        Ok(merged)
    }

    fn extend_unique(&mut self, items: impl IntoIterator<Item = Expr>) {
        for item in items {
            if !self.items.contains(&item) {
                self.items.push(item);
            }
        }
    }

    /// Number of top-level elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, Expr> {
        self.items.iter()
    }

    /// Get an element by position.
    pub fn get(&self, index: usize) -> Option<&Expr> {
        self.items.get(index)
    }
}

impl<E: Into<Expr>> FromIterator<E> for List {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Expr;
    type IntoIter = std::slice::Iter<'a, Expr>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Render for List {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        let parts = self
            .items
            .iter()
            .map(|item| item.render(ctx))
            .collect::<SqlResult<Vec<_>>>()?;
        Ok(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::dialect;
    use crate::expr::{array, lit, raw};
    use crate::value::Value;

    #[test]
    fn groups_stay_nested() {
        let list = List::new()
            .push_group([raw("1"), raw("2")])
            .push_group([raw("3"), raw("4")]);
        assert_eq!(list.len(), 2);

        let g = dialect("generic");
        for (item, expected) in list.iter().zip(["1, 2", "3, 4"]) {
            assert!(matches!(item, Expr::List(_)));
            assert_eq!(g.render(item).unwrap().sql, expected);
        }
        assert_eq!(g.render(&list).unwrap().sql, "1, 2, 3, 4");
    }

    #[test]
    fn renders_in_insertion_order_with_params() {
        let list = List::new().push("b").push(lit(5)).push("a");
        let q = dialect("generic").render(&list).unwrap();
        assert_eq!(q.sql, "b, ?, a");
        assert_eq!(q.params, vec![Value::Int(5)]);
    }

    #[test]
    fn union_dedups_without_mutating_inputs() {
        let left: List = ["id", "name"].into_iter().collect();
        let right: List = ["name", "feeds"].into_iter().collect();
        let merged = left.union([right.clone()]).unwrap();

        let q = dialect("generic").render(&merged).unwrap();
        assert_eq!(q.sql, "id, name, feeds");
        assert_eq!(left.len(), 2);
        assert_eq!(right.len(), 2);
    }

    #[test]
    fn union_accepts_array_literals() {
        let merged = List::new().push(lit(1)).union([array([1, 2])]).unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn union_rejects_non_lists() {
        let err = List::new().union([raw("id")]).unwrap_err();
        assert_eq!(err, SqlError::InvalidUnionOperand("raw sql".into()));
        assert!(List::new().union([lit(1)]).is_err());
    }
}
