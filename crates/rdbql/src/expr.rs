//! The universal expression node and its leaf variants.
//!
//! Every node reachable from a statement is an [`Expr`]. Builder methods take
//! `impl Into<Expr>`, and the conversion is where auto-wrapping happens:
//!
//! | input                              | becomes                     |
//! |------------------------------------|-----------------------------|
//! | `&str`, `String`                   | [`Expr::Raw`] (inlined SQL) |
//! | integers, floats, `bool`, [`Value`]| bound [`Literal`]           |
//! | [`Literal`], [`List`], [`Alias`], ...| their own variant         |
//!
//! Strings are SQL on purpose: column lists, table names and conditions are
//! written as text. Use [`lit`] to bind a string as data instead.

use crate::condition::Condition;
use crate::context::RenderContext;
use crate::error::{SqlError, SqlResult};
use crate::ident::Ident;
use crate::list::List;
use crate::render::Render;
use crate::stmt::{CreateTable, Delete, Insert, Select, Statement, Union, Update};
use crate::value::Value;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Raw SQL fragment, rendered verbatim.
    Raw(String),
    /// SQL `NULL` keyword.
    Null,
    /// Validated identifier.
    Ident(Ident),
    /// Bound value, array or template.
    Literal(Literal),
    /// Comma-separated list.
    List(List),
    /// `expr AS name`.
    Alias(Box<Alias>),
    /// AND/OR condition tree.
    Condition(Condition),
    /// Nested statement (sub-select, union, ...).
    Statement(Box<Statement>),
}

impl Expr {
    /// Create a raw SQL fragment.
    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Raw(sql.into())
    }

    /// Short description of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Raw(_) => "raw sql",
            Expr::Null => "null",
            Expr::Ident(_) => "identifier",
            Expr::Literal(_) => "literal",
            Expr::List(_) => "list",
            Expr::Alias(_) => "alias",
            Expr::Condition(_) => "condition",
            Expr::Statement(_) => "statement",
        }
    }

    /// Check if this node renders to nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Expr::Raw(sql) => sql.is_empty(),
            Expr::List(list) => list.is_empty(),
            Expr::Condition(cond) => cond.is_empty(),
            _ => false,
        }
    }
}

impl Render for Expr {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        match self {
            Expr::Raw(sql) => Ok(sql.clone()),
            Expr::Null => Ok("NULL".to_string()),
            Expr::Ident(ident) => ident.render(ctx),
            Expr::Literal(lit) => lit.render(ctx),
            Expr::List(list) => list.render(ctx),
            Expr::Alias(alias) => alias.render(ctx),
            Expr::Condition(cond) => cond.render(ctx),
            Expr::Statement(stmt) => stmt.render(ctx),
        }
    }
}

/// A value to bind, an array of values, a nested expression, or a template.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal(LiteralKind);

#[derive(Debug, Clone, PartialEq)]
enum LiteralKind {
    Scalar(Value),
    Array(Vec<Value>),
    Expr(Box<Expr>),
    Template { sql: String, args: Vec<Literal> },
}

impl Literal {
    /// Bind a single value.
    pub fn scalar(value: impl Into<Value>) -> Self {
        Literal(LiteralKind::Scalar(value.into()))
    }

    /// Bind each element; renders as `?, ?, ?`.
    pub fn array<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Literal(LiteralKind::Array(values.into_iter().map(Into::into).collect()))
    }

    /// Embed an expression verbatim (its own parameters are still collected).
    pub fn expr(expr: impl Into<Expr>) -> Self {
        Literal(LiteralKind::Expr(Box::new(expr.into())))
    }

    /// Interpolate `args` into the `?` placeholders of `sql`.
    ///
    /// Each argument renders as a literal: scalars bind, arrays expand into a
    /// comma-separated group and expressions are inlined.
    ///
    /// # Example
    /// ```ignore
    /// let lit = Literal::template("id IN (?) AND feeds > ?", [
    ///     Literal::array([1, 2, 3]),
    ///     Literal::scalar(2),
    /// ])?;
    /// // id IN (?, ?, ?) AND feeds > ?
    /// ```
    pub fn template<I>(sql: impl Into<String>, args: I) -> SqlResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<Literal>,
    {
        let sql = sql.into();
        let args: Vec<Literal> = args.into_iter().map(Into::into).collect();
        let placeholders = sql.matches('?').count();
        if placeholders != args.len() {
            return Err(SqlError::MalformedTemplate {
                placeholders,
                args: args.len(),
            });
        }
        Ok(Literal(LiteralKind::Template { sql, args }))
    }

    /// The bound scalar, if this is a scalar literal.
    pub fn as_value(&self) -> Option<&Value> {
        match &self.0 {
            LiteralKind::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Split an array literal into one scalar literal per element.
    pub(crate) fn array_elements(&self) -> Option<Vec<Expr>> {
        match &self.0 {
            LiteralKind::Array(values) => Some(
                values
                    .iter()
                    .map(|v| Expr::Literal(Literal::scalar(v.clone())))
                    .collect(),
            ),
            _ => None,
        }
    }
}

impl Render for Literal {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        match &self.0 {
            LiteralKind::Scalar(value) => Ok(ctx.bind(value.clone())),
            LiteralKind::Array(values) => {
                if values.is_empty() {
                    // `IN (NULL)` stays valid SQL and matches nothing
                    return Ok("NULL".to_string());
                }
                let placeholders: Vec<String> =
                    values.iter().map(|v| ctx.bind(v.clone())).collect();
                Ok(placeholders.join(", "))
            }
            LiteralKind::Expr(expr) => expr.render(ctx),
            LiteralKind::Template { sql, args } => {
                let mut out = String::with_capacity(sql.len());
                let mut args = args.iter();
                for (i, bit) in sql.split('?').enumerate() {
                    if i > 0 {
                        // count was checked at construction
                        if let Some(arg) = args.next() {
                            out.push_str(&arg.render(ctx)?);
                        }
                    }
                    out.push_str(bit);
                }
                Ok(out)
            }
        }
    }
}

/// `expr AS name`, for columns and tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    expr: Expr,
    name: String,
}

impl Alias {
    /// Create an alias for `expr`.
    pub fn new(expr: impl Into<Expr>, name: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            name: name.into(),
        }
    }

    /// The alias name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Render for Alias {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        Ok(format!("{} AS {}", self.expr.render(ctx)?, self.name))
    }
}

// ==================== Constructors ====================

/// Auto-wrap any supported input into an [`Expr`].
pub fn wrap(value: impl Into<Expr>) -> Expr {
    value.into()
}

/// Raw SQL fragment.
pub fn raw(sql: impl Into<String>) -> Expr {
    Expr::Raw(sql.into())
}

/// SQL `NULL`.
pub fn null() -> Expr {
    Expr::Null
}

/// Bind a value as a parameter (strings included).
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::Literal(Literal::scalar(value))
}

/// Bind every element of `values`; renders as `?, ?, ...`.
pub fn array<I>(values: I) -> Expr
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    Expr::Literal(Literal::array(values))
}

/// Template with `?` placeholders, see [`Literal::template`].
pub fn template<I>(sql: impl Into<String>, args: I) -> SqlResult<Expr>
where
    I: IntoIterator,
    I::Item: Into<Literal>,
{
    Literal::template(sql, args).map(Expr::Literal)
}

/// `expr AS name`.
pub fn alias(expr: impl Into<Expr>, name: impl Into<String>) -> Expr {
    Expr::Alias(Box::new(Alias::new(expr, name)))
}

/// Validated identifier, quoted per dialect.
pub fn ident(name: &str) -> SqlResult<Expr> {
    Ident::parse(name).map(Expr::Ident)
}

// ==================== Conversions ====================

impl From<&str> for Expr {
    fn from(sql: &str) -> Self {
        Expr::Raw(sql.to_string())
    }
}

impl From<String> for Expr {
    fn from(sql: String) -> Self {
        Expr::Raw(sql)
    }
}

impl From<&String> for Expr {
    fn from(sql: &String) -> Self {
        Expr::Raw(sql.clone())
    }
}

macro_rules! impl_bound_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Expr {
                fn from(v: $ty) -> Self {
                    Expr::Literal(Literal::scalar(v))
                }
            }

            impl From<$ty> for Literal {
                fn from(v: $ty) -> Self {
                    Literal::scalar(v)
                }
            }
        )*
    };
}

impl_bound_scalar!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    Uuid,
    DateTime<Utc>,
    Value,
    serde_json::Value,
);

impl<T: Into<Value>> From<Option<T>> for Expr {
    fn from(v: Option<T>) -> Self {
        Expr::Literal(Literal::scalar(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Literal {
    fn from(v: Option<T>) -> Self {
        Literal::scalar(v)
    }
}

// Inside a template, strings are data.
impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::scalar(v)
    }
}

impl From<String> for Literal {
    fn from(v: String) -> Self {
        Literal::scalar(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Literal {
    fn from(values: Vec<T>) -> Self {
        Literal::array(values)
    }
}

impl From<Expr> for Literal {
    fn from(expr: Expr) -> Self {
        Literal::expr(expr)
    }
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}

impl From<Ident> for Expr {
    fn from(ident: Ident) -> Self {
        Expr::Ident(ident)
    }
}

impl From<List> for Expr {
    fn from(list: List) -> Self {
        Expr::List(list)
    }
}

impl From<Alias> for Expr {
    fn from(alias: Alias) -> Self {
        Expr::Alias(Box::new(alias))
    }
}

impl From<Condition> for Expr {
    fn from(cond: Condition) -> Self {
        Expr::Condition(cond)
    }
}

impl From<Statement> for Expr {
    fn from(stmt: Statement) -> Self {
        Expr::Statement(Box::new(stmt))
    }
}

macro_rules! impl_from_statement {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Expr {
                fn from(stmt: $ty) -> Self {
                    Expr::Statement(Box::new(Statement::$ty(stmt)))
                }
            }

            impl From<$ty> for Literal {
                fn from(stmt: $ty) -> Self {
                    Literal::expr(stmt)
                }
            }
        )*
    };
}

impl_from_statement!(CreateTable, Insert, Select, Union, Update, Delete);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::dialect;

    fn render(expr: &Expr) -> (String, Vec<Value>) {
        let q = dialect("generic").render(expr).unwrap();
        (q.sql, q.params)
    }

    #[test]
    fn scalar_binds_one_placeholder() {
        for v in [Value::Int(2), Value::from("egg"), Value::Null, Value::Bool(false)] {
            let (sql, params) = render(&lit(v.clone()));
            assert_eq!(sql, "?");
            assert_eq!(params, vec![v]);
        }
    }

    #[test]
    fn array_binds_each_element_in_order() {
        let (sql, params) = render(&array([1, 2, 3, 4]));
        assert_eq!(sql, "?, ?, ?, ?");
        assert_eq!(params, vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]);
    }

    #[test]
    fn empty_array_renders_null() {
        let (sql, params) = render(&array(Vec::<i64>::new()));
        assert_eq!(sql, "NULL");
        assert!(params.is_empty());
    }

    #[test]
    fn strings_are_raw_sql() {
        let (sql, params) = render(&wrap("id % 2 = 0"));
        assert_eq!(sql, "id % 2 = 0");
        assert!(params.is_empty());
    }

    #[test]
    fn template_interpolates_scalars_and_arrays() {
        let expr = template(
            "id IN (?) AND name = ?",
            [Literal::array([1, 2]), Literal::from("omelet")],
        )
        .unwrap();
        let (sql, params) = render(&expr);
        assert_eq!(sql, "id IN (?, ?) AND name = ?");
        assert_eq!(
            params,
            vec![Value::Int(1), Value::Int(2), Value::Text("omelet".into())]
        );
    }

    #[test]
    fn template_inlines_nested_expressions() {
        let expr = template("id NOT IN (?)", [Literal::expr("SELECT 1")]).unwrap();
        let (sql, params) = render(&expr);
        assert_eq!(sql, "id NOT IN (SELECT 1)");
        assert!(params.is_empty());
    }

    #[test]
    fn template_count_mismatch_is_rejected() {
        let err = template("a = ? AND b = ?", [1]).unwrap_err();
        assert_eq!(err, SqlError::MalformedTemplate { placeholders: 2, args: 1 });
        assert!(template("a = 1", [2]).unwrap_err().is_malformed_template());
    }

    #[test]
    fn alias_renders_as() {
        let (sql, _) = render(&alias("r.id", "recipe_id"));
        assert_eq!(sql, "r.id AS recipe_id");
    }
}
