//! INSERT statement.

use super::table_label;
use crate::context::RenderContext;
use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, Literal};
use crate::render::{Render, SqlStatement};
use crate::value::Value;

/// One row of values.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// Values in column order.
    Positional(Vec<Expr>),
    /// `(column, value)` pairs; columns missing from the row render `NULL`.
    Keyed(Vec<(String, Expr)>),
}

impl Row {
    /// Build a positional row.
    pub fn positional<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Row::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Build a keyed row.
    pub fn keyed<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Expr>,
    {
        Row::Keyed(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    fn get(&self, column: &str) -> Option<&Expr> {
        match self {
            Row::Keyed(pairs) => pairs.iter().find(|(k, _)| k == column).map(|(_, v)| v),
            Row::Positional(_) => None,
        }
    }
}

/// JSON rows are data: every element is bound, strings included.
impl TryFrom<serde_json::Value> for Row {
    type Error = SqlError;

    fn try_from(json: serde_json::Value) -> SqlResult<Self> {
        fn bound(v: serde_json::Value) -> Expr {
            Expr::Literal(Literal::scalar(Value::from(v)))
        }

        match json {
            serde_json::Value::Array(values) => {
                Ok(Row::Positional(values.into_iter().map(bound).collect()))
            }
            serde_json::Value::Object(map) => Ok(Row::Keyed(
                map.into_iter().map(|(k, v)| (k, bound(v))).collect(),
            )),
            other => Err(SqlError::invalid_row_shape(json_kind(&other))),
        }
    }
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// INSERT builder.
///
/// Columns are either given with [`Insert::columns`] or inferred from keyed
/// rows as the first-seen union of their keys. Explicit columns always win.
/// Mixing positional and keyed rows without explicit columns is rejected at
/// render time.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    dialect: Dialect,
    table: Expr,
    explicit_columns: Option<Vec<String>>,
    rows: Vec<Row>,
}

impl Insert {
    /// Create an INSERT into `table`.
    pub fn new(dialect: Dialect, table: impl Into<Expr>) -> Self {
        Self {
            dialect,
            table: table.into(),
            explicit_columns: None,
            rows: Vec::new(),
        }
    }

    /// Set explicit columns, replacing any earlier call.
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.explicit_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Append a row.
    pub fn values(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Append several rows.
    pub fn rows<I>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = Row>,
    {
        self.rows.extend(rows);
        self
    }

    /// Append a JSON row (array or object).
    pub fn values_json(self, json: serde_json::Value) -> SqlResult<Self> {
        let row = Row::try_from(json)?;
        Ok(self.values(row))
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Resolve the column list: explicit, inferred from keyed rows, or none.
    pub fn resolved_columns(&self) -> SqlResult<Option<Vec<String>>> {
        if let Some(columns) = &self.explicit_columns {
            return Ok(Some(columns.clone()));
        }

        let has_positional = self.rows.iter().any(|r| matches!(r, Row::Positional(_)));
        let mut inferred: Vec<String> = Vec::new();
        for row in &self.rows {
            if let Row::Keyed(pairs) = row {
                for (key, _) in pairs {
                    if !inferred.contains(key) {
                        inferred.push(key.clone());
                    }
                }
            }
        }

        let has_keyed = self.rows.iter().any(|r| matches!(r, Row::Keyed(_)));
        match (has_positional, has_keyed) {
            (true, true) => Err(SqlError::AmbiguousColumnMapping {
                table: table_label(&self.table),
            }),
            (_, true) if inferred.is_empty() => {
                Err(SqlError::invalid_row_shape("an object with no keys"))
            }
            (_, true) => Ok(Some(inferred)),
            _ => Ok(None),
        }
    }

    fn check_rows(&self) -> SqlResult<()> {
        if self.rows.is_empty() {
            return Err(SqlError::EmptyInsert {
                table: table_label(&self.table),
            });
        }
        if self
            .rows
            .iter()
            .any(|r| matches!(r, Row::Positional(values) if values.is_empty()))
        {
            return Err(SqlError::invalid_row_shape("an empty array"));
        }
        Ok(())
    }

    /// Render one row's cells in column order.
    fn render_cells(
        &self,
        row: &Row,
        columns: Option<&[String]>,
        ctx: &mut RenderContext,
    ) -> SqlResult<Vec<String>> {
        match (row, columns) {
            (Row::Positional(values), _) => values.iter().map(|v| v.render(ctx)).collect(),
            (Row::Keyed(_), Some(columns)) => columns
                .iter()
                .map(|column| match row.get(column) {
                    Some(value) => value.render(ctx),
                    None => Expr::Null.render(ctx),
                })
                .collect(),
            (Row::Keyed(pairs), None) => pairs.iter().map(|(_, v)| v.render(ctx)).collect(),
        }
    }

    fn render_head(&self, columns: Option<&[String]>, ctx: &mut RenderContext) -> SqlResult<String> {
        let mut sql = format!("INSERT INTO {}", self.table.render(ctx)?);
        if let Some(columns) = columns {
            sql.push_str(" (");
            sql.push_str(&columns.join(", "));
            sql.push(')');
        }
        Ok(sql)
    }

    /// `INSERT INTO t (a, b) VALUES (?, ?), (?, NULL)`
    pub fn render_generic(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        self.check_rows()?;
        let columns = self.resolved_columns()?;
        let columns = columns.as_deref();

        let mut sql = self.render_head(columns, ctx)?;
        sql.push_str(" VALUES ");
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push('(');
            sql.push_str(&self.render_cells(row, columns, ctx)?.join(", "));
            sql.push(')');
        }
        Ok(sql)
    }

    /// `INSERT INTO t (a, b) SELECT ? AS a, ? AS b UNION ALL SELECT ?, NULL`
    ///
    /// For engines without multi-row `VALUES`. Only the first SELECT carries
    /// column aliases; parameter order matches [`Insert::render_generic`].
    pub fn render_union_all(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        self.check_rows()?;
        let columns = self.resolved_columns()?;
        let columns = columns.as_deref();

        let mut sql = self.render_head(columns, ctx)?;
        for (i, row) in self.rows.iter().enumerate() {
            let mut cells = self.render_cells(row, columns, ctx)?;
            if i == 0 {
                if let Some(columns) = columns {
                    for (cell, column) in cells.iter_mut().zip(columns) {
                        cell.push_str(" AS ");
                        cell.push_str(column);
                    }
                }
                sql.push_str(" SELECT ");
            } else {
                sql.push_str(" UNION ALL SELECT ");
            }
            sql.push_str(&cells.join(", "));
        }
        Ok(sql)
    }
}

impl Render for Insert {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        ctx.check_dialect(&self.dialect)?;
        match self.dialect.overrides().insert {
            Some(render) => render(self, ctx),
            None => self.render_generic(ctx),
        }
    }
}

impl SqlStatement for Insert {
    fn dialect(&self) -> &Dialect {
        &self.dialect
    }
}
