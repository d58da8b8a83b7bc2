//! CREATE TABLE statement.

use crate::context::RenderContext;
use crate::dialect::Dialect;
use crate::error::SqlResult;
use crate::expr::Expr;
use crate::list::List;
use crate::render::{Render, SqlStatement};

/// `CREATE TABLE [IF NOT EXISTS] name (column definitions)`
///
/// Column definitions are raw SQL (`"id INTEGER PRIMARY KEY"`); nothing is
/// validated against a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    dialect: Dialect,
    name: Expr,
    if_not_exists: bool,
    columns: List,
}

impl CreateTable {
    /// Create a CREATE TABLE for `name`.
    pub fn new(dialect: Dialect, name: impl Into<Expr>) -> Self {
        Self {
            dialect,
            name: name.into(),
            if_not_exists: false,
            columns: List::new(),
        }
    }

    /// Emit `IF NOT EXISTS`.
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Append a column definition.
    pub fn column(mut self, definition: impl Into<Expr>) -> Self {
        self.columns.add(definition);
        self
    }

    /// Append several column definitions.
    pub fn columns<I>(mut self, definitions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        for definition in definitions {
            self.columns.add(definition);
        }
        self
    }

    /// Render ignoring the dialect's create-table override.
    pub fn render_generic(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        let mut sql = String::from("CREATE TABLE ");
        if self.if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&self.name.render(ctx)?);
        sql.push_str(" (");
        sql.push_str(&self.columns.render(ctx)?);
        sql.push(')');
        Ok(sql)
    }
}

impl Render for CreateTable {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        ctx.check_dialect(&self.dialect)?;
        match self.dialect.overrides().create_table {
            Some(render) => render(self, ctx),
            None => self.render_generic(ctx),
        }
    }
}

impl SqlStatement for CreateTable {
    fn dialect(&self) -> &Dialect {
        &self.dialect
    }
}

#[cfg(test)]
mod tests {
    use crate::dialect::dialect;
    use crate::expr::ident;
    use crate::render::SqlStatement;

    #[test]
    fn create_table_with_columns() {
        let sql = dialect("generic")
            .create_table("recipe")
            .if_not_exists()
            .column("id INTEGER PRIMARY KEY")
            .columns(["name TEXT NOT NULL", "feeds INTEGER"])
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS recipe (id INTEGER PRIMARY KEY, name TEXT NOT NULL, feeds INTEGER)"
        );
    }

    #[test]
    fn quoted_name_follows_dialect() {
        let name = ident(r#""Recipe""#).unwrap();
        let sql = dialect("mysql")
            .create_table(name)
            .column("id INT")
            .to_sql()
            .unwrap();
        assert_eq!(sql, "CREATE TABLE `Recipe` (id INT)");
    }
}
