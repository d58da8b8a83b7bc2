//! Dialect families.
//!
//! A [`Dialect`] bundles a name, a [`DialectConfig`] and a table of
//! per-statement render [`Overrides`]. Every statement remembers the dialect
//! that created it; rendering checks the override table first and falls back
//! to the generic renderer.
//!
//! ```ignore
//! use rdbql::dialect;
//!
//! let sqlite = dialect("sqlite3");
//! let q = sqlite
//!     .insert("recipe")
//!     .values(Row::keyed([("id", 1), ("feeds", 4)]))
//!     .values(Row::keyed([("id", 2)]))
//!     .build()?;
//! // INSERT INTO recipe (id, feeds) SELECT ? AS id, ? AS feeds UNION ALL SELECT ?, NULL
//! ```
//!
//! Handles are cheap to clone and compare by identity: two handles are equal
//! only when they come from the same registration (or the same `build()`).

mod builtin;
mod config;

pub use config::{DialectConfig, IdentQuote, LimitStyle, PlaceholderStyle};

use crate::context::RenderContext;
use crate::error::{SqlError, SqlResult};
use crate::expr::Expr;
use crate::render::{BuiltQuery, Render};
use crate::stmt::{CreateTable, Delete, Insert, Select, Union, Update};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Statement-specific render function installed on a dialect.
pub type RenderFn<T> = fn(&T, &mut RenderContext) -> SqlResult<String>;

/// Per-statement render overrides. `None` means the generic renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub create_table: Option<RenderFn<CreateTable>>,
    pub insert: Option<RenderFn<Insert>>,
    pub select: Option<RenderFn<Select>>,
    pub union: Option<RenderFn<Union>>,
    pub update: Option<RenderFn<Update>>,
    pub delete: Option<RenderFn<Delete>>,
}

#[derive(Debug)]
struct DialectInner {
    name: String,
    config: DialectConfig,
    overrides: Overrides,
}

/// Handle to a dialect family.
#[derive(Clone)]
pub struct Dialect(Arc<DialectInner>);

impl Dialect {
    /// Start building a custom dialect.
    pub fn builder(name: impl Into<String>) -> DialectBuilder {
        DialectBuilder::new(name)
    }

    /// The family name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Rendering configuration.
    pub fn config(&self) -> &DialectConfig {
        &self.0.config
    }

    /// Installed render overrides.
    pub fn overrides(&self) -> &Overrides {
        &self.0.overrides
    }

    /// Render any node with a fresh context.
    ///
    /// This is the single entry point for top-level rendering: it owns the
    /// parameter list for the pass and emits the debug log event.
    pub fn render<R: Render + ?Sized>(&self, node: &R) -> SqlResult<BuiltQuery> {
        let mut ctx = RenderContext::new(self.clone());
        let sql = node.render(&mut ctx)?;
        let query = BuiltQuery::new(sql, ctx.into_params());
        crate::trace::query_built(self, &query);
        Ok(query)
    }

    // ==================== Statement factories ====================

    /// `SELECT columns`
    pub fn select(&self, columns: impl Into<Expr>) -> Select {
        Select::new(self.clone()).column(columns)
    }

    /// `SELECT * FROM table`
    pub fn select_from(&self, table: impl Into<Expr>) -> Select {
        Select::new(self.clone()).from(table)
    }

    /// `INSERT INTO table`
    pub fn insert(&self, table: impl Into<Expr>) -> Insert {
        Insert::new(self.clone(), table)
    }

    /// `UPDATE table`
    pub fn update(&self, table: impl Into<Expr>) -> Update {
        Update::new(self.clone(), table)
    }

    /// `DELETE FROM table`
    pub fn delete(&self, table: impl Into<Expr>) -> Delete {
        Delete::new(self.clone(), table)
    }

    /// `CREATE TABLE name`
    pub fn create_table(&self, name: impl Into<Expr>) -> CreateTable {
        CreateTable::new(self.clone(), name)
    }

    /// `s1 UNION s2 ...`
    pub fn union<I>(&self, selects: I) -> Union
    where
        I: IntoIterator<Item = Select>,
    {
        selects
            .into_iter()
            .fold(Union::new(self.clone()), |union, select| union.add(select))
    }
}

impl PartialEq for Dialect {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Dialect {}

impl std::fmt::Debug for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Dialect").field(&self.0.name).finish()
    }
}

impl Default for Dialect {
    fn default() -> Self {
        dialect("generic")
    }
}

// ==================== Builder ====================

/// Builder for custom dialect families.
///
/// ```ignore
/// let pg = Dialect::builder("my_pg")
///     .config(DialectConfig::new().placeholder(PlaceholderStyle::Numbered))
///     .select(|select, ctx| Ok(format!("{} FOR UPDATE", select.render_generic(ctx)?)))
///     .register()?;
/// ```
#[derive(Debug, Clone)]
pub struct DialectBuilder {
    name: String,
    config: DialectConfig,
    overrides: Overrides,
}

impl DialectBuilder {
    /// Create a builder with generic defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: DialectConfig::default(),
            overrides: Overrides::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: DialectConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the placeholder style.
    pub fn placeholder(mut self, style: PlaceholderStyle) -> Self {
        self.config.placeholder = style;
        self
    }

    /// Set the LIMIT/OFFSET layout.
    pub fn limit_style(mut self, style: LimitStyle) -> Self {
        self.config.limit_style = style;
        self
    }

    /// Set the identifier quote character.
    pub fn quote(mut self, quote: IdentQuote) -> Self {
        self.config.quote = quote;
        self
    }

    /// Enable or disable multi-row `VALUES`.
    pub fn multi_row_values(mut self, enabled: bool) -> Self {
        self.config.multi_row_values = enabled;
        self
    }

    /// Override CREATE TABLE rendering.
    pub fn create_table(mut self, f: RenderFn<CreateTable>) -> Self {
        self.overrides.create_table = Some(f);
        self
    }

    /// Override INSERT rendering.
    pub fn insert(mut self, f: RenderFn<Insert>) -> Self {
        self.overrides.insert = Some(f);
        self
    }

    /// Override SELECT rendering.
    pub fn select(mut self, f: RenderFn<Select>) -> Self {
        self.overrides.select = Some(f);
        self
    }

    /// Override UNION rendering.
    pub fn union(mut self, f: RenderFn<Union>) -> Self {
        self.overrides.union = Some(f);
        self
    }

    /// Override UPDATE rendering.
    pub fn update(mut self, f: RenderFn<Update>) -> Self {
        self.overrides.update = Some(f);
        self
    }

    /// Override DELETE rendering.
    pub fn delete(mut self, f: RenderFn<Delete>) -> Self {
        self.overrides.delete = Some(f);
        self
    }

    /// Build an unregistered dialect.
    ///
    /// Without multi-row `VALUES` and without an explicit insert override,
    /// inserts fall back to `SELECT ... UNION ALL` emulation.
    pub fn build(mut self) -> Dialect {
        if !self.config.multi_row_values && self.overrides.insert.is_none() {
            self.overrides.insert = Some(Insert::render_union_all);
        }
        Dialect(Arc::new(DialectInner {
            name: self.name,
            config: self.config,
            overrides: self.overrides,
        }))
    }

    /// Build and register under the builder's name.
    ///
    /// Fails with [`SqlError::DialectExists`] when the name is taken.
    pub fn register(self) -> SqlResult<Dialect> {
        let mut registry = registry().write().unwrap_or_else(PoisonError::into_inner);
        if registry.contains_key(&self.name) {
            return Err(SqlError::DialectExists(self.name));
        }
        let dialect = self.build();
        registry.insert(dialect.name().to_string(), dialect.clone());
        crate::trace::dialect_registered(&dialect);
        Ok(dialect)
    }
}

// ==================== Registry ====================

fn registry() -> &'static RwLock<HashMap<String, Dialect>> {
    static REGISTRY: OnceLock<RwLock<HashMap<String, Dialect>>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(builtin::defaults()))
}

/// Look up a dialect family by name, creating a generic one on first use.
///
/// Repeated calls with the same name return the same family, so statements
/// built from either handle can be embedded in each other.
pub fn dialect(name: &str) -> Dialect {
    let registry = registry();
    {
        let read = registry.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(dialect) = read.get(name) {
            return dialect.clone();
        }
    }
    let mut write = registry.write().unwrap_or_else(PoisonError::into_inner);
    write
        .entry(name.to_string())
        .or_insert_with(|| {
            let dialect = DialectBuilder::new(name).build();
            crate::trace::dialect_registered(&dialect);
            dialect
        })
        .clone()
}

/// Names of all registered dialect families, sorted.
pub fn registered_dialects() -> Vec<String> {
    let read = registry().read().unwrap_or_else(PoisonError::into_inner);
    let mut names: Vec<String> = read.keys().cloned().collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SqlStatement;

    #[test]
    fn same_name_is_same_family() {
        assert_eq!(dialect("generic"), dialect("generic"));
        assert_eq!(dialect("sqlite"), dialect("sqlite3"));
        assert_ne!(dialect("generic"), dialect("postgres"));
    }

    #[test]
    fn unknown_names_are_generic_and_memoized() {
        let first = dialect("unit_test_unknown_family");
        let second = dialect("unit_test_unknown_family");
        assert_eq!(first, second);
        assert_eq!(first.config(), &DialectConfig::default());
        assert!(registered_dialects().contains(&"unit_test_unknown_family".to_string()));
    }

    #[test]
    fn built_dialects_are_distinct_families() {
        let a = Dialect::builder("unregistered").build();
        let b = Dialect::builder("unregistered").build();
        assert_ne!(a, b);
        assert_eq!(a.name(), b.name());
    }

    #[test]
    fn register_rejects_taken_names() {
        let err = Dialect::builder("generic").register().unwrap_err();
        assert_eq!(err, SqlError::DialectExists("generic".into()));

        let custom = Dialect::builder("unit_test_registered").register().unwrap();
        assert_eq!(dialect("unit_test_registered"), custom);
    }

    #[test]
    fn no_multi_row_values_installs_union_insert() {
        let d = Dialect::builder("no_values")
            .multi_row_values(false)
            .build();
        assert!(d.overrides().insert.is_some());
        assert!(d.overrides().select.is_none());
    }

    #[test]
    fn select_override_is_used() {
        let d = Dialect::builder("locking")
            .select(|select, ctx| Ok(format!("{} FOR UPDATE", select.render_generic(ctx)?)))
            .build();
        let sql = d.select("id").from("recipe").to_sql().unwrap();
        assert_eq!(sql, "SELECT id FROM recipe FOR UPDATE");
    }

    #[test]
    fn debug_shows_name() {
        assert_eq!(format!("{:?}", dialect("mysql")), r#"Dialect("mysql")"#);
    }
}
