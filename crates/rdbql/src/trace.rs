//! `tracing` integration.
//!
//! With the `tracing` feature (on by default) every top-level render emits a
//! `DEBUG` event on target `rdbql.sql`, and every new dialect family emits one
//! on `rdbql.dialect`. Without the feature these are no-ops.

#[cfg(feature = "tracing")]
use crate::dialect::Dialect;
#[cfg(feature = "tracing")]
use crate::render::BuiltQuery;

/// Cut `sql` to at most `max_bytes`, backing off to a char boundary.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn truncate_sql(sql: &str, max: Option<usize>) -> String {
    match max {
        Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
        _ => sql.to_string(),
    }
}

#[cfg(feature = "tracing")]
pub(crate) fn query_built(dialect: &Dialect, query: &BuiltQuery) {
    if !tracing::enabled!(target: "rdbql.sql", tracing::Level::DEBUG) {
        return;
    }
    let sql = truncate_sql(&query.sql, dialect.config().log_sql_max_len);
    tracing::debug!(
        target: "rdbql.sql",
        dialect = dialect.name(),
        param_count = query.params.len(),
        sql = %sql,
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn query_built(_dialect: &crate::dialect::Dialect, _query: &crate::render::BuiltQuery) {}

#[cfg(feature = "tracing")]
pub(crate) fn dialect_registered(dialect: &Dialect) {
    tracing::debug!(
        target: "rdbql.dialect",
        dialect = dialect.name(),
        placeholder = ?dialect.config().placeholder,
        limit_style = ?dialect.config().limit_style,
        "registered dialect"
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn dialect_registered(_dialect: &crate::dialect::Dialect) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate_sql_bytes("SELECT 1", 100), "SELECT 1");
        assert_eq!(truncate_sql_bytes("SELECT 1", 6), "SELECT");
        // 'é' is two bytes; cutting inside it backs off
        assert_eq!(truncate_sql_bytes("café", 4), "caf");
    }

    #[test]
    fn truncate_appends_ellipsis_only_when_cut() {
        assert_eq!(truncate_sql("SELECT 1", Some(6)), "SELECT...");
        assert_eq!(truncate_sql("SELECT 1", Some(8)), "SELECT 1");
        assert_eq!(truncate_sql("SELECT 1", None), "SELECT 1");
    }
}
