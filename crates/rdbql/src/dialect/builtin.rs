//! Built-in dialect families.

use super::{Dialect, DialectBuilder, IdentQuote, LimitStyle, PlaceholderStyle};
use std::collections::HashMap;

/// Registry contents before any user registration.
pub(super) fn defaults() -> HashMap<String, Dialect> {
    let sqlite = DialectBuilder::new("sqlite3").multi_row_values(false).build();

    let mut map = HashMap::new();
    for dialect in [
        DialectBuilder::new("generic").build(),
        DialectBuilder::new("postgres")
            .placeholder(PlaceholderStyle::Numbered)
            .build(),
        DialectBuilder::new("mysql")
            .limit_style(LimitStyle::OffsetComma)
            .quote(IdentQuote::Backtick)
            .build(),
        sqlite.clone(),
    ] {
        map.insert(dialect.name().to_string(), dialect);
    }
    map.insert("sqlite".to_string(), sqlite);
    map
}
