//! Dialect configuration and its JSON loading.

use crate::error::SqlResult;
use serde::{Deserialize, Serialize};

/// How bound values are written into the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// `?` for every parameter.
    #[default]
    Question,
    /// `$1`, `$2`, ... numbered by position.
    Numbered,
}

/// How a LIMIT clause with an offset is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitStyle {
    /// `LIMIT count OFFSET offset`
    #[default]
    LimitOffset,
    /// `LIMIT offset, count`
    OffsetComma,
}

/// Quote character for quoted identifier parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentQuote {
    #[default]
    DoubleQuote,
    Backtick,
}

impl IdentQuote {
    pub fn as_char(&self) -> char {
        match self {
            IdentQuote::DoubleQuote => '"',
            IdentQuote::Backtick => '`',
        }
    }
}

/// Rendering knobs of a dialect family.
///
/// Missing fields fall back to their defaults when deserializing, so a config
/// file only needs to name what differs from generic SQL:
///
/// ```ignore
/// let config = DialectConfig::from_json(r#"{ "placeholder": "numbered" }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectConfig {
    /// Placeholder token style.
    pub placeholder: PlaceholderStyle,
    /// LIMIT/OFFSET layout.
    pub limit_style: LimitStyle,
    /// Identifier quote character.
    pub quote: IdentQuote,
    /// Whether `INSERT ... VALUES (...), (...)` is supported.
    ///
    /// When `false`, dialects built from this config render multi-row
    /// inserts as `INSERT ... SELECT ... UNION ALL SELECT ...`.
    pub multi_row_values: bool,
    /// Truncate logged SQL to this many bytes. `None` means no truncation.
    pub log_sql_max_len: Option<usize>,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            placeholder: PlaceholderStyle::Question,
            limit_style: LimitStyle::LimitOffset,
            quote: IdentQuote::DoubleQuote,
            multi_row_values: true,
            log_sql_max_len: Some(200),
        }
    }
}

impl DialectConfig {
    /// Create a configuration with generic SQL defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> SqlResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the placeholder style.
    pub fn placeholder(mut self, style: PlaceholderStyle) -> Self {
        self.placeholder = style;
        self
    }

    /// Set the LIMIT/OFFSET layout.
    pub fn limit_style(mut self, style: LimitStyle) -> Self {
        self.limit_style = style;
        self
    }

    /// Set the identifier quote character.
    pub fn quote(mut self, quote: IdentQuote) -> Self {
        self.quote = quote;
        self
    }

    /// Enable or disable multi-row `VALUES`.
    pub fn multi_row_values(mut self, enabled: bool) -> Self {
        self.multi_row_values = enabled;
        self
    }

    /// Set maximum SQL length to log.
    pub fn log_sql_max_len(mut self, len: usize) -> Self {
        self.log_sql_max_len = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.log_sql_max_len = None;
        self
    }
}
