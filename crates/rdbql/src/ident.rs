//! Validated SQL identifiers.
//!
//! [`Ident`] is the opt-in alternative to raw strings for table and column
//! names: it rejects anything that is not a plain or quoted identifier, and
//! quoted parts are re-quoted with the active dialect's quote character.
//!
//! - Unquoted parts are validated against: `[A-Za-z_][A-Za-z0-9_$]*`
//! - Quoted parts (`"..."` or `` `...` ``) allow any characters except NUL
//!
//! ```ignore
//! let t = rdbql::Ident::parse(r#"public."UserTable""#)?;
//! // generic:  public."UserTable"
//! // mysql:    public.`UserTable`
//! ```

use crate::context::RenderContext;
use crate::error::{SqlError, SqlResult};
use crate::render::Render;

/// A part of a SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentPart {
    /// Unquoted identifier, rendered verbatim.
    Unquoted(String),
    /// Quoted identifier, rendered with the dialect's quote character.
    Quoted(String),
}

/// A dotted SQL identifier (`schema.table.column`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    parts: Vec<IdentPart>,
}

impl Ident {
    /// Create a single quoted identifier part.
    pub fn quoted(name: &str) -> SqlResult<Self> {
        if name.is_empty() {
            return Err(SqlError::invalid_ident("empty quoted identifier"));
        }
        if name.contains('\0') {
            return Err(SqlError::invalid_ident("identifier cannot contain NUL"));
        }
        Ok(Self {
            parts: vec![IdentPart::Quoted(name.to_string())],
        })
    }

    /// Parse an identifier string, supporting dotted and quoted forms.
    pub fn parse(s: &str) -> SqlResult<Self> {
        if s.is_empty() {
            return Err(SqlError::invalid_ident("identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(SqlError::invalid_ident("identifier cannot contain NUL"));
        }

        let mut parts = Vec::new();
        let mut chars = s.chars().peekable();

        while chars.peek().is_some() {
            if !parts.is_empty() {
                match chars.next() {
                    Some('.') if chars.peek().is_none() => {
                        return Err(SqlError::invalid_ident(format!("trailing '.' in {s}")));
                    }
                    Some('.') => {}
                    Some(c) => {
                        return Err(SqlError::invalid_ident(format!(
                            "expected '.' between parts of {s}, got '{c}'"
                        )));
                    }
                    None => break,
                }
            }

            let quote = chars.peek().copied().filter(|c| *c == '"' || *c == '`');
            if let Some(quote) = quote {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        // doubled quote is an escaped quote
                        Some(c) if c == quote && chars.peek() == Some(&quote) => {
                            chars.next();
                            name.push(quote);
                        }
                        Some(c) if c == quote => break,
                        Some(c) => name.push(c),
                        None => {
                            return Err(SqlError::invalid_ident(format!("unclosed quote in {s}")));
                        }
                    }
                }
                if name.is_empty() {
                    return Err(SqlError::invalid_ident("empty quoted identifier"));
                }
                parts.push(IdentPart::Quoted(name));
                continue;
            }

            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c == '.' {
                    break;
                }
                let valid = if name.is_empty() {
                    c == '_' || c.is_ascii_alphabetic()
                } else {
                    c == '_' || c == '$' || c.is_ascii_alphanumeric()
                };
                if !valid {
                    return Err(SqlError::invalid_ident(format!(
                        "invalid character '{c}' in {s}"
                    )));
                }
                name.push(c);
                chars.next();
            }
            if name.is_empty() {
                return Err(SqlError::invalid_ident(format!("empty segment in {s}")));
            }
            parts.push(IdentPart::Unquoted(name));
        }

        Ok(Self { parts })
    }

    /// The parsed parts.
    pub fn parts(&self) -> &[IdentPart] {
        &self.parts
    }

    /// Write the identifier using `quote` for quoted parts.
    pub fn write_sql(&self, quote: char, out: &mut String) {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            match part {
                IdentPart::Unquoted(s) => out.push_str(s),
                IdentPart::Quoted(s) => {
                    out.push(quote);
                    for ch in s.chars() {
                        if ch == quote {
                            out.push(quote);
                        }
                        out.push(ch);
                    }
                    out.push(quote);
                }
            }
        }
    }
}

impl Render for Ident {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        let mut out = String::new();
        self.write_sql(ctx.dialect().config().quote.as_char(), &mut out);
        Ok(out)
    }
}
