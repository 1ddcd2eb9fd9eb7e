//! Safe SQL identifier handling.
//!
//! Table and column names are spliced into statement text because SQLite only
//! binds values, never identifiers. [`Ident`] validates a name before that
//! happens. It supports dotted notation (`new_db.people`) and both quoting
//! styles SQLite accepts:
//!
//! - Unquoted parts are validated against: `[A-Za-z_][A-Za-z0-9_]*`
//! - Bracketed parts (`[order]`) allow anything except `]` and NUL
//! - Double-quoted parts (`"Order Items"`) allow anything except NUL and escape `"` as `""`
//!
//! # Example
//! ```
//! use sqlwrap::Ident;
//!
//! let t = Ident::parse("[order]")?;
//! assert_eq!(t.to_sql(), "[order]");
//! assert_eq!(t.name(), "order");
//! # Ok::<(), sqlwrap::SqlWrapError>(())
//! ```

use crate::error::{SqlWrapError, SqlWrapResult};

/// A part of a SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentPart {
    /// Unquoted identifier: must match `[A-Za-z_][A-Za-z0-9_]*`.
    Unquoted(String),
    /// Bracket-quoted identifier, e.g. `[order]`.
    Bracketed(String),
    /// Double-quoted identifier, e.g. `"Order Items"`.
    Quoted(String),
}

impl IdentPart {
    /// The raw name without any quoting.
    pub fn name(&self) -> &str {
        match self {
            IdentPart::Unquoted(s) | IdentPart::Bracketed(s) | IdentPart::Quoted(s) => s,
        }
    }
}

/// A SQL identifier (column, table, or schema-qualified table name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub parts: Vec<IdentPart>,
}

impl Ident {
    /// Parse an identifier string, supporting dotted and quoted forms.
    ///
    /// - Dotted: `new_db.people`
    /// - Bracketed: `[order]`
    /// - Quoted: `"Order Items"`
    pub fn parse(s: &str) -> SqlWrapResult<Self> {
        if s.is_empty() {
            return Err(SqlWrapError::validation("Identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(SqlWrapError::validation(
                "Identifier cannot contain NUL character",
            ));
        }

        let mut parts = Vec::new();
        let mut chars = s.chars().peekable();

        while chars.peek().is_some() {
            // Consume '.' between parts (but require there is a next part).
            if !parts.is_empty() {
                match chars.next() {
                    Some('.') => {
                        if chars.peek().is_none() {
                            return Err(SqlWrapError::validation("Trailing '.' in identifier"));
                        }
                    }
                    Some(c) => {
                        return Err(SqlWrapError::validation(format!(
                            "Expected '.' between identifier parts, got '{c}'"
                        )));
                    }
                    None => break,
                }
            }

            match chars.peek() {
                Some('"') => {
                    chars.next();
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('"') => {
                                // Escaped quote: ""
                                if chars.peek() == Some(&'"') {
                                    chars.next();
                                    name.push('"');
                                } else {
                                    break;
                                }
                            }
                            Some(c) => name.push(c),
                            None => {
                                return Err(SqlWrapError::validation(
                                    "Unclosed quoted identifier",
                                ));
                            }
                        }
                    }
                    if name.is_empty() {
                        return Err(SqlWrapError::validation("Empty quoted identifier"));
                    }
                    parts.push(IdentPart::Quoted(name));
                    continue;
                }
                Some('[') => {
                    chars.next();
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(c) => name.push(c),
                            None => {
                                return Err(SqlWrapError::validation(
                                    "Unclosed bracketed identifier",
                                ));
                            }
                        }
                    }
                    if name.is_empty() {
                        return Err(SqlWrapError::validation("Empty bracketed identifier"));
                    }
                    parts.push(IdentPart::Bracketed(name));
                    continue;
                }
                _ => {}
            }

            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c == '.' {
                    break;
                }
                let valid = if name.is_empty() {
                    c == '_' || c.is_ascii_alphabetic()
                } else {
                    c == '_' || c.is_ascii_alphanumeric()
                };
                if !valid {
                    return Err(SqlWrapError::validation(if name.is_empty() {
                        format!("Invalid identifier start character: '{c}'")
                    } else {
                        format!("Invalid character in identifier: '{c}'")
                    }));
                }
                name.push(c);
                chars.next();
            }
            if name.is_empty() {
                return Err(SqlWrapError::validation("Empty identifier segment"));
            }
            parts.push(IdentPart::Unquoted(name));
        }

        if parts.is_empty() {
            return Err(SqlWrapError::validation("Empty identifier"));
        }

        Ok(Self { parts })
    }

    /// The unquoted name of the last part (the table or column itself).
    ///
    /// This is what `pragma_table_info` expects.
    pub fn name(&self) -> &str {
        self.parts.last().map(IdentPart::name).unwrap_or_default()
    }

    /// Render the identifier as SQL, keeping the caller's quoting style.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            match part {
                IdentPart::Unquoted(s) => out.push_str(s),
                IdentPart::Bracketed(s) => {
                    out.push('[');
                    out.push_str(s);
                    out.push(']');
                }
                IdentPart::Quoted(s) => {
                    out.push('"');
                    for ch in s.chars() {
                        if ch == '"' {
                            out.push_str("\"\"");
                        } else {
                            out.push(ch);
                        }
                    }
                    out.push('"');
                }
            }
        }
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Validate and render a name in one step.
pub(crate) fn quote(name: &str) -> SqlWrapResult<String> {
    Ident::parse(name).map(|ident| ident.to_sql())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_simple() {
        let ident = Ident::parse("people").unwrap();
        assert_eq!(ident.to_sql(), "people");
        assert_eq!(ident.name(), "people");
    }

    #[test]
    fn ident_dotted() {
        let ident = Ident::parse("new_db.people").unwrap();
        assert_eq!(ident.to_sql(), "new_db.people");
        assert_eq!(ident.name(), "people");
    }

    #[test]
    fn ident_bracketed() {
        let ident = Ident::parse("[order]").unwrap();
        assert_eq!(ident.to_sql(), "[order]");
        assert_eq!(ident.name(), "order");
    }

    #[test]
    fn ident_bracketed_allows_spaces() {
        let ident = Ident::parse("[order items]").unwrap();
        assert_eq!(ident.name(), "order items");
    }

    #[test]
    fn ident_quoted_with_escape() {
        let ident = Ident::parse(r#""has""quote""#).unwrap();
        assert_eq!(ident.to_sql(), r#""has""quote""#);
        assert_eq!(ident.name(), r#"has"quote"#);
    }

    #[test]
    fn ident_rejects_empty() {
        assert!(Ident::parse("").is_err());
        assert!(Ident::parse("[]").is_err());
    }

    #[test]
    fn ident_rejects_start_digit() {
        assert!(Ident::parse("1table").is_err());
    }

    #[test]
    fn ident_rejects_injection() {
        assert!(Ident::parse("people; DROP TABLE people").is_err());
        assert!(Ident::parse("name = 1 OR 1").is_err());
    }

    #[test]
    fn ident_rejects_dollar() {
        assert!(Ident::parse("my_var$1").is_err());
    }

    #[test]
    fn ident_rejects_double_dot() {
        assert!(Ident::parse("schema..table").is_err());
    }

    #[test]
    fn ident_rejects_trailing_dot() {
        assert!(Ident::parse("schema.").is_err());
    }

    #[test]
    fn ident_rejects_unclosed_bracket() {
        assert!(Ident::parse("[unclosed").is_err());
    }
}
