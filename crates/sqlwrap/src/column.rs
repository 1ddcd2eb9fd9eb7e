//! Declarative column descriptors.

use crate::error::SqlWrapResult;
use crate::ident;

/// One declared table column: name, storage type and raw constraint fragments.
///
/// ```
/// use sqlwrap::Column;
///
/// let email = Column::new("email", "TEXT").modifier("NOT NULL").modifier("UNIQUE");
/// assert_eq!(email.definition_sql().unwrap(), "email TEXT NOT NULL UNIQUE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub column_type: String,
    pub modifiers: Vec<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            modifiers: Vec::new(),
        }
    }

    /// Append a raw modifier such as `NOT NULL` or `DEFAULT 0`.
    pub fn modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers.extend(modifiers.into_iter().map(Into::into));
        self
    }

    /// Column definition as used by `ALTER TABLE ... ADD`.
    ///
    /// The name is validated; the type and modifiers are emitted verbatim.
    pub fn definition_sql(&self) -> SqlWrapResult<String> {
        let mut sql = format!("{} {}", ident::quote(&self.name)?, self.column_type);
        for modifier in &self.modifiers {
            sql.push(' ');
            sql.push_str(modifier);
        }
        Ok(sql)
    }
}
