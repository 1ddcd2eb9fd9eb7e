//! Primary-key arguments.
//!
//! A bare scalar becomes a one-element key, so `table.get_with(1)` and
//! `table.get_with((1, 2))` both work. Arity is checked against the table's
//! declared key columns before any statement runs.

use crate::error::{SqlWrapError, SqlWrapResult};
use crate::value::Value;

/// An ordered list of primary-key values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Key(Vec<Value>);

impl Key {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Check the key against the declared key columns and pair them up.
    pub(crate) fn zip_columns<'a>(
        &'a self,
        columns: &'a [String],
    ) -> SqlWrapResult<impl Iterator<Item = (&'a str, &'a Value)>> {
        if self.0.len() != columns.len() {
            return Err(SqlWrapError::KeyArity {
                expected: columns.len(),
                got: self.0.len(),
            });
        }
        Ok(columns.iter().map(String::as_str).zip(self.0.iter()))
    }
}

macro_rules! impl_scalar_key {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(v: $t) -> Self {
                    Key(vec![Value::from(v)])
                }
            }
        )*
    };
}

impl_scalar_key!(i8, i16, i32, i64, u8, u16, u32, String, &str, Value);

impl<V: Into<Value>> From<Vec<V>> for Key {
    fn from(v: Vec<V>) -> Self {
        Key(v.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>, const N: usize> From<[V; N]> for Key {
    fn from(v: [V; N]) -> Self {
        Key(v.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Key {
    fn from((a, b): (A, B)) -> Self {
        Key(vec![a.into(), b.into()])
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> From<(A, B, C)> for Key {
    fn from((a, b, c): (A, B, C)) -> Self {
        Key(vec![a.into(), b.into(), c.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn scalar_normalizes_to_single_value() {
        let key = Key::from(7);
        assert_eq!(key.values(), &[Value::Integer(7)]);
    }

    #[test]
    fn tuple_and_array_keys() {
        assert_eq!(Key::from((1, 2)).len(), 2);
        assert_eq!(Key::from([1, 2, 3]).len(), 3);
        assert_eq!(Key::from(vec![4i64]).len(), 1);
    }

    #[test]
    fn zip_columns_checks_arity() {
        let columns = cols(&["user_id", "group_id"]);
        let err = Key::from(1).zip_columns(&columns).err().unwrap();
        assert!(matches!(err, SqlWrapError::KeyArity { expected: 2, got: 1 }));

        let key = Key::from((1, 2));
        let pairs: Vec<(&str, &Value)> = key.zip_columns(&columns).unwrap().collect();
        assert_eq!(
            pairs,
            vec![("user_id", &Value::Integer(1)), ("group_id", &Value::Integer(2))]
        );
    }
}
