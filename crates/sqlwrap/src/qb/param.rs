//! Positional parameter storage for rendered statements.

use crate::value::Value;

/// Parameters in the order their `?` placeholders appear.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamList {
    params: Vec<Value>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a parameter and return its 1-based index.
    pub fn push(&mut self, value: impl Into<Value>) -> usize {
        self.params.push(value.into());
        self.params.len()
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.params
    }

    /// Extend this list with values from an iterator.
    pub fn extend(&mut self, values: impl IntoIterator<Item = Value>) {
        self.params.extend(values);
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_one_based_index() {
        let mut params = ParamList::new();
        assert_eq!(params.push(1), 1);
        assert_eq!(params.push("a"), 2);
        assert_eq!(params.as_slice(), &[Value::Integer(1), Value::Text("a".into())]);
    }
}
