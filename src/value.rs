mod object;

pub use object::Object;

use crate::evaluator::QueryError;

/// A JSON value as seen by the query evaluator.
///
/// Every JSON number is stored as an `f64`; there is no separate integer
/// case. Composite variants own their children exclusively, so dropping a
/// value releases the whole tree and cloning it produces a deep copy that
/// shares nothing with the source.
///
/// # Examples
///
/// ```
/// use jqlite::Value;
///
/// let mut post = Value::object();
/// post.insert("title", "Hello").unwrap();
/// post.insert("likes", 12.0).unwrap();
///
/// let mut posts = Value::array();
/// posts.push(post).unwrap();
///
/// assert_eq!(posts.type_name(), "array");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Bool(bool),

    /// Any JSON number, integral or not
    Number(f64),

    /// UTF-8 string
    String(String),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// Insertion-ordered mapping from unique keys to values
    Object(Object),
}

impl Value {
    /// Creates an empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Creates an empty object.
    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    /// Appends an element to the end of an array.
    ///
    /// Fails with [`QueryError::TypeMismatch`] when `self` is not an array.
    pub fn push(&mut self, element: impl Into<Value>) -> Result<(), QueryError> {
        match self {
            Value::Array(items) => {
                items.push(element.into());
                Ok(())
            }
            other => Err(QueryError::type_mismatch("append element", "array", other)),
        }
    }

    /// Inserts a member into an object, overwriting any previous value stored
    /// under the same key. Returns the replaced value, if there was one.
    ///
    /// Fails with [`QueryError::TypeMismatch`] when `self` is not an object.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, QueryError> {
        match self {
            Value::Object(members) => Ok(members.insert(key, value.into())),
            other => Err(QueryError::type_mismatch("insert member", "object", other)),
        }
    }

    /// Looks up an object member by key.
    ///
    /// Returns `None` both for absent keys and for non-object values; a member
    /// whose value is `null` is returned as `Some(&Value::Null)`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(members) => members.get(key),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a human-readable type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(members: Object) -> Self {
        Value::Object(members)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_call_order() {
        let mut arr = Value::array();
        arr.push(1).unwrap();
        arr.push("two").unwrap();
        arr.push(Value::Null).unwrap();

        assert_eq!(
            arr,
            Value::Array(vec![Value::Number(1.0), Value::from("two"), Value::Null])
        );
    }

    #[test]
    fn push_on_object_is_type_mismatch() {
        let mut obj = Value::object();
        let err = obj.push(1).unwrap_err();
        assert!(matches!(err, QueryError::TypeMismatch { actual: "object", .. }));
    }

    #[test]
    fn insert_overwrites_duplicate_key() {
        let mut obj = Value::object();
        assert_eq!(obj.insert("a", 1).unwrap(), None);
        assert_eq!(obj.insert("a", 2).unwrap(), Some(Value::Number(1.0)));

        assert_eq!(obj.get("a"), Some(&Value::Number(2.0)));
        assert_eq!(obj.as_object().unwrap().len(), 1);
    }

    #[test]
    fn get_distinguishes_absent_from_null() {
        let mut obj = Value::object();
        obj.insert("present", Value::Null).unwrap();

        assert_eq!(obj.get("present"), Some(&Value::Null));
        assert_eq!(obj.get("missing"), None);
        assert_eq!(Value::Number(1.0).get("present"), None);
    }

    #[test]
    fn clone_is_independent() {
        let mut original = Value::object();
        original.insert("items", Value::from(vec![Value::from(1)])).unwrap();

        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.insert("items", Value::Null).unwrap();
        assert_eq!(
            original.get("items"),
            Some(&Value::Array(vec![Value::Number(1.0)]))
        );
        drop(original);
        assert_eq!(copy.get("items"), Some(&Value::Null));
    }
}
