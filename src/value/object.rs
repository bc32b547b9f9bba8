use indexmap::IndexMap;

use super::Value;

/// The key/value index backing [`Value::Object`].
///
/// Members iterate in insertion order, so printing is reproducible for a
/// given build order. Keys are unique: inserting an existing key replaces its
/// value in place and keeps the key's original position.
///
/// Equality is structural and ignores member order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    members: IndexMap<String, Value>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Object {
            members: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts or overwrites a member, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.members.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.members.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.members.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.members.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.members.keys()
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[test]
fn test_insertion_order_is_kept() {
    let mut obj = Object::new();
    obj.insert("zeta", Value::Null);
    obj.insert("alpha", Value::Null);
    obj.insert("mid", Value::Null);
    obj.insert("zeta", Value::Bool(true));

    let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    assert_eq!(obj.get("zeta"), Some(&Value::Bool(true)));
}

#[test]
fn test_equality_ignores_order() {
    let a: Object = vec![
        ("x".to_string(), Value::Number(1.0)),
        ("y".to_string(), Value::Number(2.0)),
    ]
    .into_iter()
    .collect();
    let b: Object = vec![
        ("y".to_string(), Value::Number(2.0)),
        ("x".to_string(), Value::Number(1.0)),
    ]
    .into_iter()
    .collect();

    assert_eq!(a, b);
    assert!(a.contains_key("x"));
    assert!(!a.contains_key("z"));
}
