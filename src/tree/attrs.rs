use indexmap::IndexMap;

/// A named attribute value (§3): either a string (e.g. `"builtin" ->
/// "delayed"`) or an integer flag (e.g. `"static" -> 1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Str(String),
    Int(i64),
}

/// The per-node attribute bag. Backed by an `IndexMap` rather than a
/// `HashMap` so that debug-printing a node and iterating its attributes is
/// deterministic and matches declaration order.
#[derive(Debug, Clone, Default)]
pub struct AttrBag {
    values: IndexMap<String, AttrValue>,
}

impl AttrBag {
    pub fn set_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), AttrValue::Str(value.into()));
    }

    pub fn set_int(&mut self, key: impl Into<String>, value: i64) {
        self.values.insert(key.into(), AttrValue::Int(value));
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(AttrValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(AttrValue::Int(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}
