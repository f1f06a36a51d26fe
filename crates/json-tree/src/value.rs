//! [`Value`] — the immutable value tree for one JSON document.
//!
//! A closed tagged union: every consumer pattern-matches exhaustively, so a
//! "wrong variant" is a compile-visible case rather than a silent null.
//! Navigation and the typed accessors are total — a miss returns
//! [`Value::Undefined`] or `None`, never an error.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::number::JsonNumber;

/// One node of a JSON document tree.
///
/// `Undefined` is the "no such field" marker produced by failed navigation;
/// it is never produced by decoding and encodes as `null` on the wire.
#[derive(Debug, Clone)]
pub enum Value {
    /// JSON `null`.
    Null,
    /// Absent-field marker; distinct from `Null`.
    Undefined,
    /// `true` / `false`.
    Bool(bool),
    /// Numeric value at exact decimal precision.
    Number(JsonNumber),
    /// String value.
    Str(String),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// Insertion-ordered fields with unique keys.
    Object(Vec<(String, Value)>),
}

/// The runtime shape of a [`Value`], used at the binding boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Undefined,
    Bool,
    Number,
    Str,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Undefined => "undefined",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::Str => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}

const UNDEFINED: Value = Value::Undefined;

impl Value {
    /// The runtime shape of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Undefined => ValueKind::Undefined,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::Str(_) => ValueKind::Str,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Build an object from key/value pairs, preserving insertion order.
    /// A repeated key keeps its original position and takes the last value.
    pub fn object<K, I>(pairs: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut fields: Vec<(String, Value)> = Vec::new();
        for (key, value) in pairs {
            insert_field(&mut fields, key.into(), value);
        }
        Value::Object(fields)
    }

    /// Build an array from a sequence of values.
    pub fn array<I: IntoIterator<Item = Value>>(items: I) -> Value {
        Value::Array(items.into_iter().collect())
    }

    /// Look up a field by name. Returns [`Value::Undefined`] unless this is
    /// an object containing `name` — never an error, so field chains through
    /// missing or wrong-shaped paths are always safe:
    ///
    /// ```
    /// use json_tree::Value;
    /// let v = Value::object([("a", Value::Bool(true))]);
    /// assert!(v.get("a").get("nope").get("deeper").is_undefined());
    /// ```
    pub fn get(&self, name: &str) -> &Value {
        match self {
            Value::Object(fields) => fields
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value)
                .unwrap_or(&UNDEFINED),
            _ => &UNDEFINED,
        }
    }

    /// Look up an array element by position. Returns [`Value::Undefined`]
    /// out of range or on non-arrays.
    pub fn index(&self, i: usize) -> &Value {
        match self {
            Value::Array(items) => items.get(i).unwrap_or(&UNDEFINED),
            _ => &UNDEFINED,
        }
    }

    /// Object fields in insertion order; empty for every other variant.
    pub fn entries(&self) -> &[(String, Value)] {
        match self {
            Value::Object(fields) => fields,
            _ => &[],
        }
    }

    /// Number of items [`Value::iter`] yields: element count for arrays,
    /// field count for objects, one for everything else.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(fields) => fields.len(),
            _ => 1,
        }
    }

    /// True only for empty arrays and empty objects.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// String slice if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Native boolean if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The exact decimal number if this is a number.
    pub fn as_number(&self) -> Option<&JsonNumber> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.as_number().and_then(JsonNumber::as_i32)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(JsonNumber::as_i64)
    }

    pub fn as_f32(&self) -> Option<f32> {
        self.as_number().and_then(JsonNumber::as_f32)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(JsonNumber::as_f64)
    }

    /// Iterate this value as a sequence: array elements in order, object
    /// values in insertion order (keys are not exposed through this view),
    /// and exactly one item — the value itself — for every other variant.
    ///
    /// The singleton view is a deliberate contract: uniform iteration code
    /// works whether a field is a scalar or a collection.
    pub fn iter(&self) -> ValueIter<'_> {
        match self {
            Value::Array(items) => ValueIter::Elements(items.iter()),
            Value::Object(fields) => ValueIter::Fields(fields.iter()),
            other => ValueIter::Singleton(Some(other)),
        }
    }
}

/// Insert preserving first-insertion position, last-write-wins on the value.
pub(crate) fn insert_field(fields: &mut Vec<(String, Value)>, key: String, value: Value) {
    match fields.iter_mut().find(|(existing, _)| *existing == key) {
        Some(slot) => slot.1 = value,
        None => fields.push((key, value)),
    }
}

/// Iterator over the sequence view of a [`Value`]. See [`Value::iter`].
pub enum ValueIter<'a> {
    Elements(std::slice::Iter<'a, Value>),
    Fields(std::slice::Iter<'a, (String, Value)>),
    Singleton(Option<&'a Value>),
}

impl<'a> Iterator for ValueIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<&'a Value> {
        match self {
            ValueIter::Elements(it) => it.next(),
            ValueIter::Fields(it) => it.next().map(|(_, value)| value),
            ValueIter::Singleton(slot) => slot.take(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            ValueIter::Elements(it) => it.size_hint(),
            ValueIter::Fields(it) => it.size_hint(),
            ValueIter::Singleton(slot) => {
                let n = if slot.is_some() { 1 } else { 0 };
                (n, Some(n))
            }
        }
    }
}

impl<'a> IntoIterator for &'a Value {
    type Item = &'a Value;
    type IntoIter = ValueIter<'a>;

    fn into_iter(self) -> ValueIter<'a> {
        self.iter()
    }
}

/// Structural equality. Objects compare as unordered key/value sets even
/// though iteration order is preserved, mirroring ordinary JSON semantics.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Undefined, Value::Undefined) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.iter().any(|(other_key, other_value)| {
                            key == other_key && value == other_value
                        })
                    })
            }
            _ => false,
        }
    }
}

impl Eq for Value {}

/// Hashing consistent with the unordered object equality above: object
/// entries are hashed in key-sorted order. Keys are unique per instance, so
/// the sorted order is canonical.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => state.write_u8(0),
            Value::Undefined => state.write_u8(1),
            Value::Bool(b) => {
                state.write_u8(2);
                b.hash(state);
            }
            Value::Number(n) => {
                state.write_u8(3);
                n.hash(state);
            }
            Value::Str(s) => {
                state.write_u8(4);
                s.hash(state);
            }
            Value::Array(items) => {
                state.write_u8(5);
                state.write_usize(items.len());
                for item in items {
                    item.hash(state);
                }
            }
            Value::Object(fields) => {
                state.write_u8(6);
                state.write_usize(fields.len());
                let mut sorted: Vec<&(String, Value)> = fields.iter().collect();
                sorted.sort_by(|a, b| a.0.cmp(&b.0));
                for (key, value) in sorted {
                    key.hash(state);
                    value.hash(state);
                }
            }
        }
    }
}
