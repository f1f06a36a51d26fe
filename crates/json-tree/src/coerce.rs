//! Lifting native scalars into the value tree.
//!
//! Integers, booleans and strings lift infallibly via `From`. Floats lift
//! via `TryFrom` through their shortest decimal string form — a non-finite
//! float has no JSON representation and fails with a [`CoercionError`].
//! The reverse direction is deliberately left to the typed accessors on
//! [`Value`] rather than a generic unwrap.

use crate::error::CoercionError;
use crate::number::JsonNumber;
use crate::value::Value;

impl From<JsonNumber> for Value {
    fn from(n: JsonNumber) -> Value {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Value {
        Value::Number(JsonNumber::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Value {
        Value::Number(JsonNumber::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Value {
        Value::Number(JsonNumber::from(v))
    }
}

impl TryFrom<f64> for Value {
    type Error = CoercionError;

    fn try_from(v: f64) -> Result<Value, CoercionError> {
        JsonNumber::try_from(v).map(Value::Number)
    }
}

impl TryFrom<f32> for Value {
    type Error = CoercionError;

    fn try_from(v: f32) -> Result<Value, CoercionError> {
        JsonNumber::try_from(v).map(Value::Number)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::Array(items)
    }
}

/// `None` lifts to `Null` — not `Undefined`, which is reserved for failed
/// navigation.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Value {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
