//! [`JsonNumber`] — a JSON number held as its exact decimal literal.
//!
//! The literal text is the source of truth: decoding
//! `123456789012345678901234567890.5` and re-encoding it reproduces every
//! digit, with no binary-float round trip in between. Native views are
//! derived on demand and return `None` when the conversion does not fit.

use std::fmt;

use crate::error::CoercionError;

/// A JSON numeric value, stored as its validated literal text.
///
/// Equality and hashing compare the literal, so `1` and `1.0` are distinct
/// values (scale-sensitive, like decimal equality).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonNumber {
    literal: String,
}

impl JsonNumber {
    /// Parse a JSON numeric literal. Returns `None` unless `literal` is a
    /// complete, valid JSON number (no leading zeros, no trailing garbage).
    pub fn from_literal(literal: &str) -> Option<JsonNumber> {
        if is_valid_literal(literal.as_bytes()) {
            Some(JsonNumber {
                literal: literal.to_string(),
            })
        } else {
            None
        }
    }

    /// The exact literal text this number was constructed with.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Whether the literal is in integer form (no fraction, no exponent).
    pub fn is_integer(&self) -> bool {
        !self
            .literal
            .bytes()
            .any(|b| b == b'.' || b == b'e' || b == b'E')
    }

    /// Narrow to `i64`. Fractions truncate toward zero; `None` when the
    /// value is out of range.
    pub fn as_i64(&self) -> Option<i64> {
        if self.is_integer() {
            return self.literal.parse::<i64>().ok();
        }
        let f = self.literal.parse::<f64>().ok()?;
        if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
            Some(f.trunc() as i64)
        } else {
            None
        }
    }

    /// Narrow to `i32`. Same truncation rules as [`JsonNumber::as_i64`].
    pub fn as_i32(&self) -> Option<i32> {
        self.as_i64().and_then(|i| i32::try_from(i).ok())
    }

    /// Widen to `f64`. Precision beyond what `f64` holds is lost; values
    /// past its range saturate to infinity.
    pub fn as_f64(&self) -> Option<f64> {
        self.literal.parse::<f64>().ok()
    }

    /// Widen to `f32`.
    pub fn as_f32(&self) -> Option<f32> {
        self.literal.parse::<f32>().ok()
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

impl From<i32> for JsonNumber {
    fn from(v: i32) -> Self {
        JsonNumber {
            literal: v.to_string(),
        }
    }
}

impl From<i64> for JsonNumber {
    fn from(v: i64) -> Self {
        JsonNumber {
            literal: v.to_string(),
        }
    }
}

impl From<u64> for JsonNumber {
    fn from(v: u64) -> Self {
        JsonNumber {
            literal: v.to_string(),
        }
    }
}

impl TryFrom<f64> for JsonNumber {
    type Error = CoercionError;

    /// Lift a float through its shortest round-trip decimal form. Non-finite
    /// values have no JSON representation and fail with a `CoercionError`.
    fn try_from(v: f64) -> Result<Self, CoercionError> {
        if !v.is_finite() {
            return Err(CoercionError::non_finite("f64", v));
        }
        Ok(JsonNumber {
            literal: format!("{}", v),
        })
    }
}

impl TryFrom<f32> for JsonNumber {
    type Error = CoercionError;

    fn try_from(v: f32) -> Result<Self, CoercionError> {
        if !v.is_finite() {
            return Err(CoercionError::non_finite("f32", f64::from(v)));
        }
        Ok(JsonNumber {
            literal: format!("{}", v),
        })
    }
}

/// Validate a complete JSON numeric literal:
/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
fn is_valid_literal(bytes: &[u8]) -> bool {
    let mut x = 0;
    let len = bytes.len();
    if x < len && bytes[x] == b'-' {
        x += 1;
    }
    // Integer part: a lone zero or a non-zero digit run.
    match bytes.get(x) {
        Some(b'0') => x += 1,
        Some(b'1'..=b'9') => {
            while x < len && bytes[x].is_ascii_digit() {
                x += 1;
            }
        }
        _ => return false,
    }
    if x < len && bytes[x] == b'.' {
        x += 1;
        let start = x;
        while x < len && bytes[x].is_ascii_digit() {
            x += 1;
        }
        if x == start {
            return false;
        }
    }
    if x < len && (bytes[x] == b'e' || bytes[x] == b'E') {
        x += 1;
        if x < len && (bytes[x] == b'+' || bytes[x] == b'-') {
            x += 1;
        }
        let start = x;
        while x < len && bytes[x].is_ascii_digit() {
            x += 1;
        }
        if x == start {
            return false;
        }
    }
    x == len
}
