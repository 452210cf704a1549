//! Runtime values produced by evaluation.

use std::fmt;

use crate::decimal::Decimal;

/// A runtime value.
///
/// There is no boolean type: logical results are the decimals 1 and 0, and
/// [`Value::is_truthy`] is the single conversion rule back to `bool`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// An exact decimal number
    Number(Decimal),
    /// A string value
    Str(String),
}

impl Value {
    pub fn from_bool(b: bool) -> Value {
        Value::Number(Decimal::from_bool(b))
    }

    /// Nonzero numbers are true. Strings are true unless empty, `"0"` or
    /// `"false"` (any case).
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => !n.is_zero(),
            Value::Str(s) => !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false")),
        }
    }

    pub fn as_number(&self) -> Option<&Decimal> {
        match self {
            Value::Number(n) => Some(n),
            Value::Str(_) => None,
        }
    }

    /// Name of the runtime type, used in parameter errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Number(d)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_is_centralized() {
        assert!(Value::from(1).is_truthy());
        assert!(Value::Number("-0.5".parse().unwrap()).is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(!Value::Number("0.00".parse().unwrap()).is_truthy());
        assert!(Value::from("yes").is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::from("FALSE").is_truthy());
    }

    #[test]
    fn booleans_are_decimals() {
        assert_eq!(Value::from_bool(true), Value::from(1));
        assert_eq!(Value::from_bool(false), Value::from(0));
    }
}
