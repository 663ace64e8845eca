//! Tagged metadata values attached to trajectory states.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::XtfError;
use crate::tokens;

/// Kind tag for [`Value`], one per payload variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Boolean,
    Integer,
    Double,
    String,
    BooleanList,
    IntegerList,
    DoubleList,
    StringList,
}

impl ValueKind {
    /// Canonical lowercase token used in the `type` attribute of an `extra`
    /// element.
    pub fn token(&self) -> &'static str {
        match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::BooleanList => "booleanlist",
            ValueKind::IntegerList => "integerlist",
            ValueKind::DoubleList => "doublelist",
            ValueKind::StringList => "stringlist",
        }
    }

    /// Match a `type` attribute token, case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "boolean" => Some(ValueKind::Boolean),
            "integer" => Some(ValueKind::Integer),
            "double" => Some(ValueKind::Double),
            "string" => Some(ValueKind::String),
            "booleanlist" => Some(ValueKind::BooleanList),
            "integerlist" => Some(ValueKind::IntegerList),
            "doublelist" => Some(ValueKind::DoubleList),
            "stringlist" => Some(ValueKind::StringList),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A typed metadata value. Exactly one payload is ever populated;
/// constructing a fresh `Value` is the only way to change variant or
/// payload, so no stale data can survive from a prior variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    BooleanList(Vec<bool>),
    IntegerList(Vec<i64>),
    DoubleList(Vec<f64>),
    StringList(Vec<String>),
}

impl Value {
    /// Return the kind tag of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::BooleanList(_) => ValueKind::BooleanList,
            Value::IntegerList(_) => ValueKind::IntegerList,
            Value::DoubleList(_) => ValueKind::DoubleList,
            Value::StringList(_) => ValueKind::StringList,
        }
    }

    /// Canonical lowercase token for the stored variant.
    pub fn type_token(&self) -> &'static str {
        self.kind().token()
    }

    /// Canonical rendered form used in the `value` attribute: `true`/`false`
    /// for booleans, comma-joined trimmed tokens for lists.
    pub fn rendered(&self) -> String {
        match self {
            Value::Boolean(b) => tokens::render_bool(*b).to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Double(d) => d.to_string(),
            Value::String(s) => s.clone(),
            Value::BooleanList(items) => {
                tokens::join(items.iter().map(|b| tokens::render_bool(*b)))
            }
            Value::IntegerList(items) => tokens::join(items.iter()),
            Value::DoubleList(items) => tokens::join(items.iter()),
            Value::StringList(items) => tokens::join(items.iter()),
        }
    }

    pub fn as_boolean(&self) -> Result<bool, XtfError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            other => Err(other.mismatch(ValueKind::Boolean)),
        }
    }

    pub fn as_integer(&self) -> Result<i64, XtfError> {
        match self {
            Value::Integer(i) => Ok(*i),
            other => Err(other.mismatch(ValueKind::Integer)),
        }
    }

    pub fn as_double(&self) -> Result<f64, XtfError> {
        match self {
            Value::Double(d) => Ok(*d),
            other => Err(other.mismatch(ValueKind::Double)),
        }
    }

    pub fn as_string(&self) -> Result<&str, XtfError> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch(ValueKind::String)),
        }
    }

    pub fn as_boolean_list(&self) -> Result<&[bool], XtfError> {
        match self {
            Value::BooleanList(items) => Ok(items),
            other => Err(other.mismatch(ValueKind::BooleanList)),
        }
    }

    pub fn as_integer_list(&self) -> Result<&[i64], XtfError> {
        match self {
            Value::IntegerList(items) => Ok(items),
            other => Err(other.mismatch(ValueKind::IntegerList)),
        }
    }

    pub fn as_double_list(&self) -> Result<&[f64], XtfError> {
        match self {
            Value::DoubleList(items) => Ok(items),
            other => Err(other.mismatch(ValueKind::DoubleList)),
        }
    }

    pub fn as_string_list(&self) -> Result<&[String], XtfError> {
        match self {
            Value::StringList(items) => Ok(items),
            other => Err(other.mismatch(ValueKind::StringList)),
        }
    }

    fn mismatch(&self, expected: ValueKind) -> XtfError {
        XtfError::TypeMismatch {
            expected,
            actual: self.kind(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type: {} value: {}", self.type_token(), self.rendered())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<bool>> for Value {
    fn from(value: Vec<bool>) -> Self {
        Value::BooleanList(value)
    }
}

impl From<Vec<i64>> for Value {
    fn from(value: Vec<i64>) -> Self {
        Value::IntegerList(value)
    }
}

impl From<Vec<f64>> for Value {
    fn from(value: Vec<f64>) -> Self {
        Value::DoubleList(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::StringList(value)
    }
}
