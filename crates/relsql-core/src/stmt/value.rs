use serde::{Deserialize, Serialize};

/// A single parameter or column value exchanged with the database.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Double precision float
    F64(f64),

    /// Signed 64-bit integer
    I64(i64),

    /// Structured document, stored in a JSONB column
    Json(serde_json::Value),

    /// A finite list of values, used by membership filters
    List(Vec<Value>),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Treats the value as a list, wrapping scalars in a single-element list.
    pub fn into_list(self) -> Vec<Value> {
        match self {
            Self::List(items) => items,
            Self::Json(serde_json::Value::Array(items)) => {
                items.into_iter().map(Value::from).collect()
            }
            value => vec![value],
        }
    }

    /// The first element of a list, or the value itself for scalars.
    ///
    /// Used to infer a cast when a nested path is compared against a list.
    pub fn sample(&self) -> &Value {
        match self {
            Self::List(items) => items.first().unwrap_or(&Value::Null),
            value => value,
        }
    }

    /// Renders the value as a JSON document.
    pub fn to_json(&self) -> serde_json::Value {
        self.clone().into()
    }

    /// Coerces the value into a document suitable for a JSONB column.
    pub fn into_json(self) -> Value {
        match self {
            Self::Null => Self::Null,
            Self::Json(value) => Self::Json(value),
            value => Self::Json(value.into()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(v) => Value::Bool(v),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(v) => Value::I64(v),
                None => Value::F64(number.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(v) => Value::String(v),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            value @ serde_json::Value::Object(_) => Value::Json(value),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(v) => serde_json::Value::Bool(v),
            Value::I64(v) => serde_json::Value::from(v),
            Value::F64(v) => serde_json::Number::from_f64(v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(v) => serde_json::Value::String(v),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Json(v) => v,
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<u64> for Value {
    fn from(src: u64) -> Self {
        Self::I64(src as i64)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(src: Vec<T>) -> Self {
        Self::List(src.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(src: [T; N]) -> Self {
        Self::List(src.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
