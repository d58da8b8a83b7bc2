//! Bound parameter values.
//!
//! [`Value`] is the tagged type every bound parameter is converted into at the
//! API boundary. Rendering never inspects the payload: it only appends the
//! value to the render context and emits a placeholder.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A parameter value collected while rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
    /// Binary value
    Bytes(Vec<u8>),
    /// JSON document
    Json(serde_json::Value),
    /// UUID value
    Uuid(Uuid),
    /// UTC timestamp
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Create a binary value.
    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(value.into())
    }

    /// Serialize any `serde` value into a JSON parameter.
    pub fn json<T: Serialize>(value: &T) -> crate::SqlResult<Self> {
        Ok(Value::Json(serde_json::to_value(value)?))
    }

    /// Check if this is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short type name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Json(_) => "json",
            Value::Uuid(_) => "uuid",
            Value::Timestamp(_) => "timestamp",
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident as $conv:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(<$conv>::from(v))
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool as bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => Int as i64,
    u16 => Int as i64,
    u32 => Int as i64,
    f32 => Float as f64,
    f64 => Float as f64,
    String => Text as String,
    &str => Text as String,
    Uuid => Uuid as Uuid,
    DateTime<Utc> => Timestamp as DateTime<Utc>,
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::Text(s),
            other => Value::Json(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_convert_to_their_variant() {
        assert_eq!(Value::from(7i32), Value::Int(7));
        assert_eq!(Value::from(2.5f64), Value::Float(2.5));
        assert_eq!(Value::from("egg"), Value::Text("egg".into()));
        assert_eq!(Value::from(true), Value::Bool(true));
    }

    #[test]
    fn none_is_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(3i64)), Value::Int(3));
    }

    #[test]
    fn json_scalars_unwrap_and_containers_stay_json() {
        assert_eq!(Value::from(json!(3)), Value::Int(3));
        assert_eq!(Value::from(json!("oz")), Value::Text("oz".into()));
        assert_eq!(Value::from(json!(null)), Value::Null);
        assert_eq!(Value::from(json!([1, 2])), Value::Json(json!([1, 2])));
    }

    #[test]
    fn serializes_untagged() {
        let params = vec![Value::Int(1), Value::Text("flour".into()), Value::Null];
        let dumped = serde_json::to_string(&params).unwrap();
        assert_eq!(dumped, r#"[1,"flour",null]"#);
    }
}
