//! Conversion between the untyped decoder tree and [`JsonValue`].
//!
//! The untyped side is `serde_json::Value`, which is what a generic JSON
//! decoder produces. Casting recurses into every object value and array
//! element; the first failure aborts the whole cast, so no partially cast
//! tree is ever returned.
//!
//! Casting a [`JsonValue`] again is not part of this module's domain: the
//! input type is strictly the decoder output.
//!
//! This module also holds the narrowing conversions (`is_*`, `as_*`,
//! `into_*`) and the `force*` constructors used by tests and trusted code.

use crate::error::{AsValueError, CastError};
use crate::value::{Array, JsonValue, Object, Representation};
use serde_json::{Map, Number, Value};
use tracing::debug;

/// Convert an untyped decoded tree into a [`JsonValue`].
///
/// # Errors
///
/// Returns [`CastError::Unsupported`] if a number cannot be represented as
/// `f64` (possible only when `serde_json` carries arbitrary-precision
/// numbers).
pub fn cast(untyped: Value) -> Result<JsonValue, CastError> {
    match untyped {
        Value::Object(map) => cast_object(map).map(JsonValue::Object),
        Value::Array(list) => cast_array(list).map(JsonValue::Array),
        Value::String(string) => Ok(JsonValue::String(string)),
        Value::Number(number) => cast_number(&number).map(JsonValue::Number),
        Value::Bool(boolean) => Ok(JsonValue::Bool(boolean)),
        Value::Null => Ok(JsonValue::Null),
    }
}

pub fn cast_object(map: Map<String, Value>) -> Result<Object, CastError> {
    map.into_iter()
        .map(|(key, value)| cast(value).map(|value| (key, value)))
        .collect()
}

pub fn cast_array(list: Vec<Value>) -> Result<Array, CastError> {
    list.into_iter().map(cast).collect()
}

fn cast_number(number: &Number) -> Result<f64, CastError> {
    match number.as_f64() {
        Some(float) if float.is_finite() => Ok(float),
        _ => {
            debug!(number = %number, "number has no f64 representation");
            Err(CastError::Unsupported(format!("number {number}")))
        }
    }
}

/// Convert a [`JsonValue`] back into the untyped tree.
///
/// Integral numbers become integer `serde_json` numbers; non-finite numbers
/// become `null`, which is how JSON text would carry them anyway.
pub fn uncast(value: JsonValue) -> Value {
    match value {
        JsonValue::Object(object) => Value::Object(
            object
                .into_iter()
                .map(|(key, value)| (key, uncast(value)))
                .collect(),
        ),
        JsonValue::Array(array) => Value::Array(array.into_iter().map(uncast).collect()),
        JsonValue::String(string) => Value::String(string),
        JsonValue::Number(number) => {
            serde_json::to_value(JsonValue::Number(number)).unwrap_or(Value::Null)
        }
        JsonValue::Bool(boolean) => Value::Bool(boolean),
        JsonValue::Null => Value::Null,
    }
}

// ============================================================================
// Force family
// ============================================================================

/// Cast or panic. Only for trusted input such as test fixtures.
///
/// # Panics
///
/// Panics if `untyped` cannot be cast.
#[track_caller]
pub fn force(untyped: Value) -> JsonValue {
    match cast(untyped) {
        Ok(value) => value,
        Err(err) => panic!("force cast failed: {err}"),
    }
}

/// # Panics
///
/// Panics unless `untyped` casts to an object.
#[track_caller]
pub fn force_object(untyped: Value) -> Object {
    force(untyped).into_object().unwrap_or_else(|err| panic!("{err}"))
}

/// # Panics
///
/// Panics unless `untyped` casts to an array.
#[track_caller]
pub fn force_array(untyped: Value) -> Array {
    force(untyped).into_array().unwrap_or_else(|err| panic!("{err}"))
}

/// # Panics
///
/// Panics unless `untyped` casts to a string.
#[track_caller]
pub fn force_string(untyped: Value) -> String {
    force(untyped).into_string().unwrap_or_else(|err| panic!("{err}"))
}

/// # Panics
///
/// Panics unless `untyped` casts to a number.
#[track_caller]
pub fn force_number(untyped: Value) -> f64 {
    force(untyped).as_number().unwrap_or_else(|err| panic!("{err}"))
}

/// # Panics
///
/// Panics unless `untyped` casts to a bool.
#[track_caller]
pub fn force_bool(untyped: Value) -> bool {
    force(untyped).as_bool().unwrap_or_else(|err| panic!("{err}"))
}

/// # Panics
///
/// Panics unless `untyped` is `null`.
#[track_caller]
pub fn force_null(untyped: Value) {
    force(untyped).as_null().unwrap_or_else(|err| panic!("{err}"))
}

// ============================================================================
// Narrowing
// ============================================================================

impl JsonValue {
    fn mismatch(&self, expected: Representation) -> AsValueError {
        AsValueError {
            expected,
            actual: self.representation(),
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn as_object(&self) -> Result<&Object, AsValueError> {
        match self {
            JsonValue::Object(object) => Ok(object),
            other => Err(other.mismatch(Representation::Object)),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Object, AsValueError> {
        match self {
            JsonValue::Object(object) => Ok(object),
            other => Err(other.mismatch(Representation::Object)),
        }
    }

    pub fn into_object(self) -> Result<Object, AsValueError> {
        match self {
            JsonValue::Object(object) => Ok(object),
            other => Err(other.mismatch(Representation::Object)),
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn as_array(&self) -> Result<&Array, AsValueError> {
        match self {
            JsonValue::Array(array) => Ok(array),
            other => Err(other.mismatch(Representation::Array)),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Array, AsValueError> {
        match self {
            JsonValue::Array(array) => Ok(array),
            other => Err(other.mismatch(Representation::Array)),
        }
    }

    pub fn into_array(self) -> Result<Array, AsValueError> {
        match self {
            JsonValue::Array(array) => Ok(array),
            other => Err(other.mismatch(Representation::Array)),
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    pub fn as_string(&self) -> Result<&str, AsValueError> {
        match self {
            JsonValue::String(string) => Ok(string),
            other => Err(other.mismatch(Representation::String)),
        }
    }

    pub fn as_string_mut(&mut self) -> Result<&mut String, AsValueError> {
        match self {
            JsonValue::String(string) => Ok(string),
            other => Err(other.mismatch(Representation::String)),
        }
    }

    pub fn into_string(self) -> Result<String, AsValueError> {
        match self {
            JsonValue::String(string) => Ok(string),
            other => Err(other.mismatch(Representation::String)),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    pub fn as_number(&self) -> Result<f64, AsValueError> {
        match self {
            JsonValue::Number(number) => Ok(*number),
            other => Err(other.mismatch(Representation::Number)),
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, JsonValue::Bool(_))
    }

    pub fn as_bool(&self) -> Result<bool, AsValueError> {
        match self {
            JsonValue::Bool(boolean) => Ok(*boolean),
            other => Err(other.mismatch(Representation::Bool)),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_null(&self) -> Result<(), AsValueError> {
        match self {
            JsonValue::Null => Ok(()),
            other => Err(other.mismatch(Representation::Null)),
        }
    }
}

impl TryFrom<Value> for JsonValue {
    type Error = CastError;

    fn try_from(untyped: Value) -> Result<Self, CastError> {
        cast(untyped)
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        uncast(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unsupported_error_names_the_shape() {
        let err = CastError::Unsupported("number 1e999".to_string());
        assert_eq!(err.to_string(), "unsupported type number 1e999");
    }

    #[test]
    fn cast_recurses_into_containers() {
        let value = cast(json!({"a": [1, "two", null, {"b": true}]})).unwrap();
        let a = value.as_object().unwrap()["a"].as_array().unwrap();
        assert_eq!(a.len(), 4);
        assert_eq!(a[0], JsonValue::Number(1.0));
        assert_eq!(a[1], JsonValue::String("two".into()));
        assert!(a[2].is_null());
        assert!(a[3].as_object().unwrap()["b"].as_bool().unwrap());
    }

    #[test]
    fn uncast_restores_integers() {
        let untyped = json!({"n": [0, 1.5, -3]});
        assert_eq!(uncast(cast(untyped.clone()).unwrap()), untyped);
    }

    #[test]
    #[should_panic(expected = "not object, but array")]
    fn force_object_panics_on_array() {
        force_object(json!([1, 2]));
    }
}
