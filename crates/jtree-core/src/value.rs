//! The typed JSON value tree.
//!
//! [`JsonValue`] is a closed sum over the six JSON shapes. Containers own their
//! children, so a tree is acyclic by construction and is dropped together with
//! whatever owns its root (usually a [`RootValue`]).
//!
//! # Decode / encode boundary
//!
//! Decoding goes through `serde_json::Value` as the untyped intermediate
//! representation and then through [`cast`](crate::cast::cast). Encoding walks
//! the typed tree directly via the [`Serialize`] impl. Numbers with no
//! fractional part inside the exactly-representable integer range are emitted
//! without a trailing `.0`, so `[0,1,2]` re-encodes as `[0,1,2]`. Larger
//! integral values are written as floats, and `-0.0` stays `-0.0`.

use crate::cast::cast;
use crate::error::Result;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::iter::{Enumerate, FusedIterator};
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// JSON object payload. Key order is not part of a value's identity.
#[cfg(not(feature = "preserve_order"))]
pub type Object = std::collections::BTreeMap<String, JsonValue>;

/// JSON object payload. Key order is not part of a value's identity.
#[cfg(feature = "preserve_order")]
pub type Object = indexmap::IndexMap<String, JsonValue>;

#[cfg(not(feature = "preserve_order"))]
type ObjectIter<'a> = std::collections::btree_map::Iter<'a, String, JsonValue>;

#[cfg(feature = "preserve_order")]
type ObjectIter<'a> = indexmap::map::Iter<'a, String, JsonValue>;

/// JSON array payload.
pub type Array = Vec<JsonValue>;

/// Largest magnitude below which every integer is exactly representable as `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Tag naming the variant of a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

impl Representation {
    pub fn as_str(self) -> &'static str {
        match self {
            Representation::Object => "object",
            Representation::Array => "array",
            Representation::String => "string",
            Representation::Number => "number",
            Representation::Bool => "bool",
            Representation::Null => "null",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JSON value. JSON has a single numeric type, held here as `f64`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum JsonValue {
    Object(Object),
    Array(Array),
    String(String),
    Number(f64),
    Bool(bool),
    #[default]
    Null,
}

impl JsonValue {
    /// The variant tag, without looking at the payload.
    pub fn representation(&self) -> Representation {
        match self {
            JsonValue::Object(_) => Representation::Object,
            JsonValue::Array(_) => Representation::Array,
            JsonValue::String(_) => Representation::String,
            JsonValue::Number(_) => Representation::Number,
            JsonValue::Bool(_) => Representation::Bool,
            JsonValue::Null => Representation::Null,
        }
    }

    pub fn is(&self, representation: Representation) -> bool {
        self.representation() == representation
    }

    /// `true` for objects and arrays.
    pub fn is_container(&self) -> bool {
        matches!(self, JsonValue::Object(_) | JsonValue::Array(_))
    }

    /// Shallow iteration over this value.
    ///
    /// Objects yield their entries keyed by [`EntryKey::Key`], arrays yield
    /// their elements keyed by [`EntryKey::Index`], and a scalar yields itself
    /// once under [`EntryKey::Unit`].
    pub fn entries(&self) -> Entries<'_> {
        let inner = match self {
            JsonValue::Object(object) => EntriesInner::Object(object.iter()),
            JsonValue::Array(array) => EntriesInner::Array(array.iter().enumerate()),
            scalar => EntriesInner::Unit(Some(scalar)),
        };
        Entries { inner }
    }

    /// Encode as compact JSON text.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encode as indented JSON text.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            JsonValue::Object(object) => serializer.collect_map(object),
            JsonValue::Array(array) => serializer.collect_seq(array),
            JsonValue::String(string) => serializer.serialize_str(string),
            JsonValue::Number(number) => serialize_number(*number, serializer),
            JsonValue::Bool(boolean) => serializer.serialize_bool(*boolean),
            JsonValue::Null => serializer.serialize_unit(),
        }
    }
}

/// Integral values are written without an exponent or fraction. `-0.0` keeps
/// its sign and goes through the float path.
fn serialize_number<S: Serializer>(number: f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let negative_zero = number == 0.0 && number.is_sign_negative();
    if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER && !negative_zero {
        serializer.serialize_i64(number as i64)
    } else {
        serializer.serialize_f64(number)
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let untyped = serde_json::Value::deserialize(deserializer)?;
        cast(untyped).map_err(de::Error::custom)
    }
}

impl From<Object> for JsonValue {
    fn from(object: Object) -> Self {
        JsonValue::Object(object)
    }
}

impl From<Array> for JsonValue {
    fn from(array: Array) -> Self {
        JsonValue::Array(array)
    }
}

impl From<String> for JsonValue {
    fn from(string: String) -> Self {
        JsonValue::String(string)
    }
}

impl From<&str> for JsonValue {
    fn from(string: &str) -> Self {
        JsonValue::String(string.to_owned())
    }
}

impl From<f64> for JsonValue {
    fn from(number: f64) -> Self {
        JsonValue::Number(number)
    }
}

impl From<bool> for JsonValue {
    fn from(boolean: bool) -> Self {
        JsonValue::Bool(boolean)
    }
}

impl From<()> for JsonValue {
    fn from((): ()) -> Self {
        JsonValue::Null
    }
}

impl FromIterator<JsonValue> for JsonValue {
    fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
        JsonValue::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, JsonValue)> for JsonValue {
    fn from_iter<I: IntoIterator<Item = (K, JsonValue)>>(iter: I) -> Self {
        JsonValue::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Position of a child yielded by [`JsonValue::entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKey<'a> {
    Key(&'a str),
    Index(usize),
    /// A scalar iterated as itself.
    Unit,
}

impl<'a> EntryKey<'a> {
    pub fn is_key(&self) -> bool {
        matches!(self, EntryKey::Key(_))
    }

    pub fn as_key(&self) -> Option<&'a str> {
        match self {
            EntryKey::Key(key) => Some(key),
            _ => None,
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, EntryKey::Index(_))
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            EntryKey::Index(index) => Some(*index),
            _ => None,
        }
    }
}

/// Iterator returned by [`JsonValue::entries`].
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    inner: EntriesInner<'a>,
}

#[derive(Debug, Clone)]
enum EntriesInner<'a> {
    Object(ObjectIter<'a>),
    Array(Enumerate<std::slice::Iter<'a, JsonValue>>),
    Unit(Option<&'a JsonValue>),
}

impl<'a> Iterator for Entries<'a> {
    type Item = (EntryKey<'a>, &'a JsonValue);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            EntriesInner::Object(iter) => iter.next().map(|(k, v)| (EntryKey::Key(k), v)),
            EntriesInner::Array(iter) => iter.next().map(|(i, v)| (EntryKey::Index(i), v)),
            EntriesInner::Unit(slot) => slot.take().map(|v| (EntryKey::Unit, v)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl DoubleEndedIterator for Entries<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            EntriesInner::Object(iter) => iter.next_back().map(|(k, v)| (EntryKey::Key(k), v)),
            EntriesInner::Array(iter) => iter.next_back().map(|(i, v)| (EntryKey::Index(i), v)),
            EntriesInner::Unit(slot) => slot.take().map(|v| (EntryKey::Unit, v)),
        }
    }
}

impl ExactSizeIterator for Entries<'_> {
    fn len(&self) -> usize {
        match &self.inner {
            EntriesInner::Object(iter) => iter.len(),
            EntriesInner::Array(iter) => iter.len(),
            EntriesInner::Unit(slot) => usize::from(slot.is_some()),
        }
    }
}

impl FusedIterator for Entries<'_> {}

/// Owner of a whole JSON document.
///
/// Construction is atomic: decoding either yields a fully cast tree or an
/// error, never a partially built root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootValue {
    value: JsonValue,
}

impl RootValue {
    pub fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// Decode JSON bytes. Malformed text and uncastable trees both surface
    /// as [`Error::Json`](crate::Error::Json).
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.value)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        self.value.to_json_string()
    }

    pub fn as_value(&self) -> &JsonValue {
        &self.value
    }

    pub fn as_value_mut(&mut self) -> &mut JsonValue {
        &mut self.value
    }

    pub fn into_inner(self) -> JsonValue {
        self.value
    }
}

impl FromStr for RootValue {
    type Err = crate::error::Error;

    fn from_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl From<JsonValue> for RootValue {
    fn from(value: JsonValue) -> Self {
        Self::new(value)
    }
}

impl Deref for RootValue {
    type Target = JsonValue;

    fn deref(&self) -> &JsonValue {
        &self.value
    }
}

impl DerefMut for RootValue {
    fn deref_mut(&mut self) -> &mut JsonValue {
        &mut self.value
    }
}

impl fmt::Display for RootValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl Serialize for RootValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RootValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Self::new)
    }
}
