//! Structural navigation by key, index, slice, and pointer.
//!
//! Key access is defined on objects, index and slice access on arrays. A key
//! whose text is a canonical array index also addresses an array element, so
//! parsed pointers resolve against whichever container they meet (see
//! [`crate::pointer`]). An absent key is an [`AccessError::KeyNotFound`],
//! never an implicit `null`; use [`Object::get`](std::collections::BTreeMap::get)
//! on the narrowed object for optional lookups.
//!
//! Every step can fail on its own, and pointer resolution stops at the first
//! failing step.

use crate::error::{AccessError, AsValueError, Result};
use crate::pointer::{parse_array_index, Accessor, AccessorKind, Pointer, Slice};
use crate::value::{Array, JsonValue, Object, Representation};

impl JsonValue {
    /// Resolve a single key or index.
    ///
    /// ```
    /// use jtree_core::{cast::force, Accessor};
    /// use serde_json::json;
    ///
    /// let value = force(json!({"hello": "world"}));
    /// let world = value.access(&Accessor::from("hello")).unwrap();
    /// assert_eq!(world.as_string().unwrap(), "world");
    /// ```
    pub fn access(&self, accessor: &Accessor) -> std::result::Result<&JsonValue, AccessError> {
        match (accessor, self) {
            (Accessor::Key(key), JsonValue::Object(object)) => {
                object.get(key.as_str()).ok_or_else(|| key_not_found(key))
            }
            (Accessor::Key(key), JsonValue::Array(array)) => match parse_array_index(key) {
                Some(index) => array
                    .get(index)
                    .ok_or_else(|| index_out_of_bounds(index, array)),
                None => Err(mismatch(accessor, self.representation())),
            },
            (Accessor::Index(index), JsonValue::Array(array)) => array
                .get(*index)
                .ok_or_else(|| index_out_of_bounds(*index, array)),
            _ => Err(mismatch(accessor, self.representation())),
        }
    }

    /// Mutable counterpart of [`access`](Self::access).
    pub fn access_mut(
        &mut self,
        accessor: &Accessor,
    ) -> std::result::Result<&mut JsonValue, AccessError> {
        let actual = self.representation();
        match (accessor, self) {
            (Accessor::Key(key), JsonValue::Object(object)) => object
                .get_mut(key.as_str())
                .ok_or_else(|| key_not_found(key)),
            (Accessor::Key(key), JsonValue::Array(array)) => match parse_array_index(key) {
                Some(index) => index_mut(array, index),
                None => Err(mismatch(accessor, actual)),
            },
            (Accessor::Index(index), JsonValue::Array(array)) => index_mut(array, *index),
            _ => Err(mismatch(accessor, actual)),
        }
    }

    /// Borrow the contiguous elements `[start, end)` of an array.
    ///
    /// # Errors
    ///
    /// - [`AccessError::Mismatch`] unless `self` is an array
    /// - [`AccessError::SliceOutOfBounds`] if `end` exceeds the length or
    ///   `start > end`
    pub fn slice(&self, slice: Slice) -> std::result::Result<&[JsonValue], AccessError> {
        match self {
            JsonValue::Array(array) => {
                array
                    .get(slice.range())
                    .ok_or(AccessError::SliceOutOfBounds {
                        start: slice.start,
                        end: slice.end,
                        len: array.len(),
                    })
            }
            other => Err(AccessError::Mismatch {
                accessor: AccessorKind::Slice,
                expected: Representation::Array,
                actual: other.representation(),
            }),
        }
    }

    /// Resolve every accessor of `pointer` in turn. The root pointer yields
    /// `self`.
    ///
    /// ```
    /// use jtree_core::{cast::force, Pointer};
    /// use serde_json::json;
    ///
    /// let value = force(json!({"number": ["zero", "one", "two"]}));
    /// let pointer: Pointer = "/number/1".parse().unwrap();
    /// assert_eq!(value.access_pointer(&pointer).unwrap().as_string().unwrap(), "one");
    /// ```
    pub fn access_pointer(&self, pointer: &Pointer) -> std::result::Result<&JsonValue, AccessError> {
        pointer
            .iter()
            .try_fold(self, |current, accessor| current.access(accessor))
    }

    /// Mutable counterpart of [`access_pointer`](Self::access_pointer).
    pub fn access_pointer_mut(
        &mut self,
        pointer: &Pointer,
    ) -> std::result::Result<&mut JsonValue, AccessError> {
        let mut current = self;
        for accessor in pointer {
            current = current.access_mut(accessor)?;
        }
        Ok(current)
    }

    /// Replace the subtree at `pointer` in place and return the old one.
    ///
    /// ```
    /// use jtree_core::{cast::force, Accessor, Pointer};
    /// use serde_json::json;
    ///
    /// let mut value = force(json!([0, 1, 2]));
    /// let pointer = Pointer::from([Accessor::Index(1)]);
    /// value.replace(&pointer, force(json!({"hello": "world"}))).unwrap();
    /// assert_eq!(value.to_string(), r#"[0,{"hello":"world"},2]"#);
    /// ```
    pub fn replace(
        &mut self,
        pointer: &Pointer,
        value: JsonValue,
    ) -> std::result::Result<JsonValue, AccessError> {
        let slot = self.access_pointer_mut(pointer)?;
        Ok(std::mem::replace(slot, value))
    }

    fn access_as<'a, T>(
        &'a self,
        pointer: &Pointer,
        narrow: impl FnOnce(&'a JsonValue) -> std::result::Result<T, AsValueError>,
    ) -> Result<T> {
        let value = self.access_pointer(pointer)?;
        Ok(narrow(value)?)
    }

    fn slice_as<'a, T>(
        &'a self,
        slice: Slice,
        narrow: impl FnMut(&'a JsonValue) -> std::result::Result<T, AsValueError>,
    ) -> Result<Vec<T>> {
        let values = self.slice(slice)?;
        Ok(values
            .iter()
            .map(narrow)
            .collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn access_as_object(&self, pointer: &Pointer) -> Result<&Object> {
        self.access_as(pointer, JsonValue::as_object)
    }

    pub fn access_as_array(&self, pointer: &Pointer) -> Result<&Array> {
        self.access_as(pointer, JsonValue::as_array)
    }

    pub fn access_as_string(&self, pointer: &Pointer) -> Result<&str> {
        self.access_as(pointer, JsonValue::as_string)
    }

    pub fn access_as_number(&self, pointer: &Pointer) -> Result<f64> {
        self.access_as(pointer, JsonValue::as_number)
    }

    pub fn access_as_bool(&self, pointer: &Pointer) -> Result<bool> {
        self.access_as(pointer, JsonValue::as_bool)
    }

    pub fn access_as_null(&self, pointer: &Pointer) -> Result<()> {
        self.access_as(pointer, JsonValue::as_null)
    }

    pub fn slice_as_object(&self, slice: Slice) -> Result<Vec<&Object>> {
        self.slice_as(slice, JsonValue::as_object)
    }

    pub fn slice_as_array(&self, slice: Slice) -> Result<Vec<&Array>> {
        self.slice_as(slice, JsonValue::as_array)
    }

    pub fn slice_as_string(&self, slice: Slice) -> Result<Vec<&str>> {
        self.slice_as(slice, JsonValue::as_string)
    }

    pub fn slice_as_number(&self, slice: Slice) -> Result<Vec<f64>> {
        self.slice_as(slice, JsonValue::as_number)
    }

    pub fn slice_as_bool(&self, slice: Slice) -> Result<Vec<bool>> {
        self.slice_as(slice, JsonValue::as_bool)
    }

    pub fn slice_as_null(&self, slice: Slice) -> Result<Vec<()>> {
        self.slice_as(slice, JsonValue::as_null)
    }
}

fn mismatch(accessor: &Accessor, actual: Representation) -> AccessError {
    let expected = match accessor {
        Accessor::Key(_) => Representation::Object,
        Accessor::Index(_) => Representation::Array,
    };
    AccessError::Mismatch {
        accessor: accessor.kind(),
        expected,
        actual,
    }
}

fn key_not_found(key: &str) -> AccessError {
    AccessError::KeyNotFound {
        key: key.to_string(),
    }
}

fn index_out_of_bounds(index: usize, array: &[JsonValue]) -> AccessError {
    AccessError::IndexOutOfBounds {
        index,
        len: array.len(),
    }
}

fn index_mut(array: &mut [JsonValue], index: usize) -> std::result::Result<&mut JsonValue, AccessError> {
    let len = array.len();
    array
        .get_mut(index)
        .ok_or(AccessError::IndexOutOfBounds { index, len })
}
