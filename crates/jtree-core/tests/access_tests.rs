use jtree_core::{
    force, AccessError, Accessor, AccessorKind, AsValueError, Error, JsonValue, Pointer,
    Representation, Slice,
};
use serde_json::json;

fn numbers() -> JsonValue {
    force(json!({"number": ["zero", "one", "two", "three"]}))
}

fn ptr(text: &str) -> Pointer {
    text.parse().expect("valid pointer")
}

// ============================================================================
// Key and index access
// ============================================================================

#[test]
fn key_access_on_object() {
    let value = force(json!({"hello": "world"}));
    let world = value.access(&Accessor::from("hello")).unwrap();
    assert_eq!(world.as_string().unwrap(), "world");
}

#[test]
fn key_access_on_array_is_mismatch() {
    let value = force(json!(["hello", "world"]));
    let err = value.access(&Accessor::from("hello")).unwrap_err();
    assert_eq!(
        err,
        AccessError::Mismatch {
            accessor: AccessorKind::Key,
            expected: Representation::Object,
            actual: Representation::Array,
        }
    );
    assert_eq!(err.to_string(), "key access only allowed on object, got array");
}

#[test]
fn missing_key_is_key_not_found() {
    let value = force(json!({"hello": "world"}));
    let err = value.access(&Accessor::from("absent")).unwrap_err();
    assert_eq!(err, AccessError::KeyNotFound { key: "absent".into() });
}

#[test]
fn index_access_on_array() {
    let value = force(json!(["zero", "one"]));
    assert_eq!(value.access(&Accessor::Index(1)).unwrap().as_string().unwrap(), "one");
}

#[test]
fn index_access_out_of_bounds() {
    let value = force(json!(["zero", "one"]));
    let err = value.access(&Accessor::Index(2)).unwrap_err();
    assert_eq!(err, AccessError::IndexOutOfBounds { index: 2, len: 2 });
}

#[test]
fn index_access_on_object_is_mismatch() {
    let value = force(json!({"0": "zero"}));
    let err = value.access(&Accessor::Index(0)).unwrap_err();
    assert_eq!(
        err,
        AccessError::Mismatch {
            accessor: AccessorKind::Index,
            expected: Representation::Array,
            actual: Representation::Object,
        }
    );
}

#[test]
fn access_on_scalar_is_mismatch() {
    let value = force(json!("scalar"));
    let err = value.access(&Accessor::from("k")).unwrap_err();
    assert!(matches!(
        err,
        AccessError::Mismatch { actual: Representation::String, .. }
    ));
    let err = value.access(&Accessor::Index(0)).unwrap_err();
    assert!(matches!(
        err,
        AccessError::Mismatch { accessor: AccessorKind::Index, .. }
    ));
}

#[test]
fn numeric_key_addresses_array_element() {
    let value = force(json!(["zero", "one"]));
    assert_eq!(value.access(&Accessor::from("1")).unwrap().as_string().unwrap(), "one");
    assert_eq!(
        value.access(&Accessor::from("5")).unwrap_err(),
        AccessError::IndexOutOfBounds { index: 5, len: 2 }
    );
}

#[test]
fn non_canonical_numeric_key_on_array_is_mismatch() {
    let value = force(json!(["zero", "one"]));
    for token in ["01", "-1", "1.0", ""] {
        let err = value.access(&Accessor::from(token)).unwrap_err();
        assert!(
            matches!(err, AccessError::Mismatch { accessor: AccessorKind::Key, .. }),
            "{token:?} gave {err:?}"
        );
    }
}

// ============================================================================
// Slice access
// ============================================================================

#[test]
fn slice_is_half_open() {
    let value = force(json!(["zero", "one", "two", "three"]));
    let slice = value.slice(Slice::new(1, 3)).unwrap();
    assert_eq!(slice, &[JsonValue::from("one"), JsonValue::from("two")]);
}

#[test]
fn slice_of_three() {
    let value = force(json!(["one", "two", "three"]));
    assert_eq!(value.slice_as_string(Slice::new(1, 3)).unwrap(), ["two", "three"]);
    let err = force(json!({"hello": "world"})).slice(Slice::new(0, 2)).unwrap_err();
    assert!(matches!(
        err,
        AccessError::Mismatch {
            expected: Representation::Array,
            actual: Representation::Object,
            ..
        }
    ));
}

#[test]
fn empty_slices() {
    let value = force(json!([1, 2]));
    assert!(value.slice(Slice::new(0, 0)).unwrap().is_empty());
    assert!(value.slice(Slice::new(2, 2)).unwrap().is_empty());
}

#[test]
fn slice_out_of_bounds() {
    let value = force(json!([1, 2]));
    assert_eq!(
        value.slice(Slice::new(1, 3)).unwrap_err(),
        AccessError::SliceOutOfBounds { start: 1, end: 3, len: 2 }
    );
    assert_eq!(
        value.slice(Slice::from(2..1)).unwrap_err(),
        AccessError::SliceOutOfBounds { start: 2, end: 1, len: 2 }
    );
}

#[test]
fn slice_on_object_is_mismatch() {
    let value = force(json!({"a": 1}));
    let err = value.slice(Slice::new(0, 1)).unwrap_err();
    assert_eq!(
        err,
        AccessError::Mismatch {
            accessor: AccessorKind::Slice,
            expected: Representation::Array,
            actual: Representation::Object,
        }
    );
    assert_eq!(err.to_string(), "slice access only allowed on array, got object");
}

// ============================================================================
// Pointer access
// ============================================================================

#[test]
fn pointer_from_accessors() {
    let value = numbers();
    let pointer = Pointer::from([Accessor::from("number"), Accessor::Index(1)]);
    assert_eq!(value.access_pointer(&pointer).unwrap().as_string().unwrap(), "one");
}

#[test]
fn pointer_from_text() {
    let value = numbers();
    assert_eq!(value.access_pointer(&ptr("/number/1")).unwrap().as_string().unwrap(), "one");
}

#[test]
fn root_pointer_returns_self() {
    let value = numbers();
    assert!(std::ptr::eq(value.access_pointer(&Pointer::root()).unwrap(), &value));
    assert!(std::ptr::eq(value.access_pointer(&ptr("/")).unwrap(), &value));
}

#[test]
fn numeric_token_addresses_object_key() {
    let value = force(json!({"0": "zero"}));
    assert_eq!(value.access_pointer(&ptr("/0")).unwrap().as_string().unwrap(), "zero");
}

#[test]
fn escaped_token_addresses_literal_key() {
    let value = force(json!({"a/b~c~1": "escaped"}));
    let target = value.access_pointer(&ptr("/a~1b~0c~01")).unwrap();
    assert_eq!(target.as_string().unwrap(), "escaped");
}

#[test]
fn empty_key_token() {
    let value = force(json!({"": {"": "nested"}}));
    assert_eq!(value.access_pointer(&ptr("//")).unwrap().as_string().unwrap(), "nested");
}

#[test]
fn pointer_stops_at_first_failure() {
    let value = numbers();
    assert_eq!(
        value.access_pointer(&ptr("/missing/0")).unwrap_err(),
        AccessError::KeyNotFound { key: "missing".into() }
    );
    assert_eq!(
        value.access_pointer(&ptr("/number/9")).unwrap_err(),
        AccessError::IndexOutOfBounds { index: 9, len: 4 }
    );
    assert!(matches!(
        value.access_pointer(&ptr("/number/0/deeper")).unwrap_err(),
        AccessError::Mismatch { actual: Representation::String, .. }
    ));
}

#[test]
fn pointer_mut_reaches_same_node() {
    let mut value = numbers();
    let node = value.access_pointer_mut(&ptr("/number/3")).unwrap();
    *node = JsonValue::Bool(true);
    assert!(value.access_as_bool(&ptr("/number/3")).unwrap());
}

#[test]
fn replace_reports_missing_target() {
    let mut value = numbers();
    let err = value.replace(&ptr("/nowhere"), JsonValue::Null).unwrap_err();
    assert_eq!(err, AccessError::KeyNotFound { key: "nowhere".into() });
    assert_eq!(value, numbers());
}

// ============================================================================
// Typed access
// ============================================================================

#[test]
fn access_as_each_variant() {
    let value = force(json!({
        "o": {"k": 1},
        "a": [1, 2],
        "s": "str",
        "n": 7.5,
        "b": false,
        "z": null
    }));
    assert!(value.access_as_object(&ptr("/o")).unwrap().contains_key("k"));
    assert_eq!(value.access_as_array(&ptr("/a")).unwrap().len(), 2);
    assert_eq!(value.access_as_string(&ptr("/s")).unwrap(), "str");
    assert_eq!(value.access_as_number(&ptr("/n")).unwrap(), 7.5);
    assert!(!value.access_as_bool(&ptr("/b")).unwrap());
    value.access_as_null(&ptr("/z")).unwrap();
}

#[test]
fn access_as_wrong_variant() {
    let value = numbers();
    let err = value.access_as_number(&ptr("/number/0")).unwrap_err();
    assert!(matches!(
        err,
        Error::AsValue(AsValueError {
            expected: Representation::Number,
            actual: Representation::String,
        })
    ));
}

#[test]
fn access_as_missing_target() {
    let value = numbers();
    let err = value.access_as_string(&ptr("/number/10")).unwrap_err();
    assert!(matches!(err, Error::Access(AccessError::IndexOutOfBounds { .. })));
}

#[test]
fn slice_as_strings() {
    let value = force(json!(["zero", "one", "two", "three"]));
    assert_eq!(value.slice_as_string(Slice::new(1, 3)).unwrap(), ["one", "two"]);
}

#[test]
fn slice_as_each_variant() {
    let value = force(json!([{"k": 1}, [1], 2, true, null]));
    assert_eq!(value.slice_as_object(Slice::new(0, 1)).unwrap().len(), 1);
    assert_eq!(value.slice_as_array(Slice::new(1, 2)).unwrap()[0].len(), 1);
    assert_eq!(value.slice_as_number(Slice::new(2, 3)).unwrap(), [2.0]);
    assert_eq!(value.slice_as_bool(Slice::new(3, 4)).unwrap(), [true]);
    assert_eq!(value.slice_as_null(Slice::new(4, 5)).unwrap(), [()]);
}

#[test]
fn slice_as_fails_on_first_wrong_element() {
    let value = force(json!(["a", 1, null]));
    let err = value.slice_as_string(Slice::new(0, 3)).unwrap_err();
    assert!(matches!(
        err,
        Error::AsValue(AsValueError { actual: Representation::Number, .. })
    ));
}

#[test]
fn slice_as_on_object() {
    let value = force(json!({"a": "b"}));
    let err = value.slice_as_string(Slice::new(0, 1)).unwrap_err();
    assert!(matches!(
        err,
        Error::Access(AccessError::Mismatch { accessor: AccessorKind::Slice, .. })
    ));
}
