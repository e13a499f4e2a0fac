//! Collection mapper
//!
//! Copies the elements of one container value into a new container of the
//! target's declared kind. Elements are copied as they are; no per-element
//! conversion is applied even when the declared element types differ.

use crate::schema::field_def::FieldType;
use crate::schema::value::Value;

/// Container kind a declared type maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    Sequence,
    Set,
}

impl ContainerKind {
    fn of(field_type: &FieldType) -> Self {
        match field_type.unwrapped() {
            FieldType::Set(_) => Self::Set,
            // Lists, generic collections and anything unexpected
            _ => Self::Sequence,
        }
    }
}

/// Copy a container value into a new container for `target_type`
///
/// Non-container values are returned unchanged.
#[must_use]
pub fn map_collection(value: Value, target_type: &FieldType) -> Value {
    let items = match value {
        Value::List(items) | Value::Set(items) => items,
        other => return other,
    };

    match ContainerKind::of(target_type) {
        ContainerKind::Sequence => Value::List(items),
        ContainerKind::Set => Value::set_of(items),
    }
}
