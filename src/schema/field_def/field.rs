//! Field definitions
//!
//! This module defines the declared type of a schema field and the
//! per-field definition carried by a schema.

use std::fmt;

use serde::Serialize;

use super::metadata::FieldMetadata;
use super::schema_def::SchemaRef;
use crate::schema::value::Value;

/// Declared type of a schema field
///
/// `Optional` is the nullable (boxed) form of its inner type, so
/// `Optional(Integer)` and `Integer` form a wrapper pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum FieldType {
    /// Boolean value
    Boolean,
    /// 8-bit integer
    Byte,
    /// 16-bit integer
    Short,
    /// 32-bit integer
    Integer,
    /// 64-bit integer
    Long,
    /// Single-precision float
    Float,
    /// Double-precision float
    Double,
    /// Text value
    Text,
    /// Calendar date
    Date,
    /// Nullable form of the inner type
    Optional(Box<FieldType>),
    /// Ordered sequence container
    List(Box<FieldType>),
    /// Set container
    Set(Box<FieldType>),
    /// Container of unspecified kind
    Collection(Box<FieldType>),
    /// Nested schema type
    Object(SchemaRef),
}

impl FieldType {
    /// Nullable form of `inner`
    #[must_use]
    pub fn optional(inner: FieldType) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// List of `element`
    #[must_use]
    pub fn list(element: FieldType) -> Self {
        Self::List(Box::new(element))
    }

    /// Set of `element`
    #[must_use]
    pub fn set(element: FieldType) -> Self {
        Self::Set(Box::new(element))
    }

    /// Unspecified container of `element`
    #[must_use]
    pub fn collection(element: FieldType) -> Self {
        Self::Collection(Box::new(element))
    }

    /// The type with any `Optional` wrapper removed
    #[must_use]
    pub fn unwrapped(&self) -> &FieldType {
        match self {
            Self::Optional(inner) => inner.unwrapped(),
            other => other,
        }
    }

    /// Value a freshly constructed instance holds in a field of this type
    #[must_use]
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Boolean => Value::Bool(false),
            Self::Byte => Value::Byte(0),
            Self::Short => Value::Short(0),
            Self::Integer => Value::Int(0),
            Self::Long => Value::Long(0),
            Self::Float => Value::Float(0.0),
            Self::Double => Value::Double(0.0),
            _ => Value::Null,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "bool"),
            Self::Byte => write!(f, "i8"),
            Self::Short => write!(f, "i16"),
            Self::Integer => write!(f, "i32"),
            Self::Long => write!(f, "i64"),
            Self::Float => write!(f, "f32"),
            Self::Double => write!(f, "f64"),
            Self::Text => write!(f, "String"),
            Self::Date => write!(f, "NaiveDate"),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
            Self::List(inner) => write!(f, "Vec<{inner}>"),
            Self::Set(inner) => write!(f, "Set<{inner}>"),
            Self::Collection(inner) => write!(f, "Collection<{inner}>"),
            Self::Object(schema) => write!(f, "{}", schema.name()),
        }
    }
}

/// Rust types that have a declared [`FieldType`]
pub trait DeclaredType {
    /// The declared type of a field holding `Self`
    fn declared_type() -> FieldType;
}

/// Name and declared type of one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    /// Field name
    pub name: String,
    /// Declared type
    pub field_type: FieldType,
}

impl FieldInfo {
    /// Create a new field info
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// A field declared on a schema, with its declarative mapping metadata
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Name and declared type
    pub info: FieldInfo,
    /// Declared mapping rules
    pub metadata: FieldMetadata,
}

impl FieldDef {
    /// Create a field definition with no mapping rules
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            info: FieldInfo::new(name, field_type),
            metadata: FieldMetadata::default(),
        }
    }

    /// Never read this field when it is on the source side
    #[must_use]
    pub fn ignored(mut self) -> Self {
        self.metadata.ignored = true;
        self
    }

    /// Map this field to (or from) a differently named field
    #[must_use]
    pub fn rename_to(mut self, name: impl Into<String>) -> Self {
        self.metadata.rename_to = Some(name.into());
        self
    }

    /// Convert this field with the named converter
    #[must_use]
    pub fn converter(mut self, converter: impl Into<String>) -> Self {
        self.metadata.converter_ref = Some(converter.into());
        self
    }
}
