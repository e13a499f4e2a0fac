//! Dynamic value model
//!
//! Schema instances travel through the engine as [`Record`]s: a schema name
//! plus one [`Value`] per field. Typed structs convert to and from records
//! through [`ToValue`] and [`FromValue`], which the `Mappable` derive
//! generates for every field.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::schema::field_def::{DeclaredType, FieldType};
use crate::schema::descriptor::TypeDescriptor;

/// A single field value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// Absent value
    Null,
    /// Boolean value
    Bool(bool),
    /// 8-bit integer
    Byte(i8),
    /// 16-bit integer
    Short(i16),
    /// 32-bit integer
    Int(i32),
    /// 64-bit integer
    Long(i64),
    /// Single-precision float
    Float(f32),
    /// Double-precision float
    Double(f64),
    /// Text value
    Text(String),
    /// Calendar date
    Date(NaiveDate),
    /// Ordered sequence container
    List(Vec<Value>),
    /// Set container (insertion ordered, no duplicates)
    Set(Vec<Value>),
    /// Nested schema instance
    Object(Record),
}

impl Value {
    /// Whether the value is absent
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the value kind, used in error messages
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Byte(_) => "i8",
            Self::Short(_) => "i16",
            Self::Int(_) => "i32",
            Self::Long(_) => "i64",
            Self::Float(_) => "f32",
            Self::Double(_) => "f64",
            Self::Text(_) => "String",
            Self::Date(_) => "NaiveDate",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Object(_) => "object",
        }
    }

    /// Build a set value, dropping duplicates while keeping first-seen order
    #[must_use]
    pub fn set_of(items: impl IntoIterator<Item = Value>) -> Self {
        let mut out: Vec<Value> = Vec::new();
        for item in items {
            if !out.contains(&item) {
                out.push(item);
            }
        }
        Self::Set(out)
    }

    /// Elements of a container value
    #[must_use]
    pub fn elements(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) | Self::Set(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// A dynamic schema instance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    schema: &'static str,
    values: FxHashMap<String, Value>,
}

impl Record {
    /// Create an empty record for the named schema
    #[must_use]
    pub fn new(schema: &'static str) -> Self {
        Self {
            schema,
            values: FxHashMap::default(),
        }
    }

    /// Create a record holding every descriptor field at its zero value
    #[must_use]
    pub fn zeroed(descriptor: &TypeDescriptor) -> Self {
        let mut record = Self::new(descriptor.type_name);
        for field in &descriptor.fields {
            record
                .values
                .entry(field.name.clone())
                .or_insert_with(|| field.field_type.zero_value());
        }
        record
    }

    /// Name of the schema this record is an instance of
    #[must_use]
    pub const fn schema(&self) -> &'static str {
        self.schema
    }

    /// Look up a field value
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Field value, or `Null` when the field is absent
    #[must_use]
    pub fn value(&self, field: &str) -> &Value {
        self.values.get(field).unwrap_or(&Value::Null)
    }

    /// Set a field value
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(field.into(), value.into());
    }

    /// Builder form of [`Record::set`]
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Remove a field value, returning `Null` when absent
    pub fn take(&mut self, field: &str) -> Value {
        self.values.remove(field).unwrap_or(Value::Null)
    }

    /// Copy in every field of `other` that this record does not hold yet
    pub fn merge_missing(&mut self, other: Record) {
        for (name, value) in other.values {
            self.values.entry(name).or_insert(value);
        }
    }

    /// Number of populated fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record holds no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the populated fields
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Object(value)
    }
}

/// Failure to decode a [`Value`] into a Rust field type
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// The value kind does not match the declared type
    #[error("expected {expected}, found {found}")]
    Mismatch {
        /// Declared type
        expected: String,
        /// Kind of the value that was supplied
        found: &'static str,
    },
    /// Decoding a nested record failed
    #[error("nested mapping failed: {0}")]
    Nested(#[source] Box<crate::error::MapperError>),
}

impl ValueError {
    /// Build a mismatch error for `expected` given the offending value
    #[must_use]
    pub fn mismatch(expected: impl fmt::Display, found: &Value) -> Self {
        Self::Mismatch {
            expected: expected.to_string(),
            found: found.kind(),
        }
    }
}

/// Convert a field into a [`Value`]
pub trait ToValue {
    /// Produce the dynamic value of this field
    fn to_value(&self) -> Value;
}

/// Decode a [`Value`] back into a field
///
/// `Null` decodes to the type's zero value, matching a target field that
/// was never written.
pub trait FromValue: Sized {
    /// Decode the value
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

macro_rules! scalar_value {
    ($ty:ty, $variant:ident, $field_type:ident) => {
        impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, ValueError> {
                match value {
                    Value::$variant(v) => Ok(v),
                    Value::Null => Ok(<$ty>::default()),
                    other => Err(ValueError::mismatch(stringify!($ty), &other)),
                }
            }
        }

        impl DeclaredType for $ty {
            fn declared_type() -> FieldType {
                FieldType::$field_type
            }
        }
    };
}

scalar_value!(bool, Bool, Boolean);
scalar_value!(i8, Byte, Byte);
scalar_value!(i16, Short, Short);
scalar_value!(i32, Int, Integer);
scalar_value!(i64, Long, Long);
scalar_value!(f32, Float, Float);
scalar_value!(f64, Double, Double);
scalar_value!(String, Text, Text);
scalar_value!(NaiveDate, Date, Date);

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: DeclaredType> DeclaredType for Option<T> {
    fn declared_type() -> FieldType {
        FieldType::Optional(Box::new(T::declared_type()))
    }
}

impl<T: ToValue> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        self.as_ref().to_value()
    }
}

impl<T: FromValue> FromValue for Box<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        T::from_value(value).map(Box::new)
    }
}

impl<T: DeclaredType> DeclaredType for Box<T> {
    fn declared_type() -> FieldType {
        T::declared_type()
    }
}

fn decode_elements<T: FromValue>(value: Value, expected: &str) -> Result<Vec<T>, ValueError> {
    match value {
        Value::List(items) | Value::Set(items) => items.into_iter().map(T::from_value).collect(),
        Value::Null => Ok(Vec::new()),
        other => Err(ValueError::mismatch(expected, &other)),
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        decode_elements(value, "Vec")
    }
}

impl<T: DeclaredType> DeclaredType for Vec<T> {
    fn declared_type() -> FieldType {
        FieldType::List(Box::new(T::declared_type()))
    }
}

impl<T: ToValue> ToValue for VecDeque<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue> FromValue for VecDeque<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        decode_elements(value, "VecDeque").map(VecDeque::from)
    }
}

impl<T: DeclaredType> DeclaredType for VecDeque<T> {
    fn declared_type() -> FieldType {
        FieldType::Collection(Box::new(T::declared_type()))
    }
}

impl<T: ToValue, S> ToValue for HashSet<T, S> {
    fn to_value(&self) -> Value {
        Value::set_of(self.iter().map(ToValue::to_value))
    }
}

impl<T, S> FromValue for HashSet<T, S>
where
    T: FromValue + Eq + Hash,
    S: std::hash::BuildHasher + Default,
{
    fn from_value(value: Value) -> Result<Self, ValueError> {
        decode_elements(value, "HashSet").map(|items| items.into_iter().collect())
    }
}

impl<T: DeclaredType, S> DeclaredType for HashSet<T, S> {
    fn declared_type() -> FieldType {
        FieldType::Set(Box::new(T::declared_type()))
    }
}

impl<T: ToValue> ToValue for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::set_of(self.iter().map(ToValue::to_value))
    }
}

impl<T: FromValue + Ord> FromValue for BTreeSet<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        decode_elements(value, "BTreeSet").map(|items| items.into_iter().collect())
    }
}

impl<T: DeclaredType> DeclaredType for BTreeSet<T> {
    fn declared_type() -> FieldType {
        FieldType::Set(Box::new(T::declared_type()))
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        Ok(value)
    }
}
