//! Schema definitions
//!
//! A [`SchemaDef`] is the hand-authored or derive-generated description of
//! one schema type: its own declared fields, the parent it extends and
//! whether it can be zero-constructed.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

use super::field::{FieldDef, FieldType};
use super::metadata::FieldMetadata;
use crate::error::Result;
use crate::schema::value::Record;

/// Identity of a schema type plus a way to build its definition
///
/// Two references are equal when they name the same schema.
#[derive(Clone, Copy)]
pub struct SchemaRef {
    name: &'static str,
    build: fn() -> SchemaDef,
}

impl SchemaRef {
    /// Reference a schema by name and definition builder
    #[must_use]
    pub const fn new(name: &'static str, build: fn() -> SchemaDef) -> Self {
        Self { name, build }
    }

    /// Reference the schema of a [`Mappable`] type
    #[must_use]
    pub fn of<T: Mappable>() -> Self {
        T::schema_ref()
    }

    /// Schema name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Build the schema definition
    #[must_use]
    pub fn definition(&self) -> SchemaDef {
        (self.build)()
    }
}

impl PartialEq for SchemaRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for SchemaRef {}

impl Hash for SchemaRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SchemaRef").field(&self.name).finish()
    }
}

impl Serialize for SchemaRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// Definition of one schema type
#[derive(Debug, Clone)]
pub struct SchemaDef {
    /// Unique schema name
    pub name: &'static str,
    /// Fields declared directly on this type
    pub fields: Vec<FieldDef>,
    /// The type this schema extends, if any
    pub parent: Option<SchemaRef>,
    /// Whether the type can be zero-constructed
    pub constructible: bool,
}

impl SchemaDef {
    /// Start a constructible schema with no fields
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
            parent: None,
            constructible: true,
        }
    }

    /// Declare a field with no mapping rules
    #[must_use]
    pub fn field(self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.field_def(FieldDef::new(name, field_type))
    }

    /// Declare a field
    #[must_use]
    pub fn field_def(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Extend a parent schema
    #[must_use]
    pub fn extends(mut self, parent: SchemaRef) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Mark the type as lacking a zero-argument constructor
    #[must_use]
    pub fn without_default(mut self) -> Self {
        self.constructible = false;
        self
    }

    /// Mapping rules declared on one of this type's own fields
    #[must_use]
    pub fn declared_metadata(&self, field: &str) -> Option<&FieldMetadata> {
        self.fields
            .iter()
            .find(|def| def.info.name == field)
            .map(|def| &def.metadata)
    }
}

/// Typed structs that take part in mapping
///
/// Usually generated with `#[derive(Mappable)]`.
pub trait Mappable: Sized + 'static {
    /// Unique schema name of this type
    fn schema_name() -> &'static str;

    /// Definition of this type's schema
    fn schema() -> SchemaDef;

    /// Convert an instance into a record
    fn to_record(&self) -> Record;

    /// Rebuild an instance from a record
    fn from_record(record: Record) -> Result<Self>;

    /// Reference to this type's schema
    fn schema_ref() -> SchemaRef {
        SchemaRef::new(Self::schema_name(), Self::schema)
    }
}
