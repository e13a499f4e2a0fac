//! Schema field definitions
//!
//! This module provides the declared field types, schema definitions and
//! the declarative metadata consulted when a mapper is configured.

pub mod field;
mod macros;
pub mod metadata;
pub mod schema_def;

pub use field::{DeclaredType, FieldDef, FieldInfo, FieldType};
pub use metadata::{
    DeclaredMetadata, ExplicitMetadata, FieldMetadata, FieldMetadataSource, MetadataSources,
};
pub use schema_def::{Mappable, SchemaDef, SchemaRef};

// Re-export the macro to make it available to users of this module
pub use crate::schema_def;
