//! Schema model: values, field types, schema definitions and descriptors.
//!
//! Schema instances are carried as [`Record`]s described by a
//! [`TypeDescriptor`]. The [`adapt`] submodule classifies and converts
//! values between declared field types.

pub mod adapt;
pub mod descriptor;
pub mod field_def;
pub mod value;

// Re-export the main schema types for easier access
pub use adapt::{ConversionStrategy, DateFormatConfig, TypeCompatibility};
pub use descriptor::{DescriptorCache, TypeDescriptor};
pub use field_def::{
    DeclaredMetadata, DeclaredType, ExplicitMetadata, FieldDef, FieldInfo, FieldMetadata,
    FieldMetadataSource, FieldType, Mappable, MetadataSources, SchemaDef, SchemaRef,
};
pub use value::{FromValue, Record, ToValue, Value, ValueError};
