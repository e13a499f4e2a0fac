//! A declaratively configured object-to-object mapping engine.
//!
//! Types describe themselves through [`Mappable`], usually derived, and an
//! [`AutoMapper`] builds a cached, configurable mapper for each ordered
//! pair of types. Fields are matched by name and resolved through renames,
//! converters, built-in numeric and date conversions, collection copies and
//! recursive mapping of nested types.
//!
//! ```rust
//! use automapper::{AutoMapper, Mappable, converter};
//! use chrono::NaiveDate;
//!
//! #[derive(Debug, Default, Mappable)]
//! struct PersonDto {
//!     #[mapping(rename = "name")]
//!     full_name: String,
//!     born: NaiveDate,
//!     score: f64,
//! }
//!
//! #[derive(Debug, Default, Mappable)]
//! struct PersonView {
//!     name: String,
//!     born: String,
//!     score: i32,
//! }
//!
//! let engine = AutoMapper::new();
//! let mapper = engine.create_mapper::<PersonDto, PersonView>()?;
//! let view = mapper.map(&PersonDto {
//!     full_name: "Leandro Rocha".to_string(),
//!     born: NaiveDate::from_ymd_opt(1999, 9, 22).unwrap(),
//!     score: 98.5,
//! })?;
//!
//! assert_eq!(view.name, "Leandro Rocha");
//! assert_eq!(view.born, "22/09/1999");
//! assert_eq!(view.score, 98);
//! # Ok::<(), automapper::MapperError>(())
//! ```

// Lets the derive macro refer to `::automapper` from inside this crate
extern crate self as automapper;

pub mod config;
pub mod engine;
pub mod error;
pub mod mapping;
pub mod profile;
pub mod schema;
pub mod utils;
pub mod validation;

// Re-export the most common types for easier use
// Core types
pub use config::MapperConfig;
pub use engine::AutoMapper;
pub use error::{MapperError, Result};

// Mapping
pub use mapping::{
    BidirectionalMapper, Converter, ConverterRegistry, MapperInstance, MappingConfiguration,
    RecordMapper, SharedConverter, converter, typed,
};

// Schema model
pub use schema::{
    DeclaredType, ExplicitMetadata, FieldDef, FieldMetadata, FieldMetadataSource, FieldType,
    FromValue, Mappable, Record, SchemaDef, SchemaRef, ToValue, TypeDescriptor, Value,
};

// Profiles and validation
pub use profile::{MappingProfile, Profile, ProfileContext, ProfileRegistry};
pub use validation::ValidationResult;

// Derive macro
pub use automapper_macros::Mappable;
