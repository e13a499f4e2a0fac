//! Mapping engine: converters, per-pair configuration, the value resolver
//! and the mapper handles built on top of them.

pub mod bidirectional;
pub mod cache;
mod collection;
pub mod configuration;
pub mod converter;
pub mod instance;
mod recursive;
mod resolver;

pub use bidirectional::BidirectionalMapper;
pub use cache::{MapperCache, MapperState};
pub use collection::map_collection;
pub use configuration::MappingConfiguration;
pub use converter::{Converter, ConverterRegistry, SharedConverter, TypedConverter, converter, typed};
pub use instance::{MapperInstance, RecordMapper};
