//! Mapping engine context
//!
//! [`AutoMapper`] owns every registry the engine needs: type descriptors,
//! named converters, field metadata sources, the mapper cache and the
//! profile registry. Mapper handles keep the shared part alive, so they
//! remain usable after the engine value itself is dropped.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::config::MapperConfig;
use crate::error::Result;
use crate::mapping::{
    BidirectionalMapper, ConverterRegistry, MapperCache, MapperInstance, MapperState,
    MappingConfiguration, RecordMapper, SharedConverter,
};
use crate::profile::{MappingProfile, Profile, ProfileContext, ProfileRegistry};
use crate::schema::descriptor::{DescriptorCache, TypeDescriptor};
use crate::schema::field_def::{FieldMetadataSource, Mappable, MetadataSources, SchemaRef};
use crate::validation::{self, ValidationResult};

/// Engine state shared with every mapper handle
pub(crate) struct EngineShared {
    pub(crate) config: MapperConfig,
    pub(crate) descriptors: DescriptorCache,
    pub(crate) converters: ConverterRegistry,
    metadata: RwLock<MetadataSources>,
    mappers: MapperCache,
}

impl EngineShared {
    /// Cached state for the pair, built from declarative metadata on first use
    pub(crate) fn mapper_state(
        &self,
        source: SchemaRef,
        target: SchemaRef,
    ) -> Result<Arc<MapperState>> {
        self.mappers.get_or_create(source, target, || {
            let source_descriptor = self.descriptors.describe(source);
            let target_descriptor = self.descriptors.describe(target);
            let metadata = self
                .metadata
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            let configuration = MappingConfiguration::from_metadata(
                &source_descriptor,
                &target_descriptor,
                &metadata,
                &self.converters,
            )?;

            if self.config.log_mappings {
                log::debug!(
                    "Created mapper {} -> {}: {configuration:?}",
                    source.name(),
                    target.name()
                );
            }
            Ok(MapperState::new(
                source_descriptor,
                target_descriptor,
                configuration,
            ))
        })
    }
}

/// The mapping engine
pub struct AutoMapper {
    shared: Arc<EngineShared>,
    profiles: ProfileRegistry,
}

impl AutoMapper {
    /// Create an engine with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    /// Create an engine with the given configuration
    #[must_use]
    pub fn with_config(config: MapperConfig) -> Self {
        let converters = ConverterRegistry::with_builtins(&config.date_format);
        Self {
            shared: Arc::new(EngineShared {
                config,
                descriptors: DescriptorCache::new(),
                converters,
                metadata: RwLock::new(MetadataSources::default()),
                mappers: MapperCache::new(),
            }),
            profiles: ProfileRegistry::new(),
        }
    }

    /// Shared engine for callers that want one process-wide instance
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<AutoMapper> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Consult `source` before the sources already installed
    #[must_use]
    pub fn with_metadata_source(self, source: Arc<dyn FieldMetadataSource>) -> Self {
        self.add_metadata_source(source);
        self
    }

    /// Consult `source` before the sources already installed
    ///
    /// Only mappers created afterwards see the new source.
    pub fn add_metadata_source(&self, source: Arc<dyn FieldMetadataSource>) {
        self.shared
            .metadata
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push_front(source);
    }

    /// Register a named converter that field metadata can refer to
    pub fn register_converter(&self, name: impl Into<String>, converter: SharedConverter) -> &Self {
        self.shared.converters.register(name, converter);
        self
    }

    /// Engine configuration
    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.shared.config
    }

    /// Named converters
    #[must_use]
    pub fn converters(&self) -> &ConverterRegistry {
        &self.shared.converters
    }

    /// Descriptor of a schema, built once and cached
    #[must_use]
    pub fn describe(&self, schema: SchemaRef) -> Arc<TypeDescriptor> {
        self.shared.descriptors.describe(schema)
    }

    /// Mapper for `S -> T`; every call for the same pair shares one
    /// configuration
    pub fn create_mapper<S: Mappable, T: Mappable>(&self) -> Result<MapperInstance<S, T>> {
        self.instance(S::schema_ref(), T::schema_ref())
    }

    /// Record mapper between two hand-authored schemas
    pub fn create_record_mapper(&self, source: SchemaRef, target: SchemaRef) -> Result<RecordMapper> {
        self.instance(source, target)
    }

    /// Mapper pair for `A -> B` and `B -> A`
    pub fn create_bidirectional<A: Mappable, B: Mappable>(&self) -> Result<BidirectionalMapper<A, B>> {
        Ok(BidirectionalMapper::new(
            self.create_mapper::<A, B>()?,
            self.create_mapper::<B, A>()?,
        ))
    }

    fn instance<S, T>(&self, source: SchemaRef, target: SchemaRef) -> Result<MapperInstance<S, T>> {
        let state = self.shared.mapper_state(source, target)?;
        Ok(MapperInstance::new(Arc::clone(&self.shared), state))
    }

    /// Validate mapping `S` onto `T` without creating a mapper
    #[must_use]
    pub fn validate<S: Mappable, T: Mappable>(&self) -> ValidationResult {
        self.validate_refs(S::schema_ref(), T::schema_ref())
    }

    /// Validate mapping one schema onto another without creating a mapper
    #[must_use]
    pub fn validate_refs(&self, source: SchemaRef, target: SchemaRef) -> ValidationResult {
        validation::validate(&self.describe(source), &self.describe(target))
    }

    /// Run `profile.configure` once and store the result under `name`
    ///
    /// A profile already registered under `name` is replaced.
    pub fn register_profile(
        &self,
        name: impl Into<String>,
        mut profile: impl MappingProfile,
    ) -> Result<Arc<Profile>> {
        let mut ctx = ProfileContext::new(self, name);
        profile.configure(&mut ctx)?;
        Ok(self.profiles.register(ctx.finish()))
    }

    /// Registered profiles
    #[must_use]
    pub const fn profiles(&self) -> &ProfileRegistry {
        &self.profiles
    }
}

impl Default for AutoMapper {
    fn default() -> Self {
        Self::new()
    }
}
