//! Mapping profiles
//!
//! A profile bundles mapper configuration, type-pair converters and field
//! mappings under one name. The bundle is built by running the profile's
//! `configure` once at registration and is immutable afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::engine::AutoMapper;
use crate::error::Result;
use crate::mapping::{MapperInstance, SharedConverter};
use crate::schema::field_def::Mappable;

/// A reusable set of mapping rules
pub trait MappingProfile: Send + Sync {
    /// Declare the profile's mappers, converters and settings
    fn configure(&mut self, ctx: &mut ProfileContext<'_>) -> Result<()>;
}

/// Builder handed to [`MappingProfile::configure`]
pub struct ProfileContext<'a> {
    engine: &'a AutoMapper,
    profile: Profile,
}

impl<'a> ProfileContext<'a> {
    pub(crate) fn new(engine: &'a AutoMapper, name: impl Into<String>) -> Self {
        Self {
            engine,
            profile: Profile::new(name),
        }
    }

    /// Shared mapper for `S -> T`, recorded as part of the profile
    pub fn create_map<S: Mappable, T: Mappable>(&mut self) -> Result<MapperInstance<S, T>> {
        let mapper = self.engine.create_mapper::<S, T>()?;
        self.profile
            .mapped_pairs
            .push((S::schema_name().to_string(), T::schema_name().to_string()));
        Ok(mapper)
    }

    /// Register a converter for the `S -> T` type pair
    pub fn add_converter<S: Mappable, T: Mappable>(
        &mut self,
        converter: SharedConverter,
    ) -> &mut Self {
        self.add_converter_for(S::schema_name(), T::schema_name(), converter)
    }

    /// Register a converter under an explicit `source->target` type key
    pub fn add_converter_for(
        &mut self,
        source: &str,
        target: &str,
        converter: SharedConverter,
    ) -> &mut Self {
        self.profile
            .converters
            .insert(Profile::converter_key(source, target), converter);
        self
    }

    /// Record a source to target field mapping
    pub fn add_field_mapping(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> &mut Self {
        self.profile
            .field_mappings
            .insert(source.into(), target.into());
        self
    }

    /// Store a free-form configuration entry
    pub fn set_configuration(
        &mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> &mut Self {
        self.profile.configurations.insert(key.into(), value);
        self
    }

    pub(crate) fn finish(self) -> Profile {
        self.profile
    }
}

/// A configured, immutable profile bundle
#[derive(Clone)]
pub struct Profile {
    name: String,
    configurations: BTreeMap<String, serde_json::Value>,
    converters: BTreeMap<String, SharedConverter>,
    field_mappings: BTreeMap<String, String>,
    mapped_pairs: Vec<(String, String)>,
}

impl Profile {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            configurations: BTreeMap::new(),
            converters: BTreeMap::new(),
            field_mappings: BTreeMap::new(),
            mapped_pairs: Vec::new(),
        }
    }

    /// Key a type-pair converter is stored under
    #[must_use]
    pub fn converter_key(source: &str, target: &str) -> String {
        format!("{source}->{target}")
    }

    /// Profile name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form configuration entries
    #[must_use]
    pub const fn configurations(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.configurations
    }

    /// Converters keyed by `source->target`
    #[must_use]
    pub const fn converters(&self) -> &BTreeMap<String, SharedConverter> {
        &self.converters
    }

    /// Converter registered for a type pair
    #[must_use]
    pub fn converter(&self, source: &str, target: &str) -> Option<&SharedConverter> {
        self.converters.get(&Profile::converter_key(source, target))
    }

    /// Declared field mappings
    #[must_use]
    pub const fn field_mappings(&self) -> &BTreeMap<String, String> {
        &self.field_mappings
    }

    /// Schema pairs the profile created mappers for, in creation order
    #[must_use]
    pub fn mapped_pairs(&self) -> &[(String, String)] {
        &self.mapped_pairs
    }
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("configurations", &self.configurations)
            .field("converters", &self.converters.keys().collect_vec())
            .field("field_mappings", &self.field_mappings)
            .field("mapped_pairs", &self.mapped_pairs)
            .finish()
    }
}

/// Named registry of configured profiles
///
/// Registering a name that already exists replaces the previous profile.
#[derive(Debug, Default)]
pub struct ProfileRegistry {
    profiles: RwLock<FxHashMap<String, Arc<Profile>>>,
}

impl ProfileRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a profile under its name
    pub fn register(&self, profile: Profile) -> Arc<Profile> {
        let profile = Arc::new(profile);
        let replaced = self
            .profiles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(profile.name.clone(), Arc::clone(&profile));
        if replaced.is_some() {
            log::debug!("Replaced profile '{}'", profile.name);
        } else {
            log::debug!("Registered profile '{}'", profile.name);
        }
        profile
    }

    /// Profile registered under `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Profile>> {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Whether a profile is registered under `name`
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Remove and return the profile registered under `name`
    pub fn remove(&self, name: &str) -> Option<Arc<Profile>> {
        self.profiles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    /// Registered profile names, sorted
    #[must_use]
    pub fn list_all(&self) -> Vec<String> {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .sorted()
            .cloned()
            .collect()
    }

    /// Number of registered profiles
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no profile is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
