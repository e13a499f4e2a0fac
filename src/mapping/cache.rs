//! Mapper cache
//!
//! One [`MapperState`] exists per ordered (source, target) schema pair.
//! Every handle created for the pair, directly, through a bidirectional
//! mapper, a profile or a nested field, shares that state.

use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::mapping::configuration::MappingConfiguration;
use crate::schema::descriptor::TypeDescriptor;
use crate::schema::field_def::SchemaRef;

/// Shared state behind every mapper handle for one schema pair
#[derive(Debug)]
pub struct MapperState {
    source: Arc<TypeDescriptor>,
    target: Arc<TypeDescriptor>,
    configuration: RwLock<Arc<MappingConfiguration>>,
}

impl MapperState {
    /// Bind a configuration to a described schema pair
    #[must_use]
    pub fn new(
        source: Arc<TypeDescriptor>,
        target: Arc<TypeDescriptor>,
        configuration: MappingConfiguration,
    ) -> Self {
        Self {
            source,
            target,
            configuration: RwLock::new(Arc::new(configuration)),
        }
    }

    /// Source schema descriptor
    #[must_use]
    pub fn source(&self) -> &TypeDescriptor {
        &self.source
    }

    /// Target schema descriptor
    #[must_use]
    pub fn target(&self) -> &TypeDescriptor {
        &self.target
    }

    /// Current configuration
    ///
    /// The snapshot is unaffected by later updates, so a mapping call
    /// never holds the lock while it runs.
    #[must_use]
    pub fn configuration(&self) -> Arc<MappingConfiguration> {
        Arc::clone(
            &self
                .configuration
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Apply `update` to the configuration
    pub fn update(&self, update: impl FnOnce(&mut MappingConfiguration)) {
        let mut configuration = self
            .configuration
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        update(Arc::make_mut(&mut configuration));
    }
}

/// Get-or-create cache of mapper states keyed by schema pair
#[derive(Debug, Default)]
pub struct MapperCache {
    mappers: Mutex<FxHashMap<(&'static str, &'static str), Arc<MapperState>>>,
}

impl MapperCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State for the pair, created with `create` on first request
    ///
    /// `create` runs without the cache lock held, so it may itself request
    /// other pairs from this cache. The insert is checked again under the
    /// lock: when concurrent callers race, the first stored state wins and
    /// every caller receives it. A failed `create` leaves the cache
    /// unchanged.
    pub fn get_or_create(
        &self,
        source: SchemaRef,
        target: SchemaRef,
        create: impl FnOnce() -> Result<MapperState>,
    ) -> Result<Arc<MapperState>> {
        let key = (source.name(), target.name());
        if let Some(state) = self
            .mappers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(state));
        }

        let created = Arc::new(create()?);
        let mut mappers = self.mappers.lock().unwrap_or_else(PoisonError::into_inner);
        match mappers.entry(key) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => Ok(Arc::clone(entry.insert(created))),
        }
    }

    /// Existing state for the pair, if one was created
    #[must_use]
    pub fn get(&self, source: &str, target: &str) -> Option<Arc<MapperState>> {
        self.mappers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|((s, t), _)| *s == source && *t == target)
            .map(|(_, state)| Arc::clone(state))
    }

    /// Number of cached pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no mapper was created yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
