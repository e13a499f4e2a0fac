//! Mapper instances
//!
//! A [`MapperInstance`] is a typed handle onto the cached state of one
//! schema pair. Handles are cheap to clone and every handle for the same
//! pair sees the same configuration.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

use crate::engine::EngineShared;
use crate::error::Result;
use crate::mapping::cache::MapperState;
use crate::mapping::configuration::MappingConfiguration;
use crate::mapping::converter::SharedConverter;
use crate::mapping::recursive::map_object;
use crate::schema::field_def::Mappable;
use crate::schema::value::Record;
use crate::utils::logging::{log_mapping_complete, log_mapping_start};

/// Configured mapper for the ordered pair `S -> T`
pub struct MapperInstance<S, T> {
    engine: Arc<EngineShared>,
    state: Arc<MapperState>,
    _types: PhantomData<fn(&S) -> T>,
}

/// Mapper between hand-authored schemas, working on records directly
pub type RecordMapper = MapperInstance<Record, Record>;

impl<S, T> MapperInstance<S, T> {
    pub(crate) const fn new(engine: Arc<EngineShared>, state: Arc<MapperState>) -> Self {
        Self {
            engine,
            state,
            _types: PhantomData,
        }
    }

    /// Name of the source schema
    #[must_use]
    pub fn source_type(&self) -> &'static str {
        self.state.source().type_name
    }

    /// Name of the target schema
    #[must_use]
    pub fn target_type(&self) -> &'static str {
        self.state.target().type_name
    }

    /// Whether both handles share one cached configuration
    #[must_use]
    pub fn shares_state_with<A, B>(&self, other: &MapperInstance<A, B>) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Apply several source to target renames
    pub fn configure_renames<I, K, V>(&self, renames: I) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.configure(|config| {
            config.renames(renames);
        })
    }

    /// Write source field `source` into target field `target`
    pub fn rename(&self, source: impl Into<String>, target: impl Into<String>) -> &Self {
        self.configure(|config| {
            config.rename(source, target);
        })
    }

    /// Never read `field` from the source
    pub fn ignore(&self, field: impl Into<String>) -> &Self {
        self.configure(|config| {
            config.ignore(field);
        })
    }

    /// Bind a named converter to a source field
    pub fn set_converter(&self, field: impl Into<String>, converter: SharedConverter) -> &Self {
        self.configure(|config| {
            config.set_named_converter(field, converter);
        })
    }

    /// Bind an ad-hoc converter to a source field
    pub fn set_ad_hoc_converter(
        &self,
        field: impl Into<String>,
        converter: SharedConverter,
    ) -> &Self {
        self.configure(|config| {
            config.set_ad_hoc_converter(field, converter);
        })
    }

    /// Edit the shared configuration
    ///
    /// Mapping calls already running keep the configuration they started
    /// with.
    pub fn configure(&self, update: impl FnOnce(&mut MappingConfiguration)) -> &Self {
        self.state.update(update);
        self
    }

    /// Snapshot of the current configuration
    #[must_use]
    pub fn configuration(&self) -> Arc<MappingConfiguration> {
        self.state.configuration()
    }

    /// Map a record of the source schema into a record of the target schema
    pub fn map_record(&self, source: &Record) -> Result<Record> {
        self.run(source.clone())
    }

    fn run(&self, source: Record) -> Result<Record> {
        let logging = self.engine.config.log_mappings;
        let (source_name, target_name) = (self.source_type(), self.target_type());
        let start = Instant::now();
        if logging {
            log_mapping_start(source_name, target_name);
        }

        let target = map_object(&self.engine, &self.state, source, 0)?;

        if logging {
            log_mapping_complete(source_name, target_name, target.len(), Some(start.elapsed()));
        }
        Ok(target)
    }
}

impl<S: Mappable, T: Mappable> MapperInstance<S, T> {
    /// Map a source value into a new target value
    ///
    /// Any failure aborts the call; no partially mapped target is returned.
    pub fn map(&self, source: &S) -> Result<T> {
        let target = self.run(source.to_record())?;
        T::from_record(target)
    }

    /// Map an optional source; `None` maps to `None`
    pub fn map_option(&self, source: Option<&S>) -> Result<Option<T>> {
        source.map(|source| self.map(source)).transpose()
    }

    /// Map every element of a slice, stopping at the first failure
    pub fn map_all(&self, sources: &[S]) -> Result<Vec<T>> {
        sources.iter().map(|source| self.map(source)).collect()
    }
}

impl<S, T> Clone for MapperInstance<S, T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.engine), Arc::clone(&self.state))
    }
}

impl<S, T> fmt::Debug for MapperInstance<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperInstance")
            .field("source", &self.source_type())
            .field("target", &self.target_type())
            .field("configuration", &self.configuration())
            .finish()
    }
}
