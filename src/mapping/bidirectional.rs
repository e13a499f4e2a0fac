//! Bidirectional mapper
//!
//! Pairs the forward and reverse mappers of two schemas. Both come from
//! the engine's mapper cache, so configuring either direction here or
//! through a directly created mapper has the same effect.

use crate::error::Result;
use crate::mapping::configuration::MappingConfiguration;
use crate::mapping::instance::MapperInstance;
use crate::schema::field_def::Mappable;

/// Mapper between `A` and `B` in both directions
#[derive(Debug)]
pub struct BidirectionalMapper<A, B> {
    forward: MapperInstance<A, B>,
    reverse: MapperInstance<B, A>,
}

impl<A, B> BidirectionalMapper<A, B> {
    pub(crate) const fn new(forward: MapperInstance<A, B>, reverse: MapperInstance<B, A>) -> Self {
        Self { forward, reverse }
    }

    /// The `A -> B` mapper
    #[must_use]
    pub const fn forward(&self) -> &MapperInstance<A, B> {
        &self.forward
    }

    /// The `B -> A` mapper
    #[must_use]
    pub const fn reverse(&self) -> &MapperInstance<B, A> {
        &self.reverse
    }

    /// Edit the `A -> B` configuration
    pub fn configure_forward(&self, update: impl FnOnce(&mut MappingConfiguration)) -> &Self {
        self.forward.configure(update);
        self
    }

    /// Edit the `B -> A` configuration
    pub fn configure_reverse(&self, update: impl FnOnce(&mut MappingConfiguration)) -> &Self {
        self.reverse.configure(update);
        self
    }
}

impl<A: Mappable, B: Mappable> BidirectionalMapper<A, B> {
    /// Map `A` into `B`
    pub fn map_forward(&self, source: &A) -> Result<B> {
        self.forward.map(source)
    }

    /// Map `B` back into `A`
    pub fn map_reverse(&self, source: &B) -> Result<A> {
        self.reverse.map(source)
    }
}

impl<A, B> Clone for BidirectionalMapper<A, B> {
    fn clone(&self) -> Self {
        Self::new(self.forward.clone(), self.reverse.clone())
    }
}
