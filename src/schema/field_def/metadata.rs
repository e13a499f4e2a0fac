//! Declarative per-field metadata
//!
//! The engine asks a [`FieldMetadataSource`] whether a field is ignored,
//! renamed or bound to a named converter. Attributes written with the
//! `Mappable` derive, the `schema_def!` macro and explicit registration
//! calls all answer through the same interface.

use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::schema::descriptor::TypeDescriptor;

/// Mapping rules attached to one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMetadata {
    /// Never read this field from the source
    pub ignored: bool,
    /// Name of the counterpart field on the other side
    pub rename_to: Option<String>,
    /// Identifier of a registered converter
    pub converter_ref: Option<String>,
}

impl FieldMetadata {
    /// Whether the metadata carries any rule
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.ignored && self.rename_to.is_none() && self.converter_ref.is_none()
    }
}

/// Capability for looking up declarative field metadata
///
/// Sources are consulted while a mapper is created, with no engine lock
/// held, so an implementation may itself create mappers or validate pairs
/// on the same engine.
pub trait FieldMetadataSource: Send + Sync {
    /// Metadata for `field` of `schema`, or `None` if this source has none
    fn field_metadata(&self, schema: &TypeDescriptor, field: &str) -> Option<FieldMetadata>;
}

/// Reads the attributes embedded in schema definitions
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclaredMetadata;

impl FieldMetadataSource for DeclaredMetadata {
    fn field_metadata(&self, schema: &TypeDescriptor, field: &str) -> Option<FieldMetadata> {
        schema
            .declared_metadata(field)
            .filter(|metadata| !metadata.is_empty())
            .cloned()
    }
}

/// Metadata registered explicitly, keyed by schema and field name
///
/// Derived types are keyed by their full schema name; pass
/// `T::schema_name()` rather than the bare struct name.
#[derive(Debug, Default)]
pub struct ExplicitMetadata {
    entries: RwLock<FxHashMap<(String, String), FieldMetadata>>,
}

impl ExplicitMetadata {
    /// Create an empty registration table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn update(&self, schema: &str, field: &str, apply: impl FnOnce(&mut FieldMetadata)) -> &Self {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        apply(
            entries
                .entry((schema.to_string(), field.to_string()))
                .or_default(),
        );
        self
    }

    /// Mark `field` of `schema` as ignored
    pub fn ignore(&self, schema: &str, field: &str) -> &Self {
        self.update(schema, field, |m| m.ignored = true)
    }

    /// Rename `field` of `schema` to `target`
    pub fn rename(&self, schema: &str, field: &str, target: &str) -> &Self {
        self.update(schema, field, |m| m.rename_to = Some(target.to_string()))
    }

    /// Bind `field` of `schema` to the named converter
    pub fn use_converter(&self, schema: &str, field: &str, converter: &str) -> &Self {
        self.update(schema, field, |m| {
            m.converter_ref = Some(converter.to_string());
        })
    }
}

impl FieldMetadataSource for ExplicitMetadata {
    fn field_metadata(&self, schema: &TypeDescriptor, field: &str) -> Option<FieldMetadata> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&(schema.type_name.to_string(), field.to_string()))
            .cloned()
    }
}

impl<S: FieldMetadataSource + ?Sized> FieldMetadataSource for Arc<S> {
    fn field_metadata(&self, schema: &TypeDescriptor, field: &str) -> Option<FieldMetadata> {
        (**self).field_metadata(schema, field)
    }
}

/// Ordered chain of metadata sources; the first answer wins
#[derive(Clone)]
pub struct MetadataSources {
    sources: Vec<Arc<dyn FieldMetadataSource>>,
}

impl Default for MetadataSources {
    fn default() -> Self {
        Self {
            sources: vec![Arc::new(DeclaredMetadata)],
        }
    }
}

impl MetadataSources {
    /// Add a source ahead of the existing ones
    pub fn push_front(&mut self, source: Arc<dyn FieldMetadataSource>) {
        self.sources.insert(0, source);
    }

    /// Number of chained sources
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the chain is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl FieldMetadataSource for MetadataSources {
    fn field_metadata(&self, schema: &TypeDescriptor, field: &str) -> Option<FieldMetadata> {
        self.sources
            .iter()
            .find_map(|source| source.field_metadata(schema, field))
    }
}
