//! Type descriptors
//!
//! A [`TypeDescriptor`] is the flattened, ordered field list of a schema:
//! the type's own fields followed by those of each ancestor. Descriptors
//! are built once per schema and cached.

use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::schema::field_def::{FieldInfo, FieldMetadata, SchemaRef};

/// Ordered field list of a schema, merged across its inheritance chain
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Schema name
    pub type_name: &'static str,
    /// Fields, the concrete type's first
    pub fields: Vec<FieldInfo>,
    /// Whether the concrete type can be zero-constructed
    pub constructible: bool,
    metadata: Vec<FieldMetadata>,
}

impl TypeDescriptor {
    /// Walk the inheritance chain of `schema` and collect its fields
    #[must_use]
    pub fn build(schema: SchemaRef) -> Self {
        let root = schema.definition();
        let constructible = root.constructible;
        let mut fields = Vec::new();
        let mut metadata = Vec::new();
        let mut seen = FxHashSet::default();

        let mut current = Some(root);
        while let Some(def) = current.take() {
            // A hand-written schema could name itself as an ancestor
            if !seen.insert(def.name) {
                log::warn!("Inheritance cycle detected at schema {}", def.name);
                break;
            }
            for field in def.fields {
                fields.push(field.info);
                metadata.push(field.metadata);
            }
            current = def.parent.map(|parent| parent.definition());
        }

        Self {
            type_name: schema.name(),
            fields,
            constructible,
            metadata,
        }
    }

    /// First field with the given name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Name to field lookup; the first occurrence of a name wins
    #[must_use]
    pub fn lookup(&self) -> FxHashMap<&str, &FieldInfo> {
        let mut map = FxHashMap::default();
        for field in &self.fields {
            map.entry(field.name.as_str()).or_insert(field);
        }
        map
    }

    /// Declared mapping rules of the first field with the given name
    #[must_use]
    pub fn declared_metadata(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields
            .iter()
            .position(|field| field.name == name)
            .map(|idx| &self.metadata[idx])
    }

    /// Field names in descriptor order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }
}

/// Per-schema cache of descriptors
#[derive(Debug, Default)]
pub struct DescriptorCache {
    descriptors: RwLock<FxHashMap<&'static str, Arc<TypeDescriptor>>>,
}

impl DescriptorCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor for `schema`, built on first request
    #[must_use]
    pub fn describe(&self, schema: SchemaRef) -> Arc<TypeDescriptor> {
        if let Some(descriptor) = self
            .descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(schema.name())
        {
            return Arc::clone(descriptor);
        }

        let descriptor = Arc::new(TypeDescriptor::build(schema));
        log::debug!(
            "Described schema {} with {} fields",
            descriptor.type_name,
            descriptor.fields.len()
        );

        let mut descriptors = self
            .descriptors
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(descriptors.entry(schema.name()).or_insert(descriptor))
    }

    /// Number of cached descriptors
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been described yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
