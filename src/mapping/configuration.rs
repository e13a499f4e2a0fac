//! Mapping configuration
//!
//! The mutable rule set owned by one mapper: ignored fields, renames and
//! converters, all keyed by source field name.

use std::fmt;

use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{MapperError, Result};
use crate::mapping::converter::{ConverterRegistry, SharedConverter};
use crate::schema::descriptor::TypeDescriptor;
use crate::schema::field_def::FieldMetadataSource;

/// Rule set for one source/target pair
///
/// Every operation returns the configuration for chaining.
#[derive(Clone, Default)]
pub struct MappingConfiguration {
    ignored_fields: FxHashSet<String>,
    renames: FxHashMap<String, String>,
    named_converters: FxHashMap<String, SharedConverter>,
    ad_hoc_converters: FxHashMap<String, SharedConverter>,
}

impl MappingConfiguration {
    /// Create an empty configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Never read `field` from the source
    pub fn ignore(&mut self, field: impl Into<String>) -> &mut Self {
        self.ignored_fields.insert(field.into());
        self
    }

    /// Write source field `source` into target field `target`
    pub fn rename(&mut self, source: impl Into<String>, target: impl Into<String>) -> &mut Self {
        self.renames.insert(source.into(), target.into());
        self
    }

    /// Add several renames at once
    pub fn renames<I, K, V>(&mut self, renames: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (source, target) in renames {
            self.rename(source, target);
        }
        self
    }

    /// Bind a named converter to a source field
    pub fn set_named_converter(
        &mut self,
        field: impl Into<String>,
        converter: SharedConverter,
    ) -> &mut Self {
        self.named_converters.insert(field.into(), converter);
        self
    }

    /// Bind an ad-hoc converter to a source field; it wins over a named one
    pub fn set_ad_hoc_converter(
        &mut self,
        field: impl Into<String>,
        converter: SharedConverter,
    ) -> &mut Self {
        self.ad_hoc_converters.insert(field.into(), converter);
        self
    }

    /// Whether `field` is never read from the source
    #[must_use]
    pub fn is_ignored(&self, field: &str) -> bool {
        self.ignored_fields.contains(field)
    }

    /// Effective target field name for a source field
    #[must_use]
    pub fn target_name<'a>(&'a self, field: &'a str) -> &'a str {
        self.renames.get(field).map_or(field, String::as_str)
    }

    /// Ad-hoc converter bound to a source field
    #[must_use]
    pub fn ad_hoc_converter(&self, field: &str) -> Option<&SharedConverter> {
        self.ad_hoc_converters.get(field)
    }

    /// Named converter bound to a source field
    #[must_use]
    pub fn named_converter(&self, field: &str) -> Option<&SharedConverter> {
        self.named_converters.get(field)
    }

    /// All configured renames
    #[must_use]
    pub const fn rename_table(&self) -> &FxHashMap<String, String> {
        &self.renames
    }

    /// Build a configuration from the declarative metadata of both sides
    ///
    /// Source fields contribute ignores, renames and named converters.
    /// Renames declared on target fields are inserted in reverse, so a
    /// rename written on either side is honoured from the source side.
    pub fn from_metadata(
        source: &TypeDescriptor,
        target: &TypeDescriptor,
        metadata: &dyn FieldMetadataSource,
        converters: &ConverterRegistry,
    ) -> Result<Self> {
        let mut config = Self::new();

        for field in source.field_names() {
            let Some(rules) = metadata.field_metadata(source, field) else {
                continue;
            };
            if rules.ignored {
                config.ignore(field);
            }
            if let Some(rename_to) = rules.rename_to {
                config.rename(field, rename_to);
            }
            if let Some(converter_ref) = rules.converter_ref {
                let converter =
                    converters
                        .get(&converter_ref)
                        .ok_or_else(|| MapperError::UnknownConverter {
                            field: field.to_string(),
                            converter: converter_ref.clone(),
                        })?;
                config.set_named_converter(field, converter);
            }
        }

        for field in target.field_names() {
            if let Some(source_name) = metadata
                .field_metadata(target, field)
                .and_then(|rules| rules.rename_to)
            {
                config.rename(source_name, field);
            }
        }

        Ok(config)
    }
}

impl fmt::Debug for MappingConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingConfiguration")
            .field("ignored_fields", &self.ignored_fields.iter().sorted().collect_vec())
            .field("renames", &self.renames.iter().sorted().collect_vec())
            .field(
                "named_converters",
                &self.named_converters.keys().sorted().collect_vec(),
            )
            .field(
                "ad_hoc_converters",
                &self.ad_hoc_converters.keys().sorted().collect_vec(),
            )
            .finish()
    }
}
