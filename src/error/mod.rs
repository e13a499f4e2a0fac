//! Error handling for the mapping engine.

/// Specialized error type for mapping operations
///
/// Every variant aborts the `map` call that raised it; no partially
/// populated target is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    /// The target (or a nested target) type cannot be zero-constructed
    #[error("Type {type_name} must have a default constructor")]
    Construction {
        /// Name of the type that could not be constructed
        type_name: String,
    },

    /// A converter failed, a date could not be parsed, or a value could not
    /// be decoded into its declared type
    #[error("Conversion error on field '{field}': {source}")]
    Conversion {
        /// The source field being resolved when the failure happened
        field: String,
        /// The original cause
        #[source]
        source: anyhow::Error,
    },

    /// Field metadata refers to a converter that was never registered
    #[error("Field '{field}' refers to unknown converter '{converter}'")]
    UnknownConverter {
        /// The annotated field
        field: String,
        /// The converter identifier that could not be resolved
        converter: String,
    },

    /// No rule applies to the pair and strict conversions are enabled
    #[error("Unsupported conversion on field '{field}': {from} -> {to}")]
    UnsupportedConversion {
        /// The source field
        field: String,
        /// Declared source type
        from: String,
        /// Declared target type
        to: String,
    },

    /// Nested mapping went deeper than the configured guard
    #[error("Maximum mapping depth of {max_depth} exceeded")]
    DepthExceeded {
        /// The configured limit
        max_depth: usize,
    },
}

impl MapperError {
    /// Wrap any cause as a conversion failure on `field`
    pub fn conversion(field: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Conversion {
            field: field.into(),
            source: source.into(),
        }
    }

    /// Build a construction failure for `type_name`
    pub fn construction(type_name: impl Into<String>) -> Self {
        Self::Construction {
            type_name: type_name.into(),
        }
    }

    /// The field name this error is attached to, if any
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Conversion { field, .. }
            | Self::UnknownConverter { field, .. }
            | Self::UnsupportedConversion { field, .. } => Some(field),
            Self::Construction { .. } | Self::DepthExceeded { .. } => None,
        }
    }
}

/// Result type for mapping operations
pub type Result<T> = std::result::Result<T, MapperError>;
