//! Core types for value adaptation.

use serde::Deserialize;

/// How a source/target field pair is resolved when no converter applies
///
/// Variants are listed in the order the resolver tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStrategy {
    /// Declared types are identical; the value passes unchanged
    Identity,
    /// Both sides are numeric; cast to the target's numeric kind
    NumericConversion,
    /// Format a date as text with the default pattern
    DateFormatting,
    /// Parse text into a date, default pattern first, then ISO-8601
    DateParsing,
    /// Copy the elements of one container into a new container
    CollectionCopy,
    /// Both sides are complex schema types; map recursively
    RecursiveMapping,
    /// No rule matched; pass the value through as-is
    Passthrough {
        /// Whether the target type can hold the source type
        assignable: bool,
    },
}

/// Static compatibility of a field pair, as reported by the validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeCompatibility {
    /// Types match exactly
    Exact,
    /// Types are converted automatically
    Compatible,
    /// Both are containers; carries the element types when they differ
    Container {
        /// Element type mismatch, if any
        element_mismatch: Option<(String, String)>,
    },
    /// Both are complex types; recursive mapping will be attempted
    Complex,
    /// No rule covers the pair
    Incompatible,
}

/// Configuration for date format handling
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DateFormatConfig {
    /// Format used to render dates as text and tried first when parsing
    pub default_format: String,
    /// Formats tried in order when the default one does not parse
    pub fallback_formats: Vec<String>,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            default_format: "%d/%m/%Y".to_string(), // 22/09/1999
            fallback_formats: vec![
                "%Y-%m-%d".to_string(), // ISO format: 1999-09-22
            ],
        }
    }
}
