//! Configuration for the mapping engine.

use serde::Deserialize;

use crate::schema::adapt::DateFormatConfig;

/// Configuration for an [`AutoMapper`](crate::AutoMapper) engine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Date format configuration for date/text conversions
    pub date_format: DateFormatConfig,
    /// Deepest level of nested objects a single `map` call may descend to
    pub max_depth: usize,
    /// Fail instead of passing through values no rule can convert
    pub strict_conversions: bool,
    /// Log mapper creation and every mapping call
    pub log_mappings: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            date_format: DateFormatConfig::default(),
            max_depth: 64,
            strict_conversions: false,
            log_mappings: true,
        }
    }
}

impl MapperConfig {
    /// Load a configuration from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
