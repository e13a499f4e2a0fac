//! Logging utilities
//!
//! This module provides standardized logging functions for mapping calls.

use std::time::Duration;

/// Log the start of a mapping call with consistent format
///
/// # Arguments
/// * `source` - Name of the source schema
/// * `target` - Name of the target schema
pub fn log_mapping_start(source: &str, target: &str) {
    log::debug!("Mapping {source} -> {target}");
}

/// Log the completion of a mapping call with consistent format
///
/// # Arguments
/// * `source` - Name of the source schema
/// * `target` - Name of the target schema
/// * `fields` - Number of target fields written
/// * `elapsed` - Optional elapsed time
pub fn log_mapping_complete(source: &str, target: &str, fields: usize, elapsed: Option<Duration>) {
    if let Some(duration) = elapsed {
        log::debug!("Mapped {source} -> {target}: {fields} fields in {duration:?}");
    } else {
        log::debug!("Mapped {source} -> {target}: {fields} fields");
    }
}

/// Log a mapping warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `field` - Optional field the warning relates to
pub fn log_warning(message: &str, field: Option<&str>) {
    if let Some(field) = field {
        log::warn!("{message}: field '{field}'");
    } else {
        log::warn!("{message}");
    }
}
