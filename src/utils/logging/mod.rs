//! Logging utilities for mapping diagnostics

pub mod log;

// Re-export commonly used functions for convenience
pub use log::{log_mapping_complete, log_mapping_start, log_warning};
