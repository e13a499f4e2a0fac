//! Module for classifying and converting values between declared types.

pub mod types;
pub mod compatibility;
pub mod date_utils;
pub mod conversions;

// Re-export the main types and functions for easier access
pub use types::{ConversionStrategy, DateFormatConfig, TypeCompatibility};
pub use compatibility::{
    check_type_compatibility, determine_conversion_strategy, element_type, is_assignable,
    is_container, is_numeric, is_simple, is_temporal, is_text,
};
pub use conversions::{
    convert_date_to_text, convert_numeric, convert_text_to_date, convert_to_text, title_case,
};
pub use date_utils::{format_date, parse_date_string};
