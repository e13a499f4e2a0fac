//! Module for classifying declared field type pairs.
//!
//! The mapper and the validator share these tests so that the validator
//! predicts exactly what the resolver will do.

use crate::schema::adapt::types::{ConversionStrategy, TypeCompatibility};
use crate::schema::field_def::FieldType;

/// Identifies whether a declared type is numeric (wrapped or not)
#[must_use]
pub fn is_numeric(field_type: &FieldType) -> bool {
    matches!(
        field_type.unwrapped(),
        FieldType::Byte
            | FieldType::Short
            | FieldType::Integer
            | FieldType::Long
            | FieldType::Float
            | FieldType::Double
    )
}

/// Identifies whether a declared type is text
#[must_use]
pub fn is_text(field_type: &FieldType) -> bool {
    matches!(field_type.unwrapped(), FieldType::Text)
}

/// Identifies whether a declared type is a calendar date
#[must_use]
pub fn is_temporal(field_type: &FieldType) -> bool {
    matches!(field_type.unwrapped(), FieldType::Date)
}

/// Identifies whether a declared type is a container
#[must_use]
pub fn is_container(field_type: &FieldType) -> bool {
    matches!(
        field_type.unwrapped(),
        FieldType::List(_) | FieldType::Set(_) | FieldType::Collection(_)
    )
}

/// Identifies primitive, numeric, text, boolean and date types
#[must_use]
pub fn is_simple(field_type: &FieldType) -> bool {
    is_numeric(field_type)
        || is_text(field_type)
        || is_temporal(field_type)
        || matches!(field_type.unwrapped(), FieldType::Boolean)
}

/// Element type of a container
#[must_use]
pub fn element_type(field_type: &FieldType) -> Option<&FieldType> {
    match field_type.unwrapped() {
        FieldType::List(element) | FieldType::Set(element) | FieldType::Collection(element) => {
            Some(element)
        }
        _ => None,
    }
}

/// Whether a field of type `to` can hold a value of type `from` unchanged
#[must_use]
pub fn is_assignable(from: &FieldType, to: &FieldType) -> bool {
    from.unwrapped() == to.unwrapped()
}

/// Determine the built-in strategy for a given source and target type
#[must_use]
pub fn determine_conversion_strategy(
    source_type: &FieldType,
    target_type: &FieldType,
) -> ConversionStrategy {
    match (source_type, target_type) {
        (s, t) if s == t => ConversionStrategy::Identity,

        (s, t) if is_numeric(s) && is_numeric(t) => ConversionStrategy::NumericConversion,

        (s, t) if is_temporal(s) && is_text(t) => ConversionStrategy::DateFormatting,

        (s, t) if is_text(s) && is_temporal(t) => ConversionStrategy::DateParsing,

        (s, t) if is_container(s) && is_container(t) => ConversionStrategy::CollectionCopy,

        // Only two schema types can be walked field by field
        (s, t)
            if !is_simple(s)
                && !is_simple(t)
                && matches!(s.unwrapped(), FieldType::Object(_))
                && matches!(t.unwrapped(), FieldType::Object(_)) =>
        {
            ConversionStrategy::RecursiveMapping
        }

        (s, t) => ConversionStrategy::Passthrough {
            assignable: is_assignable(s, t),
        },
    }
}

/// Check if two declared types are compatible for mapping
#[must_use]
pub fn check_type_compatibility(source_type: &FieldType, target_type: &FieldType) -> TypeCompatibility {
    match determine_conversion_strategy(source_type, target_type) {
        ConversionStrategy::Identity => TypeCompatibility::Exact,
        ConversionStrategy::NumericConversion
        | ConversionStrategy::DateFormatting
        | ConversionStrategy::DateParsing
        | ConversionStrategy::Passthrough { assignable: true } => TypeCompatibility::Compatible,
        ConversionStrategy::CollectionCopy => {
            let element_mismatch = match (element_type(source_type), element_type(target_type)) {
                (Some(s), Some(t)) if s != t => Some((s.to_string(), t.to_string())),
                _ => None,
            };
            TypeCompatibility::Container { element_mismatch }
        }
        ConversionStrategy::RecursiveMapping => TypeCompatibility::Complex,
        ConversionStrategy::Passthrough { assignable: false } => TypeCompatibility::Incompatible,
    }
}
