//! Static validation of schema pairs
//!
//! Validation only reads type descriptors. It never constructs a value and
//! never creates a mapper, and everything it reports except a missing
//! default constructor is a warning.

mod result;

pub use result::ValidationResult;

use rustc_hash::FxHashSet;

use crate::schema::adapt::{TypeCompatibility, check_type_compatibility};
use crate::schema::descriptor::TypeDescriptor;

/// Validate mapping `source` onto `target`
///
/// Source fields are matched to target fields by identical name; renames
/// configured on a mapper are not taken into account.
#[must_use]
pub fn validate(source: &TypeDescriptor, target: &TypeDescriptor) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !target.constructible {
        result.error(format!(
            "Target class {} must have a default constructor",
            target.type_name
        ));
    }

    let target_fields = target.lookup();
    let mut seen = FxHashSet::default();

    for field in &source.fields {
        if !seen.insert(field.name.as_str()) {
            continue;
        }

        let Some(target_field) = target_fields.get(field.name.as_str()) else {
            result.warn(format!(
                "Source field '{}' has no corresponding target field",
                field.name
            ));
            continue;
        };

        let (source_type, target_type) = (&field.field_type, &target_field.field_type);
        match check_type_compatibility(source_type, target_type) {
            TypeCompatibility::Exact
            | TypeCompatibility::Compatible
            | TypeCompatibility::Container {
                element_mismatch: None,
            } => {}
            TypeCompatibility::Container {
                element_mismatch: Some((from, to)),
            } => result.warn(format!("Collection element types differ: {from} -> {to}")),
            TypeCompatibility::Complex => result.warn(format!(
                "Complex object mapping from {source_type} to {target_type} will be attempted recursively"
            )),
            TypeCompatibility::Incompatible => result.warn(format!(
                "Potential incompatible types: {source_type} -> {target_type}"
            )),
        }
    }

    log::debug!(
        "Validated {} -> {}: {} errors, {} warnings",
        source.type_name,
        target.type_name,
        result.errors().len(),
        result.warnings().len()
    );
    result
}
