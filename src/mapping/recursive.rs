//! Recursive mapper
//!
//! Walks every field of a source record and writes the resolved values
//! into a freshly zeroed target record. Nested schema fields come back
//! here through the resolver, one level deeper each time.

use crate::engine::EngineShared;
use crate::error::{MapperError, Result};
use crate::mapping::cache::MapperState;
use crate::mapping::resolver::ValueResolver;
use crate::schema::value::Record;

/// Map `source` into a new record of the state's target schema
///
/// Ignored fields and null values are never written, so the target keeps
/// its zero value for them. Source fields with no matching target field
/// are dropped.
pub(crate) fn map_object(
    engine: &EngineShared,
    state: &MapperState,
    mut source: Record,
    depth: usize,
) -> Result<Record> {
    let max_depth = engine.config.max_depth;
    if depth > max_depth {
        return Err(MapperError::DepthExceeded { max_depth });
    }

    let target_descriptor = state.target();
    if !target_descriptor.constructible {
        return Err(MapperError::construction(target_descriptor.type_name));
    }

    let configuration = state.configuration();
    let resolver = ValueResolver::new(engine, &configuration, depth);
    let target_fields = target_descriptor.lookup();
    let mut target = Record::zeroed(target_descriptor);

    for field in &state.source().fields {
        if configuration.is_ignored(&field.name) {
            continue;
        }

        // Inherited duplicates find the value already taken and skip
        let value = source.take(&field.name);
        if value.is_null() {
            continue;
        }

        let target_name = configuration.target_name(&field.name);
        let Some(target_field) = target_fields.get(target_name) else {
            if engine.config.log_mappings {
                log::trace!(
                    "Dropping field '{}': no target field '{target_name}' on {}",
                    field.name,
                    target_descriptor.type_name
                );
            }
            continue;
        };

        let resolved = resolver.resolve(
            &field.name,
            &field.field_type,
            &target_field.field_type,
            value,
        )?;
        target.set(target_name, resolved);
    }

    Ok(target)
}
