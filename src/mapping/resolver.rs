//! Value converter resolver
//!
//! Resolves one non-null source value into the value written to the
//! target field. Rules are tried in a fixed order and the first one that
//! applies wins:
//!
//! 1. ad-hoc converter bound to the source field
//! 2. named converter bound to the source field
//! 3. the built-in strategy for the declared type pair, see
//!    [`determine_conversion_strategy`]

use crate::engine::EngineShared;
use crate::error::{MapperError, Result};
use crate::mapping::collection::map_collection;
use crate::mapping::configuration::MappingConfiguration;
use crate::mapping::recursive::map_object;
use crate::schema::adapt::{
    ConversionStrategy, convert_date_to_text, convert_numeric, convert_text_to_date,
    determine_conversion_strategy,
};
use crate::schema::field_def::FieldType;
use crate::schema::value::Value;
use crate::utils::logging::log_warning;

/// Field value resolver for one mapping level
pub(crate) struct ValueResolver<'a> {
    engine: &'a EngineShared,
    configuration: &'a MappingConfiguration,
    depth: usize,
}

impl<'a> ValueResolver<'a> {
    pub(crate) const fn new(
        engine: &'a EngineShared,
        configuration: &'a MappingConfiguration,
        depth: usize,
    ) -> Self {
        Self {
            engine,
            configuration,
            depth,
        }
    }

    /// Resolve `value` of source field `field` into the target's type
    pub(crate) fn resolve(
        &self,
        field: &str,
        source_type: &FieldType,
        target_type: &FieldType,
        value: Value,
    ) -> Result<Value> {
        let logging = self.engine.config.log_mappings;

        if let Some(converter) = self.configuration.ad_hoc_converter(field) {
            if logging {
                log::trace!("Field '{field}': ad-hoc converter");
            }
            return converter
                .convert(value)
                .map_err(|e| MapperError::conversion(field, e));
        }

        if let Some(converter) = self.configuration.named_converter(field) {
            if logging {
                log::trace!("Field '{field}': named converter");
            }
            return converter
                .convert(value)
                .map_err(|e| MapperError::conversion(field, e));
        }

        let strategy = determine_conversion_strategy(source_type, target_type);
        if logging {
            log::trace!("Field '{field}': {strategy:?} ({source_type} -> {target_type})");
        }

        let date_format = &self.engine.config.date_format;
        match strategy {
            ConversionStrategy::Identity => Ok(value),
            ConversionStrategy::NumericConversion => Ok(convert_numeric(value, target_type)),
            ConversionStrategy::DateFormatting => convert_date_to_text(value, date_format)
                .map_err(|e| MapperError::conversion(field, e)),
            ConversionStrategy::DateParsing => convert_text_to_date(value, date_format)
                .map_err(|e| MapperError::conversion(field, e)),
            ConversionStrategy::CollectionCopy => Ok(map_collection(value, target_type)),
            ConversionStrategy::RecursiveMapping => {
                self.map_nested(field, source_type, target_type, value)
            }
            ConversionStrategy::Passthrough { assignable: true } => Ok(value),
            ConversionStrategy::Passthrough { assignable: false } => {
                self.fallback(field, source_type, target_type, value)
            }
        }
    }

    fn map_nested(
        &self,
        field: &str,
        source_type: &FieldType,
        target_type: &FieldType,
        value: Value,
    ) -> Result<Value> {
        let (FieldType::Object(source), FieldType::Object(target)) =
            (source_type.unwrapped(), target_type.unwrapped())
        else {
            return self.fallback(field, source_type, target_type, value);
        };
        let record = match value {
            Value::Object(record) => record,
            other => return self.fallback(field, source_type, target_type, other),
        };

        let state = self.engine.mapper_state(*source, *target)?;
        if self.engine.config.log_mappings {
            log::debug!(
                "Field '{field}': mapping nested {} -> {} at depth {}",
                source.name(),
                target.name(),
                self.depth + 1
            );
        }
        map_object(self.engine, &state, record, self.depth + 1).map(Value::Object)
    }

    /// No rule converts the pair: pass the raw value through, or fail in
    /// strict mode
    fn fallback(
        &self,
        field: &str,
        source_type: &FieldType,
        target_type: &FieldType,
        value: Value,
    ) -> Result<Value> {
        if self.engine.config.strict_conversions {
            return Err(MapperError::UnsupportedConversion {
                field: field.to_string(),
                from: source_type.to_string(),
                to: target_type.to_string(),
            });
        }
        if self.engine.config.log_mappings {
            log_warning(
                &format!("Passing {source_type} value to {target_type} unconverted"),
                Some(field),
            );
        }
        Ok(value)
    }
}
