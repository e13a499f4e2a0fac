//! Module for converting values between declared types.

use anyhow::{anyhow, bail};

use crate::schema::adapt::date_utils::{format_date, parse_date_string};
use crate::schema::adapt::types::DateFormatConfig;
use crate::schema::field_def::FieldType;
use crate::schema::value::Value;

/// Canonical form of a numeric value
#[derive(Debug, Clone, Copy, PartialEq)]
enum Numeric {
    Integer(i64),
    Floating(f64),
}

impl Numeric {
    fn of(value: &Value) -> Option<Self> {
        match *value {
            Value::Byte(v) => Some(Self::Integer(i64::from(v))),
            Value::Short(v) => Some(Self::Integer(i64::from(v))),
            Value::Int(v) => Some(Self::Integer(i64::from(v))),
            Value::Long(v) => Some(Self::Integer(v)),
            Value::Float(v) => Some(Self::Floating(f64::from(v))),
            Value::Double(v) => Some(Self::Floating(v)),
            _ => None,
        }
    }

    // `as` casts truncate toward zero and wrap or saturate exactly like a
    // primitive narrowing conversion
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn cast(self, target: &FieldType) -> Option<Value> {
        let value = match (self, target) {
            (Self::Integer(v), FieldType::Byte) => Value::Byte(v as i8),
            (Self::Floating(v), FieldType::Byte) => Value::Byte(v as i32 as i8),
            (Self::Integer(v), FieldType::Short) => Value::Short(v as i16),
            (Self::Floating(v), FieldType::Short) => Value::Short(v as i32 as i16),
            (Self::Integer(v), FieldType::Integer) => Value::Int(v as i32),
            (Self::Floating(v), FieldType::Integer) => Value::Int(v as i32),
            (Self::Integer(v), FieldType::Long) => Value::Long(v),
            (Self::Floating(v), FieldType::Long) => Value::Long(v as i64),
            (Self::Integer(v), FieldType::Float) => Value::Float(v as f32),
            (Self::Floating(v), FieldType::Float) => Value::Float(v as f32),
            (Self::Integer(v), FieldType::Double) => Value::Double(v as f64),
            (Self::Floating(v), FieldType::Double) => Value::Double(v),
            _ => return None,
        };
        Some(value)
    }
}

/// Convert a numeric value to the numeric kind of `target_type`
///
/// Non-numeric values and non-numeric targets are returned unchanged.
#[must_use]
pub fn convert_numeric(value: Value, target_type: &FieldType) -> Value {
    match Numeric::of(&value).and_then(|n| n.cast(target_type.unwrapped())) {
        Some(converted) => converted,
        None => value,
    }
}

/// Render a date value as text with the default format
pub fn convert_date_to_text(value: Value, config: &DateFormatConfig) -> anyhow::Result<Value> {
    match value {
        Value::Date(date) => Ok(Value::Text(format_date(date, config))),
        other => bail!("Cannot format {} value as a date", other.kind()),
    }
}

/// Parse a text value into a date
pub fn convert_text_to_date(value: Value, config: &DateFormatConfig) -> anyhow::Result<Value> {
    match value {
        Value::Text(text) => parse_date_string(&text, config)
            .map(Value::Date)
            .ok_or_else(|| anyhow!("Cannot convert string '{text}' to date")),
        other => bail!("Cannot parse {} value as a date", other.kind()),
    }
}

/// Render a simple value as text
pub fn convert_to_text(value: Value, config: &DateFormatConfig) -> anyhow::Result<Value> {
    let text = match value {
        Value::Text(text) => text,
        Value::Bool(v) => v.to_string(),
        Value::Byte(v) => v.to_string(),
        Value::Short(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::Long(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Double(v) => v.to_string(),
        Value::Date(date) => format_date(date, config),
        other => bail!("Cannot render {} value as text", other.kind()),
    };
    Ok(Value::Text(text))
}

/// Capitalise the first letter of each whitespace-separated word
#[must_use]
pub fn title_case(text: &str) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }
    text.to_lowercase()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
