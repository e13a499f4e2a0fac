//! Value converters
//!
//! A [`Converter`] transforms one non-null source value into the value
//! written to the target field. Converters are bound to a source field
//! either ad hoc or by name through a [`ConverterRegistry`].

use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::schema::adapt::{
    DateFormatConfig, convert_date_to_text, convert_text_to_date, convert_to_text, title_case,
};
use crate::schema::value::{FromValue, ToValue, Value};

/// Capability to transform one value
pub trait Converter: Send + Sync {
    /// Convert a source field value
    fn convert(&self, value: Value) -> anyhow::Result<Value>;
}

impl<F> Converter for F
where
    F: Fn(Value) -> anyhow::Result<Value> + Send + Sync,
{
    fn convert(&self, value: Value) -> anyhow::Result<Value> {
        self(value)
    }
}

/// Shared handle to a converter
pub type SharedConverter = Arc<dyn Converter>;

/// Wrap a closure over dynamic values as a shared converter
pub fn converter<F>(f: F) -> SharedConverter
where
    F: Fn(Value) -> anyhow::Result<Value> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A converter between two concrete field types
pub struct TypedConverter<I, O, F> {
    f: F,
    _types: PhantomData<fn(I) -> O>,
}

impl<I, O, F> Converter for TypedConverter<I, O, F>
where
    I: FromValue,
    O: ToValue,
    F: Fn(I) -> anyhow::Result<O> + Send + Sync,
{
    fn convert(&self, value: Value) -> anyhow::Result<Value> {
        let input = I::from_value(value)?;
        (self.f)(input).map(|output| output.to_value())
    }
}

/// Wrap a typed closure as a shared converter
///
/// # Example
///
/// ```rust
/// use automapper::mapping::typed;
///
/// let shout = typed(|name: String| Ok(name.to_uppercase()));
/// ```
pub fn typed<I, O, F>(f: F) -> SharedConverter
where
    I: FromValue + 'static,
    O: ToValue + 'static,
    F: Fn(I) -> anyhow::Result<O> + Send + Sync + 'static,
{
    Arc::new(TypedConverter {
        f,
        _types: PhantomData,
    })
}

/// Named converters that field metadata can refer to
pub struct ConverterRegistry {
    converters: RwLock<FxHashMap<String, SharedConverter>>,
}

impl ConverterRegistry {
    /// Name of the built-in title-casing converter
    pub const TITLE_CASE: &'static str = "title_case";
    /// Name of the built-in date formatting converter
    pub const DATE_TO_TEXT: &'static str = "date_to_text";
    /// Name of the built-in date parsing converter
    pub const TEXT_TO_DATE: &'static str = "text_to_date";
    /// Name of the built-in text rendering converter
    pub const TO_TEXT: &'static str = "to_text";

    /// Create a registry with no converters
    #[must_use]
    pub fn empty() -> Self {
        Self {
            converters: RwLock::new(FxHashMap::default()),
        }
    }

    /// Create a registry holding the built-in converters
    #[must_use]
    pub fn with_builtins(date_format: &DateFormatConfig) -> Self {
        let registry = Self::empty();
        registry.register(
            Self::TITLE_CASE,
            typed(|text: String| Ok(title_case(&text))),
        );
        let config = date_format.clone();
        registry.register(
            Self::DATE_TO_TEXT,
            converter(move |value| convert_date_to_text(value, &config)),
        );
        let config = date_format.clone();
        registry.register(
            Self::TEXT_TO_DATE,
            converter(move |value| convert_text_to_date(value, &config)),
        );
        let config = date_format.clone();
        registry.register(
            Self::TO_TEXT,
            converter(move |value| convert_to_text(value, &config)),
        );
        registry
    }

    /// Register a converter, replacing any converter with the same name
    pub fn register(&self, name: impl Into<String>, converter: SharedConverter) {
        self.converters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), converter);
    }

    /// Look up a converter by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<SharedConverter> {
        self.converters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Whether a converter is registered under `name`
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.converters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_builtins(&DateFormatConfig::default())
    }
}
