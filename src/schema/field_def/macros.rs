//! Macros for hand-authored schema definitions
//!
//! This module provides a macro to reduce boilerplate when describing a
//! schema that has no Rust struct behind it.

/// Macro to create a schema definition
///
/// # Example
///
/// ```rust
/// use automapper::schema::{FieldType, SchemaDef, SchemaRef};
/// use automapper::schema_def;
///
/// fn address() -> SchemaDef {
///     schema_def! {
///         name: "Address",
///         fields: [
///             { name: "street", type: FieldType::Text },
///             { name: "number", type: FieldType::Integer },
///         ]
///     }
/// }
///
/// fn person() -> SchemaDef {
///     schema_def! {
///         name: "Person",
///         fields: [
///             { name: "full_name", type: FieldType::Text, converter: "title_case" },
///             { name: "birth_date", type: FieldType::Date, rename: "born" },
///             { name: "address", type: FieldType::Object(SchemaRef::new("Address", address)) },
///             { name: "score", type: FieldType::Double, ignore: true },
///         ]
///     }
/// }
///
/// assert_eq!(person().fields.len(), 4);
/// ```
#[macro_export]
macro_rules! schema_def {
    (
        name: $name:expr,
        $(extends: $parent:expr,)?
        $(constructible: $constructible:expr,)?
        fields: [
            $(
                {
                    name: $field_name:expr,
                    type: $field_type:expr
                    $(, rename: $rename:expr)?
                    $(, converter: $converter:expr)?
                    $(, ignore: $ignore:expr)?
                    $(,)?
                }
            ),* $(,)?
        ]
    ) => {
        {
            #[allow(unused_mut)]
            let mut def = $crate::schema::SchemaDef::new($name);
            $(
                {
                    #[allow(unused_mut)]
                    let mut field = $crate::schema::FieldDef::new($field_name, $field_type);
                    $( field = field.rename_to($rename); )?
                    $( field = field.converter($converter); )?
                    $( if $ignore { field = field.ignored(); } )?
                    def = def.field_def(field);
                }
            )*
            $( def = def.extends($parent); )?
            $( if !$constructible { def = def.without_default(); } )?
            def
        }
    };
}
