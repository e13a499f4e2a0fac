//! Procedural macros for the automapper crate
//!
//! This crate provides the `Mappable` derive, which describes a struct's
//! fields to the mapping engine and converts the struct to and from the
//! engine's dynamic records.

use proc_macro::TokenStream;

mod mappable;

/// Derive macro for `automapper::Mappable`
///
/// Generates the schema description, record conversions and the field
/// value conversions that let the struct be nested in other mappable
/// structs.
///
/// # Attributes
///
/// On the struct:
/// - `#[mappable(name = "...")]` overrides the schema name (defaults to the
///   full type path from [`core::any::type_name`])
/// - `#[mappable(no_default)]` marks the type as not constructible, so it
///   can never be a mapping target
///
/// On fields:
/// - `#[mapping(ignore)]` never reads the field when this type is the source
/// - `#[mapping(rename = "...")]` names the field on the other side
/// - `#[mapping(converter = "...")]` binds a converter registered by name
/// - `#[mapping(base)]` flattens the field's own schema in as the parent
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Mappable)]
/// #[mappable(name = "PessoaDto")]
/// struct PessoaDto {
///     #[mapping(rename = "nome", converter = "title_case")]
///     nome_completo: String,
///
///     #[mapping(ignore)]
///     score: f64,
///
///     #[mapping(base)]
///     base: Entidade,
/// }
/// ```
#[proc_macro_derive(Mappable, attributes(mappable, mapping))]
pub fn derive_mappable(input: TokenStream) -> TokenStream {
    mappable::process_derive_mappable(input)
}
