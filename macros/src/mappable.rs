//! Mappable derive macro implementation
//!
//! This module contains the implementation of the `Mappable` derive macro,
//! which generates the schema definition and record conversions for a
//! struct with named fields.

use darling::{FromDeriveInput, FromField, ast};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

/// Receiver for the struct that derives `Mappable`
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(mappable), supports(struct_named))]
struct MappableReceiver {
    /// The struct identifier
    ident: syn::Ident,
    /// The struct generics
    generics: syn::Generics,
    /// Schema name override
    #[darling(default)]
    name: Option<String>,
    /// The type cannot be zero-constructed
    #[darling(default)]
    no_default: bool,
    /// The struct data with parsed fields
    data: ast::Data<(), MappingFieldReceiver>,
}

/// Receiver for the fields in the struct
#[derive(Debug, FromField)]
#[darling(attributes(mapping))]
struct MappingFieldReceiver {
    /// The field identifier
    ident: Option<syn::Ident>,
    /// The field type
    ty: syn::Type,
    /// Skip the field when reading from this type
    #[darling(default)]
    ignore: bool,
    /// Field name on the other side of a mapping
    #[darling(default)]
    rename: Option<String>,
    /// Named converter for the field
    #[darling(default)]
    converter: Option<String>,
    /// The field holds the parent schema
    #[darling(default)]
    base: bool,
}

/// Process the Mappable derive macro
pub fn process_derive_mappable(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let input = parse_macro_input!(input as DeriveInput);

    // Parse with darling
    let receiver = match MappableReceiver::from_derive_input(&input) {
        Ok(receiver) => receiver,
        Err(err) => return err.write_errors().into(),
    };

    match generate_mappable_impl(&receiver) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.write_errors().into(),
    }
}

/// Check the field attributes and split off the base field
fn split_fields(
    fields: &[MappingFieldReceiver],
) -> darling::Result<(Vec<&MappingFieldReceiver>, Option<&MappingFieldReceiver>)> {
    let mut errors = darling::Error::accumulator();
    let mut own = Vec::new();
    let mut base: Option<&MappingFieldReceiver> = None;

    for field in fields {
        if !field.base {
            own.push(field);
            continue;
        }
        if field.ignore || field.rename.is_some() || field.converter.is_some() {
            errors.push(
                darling::Error::custom(
                    "`base` cannot be combined with `ignore`, `rename` or `converter`",
                )
                .with_span(&field.ty),
            );
        }
        if base.is_some() {
            errors.push(
                darling::Error::custom("only one field can be marked `base`").with_span(&field.ty),
            );
        }
        base = Some(field);
    }

    errors.finish_with((own, base))
}

/// Generate the `Mappable`, `DeclaredType`, `ToValue` and `FromValue` impls
fn generate_mappable_impl(receiver: &MappableReceiver) -> darling::Result<TokenStream2> {
    let struct_name = &receiver.ident;
    // Without an override the schema is named by the type's full path, so
    // same-named types from different modules stay distinct
    let schema_name = match &receiver.name {
        Some(name) => quote! { #name },
        None => quote! { ::core::any::type_name::<Self>() },
    };
    let (impl_generics, ty_generics, where_clause) = receiver.generics.split_for_impl();

    let ast::Data::Struct(fields) = &receiver.data else {
        unreachable!("Darling ensures this is a struct")
    };
    let (own, base) = split_fields(&fields.fields)?;

    // Schema field definitions, one per own field
    let field_defs = own.iter().map(|field| {
        let ident = field.ident.as_ref().expect("named field");
        let name = ident.to_string();
        let ty = &field.ty;
        let ignore = field.ignore.then(|| quote! { .ignored() });
        let rename = field.rename.as_ref().map(|to| quote! { .rename_to(#to) });
        let converter = field.converter.as_ref().map(|c| quote! { .converter(#c) });
        quote! {
            .field_def(
                ::automapper::schema::FieldDef::new(
                    #name,
                    <#ty as ::automapper::schema::DeclaredType>::declared_type(),
                )
                #ignore #rename #converter
            )
        }
    });

    let extends = base.map(|field| {
        let ty = &field.ty;
        quote! { .extends(<#ty as ::automapper::schema::Mappable>::schema_ref()) }
    });
    let without_default = receiver.no_default.then(|| quote! { .without_default() });

    // Record writers
    let setters = own.iter().map(|field| {
        let ident = field.ident.as_ref().expect("named field");
        let name = ident.to_string();
        quote! {
            __record.set(#name, ::automapper::schema::ToValue::to_value(&self.#ident));
        }
    });
    let merge_base = base.map(|field| {
        let ident = field.ident.as_ref().expect("named field");
        quote! {
            __record.merge_missing(::automapper::schema::Mappable::to_record(&self.#ident));
        }
    });

    // Record readers; the base field decodes whatever is left
    // Locals are prefixed so a field named `record` cannot shadow them
    let getters = own.iter().map(|field| {
        let ident = field.ident.as_ref().expect("named field");
        let name = ident.to_string();
        let ty = &field.ty;
        quote! {
            let #ident = <#ty as ::automapper::schema::FromValue>::from_value(__record.take(#name))
                .map_err(|e| ::automapper::MapperError::conversion(#name, e))?;
        }
    });
    let take_base = base.map(|field| {
        let ident = field.ident.as_ref().expect("named field");
        let ty = &field.ty;
        quote! {
            let #ident = <#ty as ::automapper::schema::Mappable>::from_record(__record)?;
        }
    });
    let idents = own
        .iter()
        .chain(base.iter())
        .map(|field| field.ident.as_ref().expect("named field"));

    Ok(quote! {
        impl #impl_generics ::automapper::schema::Mappable for #struct_name #ty_generics #where_clause {
            fn schema_name() -> &'static str {
                #schema_name
            }

            fn schema() -> ::automapper::schema::SchemaDef {
                ::automapper::schema::SchemaDef::new(
                    <Self as ::automapper::schema::Mappable>::schema_name(),
                )
                    #(#field_defs)*
                    #extends
                    #without_default
            }

            #[allow(unused_mut)]
            fn to_record(&self) -> ::automapper::schema::Record {
                let mut __record = ::automapper::schema::Record::new(
                    <Self as ::automapper::schema::Mappable>::schema_name(),
                );
                #(#setters)*
                #merge_base
                __record
            }

            #[allow(unused_mut, unused_variables)]
            fn from_record(
                mut __record: ::automapper::schema::Record,
            ) -> ::automapper::Result<Self> {
                #(#getters)*
                #take_base
                Ok(Self { #(#idents),* })
            }
        }

        impl #impl_generics ::automapper::schema::DeclaredType for #struct_name #ty_generics #where_clause {
            fn declared_type() -> ::automapper::schema::FieldType {
                ::automapper::schema::FieldType::Object(
                    <Self as ::automapper::schema::Mappable>::schema_ref(),
                )
            }
        }

        impl #impl_generics ::automapper::schema::ToValue for #struct_name #ty_generics #where_clause {
            fn to_value(&self) -> ::automapper::schema::Value {
                ::automapper::schema::Value::Object(
                    <Self as ::automapper::schema::Mappable>::to_record(self),
                )
            }
        }

        impl #impl_generics ::automapper::schema::FromValue for #struct_name #ty_generics #where_clause {
            fn from_value(
                value: ::automapper::schema::Value,
            ) -> ::std::result::Result<Self, ::automapper::schema::ValueError> {
                let record = match value {
                    ::automapper::schema::Value::Object(record) => record,
                    // An unset nested field decodes with every field at its zero value
                    ::automapper::schema::Value::Null => ::automapper::schema::Record::new(
                        <Self as ::automapper::schema::Mappable>::schema_name(),
                    ),
                    other => {
                        return Err(::automapper::schema::ValueError::mismatch(
                            <Self as ::automapper::schema::Mappable>::schema_name(),
                            &other,
                        ));
                    }
                };
                <Self as ::automapper::schema::Mappable>::from_record(record)
                    .map_err(|e| ::automapper::schema::ValueError::Nested(Box::new(e)))
            }
        }
    })
}
