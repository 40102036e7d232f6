//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates an implementation of `criteria::Record` and field name
//! constants for building filters without string typos.

use proc_macro2::TokenStream;
use quote::{format_ident, quote, quote_spanned};
use syn::{
    spanned::Spanned, Data, DeriveInput, Error, Fields, GenericArgument, PathArguments, Result,
    Type,
};

use crate::attrs::{parse_record_attrs, FieldKind};

pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attr = parse_record_attrs(&field.attrs)?;
        if attr.skip {
            continue;
        }
        let Some(kind) = attr.kind else {
            continue;
        };

        let record_name = attr.rename.unwrap_or_else(|| field_name.to_string());
        if seen.contains(&record_name) {
            return Err(Error::new(
                field.span(),
                format!("duplicate record field name '{record_name}'"),
            ));
        }
        seen.push(record_name.clone());

        let const_name = format_ident!("{}", to_screaming_snake_case(&record_name));
        field_constants.push(quote! {
            /// Field name for building criteria.
            pub const #const_name: &'static str = #record_name;
        });

        let value_expr = if is_option(&field.ty) {
            let inner = value_for(kind, quote!(inner), attr.span);
            quote! {
                match &self.#field_name {
                    ::core::option::Option::Some(inner) => #inner,
                    ::core::option::Option::None => ::criteria::Value::Null,
                }
            }
        } else {
            value_for(kind, quote!(&self.#field_name), attr.span)
        };

        field_matches.push(quote! {
            #record_name => #value_expr,
        });
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::criteria::Record for #struct_name #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::criteria::Value<'_> {
                match field {
                    #(#field_matches)*
                    _ => ::criteria::Value::Null,
                }
            }
        }
    };

    Ok(expanded)
}

/// Builds a `Value` from a reference to the field payload.
fn value_for(kind: FieldKind, reference: TokenStream, span: proc_macro2::Span) -> TokenStream {
    match kind {
        FieldKind::String => quote_spanned! {span=>
            ::criteria::Value::String(::core::convert::AsRef::<str>::as_ref(#reference))
        },
        FieldKind::Number => quote_spanned! {span=>
            ::criteria::Value::Number(::criteria::Number::from(*#reference))
        },
        FieldKind::Timestamp => quote_spanned! {span=>
            ::criteria::Value::Timestamp(
                ::criteria::RecordTimestamp::record_timestamp(#reference)
            )
        },
        FieldKind::Bool => quote_spanned! {span=>
            ::criteria::Value::Bool(*#reference)
        },
    }
}

/// Returns `true` for `Option<T>` (matched on the last path segment).
fn is_option(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    path.qself.is_none()
        && path.path.segments.last().is_some_and(|segment| {
            segment.ident == "Option"
                && matches!(
                    &segment.arguments,
                    PathArguments::AngleBracketed(args)
                        if matches!(args.args.first(), Some(GenericArgument::Type(_)))
                )
        })
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == '.' || c == ' ' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphanumeric();
        }
    }

    result
}
