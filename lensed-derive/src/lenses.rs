//! Implementation of the `#[derive(Lenses)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, Generics, Ident, parse_macro_input};

/// Main implementation of the Lenses derive macro.
pub fn derive_lenses_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    TokenStream::from(expand(&input))
}

fn expand(input: &DeriveInput) -> TokenStream2 {
    let name = &input.ident;
    let generics = &input.generics;

    match &input.data {
        Data::Struct(data_struct) => generate_struct_lenses(name, generics, &data_struct.fields),
        Data::Enum(_) => syn::Error::new_spanned(
            &input.ident,
            "Lenses can only be derived for structs, not enums.",
        )
        .to_compile_error(),
        Data::Union(_) => {
            syn::Error::new_spanned(&input.ident, "Lenses cannot be derived for unions.")
                .to_compile_error()
        }
    }
}

/// Reads `#[lens(...)]` attributes. `skip` is the only accepted key.
fn is_skipped(attributes: &[Attribute]) -> syn::Result<bool> {
    let mut skip = false;
    for attribute in attributes.iter().filter(|attribute| attribute.path().is_ident("lens")) {
        attribute.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported lens attribute, expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}

/// Generates lens methods for a struct's fields.
fn generate_struct_lenses(name: &Ident, generics: &Generics, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(named_fields) => {
            let mut lensed_fields = Vec::new();
            for field in &named_fields.named {
                match is_skipped(&field.attrs) {
                    Ok(true) => {}
                    Ok(false) => {
                        lensed_fields.extend(field.ident.as_ref().map(|ident| (ident, &field.ty)));
                    }
                    Err(error) => return error.to_compile_error(),
                }
            }

            let lens_methods: Vec<TokenStream2> = lensed_fields
                .into_iter()
                .map(|(field_name, field_type)| {
                    let method_name = format_ident!("{}_lens", field_name);
                    let documentation =
                        format!("Returns a lens focusing on the `{field_name}` field.");

                    quote! {
                        #[doc = #documentation]
                        #[inline]
                        #[must_use]
                        pub fn #method_name() -> ::lensed::optics::FieldLens<Self, #field_type> {
                            ::lensed::optics::FieldLens::field(
                                |source: &Self| &source.#field_name,
                                |mut source: Self, value: #field_type| {
                                    source.#field_name = value;
                                    source
                                },
                            )
                        }
                    }
                })
                .collect();

            let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

            quote! {
                impl #impl_generics #name #type_generics #where_clause {
                    #(#lens_methods)*
                }
            }
        }
        Fields::Unnamed(_) => syn::Error::new_spanned(
            name,
            "Lenses can only be derived for structs with named fields, not tuple structs.",
        )
        .to_compile_error(),
        Fields::Unit => syn::Error::new_spanned(
            name,
            "Lenses cannot be derived for unit structs (structs with no fields).",
        )
        .to_compile_error(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_skip_is_recognized() {
        let attributes: Vec<Attribute> =
            vec![parse_quote!(#[doc = "x"]), parse_quote!(#[lens(skip)])];
        assert!(is_skipped(&attributes).unwrap());
    }

    #[test]
    fn test_unrelated_attributes_are_ignored() {
        let attributes: Vec<Attribute> = vec![parse_quote!(#[serde(rename = "other")])];
        assert!(!is_skipped(&attributes).unwrap());
    }

    #[test]
    fn test_unknown_lens_key_is_rejected() {
        let attributes: Vec<Attribute> = vec![parse_quote!(#[lens(skp = "oops")])];
        let error = is_skipped(&attributes).unwrap_err();
        assert!(error.to_string().contains("unsupported lens attribute"));
    }

    #[test]
    fn test_misspelled_skip_fails_the_derive() {
        let input: DeriveInput = parse_quote! {
            struct Typo {
                #[lens(skp = "oops")]
                secret: u32,
            }
        };
        let expanded = expand(&input).to_string();
        assert!(expanded.contains("compile_error"));
        assert!(!expanded.contains("secret_lens"));
    }

    #[test]
    fn test_skipped_field_has_no_lens() {
        let input: DeriveInput = parse_quote! {
            struct Endpoint {
                host: String,
                #[lens(skip)]
                cache_key: u64,
            }
        };
        let expanded = expand(&input).to_string();
        assert!(expanded.contains("host_lens"));
        assert!(!expanded.contains("cache_key_lens"));
    }
}
