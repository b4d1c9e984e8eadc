//! FakeEnum derive macro implementation

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{ext::IdentExt, parse::Result, parse_macro_input, Data, DeriveInput, Error, Fields};

/// Main implementation function for the FakeEnum derive
pub fn derive_fake_enum_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_fake_enum(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_fake_enum(input: &DeriveInput) -> Result<TokenStream2> {
    let Data::Enum(data) = &input.data else {
        return Err(Error::new_spanned(
            &input.ident,
            "#[derive(FakeEnum)] can only be applied to enums",
        ));
    };

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "#[derive(FakeEnum)] does not support generic types",
        ));
    }

    if data.variants.is_empty() {
        return Err(Error::new_spanned(
            &input.ident,
            "#[derive(FakeEnum)] requires at least one variant",
        ));
    }

    if let Some(variant) = data
        .variants
        .iter()
        .find(|variant| !matches!(variant.fields, Fields::Unit))
    {
        return Err(Error::new_spanned(
            variant,
            "#[derive(FakeEnum)] only supports variants without fields",
        ));
    }

    let ident = &input.ident;
    let variants: Vec<_> = data.variants.iter().map(|variant| &variant.ident).collect();
    let names = variants.iter().map(|variant| variant.unraw().to_string());
    let indices: Vec<usize> = (0..variants.len()).collect();

    Ok(quote! {
        impl ::fluent_faker::FieldSlot for #ident {
            fn kind() -> ::fluent_faker::FieldKind {
                ::fluent_faker::FieldKind::Enum(&[#(#names),*])
            }

            fn get(&self) -> ::std::option::Option<::fluent_faker::Value> {
                let index: usize = match self {
                    #(Self::#variants => #indices,)*
                };
                ::std::option::Option::Some(::fluent_faker::Value::Enum(index))
            }

            fn set(&mut self, value: ::fluent_faker::Value) -> ::std::result::Result<(), ::fluent_faker::Value> {
                match value {
                    #(::fluent_faker::Value::Enum(#indices) => {
                        *self = Self::#variants;
                        ::std::result::Result::Ok(())
                    })*
                    other => ::std::result::Result::Err(other),
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_unit_enum_expands() {
        let input: DeriveInput = parse_quote! {
            enum Status { Active, Suspended, r#Closed }
        };
        let output = expand_fake_enum(&input).unwrap().to_string();
        assert!(output.contains("\"Active\""));
        assert!(output.contains("\"Closed\""));
        assert!(output.contains("FieldSlot for Status"));
    }

    #[test]
    fn test_rejects_unsupported_enums() {
        let cases: Vec<(DeriveInput, &str)> = vec![
            (parse_quote! { struct Status { id: i32 } }, "only be applied to enums"),
            (parse_quote! { enum Never {} }, "at least one variant"),
            (parse_quote! { enum Shape { Circle(f64), Point } }, "without fields"),
            (parse_quote! { enum Either<L> { Left(L) } }, "generic"),
        ];

        for (input, message) in cases {
            let err = expand_fake_enum(&input).unwrap_err();
            assert!(err.to_string().contains(message), "unexpected error: {}", err);
        }
    }
}
