//! Entity derive macro implementation
//!
//! Generates an `Entity` impl whose schema is built on first use and cached in
//! a `OnceLock`, plus `slot`/`slot_mut` accessors matching field names.

use heck::ToSnakeCase;
use proc_macro::TokenStream;
use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    ext::IdentExt, parse::Result, parse_macro_input, Attribute, Data, DeriveInput, Error, Fields, LitStr,
    Type,
};

/// Main implementation function for the Entity derive
pub fn derive_entity_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_entity(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// A field exposed through the generated schema
struct FieldSpec<'a> {
    ident: &'a Ident,
    name: String,
    ty: &'a Type,
    opaque: bool,
}

/// How a field appears in the generated schema
#[derive(Debug, Clone, Copy, PartialEq)]
enum FieldMode {
    Slot,
    /// `#[fake(other)]`: listed with no accessor of its own
    Opaque,
    /// `#[fake(skip)]`
    Skip,
}

fn expand_entity(input: &DeriveInput) -> Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "#[derive(Entity)] does not support generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new_spanned(
                    &input.ident,
                    "#[derive(Entity)] requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input.ident,
                "#[derive(Entity)] can only be applied to structs",
            ))
        }
    };

    let mut specs = Vec::new();
    for field in fields {
        let mode = field_mode(&field.attrs)?;
        if mode == FieldMode::Skip {
            continue;
        }
        if let Some(ident) = &field.ident {
            specs.push(FieldSpec {
                ident,
                name: ident.unraw().to_string(),
                ty: &field.ty,
                opaque: mode == FieldMode::Opaque,
            });
        }
    }

    let ident = &input.ident;
    let entity_name = entity_name(input)?;
    let foreign_key = format!("{}_id", entity_name.to_snake_case());

    let infos = specs.iter().map(|spec| {
        let FieldSpec { name, ty, opaque, .. } = spec;
        if *opaque {
            quote! { ::fluent_faker::FieldInfo::new(#name, ::fluent_faker::FieldKind::Other) }
        } else {
            quote! {
                ::fluent_faker::FieldInfo::new(#name, <#ty as ::fluent_faker::FieldSlot>::kind())
            }
        }
    });
    let slot_arms = specs.iter().map(|spec| {
        let FieldSpec { ident, name, opaque, .. } = spec;
        if *opaque {
            quote! { #name => ::std::option::Option::Some(::fluent_faker::Opaque::slot()) }
        } else {
            quote! {
                #name => ::std::option::Option::Some(&self.#ident as &dyn ::fluent_faker::FieldSlot)
            }
        }
    });
    let slot_mut_arms = specs.iter().map(|spec| {
        let FieldSpec { ident, name, opaque, .. } = spec;
        if *opaque {
            quote! { #name => ::std::option::Option::Some(::fluent_faker::Opaque::slot_mut()) }
        } else {
            quote! {
                #name => ::std::option::Option::Some(&mut self.#ident as &mut dyn ::fluent_faker::FieldSlot)
            }
        }
    });

    Ok(quote! {
        impl ::fluent_faker::Entity for #ident {
            fn describe() -> &'static ::fluent_faker::EntitySchema {
                static SCHEMA: ::std::sync::OnceLock<::fluent_faker::EntitySchema> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    ::fluent_faker::EntitySchema::new::<#ident>(
                        #entity_name,
                        #foreign_key,
                        ::std::vec![#(#infos),*],
                    )
                })
            }

            fn schema(&self) -> &'static ::fluent_faker::EntitySchema {
                <Self as ::fluent_faker::Entity>::describe()
            }

            fn slot(&self, field: &str) -> ::std::option::Option<&dyn ::fluent_faker::FieldSlot> {
                match field {
                    #(#slot_arms,)*
                    _ => ::std::option::Option::None,
                }
            }

            fn slot_mut(&mut self, field: &str) -> ::std::option::Option<&mut dyn ::fluent_faker::FieldSlot> {
                match field {
                    #(#slot_mut_arms,)*
                    _ => ::std::option::Option::None,
                }
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }
        }
    })
}

/// Entity name from `#[fake(name = "...")]`, or the struct name
fn entity_name(input: &DeriveInput) -> Result<String> {
    let mut name = None;

    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("fake")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                if value.value().trim().is_empty() {
                    return Err(meta.error("entity name must not be empty"));
                }
                name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported #[fake] attribute on a struct, expected `name = \"...\"`"))
            }
        })?;
    }

    Ok(name.unwrap_or_else(|| input.ident.unraw().to_string()))
}

/// Field mode from `#[fake(skip)]` or `#[fake(other)]`
fn field_mode(attrs: &[Attribute]) -> Result<FieldMode> {
    let mut mode = FieldMode::Slot;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("fake")) {
        attr.parse_nested_meta(|meta| {
            let requested = if meta.path.is_ident("skip") {
                FieldMode::Skip
            } else if meta.path.is_ident("other") {
                FieldMode::Opaque
            } else {
                return Err(meta.error(
                    "unsupported #[fake] attribute on a field, expected `skip` or `other`",
                ));
            };
            if mode != FieldMode::Slot && mode != requested {
                return Err(meta.error("`skip` and `other` cannot be combined"));
            }
            mode = requested;
            Ok(())
        })?;
    }

    Ok(mode)
}
