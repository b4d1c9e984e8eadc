//! # fluent-faker-derive
//!
//! Derive macros generating runtime field descriptors for fluent-faker:
//! - `#[derive(Entity)]`: schema and field accessors for structs with named fields
//! - `#[derive(FakeEnum)]`: index-based field accessor for fieldless enums
//!
//! Use them through the `fluent_faker` crate, which re-exports both.

use proc_macro::TokenStream;

mod entity;
mod fake_enum;

/// Implement `fluent_faker::Entity` for a struct with named fields
///
/// The struct must also implement `Default`. Attributes:
/// - `#[fake(name = "Company")]` on the struct overrides the entity name,
///   and with it the `<name>_id` foreign key other types use
/// - `#[fake(skip)]` on a field hides it from rules and include paths
/// - `#[fake(other)]` on a field whose type has no `FieldSlot` lists it
///   with `FieldKind::Other` and leaves it at its default value
#[proc_macro_derive(Entity, attributes(fake))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive_entity_impl(input)
}

/// Implement `fluent_faker::FieldSlot` for a fieldless enum
#[proc_macro_derive(FakeEnum)]
pub fn derive_fake_enum(input: TokenStream) -> TokenStream {
    fake_enum::derive_fake_enum_impl(input)
}
