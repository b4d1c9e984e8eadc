//! # fluent-faker - Graph-Aware Fake Object Builder
//!
//! Generates populated object graphs for tests. Scalar fields are randomized
//! from per-type rule sets; navigation fields (a single related object or a
//! collection of them) are materialized along declared include paths and
//! linked by identifier back-fill.
//!
//! ## Features
//!
//! - **Derived introspection**: `#[derive(Entity)]` describes a struct's fields once per type
//! - **Default rules**: every scalar field gets a generator inferred from its type
//! - **Builder descriptors**: per-type rules registered once and used wherever that type is built
//! - **Include paths**: `"company.billing_address"` chains build and link related values
//! - **Identifier back-fill**: `department.company_id` follows `company.id`
//! - **Seeding**: deterministic graphs from `FakerConfig::seed`
//!
//! ## Quick Start
//!
//! ```rust
//! use fluent_faker::prelude::*;
//!
//! #[derive(Debug, Default, Entity)]
//! struct User {
//!     id: i32,
//!     email: String,
//!     password: String,
//!     company_id: Option<i32>,
//!     company: Option<Box<Company>>,
//! }
//!
//! #[derive(Debug, Default, Entity)]
//! struct Company {
//!     id: i32,
//!     name: String,
//! }
//!
//! #[derive(Default)]
//! struct UserFaker;
//!
//! impl FakerDescriptor for UserFaker {
//!     type Target = User;
//!
//!     fn configure(&self, rules: &mut RuleSet) {
//!         rules.rule_for("email", |f| f.email());
//!     }
//! }
//!
//! setup(FakerOptions::new().with_module(BuilderModule::new("fixtures").with(UserFaker)))?;
//!
//! let users = FluentFaker::<User>::new()
//!     .rule_value("password", "Pa$$wOrd!")
//!     .include("company")?
//!     .build_many(3)?;
//!
//! for user in &users {
//!     assert!(user.email.contains('@'));
//!     assert_eq!(user.company_id, user.company.as_ref().map(|c| c.id));
//! }
//! # Ok::<(), fluent_faker::FakerError>(())
//! ```

extern crate self as fluent_faker;

pub mod builder;
pub mod config;
pub mod entity;
pub mod error;
pub mod faker;
pub mod path;
pub mod registry;
pub mod rules;
pub mod source;
pub mod value;

// Re-export commonly used types
pub use builder::GraphBuilder;
pub use config::{faker_config, set_faker_config, FakerConfig};
pub use entity::{
    Entity, EntityRef, EntitySchema, FieldInfo, FieldKind, FieldSlot, Opaque, Related,
};
pub use error::{FakerError, FakerResult};
pub use faker::FluentFaker;
pub use fluent_faker_derive::{Entity, FakeEnum};
pub use path::{IncludePath, PathStep};
pub use registry::{
    registry, reset, setup, BuilderModule, BuilderRegistry, ErasedDescriptor, FakerDescriptor,
    FakerOptions,
};
pub use rules::{Rule, RuleSet};
pub use source::{RandomSource, ValueSource};
pub use value::Value;

#[doc(hidden)]
pub use inventory;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        register_descriptor, setup, BuilderModule, Entity, FakeEnum, FakerConfig, FakerDescriptor,
        FakerError, FakerOptions, FakerResult, FluentFaker, RuleSet, ValueSource,
    };
}
