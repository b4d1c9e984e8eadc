#![allow(dead_code)]

use chrono::{DateTime, Utc};
use fluent_faker::prelude::*;
use fluent_faker::{register_descriptor, reset, set_faker_config};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Entity)]
pub struct User {
    pub id: i32,
    pub company_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub location: String,
    pub birth_date: DateTime<Utc>,
    pub is_active: bool,
    pub company: Option<Box<Company>>,
}

#[derive(Debug, Default, Entity)]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub legal_address: Option<Box<CompanyAddress>>,
    pub billing_address: Option<Box<CompanyAddress>>,
    pub departments: Vec<Department>,
}

#[derive(Debug, Default, Entity)]
pub struct CompanyAddress {
    pub id: i32,
    pub street: String,
    pub city: String,
}

#[derive(Debug, Default, Entity)]
pub struct Department {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub code: String,
}

#[derive(Default)]
pub struct UserFaker;

impl FakerDescriptor for UserFaker {
    type Target = User;

    fn configure(&self, rules: &mut RuleSet) {
        rules
            .rule_for("first_name", |f| f.first_name())
            .rule_for("last_name", |f| f.last_name())
            .rule_for("email", |f| f.email())
            .rule_for("location", |f| f.street());
    }
}

impl UserFaker {
    pub fn faker() -> FluentFaker<User> {
        FluentFaker::from_descriptor(UserFaker)
    }
}

/// Domain shortcuts on user builders
pub trait UserFakerExt {
    fn with_password(self, password: &str) -> Self;
}

impl UserFakerExt for FluentFaker<User> {
    fn with_password(self, password: &str) -> Self {
        self.rule_value("password", password)
    }
}

#[derive(Default)]
pub struct DepartmentFaker;

impl FakerDescriptor for DepartmentFaker {
    type Target = Department;

    fn configure(&self, rules: &mut RuleSet) {
        rules.rule_for("name", |f| f.company_name());
    }
}

register_descriptor!(UserFaker);
register_descriptor!(DepartmentFaker);

/// Descriptors registered in this module
pub fn fixtures_module() -> BuilderModule {
    BuilderModule::scan(module_path!())
}

/// Fresh process-wide state holding the fixture descriptors
pub fn install_fixtures() {
    reset();
    set_faker_config(FakerConfig::default()).unwrap();
    setup(FakerOptions::new().with_module(fixtures_module())).unwrap();
}

/// Clear everything a test installed
pub fn teardown() {
    reset();
    set_faker_config(FakerConfig::default()).unwrap();
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
