use fluent_faker::{Entity, FluentFaker};

#[derive(Debug, Default, Entity)]
struct Company {
    id: i32,
    name: String,
    departments: Vec<Department>,
    billing_address: Option<Box<Address>>,
}

#[derive(Debug, Default, Entity)]
struct Department {
    id: i32,
    company_id: i32,
}

#[derive(Debug, Default, Entity)]
struct Address {
    id: i64,
    street: Option<String>,
}

fn main() {
    let _ = FluentFaker::<Company>::new()
        .include("departments")
        .and_then(|faker| faker.include("billing_address"));
}
