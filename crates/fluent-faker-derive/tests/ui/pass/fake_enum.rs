use fluent_faker::{Entity, FakeEnum};

#[derive(Debug, Default, Clone, Copy, PartialEq, FakeEnum)]
enum Plan {
    #[default]
    Free,
    Team,
    Enterprise = 10,
}

#[derive(Debug, Default, Entity)]
struct Subscription {
    id: i32,
    plan: Plan,
}

fn main() {
    let _ = Subscription::describe();
}
