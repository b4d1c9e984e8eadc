use chrono::{DateTime, Utc};
use fluent_faker::{Entity, FakeEnum, FieldKind, FieldSlot, FluentFaker, Value};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Default, Clone, Copy, PartialEq, FakeEnum)]
enum Status {
    #[default]
    Pending,
    Shipped,
    Delivered,
}

#[derive(Debug, Default, Entity)]
struct Order {
    id: i64,
    customer_id: Option<i32>,
    reference: Uuid,
    total: Decimal,
    weight: f64,
    gift: bool,
    status: Status,
    note: Option<String>,
    placed_at: DateTime<Utc>,
    customer: Option<Box<Customer>>,
    lines: Vec<OrderLine>,
    #[fake(skip)]
    audit_log: Vec<String>,
}

#[derive(Debug, Default, Entity)]
struct Customer {
    id: i32,
    name: String,
}

#[derive(Debug, Default, Entity)]
#[fake(name = "Line")]
struct OrderLine {
    id: i32,
    order_id: i64,
}

#[derive(Debug, Default, Entity)]
struct Sensor {
    id: i32,
    label: String,
    reading: u32,
    calibration: Option<i16>,
    #[fake(other)]
    tags: Vec<String>,
    #[fake(other)]
    mode: Option<Status>,
}

#[test]
fn test_schema_lists_fields_in_declaration_order() {
    let schema = Order::describe();
    let names: Vec<&str> = schema.fields().iter().map(|field| field.name).collect();

    assert_eq!(
        names,
        vec![
            "id",
            "customer_id",
            "reference",
            "total",
            "weight",
            "gift",
            "status",
            "note",
            "placed_at",
            "customer",
            "lines"
        ]
    );
    assert_eq!(schema.name(), "Order");
    assert_eq!(schema.foreign_key(), "order_id");
}

#[test]
fn test_field_kinds() {
    let schema = Order::describe();
    let kind = |name: &str| schema.field(name).map(|field| field.kind);

    assert_eq!(kind("id"), Some(FieldKind::Int64));
    assert_eq!(kind("customer_id"), Some(FieldKind::Int32));
    assert_eq!(kind("reference"), Some(FieldKind::Uuid));
    assert_eq!(kind("total"), Some(FieldKind::Decimal));
    assert_eq!(kind("weight"), Some(FieldKind::Double));
    assert_eq!(kind("gift"), Some(FieldKind::Bool));
    assert_eq!(kind("note"), Some(FieldKind::Text));
    assert_eq!(kind("placed_at"), Some(FieldKind::DateTime));
    assert_eq!(
        kind("status"),
        Some(FieldKind::Enum(&["Pending", "Shipped", "Delivered"]))
    );
    assert_eq!(
        kind("customer").and_then(|kind| kind.navigation()).map(|target| target.schema().name()),
        Some("Customer")
    );
    assert!(kind("lines").map(|kind| kind.is_collection()).unwrap_or(false));
    assert_eq!(kind("audit_log"), None);
}

#[test]
fn test_name_override_changes_foreign_key() {
    let schema = OrderLine::describe();
    assert_eq!(schema.name(), "Line");
    assert_eq!(schema.foreign_key(), "line_id");
}

#[test]
fn test_generated_slots_read_and_write() {
    let mut order = Order::default();
    {
        let entity: &mut dyn Entity = &mut order;
        entity.set_value("id", Value::Int64(44)).unwrap();
        entity.set_value("status", Value::Enum(2)).unwrap();
        entity.set_value("note", Value::from("fragile")).unwrap();
        assert!(entity.slot("audit_log").is_none());
        assert!(entity.slot("customer").map(|slot| slot.is_unset()).unwrap_or(false));
    }

    assert_eq!(order.id, 44);
    assert_eq!(order.status, Status::Delivered);
    assert_eq!(order.note.as_deref(), Some("fragile"));
}

#[test]
fn test_fake_enum_slot() {
    let mut status = Status::Pending;
    assert_eq!(status.get(), Some(Value::Enum(0)));
    status.set(Value::Enum(1)).unwrap();
    assert_eq!(status, Status::Shipped);
    assert_eq!(status.set(Value::Enum(3)), Err(Value::Enum(3)));
    assert_eq!(status.set(Value::Int32(1)), Err(Value::Int32(1)));
}

#[test]
fn test_fields_without_rules_are_listed_and_left_unset() {
    let schema = Sensor::describe();
    let kind = |name: &str| schema.field(name).map(|field| field.kind);
    assert_eq!(schema.fields().len(), 6);
    for name in ["reading", "calibration", "tags", "mode"] {
        assert_eq!(kind(name), Some(FieldKind::Other), "field {}", name);
    }

    let sensor = FluentFaker::<Sensor>::new().build().unwrap();
    assert!(sensor.id >= 1);
    assert!(!sensor.label.is_empty());
    assert_eq!(sensor.reading, 0);
    assert_eq!(sensor.calibration, None);
    assert!(sensor.tags.is_empty());
    assert_eq!(sensor.mode, None);
}

#[test]
fn test_fields_without_rules_accept_explicit_values() {
    let sensor = FluentFaker::<Sensor>::new()
        .rule_value("reading", 42)
        .rule_value("calibration", -3)
        .build()
        .unwrap();
    assert_eq!(sensor.reading, 42);
    assert_eq!(sensor.calibration, Some(-3));

    let err = FluentFaker::<Sensor>::new()
        .rule_value("tags", "north")
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("tags"));
}
