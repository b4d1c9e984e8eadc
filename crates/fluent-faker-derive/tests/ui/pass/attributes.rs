use fluent_faker::Entity;

#[derive(Debug, Default, Entity)]
#[fake(name = "Member")]
struct MemberRecord {
    id: i32,
    r#type: String,
    #[fake(skip)]
    #[allow(dead_code)]
    scratch: Vec<u8>,
    #[fake(other)]
    #[allow(dead_code)]
    aliases: Vec<String>,
}

fn main() {
    let schema = MemberRecord::describe();
    assert_eq!(schema.name(), "Member");
    assert_eq!(schema.foreign_key(), "member_id");
    assert!(schema.has_field("type"));
    assert!(!schema.has_field("scratch"));
    assert_eq!(
        schema.field("aliases").map(|field| field.kind),
        Some(fluent_faker::FieldKind::Other)
    );
}
