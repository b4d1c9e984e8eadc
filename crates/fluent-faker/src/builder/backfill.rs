//! Identifier back-fill between linked entities
//!
//! Two conventions link an owner to a related value:
//! - the related type points at its owner through the owner's foreign key
//!   field (`Department.company_id` for an owning `Company`)
//! - the owner points at a single related value through `<member>_id`
//!   (`User.company_id` for `User.company`)
//!
//! A missing identifier or convention field means there is nothing to link.

use crate::entity::{Entity, Related};
use crate::error::FakerResult;

/// Identifier field shared by every linkable entity
pub const ID_FIELD: &str = "id";

/// Copy `owner.id` into the owner's foreign key on every related entity
pub fn link_to_owner(owner: &dyn Entity, related: &mut Related) -> FakerResult<()> {
    let Some(id) = owner.value_of(ID_FIELD) else {
        return Ok(());
    };
    let foreign_key = owner.schema().foreign_key();

    for entity in related.entities_mut() {
        if entity.schema().has_field(foreign_key) {
            tracing::trace!("{}.{} = {}", entity.schema().name(), foreign_key, id);
            entity.set_value(foreign_key, id.clone())?;
        }
    }
    Ok(())
}

/// Copy the id of a single related entity into `owner.<member>_id`
pub fn link_member(owner: &mut dyn Entity, member: &str, related: &Related) -> FakerResult<()> {
    let Some(id) = related.single().and_then(|entity| entity.value_of(ID_FIELD)) else {
        return Ok(());
    };
    let member_key = format!("{}_{}", member, ID_FIELD);

    if owner.schema().has_field(&member_key) {
        tracing::trace!("{}.{} = {}", owner.schema().name(), member_key, id);
        owner.set_value(&member_key, id)?;
    }
    Ok(())
}
