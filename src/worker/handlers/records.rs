use std::collections::HashMap;

use crate::{common::error::LedgerError, domain::entity::Entity};

pub fn insert<T: Entity>(map: &mut HashMap<String, T>, entity: T) -> Result<(), LedgerError> {
    let id = entity.id();
    if id.trim().is_empty() {
        return Err(LedgerError::Validation(format!("{} id is empty", T::KIND)));
    }
    if map.contains_key(id) {
        return Err(LedgerError::duplicate(T::KIND, id));
    }
    map.insert(id.to_string(), entity);
    Ok(())
}

pub fn replace<T: Entity>(map: &mut HashMap<String, T>, entity: T) -> Result<(), LedgerError> {
    match map.get_mut(entity.id()) {
        Some(slot) => {
            *slot = entity;
            Ok(())
        }
        None => Err(LedgerError::not_found(T::KIND, entity.id())),
    }
}

pub fn remove<T: Entity>(map: &mut HashMap<String, T>, id: &str) -> Result<T, LedgerError> {
    map.remove(id).ok_or_else(|| LedgerError::not_found(T::KIND, id))
}
