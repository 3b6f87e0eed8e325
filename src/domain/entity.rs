use crate::common::error::EntityKind;

/// Anything stored in one of the ledger's id-keyed collections.
pub trait Entity {
    const KIND: EntityKind;

    fn id(&self) -> &str;
}
