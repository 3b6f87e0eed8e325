use serde::{Deserialize, Serialize};

use crate::{
    common::{error::EntityKind, money::Money},
    domain::entity::Entity,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    /// Opening balance plus the effect of every transaction on this account.
    /// Only transaction commands move it.
    pub balance: Money,
}

impl Account {
    pub fn new(id: impl Into<String>, name: impl Into<String>, balance: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance,
        }
    }
}

impl Entity for Account {
    const KIND: EntityKind = EntityKind::Account;

    fn id(&self) -> &str {
        &self.id
    }
}
