use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    common::{error::EntityKind, money::Money},
    domain::{
        document::{Document, DocumentStatus},
        entity::Entity,
    },
};

/// Money we owe a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    #[serde(alias = "billNumber")]
    pub number: String,
    pub contact_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub amount: Money,
    #[serde(with = "crate::common::date")]
    pub issue_date: NaiveDate,
    #[serde(with = "crate::common::date")]
    pub due_date: NaiveDate,
    pub status: DocumentStatus,
    #[serde(default)]
    pub description: String,
}

impl Entity for Bill {
    const KIND: EntityKind = EntityKind::Bill;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Document for Bill {
    fn status(&self) -> DocumentStatus {
        self.status
    }

    fn set_status(&mut self, status: DocumentStatus) {
        self.status = status;
    }
}
