//! Informational records a transaction can point at: who it was with, what
//! it was for, and how it is classified. None of these affect balances.
use serde::{Deserialize, Serialize};

use crate::{common::error::EntityKind, domain::entity::Entity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    Owner,
    Tenant,
    #[serde(alias = "Vendor/Supplier")]
    Vendor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ContactKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

impl Entity for Contact {
    const KIND: EntityKind = EntityKind::Contact;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Project {
    const KIND: EntityKind = EntityKind::Project;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Category {
    const KIND: EntityKind = EntityKind::Category;

    fn id(&self) -> &str {
        &self.id
    }
}
