use serde::{Deserialize, Serialize};

use crate::domain::entity::Entity;

/// Lifecycle of an invoice or bill. Only `Paid` and `Unpaid` are ever set by
/// the ledger itself; `Draft` and `Overdue` come from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    Draft,
    Unpaid,
    Paid,
    Overdue,
}

/// An invoice or bill: something a transaction can settle.
pub trait Document: Entity {
    fn status(&self) -> DocumentStatus;

    fn set_status(&mut self, status: DocumentStatus);
}
