//! Status propagation for settled invoices and bills.
//!
//! Applying a settling transaction marks its document `Paid`; revoking it
//! marks the document `Unpaid`, whatever the status was before payment.
use std::collections::HashMap;

use crate::{
    domain::{
        document::{Document, DocumentStatus},
        ledger::Ledger,
        transaction::Settlement,
    },
    worker::effects::Direction,
};

pub fn settled_status(direction: Direction) -> DocumentStatus {
    match direction {
        Direction::Apply => DocumentStatus::Paid,
        Direction::Revoke => DocumentStatus::Unpaid,
    }
}

/// Updates the document named by `settlement`. A document that no longer
/// exists is skipped.
pub fn propagate(ledger: &mut Ledger, settlement: &Settlement, direction: Direction) {
    match settlement {
        Settlement::Invoice(id) => set_status(&mut ledger.invoices, id, direction),
        Settlement::Bill(id) => set_status(&mut ledger.bills, id, direction),
    }
}

fn set_status<D: Document>(docs: &mut HashMap<String, D>, id: &str, direction: Direction) {
    match docs.get_mut(id) {
        Some(doc) => doc.set_status(settled_status(direction)),
        None => tracing::debug!("settled {} \"{id}\" no longer exists", D::KIND),
    }
}
