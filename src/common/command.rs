use serde::{Deserialize, Serialize};

use crate::domain::{
    account::Account,
    bill::Bill,
    directory::{Category, Contact, Project},
    invoice::Invoice,
    ledger::Ledger,
    transaction::Transaction,
};

/// A single request to change the ledger. Payloads are complete entities or
/// ids; there are no partial updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "payload")]
pub enum Command {
    AddTransaction(Transaction),
    DeleteTransaction(String),

    AddAccount(Account),
    UpdateAccount(Account),
    DeleteAccount(String),

    AddContact(Contact),
    UpdateContact(Contact),
    DeleteContact(String),

    AddProject(Project),
    UpdateProject(Project),
    DeleteProject(String),

    AddCategory(Category),
    UpdateCategory(Category),
    DeleteCategory(String),

    AddInvoice(Invoice),
    UpdateInvoice(Invoice),
    DeleteInvoice(String),

    AddBill(Bill),
    UpdateBill(Bill),
    DeleteBill(String),

    /// Replaces the whole ledger without validation.
    LoadSnapshot(Ledger),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddTransaction(_) => "AddTransaction",
            Self::DeleteTransaction(_) => "DeleteTransaction",
            Self::AddAccount(_) => "AddAccount",
            Self::UpdateAccount(_) => "UpdateAccount",
            Self::DeleteAccount(_) => "DeleteAccount",
            Self::AddContact(_) => "AddContact",
            Self::UpdateContact(_) => "UpdateContact",
            Self::DeleteContact(_) => "DeleteContact",
            Self::AddProject(_) => "AddProject",
            Self::UpdateProject(_) => "UpdateProject",
            Self::DeleteProject(_) => "DeleteProject",
            Self::AddCategory(_) => "AddCategory",
            Self::UpdateCategory(_) => "UpdateCategory",
            Self::DeleteCategory(_) => "DeleteCategory",
            Self::AddInvoice(_) => "AddInvoice",
            Self::UpdateInvoice(_) => "UpdateInvoice",
            Self::DeleteInvoice(_) => "DeleteInvoice",
            Self::AddBill(_) => "AddBill",
            Self::UpdateBill(_) => "UpdateBill",
            Self::DeleteBill(_) => "DeleteBill",
            Self::LoadSnapshot(_) => "LoadSnapshot",
        }
    }
}
