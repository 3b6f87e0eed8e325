use crate::{
    common::{command::Command, error::LedgerError},
    domain::ledger::Ledger,
    worker::handlers::{account, add_transaction, delete_transaction, records},
};

/// Applies commands to ledger snapshots.
///
/// `apply` never touches the snapshot it is given. Handlers run against a
/// private copy which is returned only if every step succeeded, so a
/// rejected command leaves nothing behind.
#[derive(Debug, Default)]
pub struct Processor {}

impl Processor {
    pub fn new() -> Self {
        Self {}
    }

    pub fn apply(&self, ledger: &Ledger, command: Command) -> Result<Ledger, LedgerError> {
        let mut next = ledger.clone();
        Self::dispatch(&mut next, command)?;
        Ok(next)
    }

    fn dispatch(ledger: &mut Ledger, command: Command) -> Result<(), LedgerError> {
        match command {
            Command::AddTransaction(tx) => add_transaction::handle(ledger, tx),
            Command::DeleteTransaction(id) => delete_transaction::handle(ledger, &id),

            Command::AddAccount(acc) => records::insert(&mut ledger.accounts, acc),
            Command::UpdateAccount(acc) => account::update(ledger, acc),
            Command::DeleteAccount(id) => account::delete(ledger, &id),

            Command::AddContact(c) => records::insert(&mut ledger.contacts, c),
            Command::UpdateContact(c) => records::replace(&mut ledger.contacts, c),
            Command::DeleteContact(id) => records::remove(&mut ledger.contacts, &id).map(drop),

            Command::AddProject(p) => records::insert(&mut ledger.projects, p),
            Command::UpdateProject(p) => records::replace(&mut ledger.projects, p),
            Command::DeleteProject(id) => records::remove(&mut ledger.projects, &id).map(drop),

            Command::AddCategory(c) => records::insert(&mut ledger.categories, c),
            Command::UpdateCategory(c) => records::replace(&mut ledger.categories, c),
            Command::DeleteCategory(id) => {
                records::remove(&mut ledger.categories, &id).map(drop)
            }

            Command::AddInvoice(inv) => records::insert(&mut ledger.invoices, inv),
            Command::UpdateInvoice(inv) => records::replace(&mut ledger.invoices, inv),
            Command::DeleteInvoice(id) => records::remove(&mut ledger.invoices, &id).map(drop),

            Command::AddBill(bill) => records::insert(&mut ledger.bills, bill),
            Command::UpdateBill(bill) => records::replace(&mut ledger.bills, bill),
            Command::DeleteBill(id) => records::remove(&mut ledger.bills, &id).map(drop),

            Command::LoadSnapshot(snapshot) => {
                *ledger = snapshot;
                Ok(())
            }
        }
    }
}
