//! Personal and small-business finance ledger.
//!
//! Accounts, contacts, projects, categories, transactions, invoices and bills
//! live in a [`Ledger`](domain::ledger::Ledger) snapshot. Every change goes
//! through a [`Command`](common::command::Command) applied by the
//! [`Processor`](worker::processor::Processor), which keeps account balances
//! and invoice/bill statuses consistent with the transaction log.
pub mod app;
pub mod common;
pub mod domain;
pub mod io;
pub mod worker;
