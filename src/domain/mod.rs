pub mod account;
pub mod bill;
pub mod directory;
pub mod document;
pub mod entity;
pub mod invoice;
pub mod ledger;
pub mod report;
pub mod transaction;
