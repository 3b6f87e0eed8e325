pub mod account;
pub mod add_transaction;
pub mod delete_transaction;
pub mod records;
