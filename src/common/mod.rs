pub mod command;
pub mod date;
pub mod error;
pub mod money;
