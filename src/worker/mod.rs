pub mod effects;
pub mod handlers;
pub mod processor;
pub mod session;
pub mod settlement;
