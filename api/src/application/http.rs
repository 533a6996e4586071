pub mod diagnostic;
pub mod health;
pub mod history;
pub mod server;
