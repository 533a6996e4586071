pub mod analysis;
pub mod common;
pub mod credential;
