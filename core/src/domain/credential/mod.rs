pub mod services;
pub mod value_objects;

pub use services::resolve_credential;
pub use value_objects::Credential;
