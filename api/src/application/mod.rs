pub mod api_key;
pub mod http;
pub mod logging;
