pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod server_state;

pub use routes::app;
