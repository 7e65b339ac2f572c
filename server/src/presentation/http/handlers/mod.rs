//! HTTP Handlers

pub mod health_handlers;
pub mod stream_handler;

pub use health_handlers::health_check;
pub use stream_handler::stream_handler;
