//! Request handler module
//!
//! Bridges hyper requests to the MVC application.

pub mod request;

// Re-export main entry point
pub use request::handle_request;
