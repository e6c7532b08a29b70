//! HTTP protocol layer module
//!
//! Path decoding and response building, kept apart from the MVC core so the
//! core stays transport-agnostic.

pub mod decode;
pub mod response;

// Re-export commonly used items
pub use decode::decode_path;
pub use response::{
    build_405_response, build_app_response, build_options_response, content_type_for,
};
