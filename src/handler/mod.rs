//! Request handler module
//!
//! Every request, whatever its method, path or body, gets the same
//! plain-text greeting.

pub mod hello;

// Re-export main entry point
pub use hello::{handle_request, CONTENT_TYPE, GREETING_BODY};
