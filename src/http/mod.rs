//! HTTP protocol layer module
//!
//! Response construction, decoupled from the request handler.

pub mod response;

pub use response::build_text_response;
