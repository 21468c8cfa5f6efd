//! A plain-text greeting server and the typed person records it greets.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod person;
pub mod server;
