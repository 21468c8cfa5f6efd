//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Startup banner and shutdown logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::{Config, LogLevel};
use std::net::SocketAddr;

/// Threshold used before `init` runs
const DEFAULT_LEVEL: LogLevel = LogLevel::Info;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
        config.logging.level,
    )
}

/// Whether `logging.level` lets a message of severity `level` through
fn enabled(level: LogLevel) -> bool {
    match writer::get() {
        Some(w) => w.enabled(level),
        None => DEFAULT_LEVEL.allows(level),
    }
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Lines printed once the listener is bound. Only one of them names the port.
pub fn startup_banner(addr: &SocketAddr, config: &Config) -> Vec<String> {
    let mut lines = vec![
        "======================================".to_string(),
        "Server started successfully".to_string(),
        format!("Server is running on http://{addr}"),
        format!("Log level: {}", config.logging.level),
    ];
    if let Some(workers) = config.server.workers {
        lines.push(format!("Worker threads: {workers}"));
    }
    if config.logging.access_log {
        let target = config.logging.access_log_file.as_deref().unwrap_or("stdout");
        lines.push(format!(
            "Access log: {target} ({})",
            config.logging.access_log_format
        ));
    }
    if let Some(ref path) = config.logging.error_log_file {
        lines.push(format!("Error log: {path}"));
    }
    if let Some(max) = config.performance.max_connections {
        lines.push(format!("Max connections: {max}"));
    }
    lines.push("======================================\n".to_string());
    lines
}

/// Written regardless of `logging.level`
pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    for line in startup_banner(addr, config) {
        write_info(&line);
    }
}

pub fn log_info(message: &str) {
    if enabled(LogLevel::Info) {
        write_info(message);
    }
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    if enabled(LogLevel::Error) {
        write_error(&format!("[ERROR] {message}"));
    }
}

pub fn log_warning(message: &str) {
    if enabled(LogLevel::Warn) {
        write_error(&format!("[WARN] {message}"));
    }
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

/// Written regardless of `logging.level`
pub fn log_shutdown(active_connections: usize) {
    write_info(&format!(
        "[SHUTDOWN] Listener closed ({active_connections} connections still open)"
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_names_port_once() {
        let mut cfg = Config::load_from("does/not/exist/config").unwrap();
        cfg.server.workers = Some(4);
        cfg.performance.max_connections = Some(3000);
        let addr: SocketAddr = "127.0.0.1:3000".parse().unwrap();

        let banner = startup_banner(&addr, &cfg);
        let mentions: Vec<_> = banner
            .iter()
            .filter(|line| line.contains("127.0.0.1:3000"))
            .collect();
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0], "Server is running on http://127.0.0.1:3000");
        assert!(banner.contains(&"Worker threads: 4".to_string()));
    }

    #[test]
    fn test_banner_without_access_log() {
        let mut cfg = Config::load_from("does/not/exist/config").unwrap();
        cfg.logging.access_log = false;
        let addr: SocketAddr = "0.0.0.0:8081".parse().unwrap();

        let banner = startup_banner(&addr, &cfg);
        assert!(banner.iter().all(|line| !line.starts_with("Access log")));
        assert!(banner.iter().any(|line| line.ends_with("0.0.0.0:8081")));
    }
}
