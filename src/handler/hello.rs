//! Fixed-response handler

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Body sent for every request
pub const GREETING_BODY: &str = "Hello, TypeScript with Node.js!\n";

pub const CONTENT_TYPE: &str = "text/plain";

/// Main entry point for HTTP request handling
///
/// The request is only inspected for the access log; the method, path,
/// headers and body never change the response.
#[allow(clippy::unused_async)]
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let response = http::build_text_response(
        StatusCode::OK,
        CONTENT_TYPE,
        GREETING_BODY,
        &state.config.http.server_name,
    );

    if state.access_log_enabled() {
        let mut entry = AccessLogEntry::from_request(&req, peer);
        entry.status = response.status().as_u16();
        entry.body_bytes = GREETING_BODY.len();
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}
