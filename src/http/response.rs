//! HTTP response building module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

/// Build a complete response with a static body
///
/// `server_name` is sent as the `Server` header when non-empty.
pub fn build_text_response(
    status: StatusCode,
    content_type: &str,
    body: &'static str,
    server_name: &str,
) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", body.len());

    if !server_name.is_empty() {
        builder = builder.header("Server", server_name);
    }

    builder
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            fallback_response(status, content_type, body)
        })
}

/// Same response without the configurable headers
fn fallback_response(
    status: StatusCode,
    content_type: &str,
    body: &'static str,
) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
    *resp.status_mut() = status;
    if let Ok(value) = hyper::header::HeaderValue::from_str(content_type) {
        resp.headers_mut().insert(hyper::header::CONTENT_TYPE, value);
    }
    resp
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
