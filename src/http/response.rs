//! HTTP response building module
//!
//! Maps orchestrator output onto hyper responses.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::app;

/// Bodies starting with this marker are served as HTML
pub const HTML_MARKER: &str = "<!DOCTYPE html>";

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Content type by prefix sniffing: HTML only for a literal doctype
pub fn content_type_for(body: &str) -> &'static str {
    if body.starts_with(HTML_MARKER) {
        HTML_CONTENT_TYPE
    } else {
        TEXT_CONTENT_TYPE
    }
}

/// Build the response for a handled request
pub fn build_app_response(
    response: app::Response,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let status = response.status.code();
    let content_type = content_type_for(&response.body);
    let content_length = response.body.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(response.body)
    };

    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Server", server_name)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(&status.to_string(), &e);
            fallback()
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", TEXT_CONTENT_TYPE)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Plain 500 used when the builder itself fails
fn fallback() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from("500 Internal Server Error")));
    *response.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
    response
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
