//! Request entry point
//!
//! Method validation, path decoding, and handing the decoded path to the
//! application on the blocking pool (views are read with `std::fs`).

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};

use crate::app::{self, StatusClass};
use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let raw_path = req.uri().path().to_string();

    let response = respond(&method, &raw_path, &state).await;

    if state.access_log_enabled() {
        let mut entry = AccessLogEntry::new(peer_addr.to_string(), method.to_string(), raw_path);
        entry.query = req.uri().query().map(ToString::to_string);
        entry.http_version = http_version(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        entry.referer = header(&req, "referer");
        entry.user_agent = header(&req, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Produce the response for `method` + undecoded `raw_path`
pub async fn respond(
    method: &Method,
    raw_path: &str,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    // 1. Check HTTP method
    if let Some(resp) = check_http_method(method, state.config.http.enable_cors) {
        return resp;
    }

    // 2. Decode once, then run the pipeline
    let path = http::decode_path(raw_path);
    let application = Arc::clone(&state.app);
    let outcome = tokio::task::spawn_blocking(move || application.handle_request(&path)).await;

    let response = outcome.unwrap_or_else(|e| {
        logger::log_error(&format!("Request worker failed for '{raw_path}': {e}"));
        app::Response {
            body: "500 Internal Server Error: request worker failed".to_string(),
            status: StatusClass::ServerError,
        }
    });

    http::build_app_response(
        response,
        &state.config.http.server_name,
        *method == Method::HEAD,
    )
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn header(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

const fn http_version(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::config::Config;
    use crate::controller_manifest;
    use crate::mvc::{ActionResponse, ActionTable, Arity, Context, Controller};
    use crate::template::Renderer;
    use http_body_util::BodyExt;

    #[derive(Default)]
    struct HomeController;

    impl Controller for HomeController {
        fn actions(self: Arc<Self>) -> ActionTable {
            ActionTable::bind(self)
                .action("greet", Arity::optional(1), |_, _, args| {
                    let name = args.first().map_or("Guest", String::as_str);
                    Ok(ActionResponse::new(
                        "greet.html",
                        Context::new().with("name", name),
                    ))
                })
                .finish()
        }
    }

    fn state(dir: &tempfile::TempDir) -> Arc<AppState> {
        std::fs::write(dir.path().join("greet.html"), "<!DOCTYPE html>Hello {{ name }}").unwrap();
        let config = Config::load_from("does-not-exist/config").unwrap();
        let app = App::new(controller_manifest![HomeController], Renderer::new(dir.path()));
        Arc::new(AppState::with_app(&config, app))
    }

    async fn body_text(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_decodes_before_routing() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        let response = respond(&Method::GET, "/home/greet/J%C3%BCrgen", &state).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Type"], "text/html; charset=utf-8");
        assert_eq!(body_text(response).await, "<!DOCTYPE html>Hello Jürgen");
    }

    #[tokio::test]
    async fn test_not_found_is_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        let response = respond(&Method::GET, "/blog", &state).await;
        assert_eq!(response.status(), 404);
        assert_eq!(response.headers()["Content-Type"], "text/plain; charset=utf-8");
        assert!(body_text(response).await.starts_with("404 Not Found: "));
    }

    #[tokio::test]
    async fn test_head_has_empty_body() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        let response = respond(&Method::HEAD, "/home/greet", &state).await;
        assert_eq!(response.status(), 200);
        assert!(body_text(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_other_methods() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        assert_eq!(respond(&Method::POST, "/", &state).await.status(), 405);
        assert_eq!(respond(&Method::OPTIONS, "/", &state).await.status(), 204);
    }
}
