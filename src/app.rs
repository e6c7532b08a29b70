//! Request orchestration
//!
//! The only place where typed failures turn into the two visible error
//! classes. Everything upstream returns `Result`s; everything downstream
//! (the HTTP layer) only sees a body and a [`StatusClass`].

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;

use crate::error::AppError;
use crate::logger;
use crate::mvc::{dispatch, route, ControllerDefinition, ControllerRegistry, RouteTarget};
use crate::template::Renderer;

/// Externally visible outcome of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Ok,
    NotFound,
    ServerError,
}

impl StatusClass {
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::NotFound => 404,
            Self::ServerError => 500,
        }
    }
}

/// Rendered body plus its status class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub body: String,
    pub status: StatusClass,
}

impl Response {
    fn ok(body: String) -> Self {
        Self {
            body,
            status: StatusClass::Ok,
        }
    }

    fn from_error(err: &AppError) -> Self {
        if err.is_not_found() {
            Self {
                body: format!("404 Not Found: {err}"),
                status: StatusClass::NotFound,
            }
        } else {
            Self {
                body: format!("500 Internal Server Error: {err}"),
                status: StatusClass::ServerError,
            }
        }
    }
}

/// Router, registry and renderer wired into one pipeline
pub struct App {
    definitions: Vec<ControllerDefinition>,
    registry: ArcSwap<ControllerRegistry>,
    renderer: Renderer,
    reload_lock: Mutex<()>,
}

impl App {
    pub fn new(definitions: Vec<ControllerDefinition>, renderer: Renderer) -> Self {
        let registry = ControllerRegistry::discover(&definitions);
        Self {
            definitions,
            registry: ArcSwap::from_pointee(registry),
            renderer,
            reload_lock: Mutex::new(()),
        }
    }

    /// Current registry snapshot
    pub fn registry(&self) -> Arc<ControllerRegistry> {
        self.registry.load_full()
    }

    /// Route, dispatch and render `path` (already percent-decoded)
    pub fn handle_request(&self, path: &str) -> Response {
        let target = route(path);
        let registry = self.registry.load_full();

        match self.run(&target, &registry) {
            Ok(body) => {
                logger::log_debug(&format!(
                    "{path} -> {}.{} ({} bytes)",
                    target.controller,
                    target.method,
                    body.len()
                ));
                Response::ok(body)
            }
            Err(err) => {
                let message = format!(
                    "{err} [path={path}, controller={}, method={}, args={:?}]",
                    target.controller, target.method, target.args
                );
                if err.is_not_found() {
                    logger::log_warning(&message);
                } else {
                    logger::log_error(&message);
                }
                Response::from_error(&err)
            }
        }
    }

    /// Rebuild the registry and swap it in. Requests already running keep
    /// the snapshot they loaded.
    pub fn reload(&self) -> usize {
        let _guard = self.reload_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let registry = ControllerRegistry::discover(&self.definitions);
        let count = registry.len();
        self.registry.store(Arc::new(registry));
        self.renderer.clear_cache();
        logger::log_info(&format!("[Reload] Registry rebuilt with {count} controller(s)"));
        count
    }

    fn run(&self, target: &RouteTarget, registry: &ControllerRegistry) -> Result<String, AppError> {
        let (view, context) = dispatch(target, registry, &self.renderer)?;
        Ok(self.renderer.render(&view, &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller_manifest;
    use crate::mvc::{ActionResponse, ActionTable, Arity, Context, Controller};
    use std::fs;

    #[derive(Default)]
    struct HomeController;

    impl Controller for HomeController {
        fn actions(self: Arc<Self>) -> ActionTable {
            ActionTable::bind(self)
                .action("index", Arity::NONE, |_, _, _| {
                    Ok(ActionResponse::new(
                        "home/index.html",
                        Context::new().with("title", "T"),
                    ))
                })
                .action("missing", Arity::NONE, |_, _, _| {
                    Ok(ActionResponse::new("home/missing.html", Context::new()))
                })
                .action("nested", Arity::exact(1), |_, renderer, args| {
                    let inner = renderer.render_path(
                        "home/card.html",
                        &Context::new().with("name", args[0].as_str()),
                    )?;
                    Ok(ActionResponse::new(
                        "home/wrap.html",
                        Context::new().with_html("card", inner),
                    ))
                })
                .finish()
        }
    }

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("home")).unwrap();
        fs::write(
            dir.path().join("home/index.html"),
            "<!DOCTYPE html><h1>{{ title }}</h1>",
        )
        .unwrap();
        fs::write(dir.path().join("home/card.html"), "<b>{{ name }}</b>").unwrap();
        fs::write(dir.path().join("home/wrap.html"), "<div>{{ card }}</div>").unwrap();
        let app = App::new(
            controller_manifest![HomeController],
            Renderer::new(dir.path()),
        );
        (dir, app)
    }

    #[test]
    fn test_end_to_end_root() {
        let (_dir, app) = app();
        let response = app.handle_request("/");
        assert_eq!(response.status, StatusClass::Ok);
        assert_eq!(response.body, "<!DOCTYPE html><h1>T</h1>");
        assert_eq!(app.handle_request("/home/index"), response);
    }

    #[test]
    fn test_not_found_details_differ() {
        let (_dir, app) = app();
        let controller = app.handle_request("/nonexistent/method");
        let method = app.handle_request("/home/nonexistent_method");

        assert_eq!(controller.status, StatusClass::NotFound);
        assert_eq!(method.status, StatusClass::NotFound);
        assert!(controller.body.starts_with("404 Not Found: "));
        assert!(controller.body.contains("nonexistent"));
        assert!(method.body.contains("nonexistent_method"));
        assert!(controller.body.contains("Controller"));
        assert!(method.body.contains("Method"));
    }

    #[test]
    fn test_server_errors() {
        let (_dir, app) = app();
        let missing_view = app.handle_request("/home/missing");
        assert_eq!(missing_view.status, StatusClass::ServerError);
        assert!(missing_view
            .body
            .starts_with("500 Internal Server Error: View 'home/missing.html' not found"));

        let bad_args = app.handle_request("/home/index/extra");
        assert_eq!(bad_args.status, StatusClass::ServerError);
        assert!(bad_args.body.contains("Invalid arguments"));
    }

    #[test]
    fn test_nested_render_through_callback() {
        let (_dir, app) = app();
        let response = app.handle_request("/home/nested/Ada");
        assert_eq!(response.status, StatusClass::Ok);
        assert_eq!(response.body, "<div><b>Ada</b></div>");
    }

    #[test]
    fn test_reload_swaps_registry() {
        let (_dir, app) = app();
        let before = app.registry();
        assert_eq!(app.reload(), 1);
        let after = app.registry();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.names(), vec!["home"]);
        // A snapshot taken before the reload stays usable
        assert!(before.get("home").and_then(|actions| actions.get("index")).is_some());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(StatusClass::Ok.code(), 200);
        assert_eq!(StatusClass::NotFound.code(), 404);
        assert_eq!(StatusClass::ServerError.code(), 500);
    }
}
