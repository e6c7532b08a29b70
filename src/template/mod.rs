//! Template rendering
//!
//! Rendering a view is three steps, always in this order:
//! 1. load `<views_root>/<view>`
//! 2. expand `{{ partials/... }}` directives
//! 3. substitute `{{ name }}` placeholders from the context
//!
//! Substitution runs on the fully expanded body, so placeholders inside
//! partials are resolved against the same context.

mod cache;
pub mod partials;
pub mod placeholders;

pub use cache::ViewCache;
pub use partials::ExpansionLimitExceeded;

use std::io;
use std::path::PathBuf;

use crate::error::RenderError;
use crate::logger;
use crate::mvc::view::check_relative;
use crate::mvc::{Context, ViewReference};

/// Default cap on partial splices per render
pub const DEFAULT_MAX_PARTIAL_EXPANSIONS: usize = 1000;

/// Fallback folder for partials that are not found directly under the root
const PARTIALS_DIR: &str = "partials";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererOptions {
    pub max_partial_expansions: usize,
    pub cache: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            max_partial_expansions: DEFAULT_MAX_PARTIAL_EXPANSIONS,
            cache: false,
        }
    }
}

/// Renders views found under a fixed root directory
#[derive(Debug)]
pub struct Renderer {
    root: PathBuf,
    max_partial_expansions: usize,
    cache: ViewCache,
}

impl Renderer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_options(root, RendererOptions::default())
    }

    pub fn with_options(root: impl Into<PathBuf>, options: RendererOptions) -> Self {
        Self {
            root: root.into(),
            max_partial_expansions: options.max_partial_expansions,
            cache: ViewCache::new(options.cache),
        }
    }

    /// Load, expand and substitute a view
    pub fn render(&self, view: &ViewReference, context: &Context) -> Result<String, RenderError> {
        let body = self.load_view(view)?;
        self.render_str(view.as_str(), &body, context)
    }

    /// Like [`Renderer::render`], validating a raw view path first
    pub fn render_path(&self, view: &str, context: &Context) -> Result<String, RenderError> {
        let view = ViewReference::new(view).map_err(|reason| RenderError::InvalidView {
            view: view.to_string(),
            reason,
        })?;
        self.render(&view, context)
    }

    /// Render an in-memory body. `name` only labels errors and log lines.
    pub fn render_str(
        &self,
        name: &str,
        body: &str,
        context: &Context,
    ) -> Result<String, RenderError> {
        let expanded = partials::include_partials(
            body.to_string(),
            self.max_partial_expansions,
            |partial| self.load_partial(name, partial),
        )
        .map_err(|e| match e {
            ExpansionLimitExceeded::Splices { limit } => RenderError::PartialRecursionExceeded {
                view: name.to_string(),
                limit,
            },
            ExpansionLimitExceeded::Size { max_bytes } => RenderError::PartialOutputTooLarge {
                view: name.to_string(),
                max_bytes,
            },
        })?;

        Ok(placeholders::substitute(&expanded, context))
    }

    /// Drop cached view bodies
    pub fn clear_cache(&self) {
        if self.cache.is_enabled() {
            self.cache.clear();
            logger::log_debug("View cache cleared");
        }
    }

    fn load_view(&self, view: &ViewReference) -> Result<String, RenderError> {
        let path = view.resolve(&self.root);
        match self.cache.read(&path) {
            Ok(body) => Ok(body.to_string()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(RenderError::ViewNotFound {
                view: view.to_string(),
                path,
            }),
            Err(source) => Err(RenderError::ViewIo {
                view: view.to_string(),
                source,
            }),
        }
    }

    fn load_partial(&self, view: &str, name: &str) -> Option<String> {
        if let Err(reason) = check_relative(name) {
            logger::log_warning(&format!(
                "Rejected partial '{name}' in view '{view}': {reason}"
            ));
            return None;
        }

        // `<root>/<name>.html` first, then the conventional `partials/` folder
        let file = format!("{name}.html");
        let candidates = [self.root.join(&file), self.root.join(PARTIALS_DIR).join(&file)];
        for path in &candidates {
            match self.cache.read(path) {
                Ok(body) => return Some(body.to_string()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    logger::log_warning(&format!(
                        "Failed to read partial '{}': {e}",
                        path.display()
                    ));
                    return None;
                }
            }
        }

        logger::log_warning(&format!(
            "Partial '{file}' not found under '{}' (view '{view}')",
            self.root.display()
        ));
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn views() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("home")).unwrap();
        fs::create_dir_all(dir.path().join("partials")).unwrap();
        dir
    }

    fn write(dir: &tempfile::TempDir, rel: &str, body: &str) {
        fs::write(dir.path().join(rel), body).unwrap();
    }

    #[test]
    fn test_render_with_partial_and_placeholder() {
        let dir = views();
        write(&dir, "partials/header.html", "<h1>{{ title }}</h1>");
        write(
            &dir,
            "home/index.html",
            "<!DOCTYPE html>{{ partials/partials/header }}<p>{{ body }}</p>",
        );

        let renderer = Renderer::new(dir.path());
        let ctx = Context::new().with("title", "T").with("body", "B");
        let out = renderer.render_path("home/index.html", &ctx).unwrap();
        assert_eq!(out, "<!DOCTYPE html><h1>T</h1><p>B</p>");
    }

    #[test]
    fn test_partial_resolved_from_root() {
        let dir = views();
        write(&dir, "header.html", "HI");
        write(&dir, "home/index.html", "a{{ partials/header }}b");

        let out = Renderer::new(dir.path())
            .render_path("home/index.html", &Context::new())
            .unwrap();
        assert_eq!(out, "aHIb");
    }

    #[test]
    fn test_partial_falls_back_to_partials_dir() {
        let dir = views();
        write(&dir, "partials/header.html", "HI");
        write(&dir, "home/index.html", "a{{ partials/header }}b");

        let out = Renderer::new(dir.path())
            .render_path("home/index.html", &Context::new())
            .unwrap();
        assert_eq!(out, "aHIb");
    }

    #[test]
    fn test_missing_partial_still_renders() {
        let dir = views();
        write(&dir, "home/index.html", "a{{ partials/header }}b");

        let out = Renderer::new(dir.path())
            .render_path("home/index.html", &Context::new())
            .unwrap();
        assert_eq!(out, "a<!-- Partial 'header.html' not found -->b");
    }

    #[test]
    fn test_traversing_partial_is_treated_as_missing() {
        let dir = views();
        write(&dir, "home/index.html", "{{ partials/../secret }}");

        let out = Renderer::new(dir.path().join("home"))
            .render_path("index.html", &Context::new())
            .unwrap();
        assert_eq!(out, "<!-- Partial '../secret.html' not found -->");
    }

    #[test]
    fn test_unknown_placeholder_left_verbatim() {
        let dir = views();
        write(&dir, "home/x.html", "{{ x }}");

        let out = Renderer::new(dir.path())
            .render_path("home/x.html", &Context::new())
            .unwrap();
        assert_eq!(out, "{{ x }}");
    }

    #[test]
    fn test_missing_view() {
        let dir = views();
        let err = Renderer::new(dir.path())
            .render_path("home/nope.html", &Context::new())
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::ViewNotFound { ref view, .. } if view == "home/nope.html"
        ));
    }

    #[test]
    fn test_invalid_view_reference() {
        let dir = views();
        let err = Renderer::new(dir.path())
            .render_path("../outside.html", &Context::new())
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidView { .. }));
    }

    #[test]
    fn test_cyclic_partial_fails() {
        let dir = views();
        write(&dir, "a.html", "{{ partials/a }}");
        write(&dir, "home/index.html", "{{ partials/a }}");

        let renderer = Renderer::with_options(
            dir.path(),
            RendererOptions {
                max_partial_expansions: 64,
                cache: false,
            },
        );
        let err = renderer
            .render_path("home/index.html", &Context::new())
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::PartialRecursionExceeded { limit: 64, .. }
        ));
    }

    #[test]
    fn test_reading_a_directory_is_io_error() {
        let dir = views();
        let err = Renderer::new(dir.path())
            .render_path("home", &Context::new())
            .unwrap_err();
        assert!(matches!(err, RenderError::ViewIo { .. }));
    }

    #[test]
    fn test_cache_cleared_on_demand() {
        let dir = views();
        write(&dir, "home/index.html", "v1");
        let renderer = Renderer::with_options(
            dir.path(),
            RendererOptions {
                max_partial_expansions: 10,
                cache: true,
            },
        );
        let ctx = Context::new();
        assert_eq!(renderer.render_path("home/index.html", &ctx).unwrap(), "v1");
        write(&dir, "home/index.html", "v2");
        assert_eq!(renderer.render_path("home/index.html", &ctx).unwrap(), "v1");
        renderer.clear_cache();
        assert_eq!(renderer.render_path("home/index.html", &ctx).unwrap(), "v2");
    }

    #[test]
    fn test_growing_partial_hits_size_cap() {
        let dir = views();
        write(&dir, "grow.html", &format!("{}{{{{ partials/grow }}}}", "x".repeat(50_000)));
        write(&dir, "home/index.html", "{{ partials/grow }}");

        let err = Renderer::new(dir.path())
            .render_path("home/index.html", &Context::new())
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::PartialOutputTooLarge { ref view, .. } if view == "home/index.html"
        ));
    }
}
