//! Path routing
//!
//! `/<controller>/<method>/<arg>...` with `home` and `index` as defaults.
//! Segments arrive already percent-decoded; see [`crate::http::decode_path`].

pub const DEFAULT_CONTROLLER: &str = "home";
pub const DEFAULT_METHOD: &str = "index";

/// Where a request path points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
    pub controller: String,
    pub method: String,
    pub args: Vec<String>,
}

/// Split a decoded path into controller, method and positional arguments.
/// Empty segments are dropped, so repeated or trailing slashes don't matter.
pub fn route(path: &str) -> RouteTarget {
    let mut segments = path.split('/').filter(|s| !s.is_empty());

    let controller = segments
        .next()
        .map_or_else(|| DEFAULT_CONTROLLER.to_string(), str::to_lowercase);
    let method = segments
        .next()
        .map_or_else(|| DEFAULT_METHOD.to_string(), str::to_lowercase);
    let args = segments.map(String::from).collect();

    RouteTarget {
        controller,
        method,
        args,
    }
}
