//! Demo controllers
//!
//! Every type listed in [`manifest`] is discovered at startup and again on
//! reload; the route segment is the type name minus `Controller`.

mod home;
mod products;
mod users;

pub use home::HomeController;
pub use products::ProductsController;
pub use users::UsersController;

use crate::controller_manifest;
use crate::models::PageData;
use crate::mvc::{ControllerDefinition, Context};

/// Controller types available to the registry
pub fn manifest() -> Vec<ControllerDefinition> {
    controller_manifest![HomeController, ProductsController, UsersController]
}

/// Name used by `greet` when the path carries none
const DEFAULT_GUEST: &str = "Guest";

/// `<li>` markup for a list of items
fn items_html(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", html_escape::encode_safe(item)))
        .collect()
}

/// Context for the `greet` pages; the optional first argument is the name
fn greeting(args: &[String]) -> Context {
    let name = args.first().map_or(DEFAULT_GUEST, String::as_str);
    Context::new()
        .with("page_title", format!("Greetings, {name}!"))
        .with(
            "message",
            format!("Hello there, {name}! Welcome to our custom MVC app."),
        )
}

/// Context shared by the listing pages
fn listing_context(data: &PageData) -> Context {
    Context::new()
        .with("page_title", data.title())
        .with("welcome_message", data.message())
        .with_html("items_html", items_html(&data.items))
}
