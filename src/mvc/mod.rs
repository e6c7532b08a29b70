//! Convention-based MVC core
//!
//! Router -> registry lookup -> action invocation. Rendering lives in
//! [`crate::template`] and the per-request pipeline in [`crate::app`].

pub mod context;
pub mod controller;
pub mod dispatcher;
pub mod registry;
pub mod router;
pub mod view;

pub use context::{Context, ContextValue};
pub use controller::{ActionResponse, ActionResult, ActionTable, Arity, Controller};
pub use dispatcher::dispatch;
pub use registry::{ControllerDefinition, ControllerRegistry};
pub use router::{route, RouteTarget};
pub use view::ViewReference;
