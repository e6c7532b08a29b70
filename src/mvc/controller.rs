//! Controller capability
//!
//! A controller exposes its request handlers as an [`ActionTable`]: a closed
//! map from method name to a bound function with a declared arity. The table
//! is built once when the controller is registered, so dispatch is a plain
//! map lookup instead of a reflective call.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::context::Context;
use crate::error::ActionError;
use crate::template::Renderer;

/// What an action hands back: a view path and the data to render it with.
/// The view path is validated by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResponse {
    pub view: String,
    pub context: Context,
}

impl ActionResponse {
    pub fn new(view: impl Into<String>, context: Context) -> Self {
        Self {
            view: view.into(),
            context,
        }
    }
}

pub type ActionResult = Result<ActionResponse, ActionError>;

/// Number of positional path arguments an action accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub required: usize,
    pub optional: usize,
}

impl Arity {
    pub const NONE: Self = Self::exact(0);

    pub const fn exact(required: usize) -> Self {
        Self {
            required,
            optional: 0,
        }
    }

    pub const fn optional(optional: usize) -> Self {
        Self {
            required: 0,
            optional,
        }
    }

    pub const fn accepts(self, count: usize) -> bool {
        count >= self.required && count <= self.required + self.optional
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional == 0 {
            write!(f, "{}", self.required)
        } else {
            write!(f, "{} to {}", self.required, self.required + self.optional)
        }
    }
}

type ActionFn = dyn Fn(&Renderer, &[String]) -> ActionResult + Send + Sync;

/// A bound handler: renderer callback first, then the path arguments
pub struct Action {
    arity: Arity,
    handler: Box<ActionFn>,
}

impl Action {
    pub fn new<F>(arity: Arity, handler: F) -> Self
    where
        F: Fn(&Renderer, &[String]) -> ActionResult + Send + Sync + 'static,
    {
        Self {
            arity,
            handler: Box::new(handler),
        }
    }

    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// Invoke without checking arity; the dispatcher does that first
    pub fn call(&self, renderer: &Renderer, args: &[String]) -> ActionResult {
        (self.handler)(renderer, args)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Method name -> action map for one controller instance
#[derive(Debug, Default)]
pub struct ActionTable {
    actions: HashMap<String, Action>,
}

impl ActionTable {
    /// Start binding methods of `controller`
    pub fn bind<C: Send + Sync + 'static>(controller: Arc<C>) -> ActionTableBuilder<C> {
        ActionTableBuilder {
            controller,
            table: Self::default(),
        }
    }

    pub fn get(&self, method: &str) -> Option<&Action> {
        self.actions.get(method)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Method names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn insert(&mut self, method: impl Into<String>, action: Action) {
        self.actions.insert(method.into().to_lowercase(), action);
    }
}

/// Binds methods of a shared controller instance into an [`ActionTable`]
pub struct ActionTableBuilder<C> {
    controller: Arc<C>,
    table: ActionTable,
}

impl<C: Send + Sync + 'static> ActionTableBuilder<C> {
    /// Register `method`. Names are stored lower-cased to match routed paths.
    #[must_use]
    pub fn action<F>(mut self, method: &str, arity: Arity, handler: F) -> Self
    where
        F: Fn(&C, &Renderer, &[String]) -> ActionResult + Send + Sync + 'static,
    {
        let controller = Arc::clone(&self.controller);
        self.table.insert(
            method,
            Action::new(arity, move |renderer, args| {
                handler(&controller, renderer, args)
            }),
        );
        self
    }

    pub fn finish(self) -> ActionTable {
        self.table
    }
}

/// A request-handling object that can describe its own actions
pub trait Controller: Send + Sync + 'static {
    fn actions(self: Arc<Self>) -> ActionTable;
}
