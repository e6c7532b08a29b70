//! Dispatch a routed request to its controller action

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::context::Context;
use super::registry::ControllerRegistry;
use super::router::RouteTarget;
use super::view::ViewReference;
use crate::error::DispatchError;
use crate::template::Renderer;

/// Resolve `target` in `registry`, invoke the action and validate its result.
///
/// Arity is checked before the call, so a handler never sees an argument
/// list it did not declare. A panicking handler is reported as a
/// [`DispatchError::HandlerError`] instead of tearing down the worker.
pub fn dispatch(
    target: &RouteTarget,
    registry: &ControllerRegistry,
    renderer: &Renderer,
) -> Result<(ViewReference, Context), DispatchError> {
    let actions =
        registry
            .get(&target.controller)
            .ok_or_else(|| DispatchError::ControllerNotFound {
                controller: target.controller.clone(),
            })?;

    let action = actions
        .get(&target.method)
        .ok_or_else(|| DispatchError::MethodNotFound {
            controller: target.controller.clone(),
            method: target.method.clone(),
        })?;

    let arity = action.arity();
    if !arity.accepts(target.args.len()) {
        return Err(DispatchError::InvalidArguments {
            controller: target.controller.clone(),
            method: target.method.clone(),
            expected: arity.to_string(),
            got: target.args.len(),
        });
    }

    let outcome =
        panic::catch_unwind(AssertUnwindSafe(|| action.call(renderer, &target.args)));

    let response = match outcome {
        Ok(Ok(response)) => response,
        Ok(Err(source)) => {
            return Err(DispatchError::HandlerError {
                controller: target.controller.clone(),
                method: target.method.clone(),
                source,
            })
        }
        Err(payload) => {
            return Err(DispatchError::HandlerError {
                controller: target.controller.clone(),
                method: target.method.clone(),
                source: format!("handler panicked: {}", panic_message(payload.as_ref())).into(),
            })
        }
    };

    let view = ViewReference::new(response.view.as_str()).map_err(|reason| {
        DispatchError::InvalidHandlerResult {
            controller: target.controller.clone(),
            method: target.method.clone(),
            reason: format!("view '{}' rejected: {reason}", response.view),
        }
    })?;

    Ok((view, response.context))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
