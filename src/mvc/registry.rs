//! Controller registry
//!
//! Controllers are listed explicitly in a manifest (see
//! [`crate::controllers::manifest`]). Each entry carries the controller's
//! type name and a factory; the registry derives the routing name from the
//! type name (`ProductsController` -> `products`), instantiates it once and
//! keeps its bound action table.

use std::collections::HashMap;
use std::sync::Arc;

use super::controller::{ActionTable, Controller};
use crate::logger;

/// Suffix every controller type name must carry
pub const CONTROLLER_SUFFIX: &str = "Controller";

pub type ControllerFactory = fn() -> Option<Arc<dyn Controller>>;

/// One manifest entry
#[derive(Clone, Copy)]
pub struct ControllerDefinition {
    pub type_name: &'static str,
    pub factory: ControllerFactory,
}

impl ControllerDefinition {
    pub const fn new(type_name: &'static str, factory: ControllerFactory) -> Self {
        Self { type_name, factory }
    }

    /// Routing name: type name without the suffix, lower-cased
    pub fn canonical_name(&self) -> Option<String> {
        self.type_name
            .strip_suffix(CONTROLLER_SUFFIX)
            .filter(|stem| !stem.is_empty())
            .map(str::to_lowercase)
    }
}

impl std::fmt::Debug for ControllerDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerDefinition")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Factory for any default-constructible controller
pub fn instantiate<C: Controller + Default>() -> Option<Arc<dyn Controller>> {
    Some(Arc::new(C::default()))
}

/// Build a manifest from controller type names.
///
/// ```ignore
/// let manifest = controller_manifest![HomeController, UsersController];
/// ```
#[macro_export]
macro_rules! controller_manifest {
    ($($controller:ident),* $(,)?) => {
        vec![$(
            $crate::mvc::ControllerDefinition::new(
                stringify!($controller),
                $crate::mvc::registry::instantiate::<$controller>,
            )
        ),*]
    };
}

/// Immutable name -> actions snapshot
#[derive(Debug, Default)]
pub struct ControllerRegistry {
    controllers: HashMap<String, ActionTable>,
}

impl ControllerRegistry {
    /// Instantiate every usable definition. Bad entries are skipped with a
    /// warning; an empty manifest is logged as an error.
    pub fn discover(definitions: &[ControllerDefinition]) -> Self {
        let mut controllers = HashMap::new();

        if definitions.is_empty() {
            logger::log_error("No controller definitions found; registry is empty");
            return Self { controllers };
        }

        for definition in definitions {
            let Some(name) = definition.canonical_name() else {
                logger::log_warning(&format!(
                    "Skipping '{}': type name must end with '{CONTROLLER_SUFFIX}'",
                    definition.type_name
                ));
                continue;
            };

            if controllers.contains_key(&name) {
                logger::log_warning(&format!(
                    "Skipping '{}': controller '{name}' is already registered",
                    definition.type_name
                ));
                continue;
            }

            let Some(instance) = (definition.factory)() else {
                logger::log_warning(&format!(
                    "Skipping '{}': factory did not produce an instance",
                    definition.type_name
                ));
                continue;
            };

            let actions = instance.actions();
            logger::log_info(&format!(
                "[Registry] Loaded controller: {name} -> {} ({})",
                definition.type_name,
                actions.names().join(", ")
            ));
            controllers.insert(name, actions);
        }

        Self { controllers }
    }

    pub fn get(&self, name: &str) -> Option<&ActionTable> {
        self.controllers.get(name)
    }

    /// Controller names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.controllers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}
