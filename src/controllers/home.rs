use std::sync::Arc;

use super::{greeting, listing_context};
use crate::models::PageModel;
use crate::mvc::{ActionResponse, ActionTable, Arity, Controller};

/// Landing pages plus a greeting with an optional name segment
pub struct HomeController {
    model: PageModel,
}

impl Default for HomeController {
    fn default() -> Self {
        Self {
            model: PageModel::new("home_page_data"),
        }
    }
}

impl Controller for HomeController {
    fn actions(self: Arc<Self>) -> ActionTable {
        ActionTable::bind(self)
            .action("index", Arity::NONE, |c, _, _| {
                let data = c.model.page_data();
                Ok(ActionResponse::new("home/index.html", listing_context(&data)))
            })
            .action("show", Arity::NONE, |c, _, _| {
                let data = c.model.page_data();
                Ok(ActionResponse::new("home/show.html", listing_context(&data)))
            })
            .action("greet", Arity::optional(1), |_, _, args| {
                Ok(ActionResponse::new("home/greet.html", greeting(args)))
            })
            .finish()
    }
}
