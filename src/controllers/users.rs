use std::sync::Arc;

use super::{greeting, listing_context};
use crate::models::PageModel;
use crate::mvc::{ActionResponse, ActionTable, Arity, Controller};

pub struct UsersController {
    model: PageModel,
}

impl Default for UsersController {
    fn default() -> Self {
        Self {
            model: PageModel::new("users_page_data"),
        }
    }
}

impl Controller for UsersController {
    fn actions(self: Arc<Self>) -> ActionTable {
        ActionTable::bind(self)
            .action("index", Arity::NONE, |c, _, _| {
                let data = c.model.page_data();
                Ok(ActionResponse::new("users/index.html", listing_context(&data)))
            })
            .action("show", Arity::NONE, |c, _, _| {
                let data = c.model.page_data();
                Ok(ActionResponse::new("users/show.html", listing_context(&data)))
            })
            .action("greet", Arity::optional(1), |_, _, args| {
                Ok(ActionResponse::new("users/greet.html", greeting(args)))
            })
            .finish()
    }
}
