use std::sync::Arc;

use super::{greeting, listing_context};
use crate::models::PageModel;
use crate::mvc::{ActionResponse, ActionTable, Arity, Controller};

pub struct ProductsController {
    model: PageModel,
}

impl Default for ProductsController {
    fn default() -> Self {
        Self {
            model: PageModel::new("products_page_data"),
        }
    }
}

impl Controller for ProductsController {
    fn actions(self: Arc<Self>) -> ActionTable {
        ActionTable::bind(self)
            .action("index", Arity::NONE, |c, _, _| {
                let data = c.model.page_data();
                Ok(ActionResponse::new("products/index.html", listing_context(&data)))
            })
            .action("show", Arity::NONE, |c, _, _| {
                let data = c.model.page_data();
                Ok(ActionResponse::new("products/show.html", listing_context(&data)))
            })
            .action("greet", Arity::optional(1), |_, _, args| {
                Ok(ActionResponse::new("products/greet.html", greeting(args)))
            })
            .finish()
    }
}
