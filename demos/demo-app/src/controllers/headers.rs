use r2e::prelude::*;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ItemsEcho {
    pub tokens: Vec<String>,
}

#[derive(Controller)]
#[controller(path = "/items", state = AppState)]
pub struct ItemsController;

#[routes]
impl ItemsController {
    /// Collects every `x-token` header value in wire order.
    #[get("/")]
    async fn list(&self, headers: HeaderMap) -> Json<ItemsEcho> {
        let tokens = headers
            .get_all("x-token")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();
        Json(ItemsEcho { tokens })
    }
}
