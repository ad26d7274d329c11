use r2e::prelude::*;

use crate::state::AppState;

#[derive(Controller)]
#[controller(path = "/empty", state = AppState)]
pub struct EmptyController;

#[routes]
impl EmptyController {
    #[post("/")]
    async fn empty(&self) -> StatusCode {
        StatusCode::NO_CONTENT
    }
}
