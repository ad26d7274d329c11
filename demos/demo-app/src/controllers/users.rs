use r2e::prelude::*;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize, garde::Validate)]
pub struct CreateUser {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(range(min = 18, max = 120))]
    pub age: u8,
    #[garde(email)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct User {
    pub name: String,
    pub age: u8,
    pub email: String,
}

#[derive(Controller)]
#[controller(path = "/users", state = AppState)]
pub struct UserController;

#[routes]
impl UserController {
    #[post("/")]
    async fn create(&self, body: Validated<CreateUser>) -> Json<User> {
        let CreateUser { name, age, email } = body.0;
        Json(User { name, age, email })
    }
}
