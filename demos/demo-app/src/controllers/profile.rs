use r2e::prelude::*;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Serialize)]
pub struct ProfileEcho {
    pub pid: u64,
    pub verbose: bool,
    pub greeting: String,
}

#[derive(Controller)]
#[controller(path = "/profile", state = AppState)]
pub struct ProfileController {
    #[inject]
    greeting: String,
}

#[routes]
impl ProfileController {
    #[get("/{pid}")]
    async fn profile(&self, Path(pid): Path<u64>, Query(q): Query<ProfileQuery>) -> Json<ProfileEcho> {
        Json(ProfileEcho {
            pid,
            verbose: q.verbose,
            greeting: self.greeting.clone(),
        })
    }
}
