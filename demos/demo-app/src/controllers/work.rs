use std::sync::{Arc, Mutex};

use r2e::prelude::*;

use crate::state::AppState;

/// A scoped resource that records its own lifecycle into the shared work
/// log, so tests can assert exactly one `enter` and one `exit` per request
/// regardless of whether the handler succeeds or fails.
pub struct WorkResource {
    log: Arc<Mutex<Vec<String>>>,
}

impl ManagedResource<AppState> for WorkResource {
    type Error = ManagedError;

    async fn acquire(state: &AppState) -> Result<Self, Self::Error> {
        state.work_log.lock().unwrap().push("enter".to_string());
        Ok(WorkResource {
            log: state.work_log.clone(),
        })
    }

    async fn release(self, _success: bool) -> Result<(), Self::Error> {
        self.log.lock().unwrap().push("exit".to_string());
        Ok(())
    }
}

#[derive(Controller)]
#[controller(path = "/work", state = AppState)]
pub struct WorkController;

#[routes]
impl WorkController {
    /// Always fails after acquiring the resource, so `release` still runs
    /// and the resource's exit is recorded even on the error path.
    #[get("/")]
    async fn work(&self, #[managed] _res: &mut WorkResource) -> Result<&'static str, ManagedError> {
        Err(ManagedError(AppError::Conflict("work item already claimed".into())))
    }
}
