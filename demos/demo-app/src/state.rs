use std::sync::{Arc, Mutex};

/// Shared application state. `greeting` demonstrates plain `#[inject]`
/// injection; `work_log` records resource lifecycle events for the
/// scoped-resource demo.
#[derive(Clone)]
pub struct AppState {
    pub greeting: String,
    pub work_log: Arc<Mutex<Vec<String>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            greeting: "hello from r2e".to_string(),
            work_log: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
