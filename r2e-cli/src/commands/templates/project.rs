use super::super::new_project::ProjectOptions;

pub fn cargo_toml(opts: &ProjectOptions) -> String {
    let mut r2e_features = Vec::new();
    if opts.ws {
        r2e_features.push("ws");
    }
    if opts.multipart {
        r2e_features.push("multipart");
    }
    if opts.validation {
        r2e_features.push("validation");
    }

    let features_str = if r2e_features.is_empty() {
        String::new()
    } else {
        format!(
            ", features = [{}]",
            r2e_features
                .iter()
                .map(|f| format!("\"{}\"", f))
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    let name = &opts.name;

    format!(
        r#"[package]
name = "{name}"
version = "0.1.0"
edition = "2021"

[dependencies]
r2e = {{ version = "0.1"{features_str} }}
tokio = {{ version = "1", features = ["full"] }}
serde = {{ version = "1", features = ["derive"] }}
serde_json = "1"
tracing = "0.1"
tracing-subscriber = {{ version = "0.3", features = ["env-filter"] }}
"#
    )
}

pub fn main_rs(_opts: &ProjectOptions) -> String {
    r#"use r2e::prelude::*;
use r2e::plugins::{Health, Tracing};

mod controllers;
mod state;

use controllers::hello::HelloController;
use state::AppState;

#[r2e::main]
async fn main() {
    AppBuilder::new()
        .build_state::<AppState, _, _>()
        .await
        .with(Health)
        .with(Tracing)
        .register_controller::<HelloController>()
        .serve("0.0.0.0:8080")
        .await
        .unwrap();
}
"#
    .to_string()
}

pub fn state_rs(_opts: &ProjectOptions) -> String {
    r#"use r2e::prelude::*;

#[derive(Clone, BeanState)]
pub struct AppState {}
"#
    .to_string()
}

pub fn application_yaml(opts: &ProjectOptions) -> String {
    let name = &opts.name;
    format!(
        r#"app:
  name: "{name}"
  port: 8080
"#
    )
}

pub fn hello_controller() -> &'static str {
    r#"use crate::state::AppState;
use r2e::prelude::*;

#[derive(Controller)]
#[controller(path = "/", state = AppState)]
pub struct HelloController;

#[routes]
impl HelloController {
    #[get("/")]
    async fn hello(&self) -> &'static str {
        "Hello, World!"
    }
}
"#
}
