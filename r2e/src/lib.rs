//! R2E — a Quarkus-like ergonomic layer over Axum.
//!
//! This facade crate re-exports the core runtime and proc macros through a
//! single dependency with feature flags. Import everything you need with:
//!
//! ```ignore
//! use r2e::prelude::*;
//! ```
//!
//! # Feature flags
//!
//! | Feature      | Default | Effect                |
//! |--------------|---------|-----------------------|
//! | `ws`         | no      | `r2e-core/ws`         |
//! | `multipart`  | no      | `r2e-core/multipart`  |
//! | `validation` | no      | `r2e-core/validation` |
//! | `dev-reload` | no      | `r2e-core/dev-reload` |
//! | `full`       | no      | `ws` + `multipart`    |

// Re-exported as public modules so the proc macros can resolve
// `r2e::r2e_core` / `r2e::r2e_macros` / etc. via `proc-macro-crate`, the same
// way they resolve `r2e_core` / `r2e_macros` when used directly.
pub extern crate r2e_core;
pub extern crate r2e_events;
pub extern crate r2e_macros;
pub extern crate r2e_scheduler;
pub extern crate r2e_utils;

pub use r2e_core::*;

/// Unified prelude — import everything with `use r2e::prelude::*`.
pub mod prelude {
    pub use r2e_core::prelude::*;
}
