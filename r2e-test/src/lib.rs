mod app;
mod jwt;
#[cfg(feature = "ws")]
mod ws;

pub use app::{PathToken, TestApp, TestRequest, TestResponse, resolve_path, tokenize_path};
pub use jwt::{TestJwt, TokenBuilder};
#[cfg(feature = "ws")]
pub use ws::{TestServer, WsMessage};
