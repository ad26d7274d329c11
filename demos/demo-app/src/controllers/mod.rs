pub mod empty;
pub mod headers;
pub mod profile;
pub mod sse;
pub mod users;
pub mod work;
