//! mixctl control library entry.
//!
//! Compiles per-service configuration (attribute defaults, HTTP API specs,
//! quota specs) into immutable [`context::ServiceContext`]s and applies them
//! to requests. The binary (`main.rs`) and integration tests consume this
//! crate.

pub mod api_spec;
pub mod app_state;
pub mod config;
pub mod context;
pub mod controller;
pub mod ops;
pub mod quota;
pub mod request;
pub mod router;

pub use controller::Controller;
pub use request::{CheckData, HeaderKind, RequestContext, RequestHeaders};
