//! mixctl core: transport-agnostic attribute model, quota requirements, and
//! the shared error surface.
//!
//! This crate defines the data contracts exchanged between the control layer
//! and the downstream policy-decision caller. It carries no runtime or
//! transport dependencies so it can be reused by any front end.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `MixctlError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod attributes;
pub mod error;
pub mod quota;

pub use attributes::{AttributeValue, Attributes};
/// Shared result type.
pub use error::{Result, MixctlError};
pub use quota::QuotaRequirement;
