//! Client- and service-scoped evaluation contexts.
//!
//! A [`ClientContext`] carries the global baseline and outlives service
//! configuration changes. A [`ServiceContext`] is compiled once per service
//! config version and then only read.

pub mod client;
pub mod service;

pub use client::ClientContext;
pub use service::ServiceContext;
