//! Top-level facade crate for mixctl.
//!
//! Re-exports the core types and the control library so users can depend on
//! a single crate.

pub mod core {
    pub use mixctl_core::*;
}

pub mod control {
    pub use mixctl_control::*;
}
