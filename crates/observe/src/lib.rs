//! This crate is intended to contain code that is required to provide or
//! improve the observability of the deployment tooling. For now that is the
//! initialization logic for logging and a panic hook that routes panics
//! through it.
pub mod config;
pub mod panic_hook;
pub mod tracing;

pub use config::Config;
