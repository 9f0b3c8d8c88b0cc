//! Shared building blocks for `porthole`.
//!
//! * [`network`]: parsing and validation of the host and port a user types in.
//! * [`models`]: the JSON view models returned by the diagnostics service.
//! * [`config`]: runtime configuration assembled by the CLI.
//! * [`log`]: terminal logging macros used across the workspace.

pub mod config;
pub mod log;
pub mod models;
pub mod network;

#[doc(hidden)]
pub use tracing as __tracing;
