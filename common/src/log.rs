//! Logging macros shared by every crate in the workspace.
//!
//! They are thin wrappers around `tracing` so that the terminal formatter in the
//! CLI can tell a regular status line apart from a success line, which only
//! differ by their target.

/// Target used by [`success!`] so the formatter can render a distinct symbol.
pub const SUCCESS_TARGET: &str = "porthole::success";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "porthole", $($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "porthole::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!(target: "porthole", $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::__tracing::error!(target: "porthole", $($arg)*)
    };
}
