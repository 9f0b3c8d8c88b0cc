//! End-to-end tests for the HTTP client and the check fan-out.
//!
//! Everything runs against [`utils::StubServer`], an in-process HTTP server
//! that answers with canned JSON, so no real diagnostics service is needed.

#[cfg(test)]
mod utils;

#[cfg(test)]
mod client {
    mod integration;
}
