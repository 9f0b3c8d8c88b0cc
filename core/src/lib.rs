pub mod diagnostics;
pub mod error;
pub mod gateway;
pub mod network;
