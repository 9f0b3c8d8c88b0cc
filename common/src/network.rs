pub mod port;
pub mod target;
