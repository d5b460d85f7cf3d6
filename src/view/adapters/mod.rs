//! Adapter implementations of the task backend port.

pub mod http;
pub mod memory;

pub use http::HttpTaskBackend;
pub use memory::InMemoryTaskBackend;
