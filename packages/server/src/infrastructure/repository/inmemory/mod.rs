//! InMemory repository implementations.

pub mod session;

pub use session::InMemorySessionRepository;
