//! Storage traits for authorization endpoint collaborators.
//!
//! The endpoint only ever reads client registrations. Writes to the
//! store are the owner's concern.
//!
//! # Implementations
//!
//! - [`MemoryClientStorage`] - concurrent in-memory map, seeded at startup

pub mod client;
pub mod memory;

pub use client::ClientStorage;
pub use memory::MemoryClientStorage;
