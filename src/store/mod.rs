//! Storage backends for the marketplace.

pub mod adapter;
pub mod memory;

pub use adapter::{Store, Upsert};
pub use memory::MemoryStore;
