//! Wearable-side sync cache
//!
//! The last summary ever received plus a dirty flag, kept in a persistent
//! key-value store so the face has something to show after a restart.

pub mod memory;
pub mod sync_cache;

pub use memory::MemoryStore;
pub use sync_cache::SyncCache;
