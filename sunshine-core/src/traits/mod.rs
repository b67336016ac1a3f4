//! Collaborator traits
//!
//! These traits define the interface between the sync/face logic and the
//! storage and link implementations supplied by a runtime.

pub mod store;
pub mod transport;

pub use store::{KeyValueStore, StorageKey, StoreError, StoredValue};
pub use transport::{ChangeSource, PublishError, SyncTransport};
