//! Sync transport abstraction
//!
//! A one-way, best-effort channel between the paired devices, keyed by a
//! path. Delivery is last-writer-wins per path: two publishes that have not
//! been delivered yet may arrive as a single change event.

use core::future::Future;

use sunshine_protocol::{ChangeEvent, FieldMap};

/// Why a publish did not reach the data layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PublishError {
    /// No connection to the data layer
    NotConnected,
    /// The item could not be encoded for the link
    Encode,
    /// The data layer refused the item
    Rejected,
}

/// Publishing side of the transport (handheld)
pub trait SyncTransport {
    /// Publish `fields` at `path`
    ///
    /// Completes once the local data layer has accepted or refused the item.
    /// Success says nothing about delivery to the other device.
    fn publish(
        &mut self,
        path: &str,
        fields: &FieldMap,
    ) -> impl Future<Output = Result<(), PublishError>>;
}

/// Receiving side of the transport (wearable)
///
/// An unbounded, non-restartable sequence of change events.
pub trait ChangeSource {
    /// Wait for the next change event
    fn next_event(&mut self) -> impl Future<Output = ChangeEvent>;
}
