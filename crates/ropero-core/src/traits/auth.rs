// # Auth Signal Trait
//
// Defines the opaque signed-in/signed-out event feed consumed by the core.
//
// The core does not manage credentials; it only uses these events to gate
// when the live subscription is allowed to run (see
// `ClothingCollection::run_gated`).

use std::pin::Pin;
use tokio_stream::Stream;

/// An authentication state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// A user session became active
    SignedIn,
    /// The active session ended
    SignedOut,
}

/// Trait for auth signal implementations
pub trait AuthSignal: Send + Sync {
    /// Watch for authentication state transitions
    ///
    /// The stream yields an event per transition and ends when the signal
    /// source shuts down.
    fn watch(&self) -> Pin<Box<dyn Stream<Item = AuthEvent> + Send + 'static>>;
}
