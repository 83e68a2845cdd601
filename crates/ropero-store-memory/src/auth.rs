//! In-memory auth signal

use std::pin::Pin;
use std::sync::Mutex;

use ropero_core::traits::{AuthEvent, AuthSignal};
use tokio::sync::mpsc;
use tokio_stream::Stream;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// In-memory implementation of [`AuthSignal`]
///
/// Tests and demos drive it directly with [`sign_in`](MemoryAuthSignal::sign_in)
/// and [`sign_out`](MemoryAuthSignal::sign_out); every live watcher receives
/// each transition.
#[derive(Default)]
pub struct MemoryAuthSignal {
    watchers: Mutex<Vec<mpsc::UnboundedSender<AuthEvent>>>,
}

impl MemoryAuthSignal {
    /// Create a signal with no active session
    pub fn new() -> Self {
        Self::default()
    }

    /// Announce an active session
    pub fn sign_in(&self) {
        self.emit(AuthEvent::SignedIn);
    }

    /// Announce the end of the session
    pub fn sign_out(&self) {
        self.emit(AuthEvent::SignedOut);
    }

    fn emit(&self, event: AuthEvent) {
        self.watchers
            .lock()
            .expect("auth state poisoned")
            .retain(|tx| tx.send(event).is_ok());
    }
}

impl AuthSignal for MemoryAuthSignal {
    fn watch(&self) -> Pin<Box<dyn Stream<Item = AuthEvent> + Send + 'static>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.watchers.lock().expect("auth state poisoned").push(tx);
        Box::pin(UnboundedReceiverStream::new(rx))
    }
}
