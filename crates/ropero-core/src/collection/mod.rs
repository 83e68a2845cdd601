//! Observable collection state container
//!
//! The ClothingCollection holds the locally mirrored view of the remote
//! collection as three observable slots:
//!
//! - `items`: the current full collection, in store order
//! - `selected`: the currently resolved item, if any
//! - `loading`: true from activation until the first emission (or error)
//!
//! ## Lifecycle
//!
//! 1. Create with [`ClothingCollection::new()`]
//! 2. [`activate()`](ClothingCollection::activate) opens exactly one live
//!    subscription; activating an already-active collection is a caller
//!    error and is rejected
//! 3. [`deactivate()`](ClothingCollection::deactivate) cancels the
//!    subscription synchronously; no emission is processed afterward
//!
//! ## Store Truth
//!
//! Writes made through the repository are never spliced into `items`
//! locally; the container waits for the next remote snapshot to confirm
//! them. `items` therefore always reflects store truth, at the cost of a
//! visible round-trip latency after a write.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::ClothingItem;
use crate::repository::ClothingRepository;
use crate::traits::{AuthEvent, AuthSignal};

/// Observable state container mirroring the remote collection
pub struct ClothingCollection {
    /// Repository supplying snapshots and single-shot reads
    repository: Arc<ClothingRepository>,

    /// Current mirrored collection
    items_tx: watch::Sender<Vec<ClothingItem>>,

    /// Currently selected item
    selected_tx: watch::Sender<Option<ClothingItem>>,

    /// Whether the first emission is still pending
    loading_tx: watch::Sender<bool>,

    /// The single live subscription, if any
    subscription: Mutex<Option<Subscription>>,
}

/// A running subscription task plus the gate its emissions publish under
///
/// The task locks `live` around every publication, and `deactivate` flips
/// it to false under the same lock before returning. An emission the task
/// has already pulled off the stream therefore either lands before
/// `deactivate` returns or is discarded, never after.
struct Subscription {
    task: JoinHandle<()>,
    live: Arc<Mutex<bool>>,
}

impl ClothingCollection {
    /// Create an inactive collection over the given repository
    pub fn new(repository: Arc<ClothingRepository>) -> Self {
        let (items_tx, _) = watch::channel(Vec::new());
        let (selected_tx, _) = watch::channel(None);
        let (loading_tx, _) = watch::channel(false);

        Self {
            repository,
            items_tx,
            selected_tx,
            loading_tx,
            subscription: Mutex::new(None),
        }
    }

    /// Observe the mirrored collection
    pub fn items(&self) -> watch::Receiver<Vec<ClothingItem>> {
        self.items_tx.subscribe()
    }

    /// Observe the currently selected item
    pub fn selected(&self) -> watch::Receiver<Option<ClothingItem>> {
        self.selected_tx.subscribe()
    }

    /// Observe the loading flag
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading_tx.subscribe()
    }

    /// Whether a live subscription is currently running
    pub fn is_active(&self) -> bool {
        self.subscription
            .lock()
            .expect("subscription state poisoned")
            .as_ref()
            .is_some_and(|sub| !sub.task.is_finished())
    }

    /// Open the live subscription
    ///
    /// Sets `loading = true` and spawns the single subscription task. Each
    /// successful emission replaces `items` and clears `loading`; an error
    /// emission terminates the subscription, clears `items`, and clears
    /// `loading` so the UI surfaces no stale entries.
    ///
    /// # Errors
    ///
    /// `Error::Subscription` if a live subscription already exists. Opening
    /// a second one without deactivating first would leak the previous
    /// stream, so the lifecycle contract rejects it outright.
    pub fn activate(&self) -> Result<()> {
        let mut slot = self
            .subscription
            .lock()
            .expect("subscription state poisoned");

        if slot.as_ref().is_some_and(|sub| !sub.task.is_finished()) {
            return Err(Error::subscription("collection is already active"));
        }

        self.loading_tx.send_replace(true);

        let repository = Arc::clone(&self.repository);
        let items_tx = self.items_tx.clone();
        let loading_tx = self.loading_tx.clone();
        let live = Arc::new(Mutex::new(true));
        let gate = Arc::clone(&live);

        let task = tokio::spawn(async move {
            let mut snapshots = repository.watch_all();
            while let Some(next) = snapshots.next().await {
                // Publish under the gate; deactivation flips it under the
                // same lock, so nothing lands after deactivate() returns.
                let guard = gate.lock().expect("subscription state poisoned");
                if !*guard {
                    break;
                }
                match next {
                    Ok(items) => {
                        debug!(count = items.len(), "collection snapshot received");
                        items_tx.send_replace(items);
                        loading_tx.send_replace(false);
                    }
                    Err(e) => {
                        warn!(error = %e, "live subscription terminated");
                        items_tx.send_replace(Vec::new());
                        loading_tx.send_replace(false);
                        break;
                    }
                }
            }
        });

        *slot = Some(Subscription { task, live });

        Ok(())
    }

    /// Cancel the live subscription
    ///
    /// Cancellation is synchronous: once this returns, no further emission
    /// is delivered to the observable slots. Deactivating an inactive
    /// collection is a no-op.
    pub fn deactivate(&self) {
        let mut slot = self
            .subscription
            .lock()
            .expect("subscription state poisoned");
        if let Some(sub) = slot.take() {
            // Taking the gate waits out any publication already in flight.
            *sub.live.lock().expect("subscription state poisoned") = false;
            sub.task.abort();
        }
    }

    /// Resolve an item by id into the `selected` slot
    ///
    /// Runs as a fire-and-forget task so it never blocks `items`. On
    /// failure (including not-found) the slot is cleared.
    pub fn select(&self, id: &str) {
        let repository = Arc::clone(&self.repository);
        let selected_tx = self.selected_tx.clone();
        let id = id.to_string();

        tokio::spawn(async move {
            match repository.get_by_id(&id).await {
                Ok(item) => {
                    selected_tx.send_replace(Some(item));
                }
                Err(e) => {
                    warn!(id, error = %e, "selected item could not be resolved");
                    selected_tx.send_replace(None);
                }
            }
        });
    }

    /// Clear the `selected` slot
    pub fn clear_selected(&self) {
        self.selected_tx.send_replace(None);
    }

    /// Drive activation from an auth signal
    ///
    /// The collection runs only while a user is signed in: `SignedIn`
    /// activates the subscription (if not already active), `SignedOut`
    /// deactivates it. Returns when the signal source shuts down.
    pub async fn run_gated(&self, auth: Arc<dyn AuthSignal>) -> Result<()> {
        let mut sessions = auth.watch();
        while let Some(event) = sessions.next().await {
            match event {
                AuthEvent::SignedIn => {
                    if !self.is_active() {
                        self.activate()?;
                    }
                }
                AuthEvent::SignedOut => {
                    self.deactivate();
                    self.clear_selected();
                }
            }
        }
        self.deactivate();
        Ok(())
    }
}

impl Drop for ClothingCollection {
    fn drop(&mut self) {
        // A dropped container must not leak its subscription task.
        if let Ok(mut slot) = self.subscription.lock()
            && let Some(sub) = slot.take()
        {
            if let Ok(mut live) = sub.live.lock() {
                *live = false;
            }
            sub.task.abort();
        }
    }
}
