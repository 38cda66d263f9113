//! Snapshot Store
//!
//! Owns the current status snapshot. `dispatch` is the only way to change
//! it: the reducer computes the next snapshot from the current one and the
//! result is published whole to every subscriber.

use crate::status::{reduce, StatusAction, StatusState};
use std::sync::Arc;
use tokio::sync::watch;

/// A published snapshot and its version
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Incremented on every published change; 0 is the initial snapshot
    pub version: u64,
    pub state: Arc<StatusState>,
}

#[derive(Clone)]
pub struct Store {
    tx: Arc<watch::Sender<Snapshot>>,
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(StatusState::initial())
    }

    pub fn with_state(state: StatusState) -> Self {
        let (tx, _rx) = watch::channel(Snapshot {
            version: 0,
            state: Arc::new(state),
        });
        Self { tx: Arc::new(tx) }
    }

    /// Apply an action and return the snapshot it produced.
    ///
    /// Actions that leave the state unchanged do not publish a new version.
    pub fn dispatch(&self, action: &StatusAction) -> Snapshot {
        let mut published = None;
        self.tx.send_if_modified(|current| {
            let next = reduce(&current.state, action);
            let modified = next != *current.state;
            if modified {
                *current = Snapshot {
                    version: current.version + 1,
                    state: Arc::new(next),
                };
            }
            published = Some(current.clone());
            modified
        });

        let snapshot = published.unwrap_or_else(|| self.snapshot());
        tracing::debug!(
            action = %action.type_name(),
            version = snapshot.version,
            "Dispatched"
        );
        snapshot
    }

    pub fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    pub fn state(&self) -> Arc<StatusState> {
        Arc::clone(&self.tx.borrow().state)
    }

    /// Receiver that is notified on every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
