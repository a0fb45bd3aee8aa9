//! Latest-state publication.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use creality_core::{PrinterState, StateDelta, StateUpdate};

/// Default capacity of the update channel.
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Holds the canonical printer state and fans out updates.
///
/// Reads always see a fully-populated record; before the first report it
/// is the idle default. [`StatePublisher::has_data`] distinguishes that
/// default from real printer data, which the message policy uses to drop
/// Moonraker notifies that would otherwise merge into nothing.
pub struct StatePublisher {
    state: RwLock<PrinterState>,
    has_data: AtomicBool,
    updates: broadcast::Sender<StateUpdate>,
}

impl StatePublisher {
    /// Creates a publisher with the default channel capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a publisher with a custom channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (updates, _) = broadcast::channel(capacity);
        Self {
            state: RwLock::new(PrinterState::default()),
            has_data: AtomicBool::new(false),
            updates,
        }
    }

    /// Merges a normalized fragment and notifies subscribers.
    pub async fn apply(&self, delta: &StateDelta) -> StateUpdate {
        let mut state = self.state.write().await;
        let old_state = state.clone();
        delta.apply_to(&mut state);
        let new_state = state.clone();
        drop(state);

        self.has_data.store(true, Ordering::SeqCst);

        let update = StateUpdate {
            old_state,
            new_state,
            at: Utc::now(),
        };
        debug!("State updated (state: {})", update.new_state.state);

        // A send error only means there are no active receivers
        let _ = self.updates.send(update.clone());
        update
    }

    /// Clones the current canonical record.
    pub async fn snapshot(&self) -> PrinterState {
        self.state.read().await.clone()
    }

    /// Whether any update has been applied since construction.
    pub fn has_data(&self) -> bool {
        self.has_data.load(Ordering::SeqCst)
    }

    /// Subscribes to state updates.
    pub fn subscribe(&self) -> broadcast::Receiver<StateUpdate> {
        self.updates.subscribe()
    }
}

impl Default for StatePublisher {
    fn default() -> Self {
        Self::new()
    }
}
