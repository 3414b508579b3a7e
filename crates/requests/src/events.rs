// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Change notifications for the request store.
//!
//! Events describe what changed after the fact. Listeners are called
//! synchronously, outside the store lock, in subscription order.

use crate::request::{RequestId, RequestStatus};
use conges_domain::AbsenceCode;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tracing::debug;

/// A change to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A request was accepted into the store.
    Submitted {
        /// The new request.
        id: RequestId,
        /// Its employee.
        employee: String,
        /// Its absence code.
        code: AbsenceCode,
    },
    /// A request changed status.
    StatusChanged {
        /// The request.
        id: RequestId,
        /// Status before the change.
        from: RequestStatus,
        /// Status after the change.
        to: RequestStatus,
    },
}

pub type Listener = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

type ListenerList = Mutex<Vec<(u64, Listener)>>;

/// Registered listeners.
#[derive(Default)]
pub struct Listeners {
    next_id: AtomicU64,
    entries: Arc<ListenerList>,
}

impl Listeners {
    /// Registers `listener` and returns the handle that keeps it alive.
    pub fn add(&self, listener: Listener) -> Subscription {
        let id: u64 = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;

        match self.entries.lock() {
            Ok(mut entries) => entries.push((id, listener)),
            Err(poisoned) => poisoned.into_inner().push((id, listener)),
        }
        debug!(subscription = id, "listener subscribed");

        Subscription {
            id,
            entries: Some(Arc::downgrade(&self.entries)),
        }
    }

    /// Calls every listener with `event`.
    ///
    /// The listener list is copied first so a listener may subscribe or
    /// unsubscribe without deadlocking.
    pub fn notify(&self, event: &StoreEvent) {
        let snapshot: Vec<Listener> = match self.entries.lock() {
            Ok(entries) => entries.iter().map(|(_, l)| Arc::clone(l)).collect(),
            Err(poisoned) => poisoned
                .into_inner()
                .iter()
                .map(|(_, l)| Arc::clone(l))
                .collect(),
        };

        debug!(?event, listeners = snapshot.len(), "notifying listeners");
        for listener in snapshot {
            listener(event);
        }
    }

    /// Number of live subscriptions.
    pub fn count(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Handle returned by [`RequestStore::subscribe`](crate::RequestStore::subscribe).
///
/// The listener stays registered until [`Subscription::unsubscribe`] is
/// called or the handle is dropped.
#[must_use = "dropping a subscription unsubscribes its listener"]
pub struct Subscription {
    id: u64,
    entries: Option<Weak<ListenerList>>,
}

impl Subscription {
    /// Stops delivering events to the listener.
    pub fn unsubscribe(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        let Some(entries) = self.entries.take().and_then(|weak| weak.upgrade()) else {
            return;
        };
        let mut entries = entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|(id, _)| *id != self.id);
        debug!(subscription = self.id, "listener unsubscribed");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.entries.is_some())
            .finish()
    }
}
