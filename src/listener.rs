//! Observers of alarm status changes.

use crate::core::AlarmStatus;
use std::fmt;
use std::sync::Arc;

/// Receives alarm notifications from a controller.
///
/// Only [`notify`](Self::notify) is required. Callbacks run synchronously
/// inside the controller call that caused them.
pub trait StatusListener: Send + Sync {
    /// Alarm status was set to `status`.
    fn notify(&self, status: AlarmStatus);

    /// A captured image was classified.
    fn cat_detected(&self, _cat: bool) {}

    /// One or more sensors were added, removed or changed state.
    fn sensors_changed(&self) {}
}

impl<F> StatusListener for F
where
    F: Fn(AlarmStatus) + Send + Sync,
{
    fn notify(&self, status: AlarmStatus) {
        self(status)
    }
}

/// Set of registered listeners. No duplicates, no ordering guarantee.
///
/// Identity is the allocation behind the `Arc`, so registering the same
/// handle twice is a no-op.
#[derive(Clone, Default)]
pub struct ListenerSet {
    listeners: Vec<Arc<dyn StatusListener>>,
}

impl ListenerSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Returns `false` if it was already present.
    pub fn insert(&mut self, listener: Arc<dyn StatusListener>) -> bool {
        if self.contains(&listener) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Unregister a listener. Returns `false` if it was not present.
    pub fn remove(&mut self, listener: &Arc<dyn StatusListener>) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| !same_listener(l, listener));
        self.listeners.len() != before
    }

    /// Whether this exact listener is registered.
    pub fn contains(&self, listener: &Arc<dyn StatusListener>) -> bool {
        self.listeners.iter().any(|l| same_listener(l, listener))
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// `true` when no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn notify(&self, status: AlarmStatus) {
        for listener in &self.listeners {
            listener.notify(status);
        }
    }

    pub(crate) fn cat_detected(&self, cat: bool) {
        for listener in &self.listeners {
            listener.cat_detected(cat);
        }
    }

    pub(crate) fn sensors_changed(&self) {
        for listener in &self.listeners {
            listener.sensors_changed();
        }
    }
}

impl fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("len", &self.listeners.len())
            .finish()
    }
}

// Compare data pointers only; vtable pointers for one type can differ
// between codegen units.
fn same_listener(a: &Arc<dyn StatusListener>, b: &Arc<dyn StatusListener>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a).cast::<()>(),
        Arc::as_ptr(b).cast::<()>(),
    )
}
