//! Guard predicates for controlling transitions.
//!
//! Guards are pure boolean functions over a snapshot of whatever the
//! transition depends on. They let the rule table stay declarative.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Pure predicate that determines if a transition applies.
///
/// # Example
///
/// ```rust
/// use catpoint::core::{AlarmStatus, Guard};
///
/// let only_when_quiet = Guard::new(|s: &AlarmStatus| *s == AlarmStatus::NoAlarm);
///
/// assert!(only_when_quiet.check(&AlarmStatus::NoAlarm));
/// assert!(!only_when_quiet.check(&AlarmStatus::Alarm));
/// ```
pub struct Guard<C> {
    predicate: Arc<dyn Fn(&C) -> bool + Send + Sync>,
    _phantom: PhantomData<fn(&C)>,
}

impl<C> Guard<C> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Guard that always passes.
    pub fn always() -> Self
    where
        C: 'static,
    {
        Self::new(|_| true)
    }

    /// Check if the guard allows the transition for this context.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            _phantom: PhantomData,
        }
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
