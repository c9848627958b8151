//! Status change history.
//!
//! Provides immutable tracking of status changes over time. The controller
//! keeps one of these for the alarm level.

use super::state::State;
use crate::rules::AlarmEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single status change.
///
/// # Example
///
/// ```rust
/// use catpoint::core::{AlarmStatus, StatusTransition};
/// use catpoint::rules::AlarmEvent;
/// use chrono::Utc;
///
/// let transition = StatusTransition {
///     from: AlarmStatus::NoAlarm,
///     to: AlarmStatus::PendingAlarm,
///     cause: Some(AlarmEvent::SensorActivated),
///     timestamp: Utc::now(),
/// };
/// assert!(!transition.is_manual());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StatusTransition<S: State> {
    /// The status being left
    pub from: S,
    /// The status being entered
    pub to: S,
    /// Event that triggered the change, `None` for a direct set
    pub cause: Option<AlarmEvent>,
    /// When the change occurred
    pub timestamp: DateTime<Utc>,
}

impl<S: State> StatusTransition<S> {
    /// Whether the change was made directly rather than by a rule.
    pub fn is_manual(&self) -> bool {
        self.cause.is_none()
    }
}

/// Ordered history of status changes.
///
/// History is immutable: `record` returns a new history with the change
/// added and leaves the original untouched.
///
/// # Example
///
/// ```rust
/// use catpoint::core::{AlarmStatus, StatusHistory, StatusTransition};
/// use chrono::Utc;
///
/// let history = StatusHistory::new()
///     .record(StatusTransition {
///         from: AlarmStatus::NoAlarm,
///         to: AlarmStatus::PendingAlarm,
///         cause: None,
///         timestamp: Utc::now(),
///     })
///     .record(StatusTransition {
///         from: AlarmStatus::PendingAlarm,
///         to: AlarmStatus::Alarm,
///         cause: None,
///         timestamp: Utc::now(),
///     });
///
/// let path = history.path();
/// assert_eq!(path.len(), 3); // NoAlarm -> PendingAlarm -> Alarm
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StatusHistory<S: State> {
    transitions: Vec<StatusTransition<S>>,
}

impl<S: State> Default for StatusHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StatusHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StatusTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Keep only the newest `limit` transitions.
    pub fn retain_last(mut self, limit: usize) -> Self {
        if self.transitions.len() > limit {
            let excess = self.transitions.len() - limit;
            self.transitions.drain(..excess);
        }
        self
    }

    /// Get the sequence of statuses traversed.
    ///
    /// Returns the `from` of the first transition, then the `to` of each
    /// transition in order.
    pub fn path(&self) -> Vec<S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// `None` when nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Most recent transition.
    pub fn last(&self) -> Option<&StatusTransition<S>> {
        self.transitions.last()
    }

    /// All transitions, oldest first.
    pub fn transitions(&self) -> &[StatusTransition<S>] {
        &self.transitions
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// `true` before the first transition.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
