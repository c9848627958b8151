//! Core State trait for status values.
//!
//! Both the alarm level and the arming mode are small closed sets of
//! values. This trait gives them a shared, pure inspection surface so
//! history, guards and logging can treat them uniformly.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for status values tracked by the controller.
///
/// All methods are pure. Implementors are plain `Copy` values; the
/// `state_enum!` macro generates the implementation for simple enums.
///
/// # Required Traits
///
/// - `Copy` + `Eq` + `Hash`: statuses are compared and stored by value
/// - `Debug`: statuses must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: hosts may persist them in any format
///
/// # Example
///
/// ```rust
/// use catpoint::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum DoorState {
///     Closed,
///     Open,
/// }
///
/// impl State for DoorState {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Closed => "Closed",
///             Self::Open => "Open",
///         }
///     }
///
///     fn is_alert(&self) -> bool {
///         matches!(self, Self::Open)
///     }
/// }
///
/// assert!(DoorState::Open.is_alert());
/// ```
pub trait State:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the status name for display/logging.
    fn name(&self) -> &'static str;

    /// Check if this value calls for attention from the occupant.
    ///
    /// Default implementation returns `false`.
    fn is_alert(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Quiet,
        Noisy,
    }

    impl State for TestState {
        fn name(&self) -> &'static str {
            match self {
                Self::Quiet => "Quiet",
                Self::Noisy => "Noisy",
            }
        }

        fn is_alert(&self) -> bool {
            matches!(self, Self::Noisy)
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    struct Plain;

    impl State for Plain {
        fn name(&self) -> &'static str {
            "Plain"
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Quiet.name(), "Quiet");
        assert_eq!(TestState::Noisy.name(), "Noisy");
    }

    #[test]
    fn is_alert_identifies_alerting_values() {
        assert!(!TestState::Quiet.is_alert());
        assert!(TestState::Noisy.is_alert());
    }

    #[test]
    fn is_alert_defaults_to_false() {
        assert!(!Plain.is_alert());
    }

    #[test]
    fn state_serializes_correctly() {
        let json = serde_json::to_string(&TestState::Noisy).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(TestState::Noisy, deserialized);
    }
}
