//! Alarm transition rules.
//!
//! Every way the alarm level can change is a named row in a
//! [`TransitionTable`]. A row responds to one [`AlarmEvent`], carries a
//! [`Guard`](crate::core::Guard) over a [`RuleContext`] snapshot, and
//! yields an [`Outcome`]. Rows are tried in order; the first one whose
//! event matches and whose guard passes decides. When nothing matches the
//! alarm level is left alone.
//!
//! Evaluation is pure. Reading the store, persisting the result and
//! notifying listeners is the controller's job.
//!
//! # Example
//!
//! ```rust
//! use catpoint::core::{AlarmStatus, ArmingStatus};
//! use catpoint::rules::{AlarmEvent, Outcome, Rule, RuleContext, TransitionTable};
//!
//! let table = TransitionTable::standard();
//! let context = RuleContext {
//!     alarm: AlarmStatus::NoAlarm,
//!     arming: ArmingStatus::ArmedAway,
//!     any_sensor_active: true,
//!     cat_detected: false,
//! };
//!
//! let decision = table.evaluate(AlarmEvent::SensorActivated, &context);
//! assert_eq!(decision.rule, Some(Rule::ActivationRaisesPending));
//! assert_eq!(decision.outcome, Outcome::Set(AlarmStatus::PendingAlarm));
//! ```

mod error;
mod table;
mod transition;

pub use error::BuildError;
pub use table::{Decision, TransitionTable};
pub use transition::{TransitionRule, TransitionRuleBuilder};

use crate::core::{AlarmStatus, ArmingStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something that happened which may move the alarm level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlarmEvent {
    SensorActivated,
    SensorDeactivated,
    /// Switched to `ArmedHome` or `ArmedAway`.
    Armed,
    Disarmed,
    /// A camera frame was classified.
    ImageProcessed,
}

impl fmt::Display for AlarmEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Snapshot the guards look at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleContext {
    /// Alarm level before the event.
    pub alarm: AlarmStatus,
    /// Arming mode in effect. For arming events this is the new mode.
    pub arming: ArmingStatus,
    /// Whether any stored sensor is active after the event was applied.
    pub any_sensor_active: bool,
    /// Latest cat-detection result. For image events, the fresh one.
    pub cat_detected: bool,
}

/// Names of the rows in the standard table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    /// A confirmed alarm ignores sensor activation.
    AlarmLatchedOnActivation,
    /// A confirmed alarm ignores sensor deactivation.
    AlarmLatchedOnDeactivation,
    DisarmedIgnoresSensor,
    ActivationRaisesPending,
    ActivationConfirmsPending,
    /// No sensor left active while pending: false alarm.
    LastSensorClearsPending,
    DisarmClearsAlarm,
    /// Arming at home after a cat was already seen.
    ArmHomeWithCatAlarms,
    CatWhileHomeAlarms,
    /// No cat and no active sensor.
    ClearSceneResets,
    /// A row added to a custom table.
    Custom(&'static str),
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(name) => f.write_str(name),
            other => fmt::Debug::fmt(other, f),
        }
    }
}

/// What a matching rule does to the alarm level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Set the alarm level, even if it already has this value.
    Set(AlarmStatus),
    /// Leave the alarm level alone.
    Hold,
}

impl Outcome {
    /// Status to set, if any.
    pub fn target(&self) -> Option<AlarmStatus> {
        match self {
            Self::Set(status) => Some(*status),
            Self::Hold => None,
        }
    }
}
