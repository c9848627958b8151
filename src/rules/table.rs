//! Ordered rule table.

use super::transition::TransitionRule;
use super::{AlarmEvent, Outcome, Rule, RuleContext};
use crate::core::{AlarmStatus, ArmingStatus};

/// Result of evaluating an event against a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    /// Rule that matched, `None` if no row applied.
    pub rule: Option<Rule>,
    pub outcome: Outcome,
}

/// Ordered list of rules. The first applicable row wins.
#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    rules: Vec<TransitionRule>,
}

impl TransitionTable {
    /// Create an empty table. Every event holds.
    pub fn new() -> Self {
        Self::default()
    }

    /// The home security rule set.
    ///
    /// | Rule | Event | Guard | Outcome |
    /// |------|-------|-------|---------|
    /// | `AlarmLatchedOnActivation` | SensorActivated | alarm is `Alarm` | hold |
    /// | `AlarmLatchedOnDeactivation` | SensorDeactivated | alarm is `Alarm` | hold |
    /// | `DisarmedIgnoresSensor` | SensorActivated | disarmed | hold |
    /// | `ActivationRaisesPending` | SensorActivated | alarm is `NoAlarm` | `PendingAlarm` |
    /// | `ActivationConfirmsPending` | SensorActivated | alarm is `PendingAlarm` | `Alarm` |
    /// | `LastSensorClearsPending` | SensorDeactivated | pending, no sensor active | `NoAlarm` |
    /// | `DisarmClearsAlarm` | Disarmed | - | `NoAlarm` |
    /// | `ArmHomeWithCatAlarms` | Armed | armed home, cat seen | `Alarm` |
    /// | `CatWhileHomeAlarms` | ImageProcessed | cat, armed home | `Alarm` |
    /// | `ClearSceneResets` | ImageProcessed | no cat, no sensor active | `NoAlarm` |
    pub fn standard() -> Self {
        use AlarmEvent::{Armed, Disarmed, ImageProcessed, SensorActivated, SensorDeactivated};

        let rules = vec![
            TransitionRule::new(Rule::AlarmLatchedOnActivation, SensorActivated, Outcome::Hold)
                .when(|ctx| ctx.alarm == AlarmStatus::Alarm),
            TransitionRule::new(
                Rule::AlarmLatchedOnDeactivation,
                SensorDeactivated,
                Outcome::Hold,
            )
            .when(|ctx| ctx.alarm == AlarmStatus::Alarm),
            TransitionRule::new(Rule::DisarmedIgnoresSensor, SensorActivated, Outcome::Hold)
                .when(|ctx| !ctx.arming.is_armed()),
            TransitionRule::new(
                Rule::ActivationRaisesPending,
                SensorActivated,
                Outcome::Set(AlarmStatus::PendingAlarm),
            )
            .when(|ctx| ctx.alarm == AlarmStatus::NoAlarm),
            TransitionRule::new(
                Rule::ActivationConfirmsPending,
                SensorActivated,
                Outcome::Set(AlarmStatus::Alarm),
            )
            .when(|ctx| ctx.alarm == AlarmStatus::PendingAlarm),
            TransitionRule::new(
                Rule::LastSensorClearsPending,
                SensorDeactivated,
                Outcome::Set(AlarmStatus::NoAlarm),
            )
            .when(|ctx| ctx.alarm == AlarmStatus::PendingAlarm && !ctx.any_sensor_active),
            TransitionRule::new(
                Rule::DisarmClearsAlarm,
                Disarmed,
                Outcome::Set(AlarmStatus::NoAlarm),
            ),
            TransitionRule::new(
                Rule::ArmHomeWithCatAlarms,
                Armed,
                Outcome::Set(AlarmStatus::Alarm),
            )
            .when(|ctx| ctx.arming == ArmingStatus::ArmedHome && ctx.cat_detected),
            TransitionRule::new(
                Rule::CatWhileHomeAlarms,
                ImageProcessed,
                Outcome::Set(AlarmStatus::Alarm),
            )
            .when(|ctx| ctx.cat_detected && ctx.arming == ArmingStatus::ArmedHome),
            TransitionRule::new(
                Rule::ClearSceneResets,
                ImageProcessed,
                Outcome::Set(AlarmStatus::NoAlarm),
            )
            .when(|ctx| !ctx.cat_detected && !ctx.any_sensor_active),
        ];

        Self { rules }
    }

    /// Append a rule at the lowest priority.
    pub fn push(&mut self, rule: TransitionRule) {
        self.rules.push(rule);
    }

    /// Insert a rule ahead of every existing one.
    pub fn push_front(&mut self, rule: TransitionRule) {
        self.rules.insert(0, rule);
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[TransitionRule] {
        &self.rules
    }

    /// Decide what `event` does given `context` (pure).
    pub fn evaluate(&self, event: AlarmEvent, context: &RuleContext) -> Decision {
        self.rules
            .iter()
            .find(|r| r.applies(event, context))
            .map_or(
                Decision {
                    rule: None,
                    outcome: Outcome::Hold,
                },
                |r| Decision {
                    rule: Some(r.rule),
                    outcome: r.outcome,
                },
            )
    }
}
