//! A single row of the transition table and its builder.

use super::error::BuildError;
use super::{AlarmEvent, Outcome, Rule, RuleContext};
use crate::core::{AlarmStatus, Guard};

/// One named rule: on `event`, if `guard` passes, apply `outcome`.
#[derive(Clone, Debug)]
pub struct TransitionRule {
    pub rule: Rule,
    pub event: AlarmEvent,
    pub guard: Option<Guard<RuleContext>>,
    pub outcome: Outcome,
}

impl TransitionRule {
    /// Create an unguarded rule.
    pub fn new(rule: Rule, event: AlarmEvent, outcome: Outcome) -> Self {
        Self {
            rule,
            event,
            guard: None,
            outcome,
        }
    }

    /// Attach a guard predicate.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&RuleContext) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Check if this rule decides the given event (pure).
    pub fn applies(&self, event: AlarmEvent, context: &RuleContext) -> bool {
        if event != self.event {
            return false;
        }

        self.guard.as_ref().is_none_or(|g| g.check(context))
    }
}

/// Builder for constructing rules with a fluent API.
///
/// # Example
///
/// ```rust
/// use catpoint::core::{AlarmStatus, ArmingStatus};
/// use catpoint::rules::{AlarmEvent, Rule, TransitionRuleBuilder};
///
/// let rule = TransitionRuleBuilder::new(Rule::Custom("away-motion-alarms"))
///     .on(AlarmEvent::SensorActivated)
///     .when(|ctx| ctx.arming == ArmingStatus::ArmedAway)
///     .sets(AlarmStatus::Alarm)
///     .build()
///     .unwrap();
///
/// assert_eq!(rule.event, AlarmEvent::SensorActivated);
/// ```
pub struct TransitionRuleBuilder {
    rule: Rule,
    event: Option<AlarmEvent>,
    guard: Option<Guard<RuleContext>>,
    outcome: Option<Outcome>,
}

impl TransitionRuleBuilder {
    /// Start a rule with the given name.
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            event: None,
            guard: None,
            outcome: None,
        }
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: AlarmEvent) -> Self {
        self.event = Some(event);
        self
    }

    /// Add a guard predicate (optional).
    pub fn guard(mut self, guard: Guard<RuleContext>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&RuleContext) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Set the alarm level when the rule matches.
    pub fn sets(mut self, status: AlarmStatus) -> Self {
        self.outcome = Some(Outcome::Set(status));
        self
    }

    /// Leave the alarm level unchanged when the rule matches.
    pub fn holds(mut self) -> Self {
        self.outcome = Some(Outcome::Hold);
        self
    }

    /// Build the rule.
    pub fn build(self) -> Result<TransitionRule, BuildError> {
        let event = self.event.ok_or(BuildError::MissingEvent(self.rule))?;
        let outcome = self.outcome.ok_or(BuildError::MissingOutcome(self.rule))?;

        Ok(TransitionRule {
            rule: self.rule,
            event,
            guard: self.guard,
            outcome,
        })
    }
}
