//! Alarm and arming status values.

use crate::state_enum;

state_enum! {
    /// Current escalation level of the premises.
    ///
    /// Severity grows `NoAlarm < PendingAlarm < Alarm`; the ordering is a
    /// consequence of the transition rules and is not encoded in the type.
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum AlarmStatus {
        /// Nothing to report.
        NoAlarm,
        /// A sensor tripped while armed; waiting for confirmation.
        PendingAlarm,
        /// Confirmed alarm. Sticky until the system is disarmed.
        Alarm,
    }
    alert: [Alarm]
}

state_enum! {
    /// Arming mode selected by the occupant.
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum ArmingStatus {
        Disarmed,
        ArmedHome,
        ArmedAway,
    }
}

impl AlarmStatus {
    /// Human readable description shown by status displays.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NoAlarm => "Cool and Good",
            Self::PendingAlarm => "I'm in Danger...",
            Self::Alarm => "Awooga!",
        }
    }
}

impl Default for AlarmStatus {
    fn default() -> Self {
        Self::NoAlarm
    }
}

impl ArmingStatus {
    /// Whether sensor activity should escalate the alarm.
    pub fn is_armed(&self) -> bool {
        !matches!(self, Self::Disarmed)
    }

    /// Human-readable label for status displays.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Disarmed => "Disarmed",
            Self::ArmedHome => "Armed - At Home",
            Self::ArmedAway => "Armed - Away",
        }
    }
}

impl Default for ArmingStatus {
    fn default() -> Self {
        Self::Disarmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;

    #[test]
    fn only_full_alarm_is_alerting() {
        assert!(!AlarmStatus::NoAlarm.is_alert());
        assert!(!AlarmStatus::PendingAlarm.is_alert());
        assert!(AlarmStatus::Alarm.is_alert());
    }

    #[test]
    fn armed_modes_are_armed() {
        assert!(!ArmingStatus::Disarmed.is_armed());
        assert!(ArmingStatus::ArmedHome.is_armed());
        assert!(ArmingStatus::ArmedAway.is_armed());
    }

    #[test]
    fn defaults_are_quiet_and_disarmed() {
        assert_eq!(AlarmStatus::default(), AlarmStatus::NoAlarm);
        assert_eq!(ArmingStatus::default(), ArmingStatus::Disarmed);
    }

    #[test]
    fn statuses_serialize_with_screaming_names() {
        assert_eq!(
            serde_json::to_string(&AlarmStatus::PendingAlarm).unwrap(),
            "\"PENDING_ALARM\""
        );
        let arming: ArmingStatus = serde_json::from_str("\"ARMED_AWAY\"").unwrap();
        assert_eq!(arming, ArmingStatus::ArmedAway);
    }

    #[test]
    fn descriptions_match_display_text() {
        assert_eq!(AlarmStatus::Alarm.description(), "Awooga!");
        assert_eq!(ArmingStatus::ArmedHome.description(), "Armed - At Home");
    }
}
