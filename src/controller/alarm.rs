//! Alarm controller that applies the transition rules.

use crate::config::ControllerConfig;
use crate::core::{AlarmStatus, ArmingStatus, StatusHistory, StatusTransition};
use crate::detector::{CatDetector, DetectorError};
use crate::error::{Result, SecurityError};
use crate::listener::{ListenerSet, StatusListener};
use crate::rules::{AlarmEvent, Decision, Outcome, RuleContext, TransitionTable};
use crate::sensor::Sensor;
use crate::store::{StateStore, StoreError};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

fn store_failure(operation: &'static str) -> impl FnOnce(StoreError) -> SecurityError {
    move |error| {
        warn!(operation, %error, "state store call failed");
        SecurityError::Store(error)
    }
}

fn detector_failure(error: DetectorError) -> SecurityError {
    warn!(%error, "cat detector call failed");
    SecurityError::Detector(error)
}

/// Decides the alarm level from sensor, arming and camera events.
///
/// Every public operation runs to completion, listener callbacks
/// included, before it returns. Methods that change state take
/// `&mut self`; wrap the controller in a
/// [`SharedController`](super::SharedController) to call it from several
/// threads.
///
/// Sensor state is never cached. Each call reads what it needs from the
/// store and writes changes straight back.
pub struct AlarmController<S: StateStore, D: CatDetector> {
    store: S,
    detector: D,
    config: ControllerConfig,
    table: TransitionTable,
    listeners: ListenerSet,
    last_cat_detection: Option<bool>,
    history: StatusHistory<AlarmStatus>,
}

impl<S: StateStore, D: CatDetector> AlarmController<S, D> {
    /// Create a controller with the default config and standard rules.
    pub fn new(store: S, detector: D) -> Self {
        Self {
            store,
            detector,
            config: ControllerConfig::default(),
            table: TransitionTable::standard(),
            listeners: ListenerSet::new(),
            last_cat_detection: None,
            history: StatusHistory::new(),
        }
    }

    /// Create a controller after validating `config`.
    pub fn with_config(store: S, detector: D, config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(store, detector)
        })
    }

    /// Replace the rule table.
    pub fn with_table(mut self, table: TransitionTable) -> Self {
        self.table = table;
        self
    }

    /// The backing state store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The cat detector images are sent to.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Active configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Rule table consulted for every event.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Recorded alarm status changes, oldest first.
    pub fn history(&self) -> &StatusHistory<AlarmStatus> {
        &self.history
    }

    /// Result of the most recent classified image, `None` before the first.
    pub fn last_cat_detection(&self) -> Option<bool> {
        self.last_cat_detection
    }

    /// Register a listener. Returns `false` if it was already registered.
    pub fn add_status_listener(&mut self, listener: Arc<dyn StatusListener>) -> bool {
        let added = self.listeners.insert(listener);
        debug!(added, listeners = self.listeners.len(), "status listener added");
        added
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    pub fn remove_status_listener(&mut self, listener: &Arc<dyn StatusListener>) -> bool {
        let removed = self.listeners.remove(listener);
        debug!(
            removed,
            listeners = self.listeners.len(),
            "status listener removed"
        );
        removed
    }

    /// Current alarm status, read from the store.
    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        self.store
            .alarm_status()
            .map_err(store_failure("alarm_status"))
    }

    /// Current arming status, read from the store.
    pub fn arming_status(&self) -> Result<ArmingStatus> {
        self.store
            .arming_status()
            .map_err(store_failure("arming_status"))
    }

    /// Every stored sensor.
    pub fn sensors(&self) -> Result<Vec<Sensor>> {
        self.store.sensors().map_err(store_failure("sensors"))
    }

    /// Store a new sensor and tell listeners the sensor set changed.
    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<()> {
        debug!(sensor = %sensor.id(), sensor_name = sensor.name(), "adding sensor");
        self.store
            .add_sensor(sensor)
            .map_err(store_failure("add_sensor"))?;
        self.listeners.sensors_changed();
        Ok(())
    }

    /// Drop a sensor from the store and tell listeners.
    pub fn remove_sensor(&mut self, sensor: &Sensor) -> Result<()> {
        debug!(sensor = %sensor.id(), sensor_name = sensor.name(), "removing sensor");
        self.store
            .remove_sensor(sensor)
            .map_err(store_failure("remove_sensor"))?;
        self.listeners.sensors_changed();
        Ok(())
    }

    /// Persist `status` and notify every listener.
    ///
    /// Listeners are notified even when `status` equals the current value.
    /// Only actual changes are recorded in history.
    pub fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<()> {
        let current = self.alarm_status()?;
        self.commit(current, status, None)
    }

    /// Record a sensor as active or inactive and apply the sensor rules.
    ///
    /// `sensor` is updated in place and persisted before the rules run, so
    /// the "any sensor active" check sees the new value. Unknown sensors
    /// are rejected by the store, not here.
    pub fn set_sensor_activation(&mut self, sensor: &mut Sensor, active: bool) -> Result<()> {
        let alarm = self.alarm_status()?;

        sensor.set_active(active);
        self.store
            .update_sensor(sensor)
            .map_err(store_failure("update_sensor"))?;
        debug!(sensor = %sensor.id(), active, "sensor persisted");

        let event = if active {
            AlarmEvent::SensorActivated
        } else {
            AlarmEvent::SensorDeactivated
        };
        let context = RuleContext {
            alarm,
            arming: self.arming_status()?,
            any_sensor_active: self.any_sensor_active()?,
            cat_detected: self.last_cat_detection.unwrap_or(false),
        };
        self.apply(event, &context)?;

        self.listeners.sensors_changed();
        Ok(())
    }

    /// Switch arming mode.
    ///
    /// Arming (home or away) resets every stored sensor to inactive.
    /// Disarming clears any alarm. Arming home after the last image showed
    /// a cat raises the alarm straight away.
    pub fn set_arming_status(&mut self, arming: ArmingStatus) -> Result<()> {
        let alarm = self.alarm_status()?;

        if arming.is_armed() {
            self.reset_sensors()?;
        }

        let event = if arming.is_armed() {
            AlarmEvent::Armed
        } else {
            AlarmEvent::Disarmed
        };
        let context = RuleContext {
            alarm,
            arming,
            any_sensor_active: self.any_sensor_active()?,
            cat_detected: self.last_cat_detection.unwrap_or(false),
        };
        self.apply(event, &context)?;

        self.store
            .set_arming_status(arming)
            .map_err(store_failure("set_arming_status"))?;
        info!(arming = %arming, "arming status changed");
        Ok(())
    }

    /// Classify a camera frame and apply the image rules.
    ///
    /// The result is remembered even when it changes nothing, so a later
    /// switch to `ArmedHome` can act on it. Returns the detector's answer.
    pub fn process_image(&mut self, image: &D::Image) -> Result<bool> {
        let threshold = self.config.confidence_threshold;
        let cat = self
            .detector
            .contains_cat(image, threshold)
            .map_err(detector_failure)?;
        debug!(cat, threshold, "image classified");
        self.last_cat_detection = Some(cat);

        let context = RuleContext {
            alarm: self.alarm_status()?,
            arming: self.arming_status()?,
            any_sensor_active: self.any_sensor_active()?,
            cat_detected: cat,
        };
        self.apply(AlarmEvent::ImageProcessed, &context)?;

        self.listeners.cat_detected(cat);
        Ok(cat)
    }

    fn any_sensor_active(&self) -> Result<bool> {
        Ok(self.sensors()?.iter().any(Sensor::is_active))
    }

    fn reset_sensors(&mut self) -> Result<()> {
        let sensors = self.sensors()?;
        for mut sensor in sensors {
            sensor.set_active(false);
            self.store
                .update_sensor(&sensor)
                .map_err(store_failure("update_sensor"))?;
        }
        self.listeners.sensors_changed();
        Ok(())
    }

    fn apply(&mut self, event: AlarmEvent, context: &RuleContext) -> Result<Decision> {
        let decision = self.table.evaluate(event, context);
        debug!(
            %event,
            rule = ?decision.rule,
            outcome = ?decision.outcome,
            "rule evaluated"
        );

        if let Outcome::Set(target) = decision.outcome {
            self.commit(context.alarm, target, Some(event))?;
        }
        Ok(decision)
    }

    fn commit(
        &mut self,
        from: AlarmStatus,
        to: AlarmStatus,
        cause: Option<AlarmEvent>,
    ) -> Result<()> {
        self.store
            .set_alarm_status(to)
            .map_err(store_failure("set_alarm_status"))?;

        if from != to {
            info!(%from, %to, cause = ?cause, "alarm status changed");
            if self.config.history_limit > 0 {
                self.history = self
                    .history
                    .record(StatusTransition {
                        from,
                        to,
                        cause,
                        timestamp: Utc::now(),
                    })
                    .retain_last(self.config.history_limit);
            }
        }

        self.listeners.notify(to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::SensorType;
    use crate::store::MemoryStore;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// Answers whatever the shared flag says.
    #[derive(Clone, Default)]
    struct StubDetector {
        cat: Arc<AtomicBool>,
    }

    impl StubDetector {
        fn sees_cat(&self, cat: bool) {
            self.cat.store(cat, Ordering::SeqCst);
        }
    }

    impl CatDetector for StubDetector {
        type Image = ();

        fn contains_cat(
            &self,
            _image: &(),
            _threshold: f32,
        ) -> std::result::Result<bool, DetectorError> {
            Ok(self.cat.load(Ordering::SeqCst))
        }
    }

    #[derive(Default)]
    struct Recorder {
        statuses: Mutex<Vec<AlarmStatus>>,
    }

    impl StatusListener for Recorder {
        fn notify(&self, status: AlarmStatus) {
            self.statuses.lock().unwrap().push(status);
        }
    }

    fn controller_with(
        sensors: Vec<Sensor>,
    ) -> (AlarmController<MemoryStore, StubDetector>, StubDetector) {
        let detector = StubDetector::default();
        let controller = AlarmController::new(MemoryStore::with_sensors(sensors), detector.clone());
        (controller, detector)
    }

    fn door() -> Sensor {
        Sensor::new("Front Door", SensorType::Door)
    }

    #[test]
    fn new_controller_reads_store_defaults() {
        let (controller, _) = controller_with(vec![]);
        assert_eq!(controller.alarm_status().unwrap(), AlarmStatus::NoAlarm);
        assert_eq!(controller.arming_status().unwrap(), ArmingStatus::Disarmed);
        assert_eq!(controller.last_cat_detection(), None);
        assert!(controller.history().is_empty());
    }

    #[test]
    fn new_controller_uses_default_config_and_standard_rules() {
        let (controller, _) = controller_with(vec![]);
        assert_eq!(controller.config(), &ControllerConfig::default());
        assert_eq!(
            controller.table().rules().len(),
            TransitionTable::standard().rules().len()
        );

        let controller = controller.with_table(TransitionTable::new());
        assert!(controller.table().rules().is_empty());
    }

    #[test]
    fn with_config_rejects_invalid_threshold() {
        let config = ControllerConfig {
            confidence_threshold: 200.0,
            ..ControllerConfig::default()
        };
        let result = AlarmController::with_config(
            MemoryStore::new(),
            StubDetector::default(),
            config,
        );
        assert!(matches!(result, Err(SecurityError::Config(_))));
    }

    #[test]
    fn armed_activation_escalates_through_pending() {
        let mut first = door();
        let mut second = Sensor::new("Hall", SensorType::Motion);
        let (mut controller, _) = controller_with(vec![first.clone(), second.clone()]);
        controller.set_arming_status(ArmingStatus::ArmedAway).unwrap();

        controller.set_sensor_activation(&mut first, true).unwrap();
        assert_eq!(controller.alarm_status().unwrap(), AlarmStatus::PendingAlarm);

        controller.set_sensor_activation(&mut second, true).unwrap();
        assert_eq!(controller.alarm_status().unwrap(), AlarmStatus::Alarm);
    }

    #[test]
    fn disarmed_activation_changes_nothing() {
        let mut sensor = door();
        let (mut controller, _) = controller_with(vec![sensor.clone()]);

        controller.set_sensor_activation(&mut sensor, true).unwrap();

        assert_eq!(controller.alarm_status().unwrap(), AlarmStatus::NoAlarm);
        assert!(controller.sensors().unwrap()[0].is_active());
    }

    #[test]
    fn deactivating_last_sensor_clears_pending() {
        let mut sensor = door();
        let (mut controller, _) = controller_with(vec![sensor.clone()]);
        controller.set_arming_status(ArmingStatus::ArmedHome).unwrap();
        controller.set_sensor_activation(&mut sensor, true).unwrap();

        controller.set_sensor_activation(&mut sensor, false).unwrap();

        assert_eq!(controller.alarm_status().unwrap(), AlarmStatus::NoAlarm);
        assert!(!sensor.is_active());
    }

    #[test]
    fn alarm_is_sticky_for_sensor_changes() {
        let mut sensor = door();
        let (mut controller, _) = controller_with(vec![sensor.clone()]);
        controller.set_arming_status(ArmingStatus::ArmedAway).unwrap();
        controller.set_alarm_status(AlarmStatus::Alarm).unwrap();

        controller.set_sensor_activation(&mut sensor, true).unwrap();
        controller.set_sensor_activation(&mut sensor, false).unwrap();

        assert_eq!(controller.alarm_status().unwrap(), AlarmStatus::Alarm);
    }

    #[test]
    fn arming_resets_every_sensor() {
        let mut a = door();
        let mut b = Sensor::new("Back Window", SensorType::Window);
        a.set_active(true);
        b.set_active(true);
        let (mut controller, _) = controller_with(vec![a, b]);

        controller.set_arming_status(ArmingStatus::ArmedAway).unwrap();

        assert!(controller.sensors().unwrap().iter().all(|s| !s.is_active()));
        assert_eq!(controller.arming_status().unwrap(), ArmingStatus::ArmedAway);
    }

    #[test]
    fn disarming_clears_alarm() {
        let (mut controller, _) = controller_with(vec![]);
        controller.set_alarm_status(AlarmStatus::Alarm).unwrap();

        controller.set_arming_status(ArmingStatus::Disarmed).unwrap();

        assert_eq!(controller.alarm_status().unwrap(), AlarmStatus::NoAlarm);
    }

    #[test]
    fn cat_seen_while_armed_home_raises_alarm() {
        let (mut controller, detector) = controller_with(vec![]);
        controller.set_arming_status(ArmingStatus::ArmedHome).unwrap();
        detector.sees_cat(true);

        assert!(controller.process_image(&()).unwrap());
        assert_eq!(controller.alarm_status().unwrap(), AlarmStatus::Alarm);
    }

    #[test]
    fn cat_seen_before_arming_home_is_remembered() {
        let (mut controller, detector) = controller_with(vec![]);
        detector.sees_cat(true);
        controller.process_image(&()).unwrap();
        assert_eq!(controller.alarm_status().unwrap(), AlarmStatus::NoAlarm);
        assert_eq!(controller.last_cat_detection(), Some(true));

        controller.set_arming_status(ArmingStatus::ArmedHome).unwrap();

        assert_eq!(controller.alarm_status().unwrap(), AlarmStatus::Alarm);
    }

    #[test]
    fn clear_image_with_active_sensor_keeps_pending() {
        let mut sensor = door();
        let (mut controller, _) = controller_with(vec![sensor.clone()]);
        controller.set_arming_status(ArmingStatus::ArmedAway).unwrap();
        controller.set_sensor_activation(&mut sensor, true).unwrap();

        controller.process_image(&()).unwrap();

        assert_eq!(controller.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
    }

    #[test]
    fn unchanged_set_notifies_but_skips_history() {
        let (mut controller, _) = controller_with(vec![]);
        let recorder = Arc::new(Recorder::default());
        controller.add_status_listener(recorder.clone());

        controller.set_alarm_status(AlarmStatus::NoAlarm).unwrap();

        assert_eq!(*recorder.statuses.lock().unwrap(), vec![AlarmStatus::NoAlarm]);
        assert!(controller.history().is_empty());
    }

    #[test]
    fn history_records_causes() {
        let mut sensor = door();
        let (mut controller, _) = controller_with(vec![sensor.clone()]);
        controller.set_arming_status(ArmingStatus::ArmedAway).unwrap();
        controller.set_sensor_activation(&mut sensor, true).unwrap();
        controller.set_arming_status(ArmingStatus::Disarmed).unwrap();

        let causes: Vec<_> = controller
            .history()
            .transitions()
            .iter()
            .map(|t| t.cause)
            .collect();
        assert_eq!(
            causes,
            vec![
                Some(AlarmEvent::SensorActivated),
                Some(AlarmEvent::Disarmed)
            ]
        );
        assert_eq!(
            controller.history().path(),
            vec![
                AlarmStatus::NoAlarm,
                AlarmStatus::PendingAlarm,
                AlarmStatus::NoAlarm
            ]
        );
    }

    #[test]
    fn history_limit_zero_disables_recording() {
        let config = ControllerConfig {
            history_limit: 0,
            ..ControllerConfig::default()
        };
        let mut controller =
            AlarmController::with_config(MemoryStore::new(), StubDetector::default(), config)
                .unwrap();

        controller.set_alarm_status(AlarmStatus::Alarm).unwrap();

        assert!(controller.history().is_empty());
    }

    #[test]
    fn custom_table_replaces_standard_rules() {
        let mut sensor = door();
        let (controller, _) = controller_with(vec![sensor.clone()]);
        let mut controller = controller.with_table(TransitionTable::new());
        controller.set_arming_status(ArmingStatus::ArmedAway).unwrap();

        controller.set_sensor_activation(&mut sensor, true).unwrap();

        assert_eq!(controller.alarm_status().unwrap(), AlarmStatus::NoAlarm);
    }

    #[test]
    fn unknown_sensor_error_comes_from_store() {
        let (mut controller, _) = controller_with(vec![]);
        let mut stranger = door();

        let err = controller
            .set_sensor_activation(&mut stranger, true)
            .unwrap_err();

        assert!(matches!(
            err,
            SecurityError::Store(StoreError::UnknownSensor(id)) if id == stranger.id()
        ));
    }
}
