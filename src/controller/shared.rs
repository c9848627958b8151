//! Thread-safe handle around an [`AlarmController`].

use super::AlarmController;
use crate::core::{AlarmStatus, ArmingStatus, StatusHistory};
use crate::detector::CatDetector;
use crate::error::Result;
use crate::listener::StatusListener;
use crate::sensor::Sensor;
use crate::store::StateStore;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle that serializes every call on one mutex.
///
/// Each method takes the lock exactly once and holds it until the call,
/// listener callbacks included, has finished. Listeners must therefore
/// not call back into the same handle.
///
/// A panic inside a previous call does not lock the handle out: the
/// controller keeps no derived state that a half-finished call could
/// corrupt, so the poisoned guard is reused.
///
/// # Example
///
/// ```rust
/// use catpoint::controller::{AlarmController, SharedController};
/// use catpoint::core::{AlarmStatus, ArmingStatus};
/// use catpoint::detector::{CatDetector, DetectorError};
/// use catpoint::store::MemoryStore;
/// use std::thread;
///
/// struct NeverCat;
///
/// impl CatDetector for NeverCat {
///     type Image = ();
///
///     fn contains_cat(&self, _: &(), _: f32) -> Result<bool, DetectorError> {
///         Ok(false)
///     }
/// }
///
/// let shared = SharedController::new(AlarmController::new(MemoryStore::new(), NeverCat));
/// let ui = shared.clone();
///
/// thread::spawn(move || ui.set_arming_status(ArmingStatus::ArmedAway))
///     .join()
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(shared.arming_status().unwrap(), ArmingStatus::ArmedAway);
/// assert_eq!(shared.alarm_status().unwrap(), AlarmStatus::NoAlarm);
/// ```
pub struct SharedController<S: StateStore, D: CatDetector> {
    inner: Arc<Mutex<AlarmController<S, D>>>,
}

impl<S: StateStore, D: CatDetector> Clone for SharedController<S, D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: StateStore, D: CatDetector> From<AlarmController<S, D>> for SharedController<S, D> {
    fn from(controller: AlarmController<S, D>) -> Self {
        Self::new(controller)
    }
}

impl<S: StateStore, D: CatDetector> SharedController<S, D> {
    /// Wrap a controller for shared use.
    pub fn new(controller: AlarmController<S, D>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AlarmController<S, D>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the controller.
    pub fn with<R>(&self, f: impl FnOnce(&mut AlarmController<S, D>) -> R) -> R {
        f(&mut self.lock())
    }

    /// See [`AlarmController::alarm_status`].
    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        self.lock().alarm_status()
    }

    /// See [`AlarmController::arming_status`].
    pub fn arming_status(&self) -> Result<ArmingStatus> {
        self.lock().arming_status()
    }

    /// See [`AlarmController::sensors`].
    pub fn sensors(&self) -> Result<Vec<Sensor>> {
        self.lock().sensors()
    }

    /// See [`AlarmController::add_sensor`].
    pub fn add_sensor(&self, sensor: Sensor) -> Result<()> {
        self.lock().add_sensor(sensor)
    }

    /// See [`AlarmController::remove_sensor`].
    pub fn remove_sensor(&self, sensor: &Sensor) -> Result<()> {
        self.lock().remove_sensor(sensor)
    }

    /// See [`AlarmController::set_alarm_status`].
    pub fn set_alarm_status(&self, status: AlarmStatus) -> Result<()> {
        self.lock().set_alarm_status(status)
    }

    /// See [`AlarmController::set_sensor_activation`].
    pub fn set_sensor_activation(&self, sensor: &mut Sensor, active: bool) -> Result<()> {
        self.lock().set_sensor_activation(sensor, active)
    }

    /// See [`AlarmController::set_arming_status`].
    pub fn set_arming_status(&self, arming: ArmingStatus) -> Result<()> {
        self.lock().set_arming_status(arming)
    }

    /// See [`AlarmController::process_image`].
    pub fn process_image(&self, image: &D::Image) -> Result<bool> {
        self.lock().process_image(image)
    }

    /// See [`AlarmController::add_status_listener`].
    pub fn add_status_listener(&self, listener: Arc<dyn StatusListener>) -> bool {
        self.lock().add_status_listener(listener)
    }

    /// See [`AlarmController::remove_status_listener`].
    pub fn remove_status_listener(&self, listener: &Arc<dyn StatusListener>) -> bool {
        self.lock().remove_status_listener(listener)
    }

    /// See [`AlarmController::last_cat_detection`].
    pub fn last_cat_detection(&self) -> Option<bool> {
        self.lock().last_cat_detection()
    }

    /// Snapshot of the recorded alarm status changes.
    pub fn history(&self) -> StatusHistory<AlarmStatus> {
        self.lock().history().clone()
    }
}
