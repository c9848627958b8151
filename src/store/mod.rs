//! Durable holder of alarm status, arming status and sensors.
//!
//! The controller owns no sensor state of its own; every read goes through
//! a [`StateStore`]. Stores hold data only, the rules live in
//! [`AlarmController`](crate::controller::AlarmController).

mod memory;

pub use memory::MemoryStore;

use crate::core::{AlarmStatus, ArmingStatus};
use crate::sensor::{Sensor, SensorId};
use thiserror::Error;

/// Errors a store can report. Propagated to callers unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Sensor {0} is not known to the store")]
    UnknownSensor(SensorId),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Get/set access to persisted security state. Last write wins per field.
pub trait StateStore {
    /// Last persisted alarm status.
    fn alarm_status(&self) -> Result<AlarmStatus, StoreError>;

    /// Persist a new alarm status.
    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError>;

    /// Last persisted arming status.
    fn arming_status(&self) -> Result<ArmingStatus, StoreError>;

    /// Persist a new arming status.
    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError>;

    /// Every known sensor, with its persisted `active` flag.
    fn sensors(&self) -> Result<Vec<Sensor>, StoreError>;

    /// Start tracking a sensor.
    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError>;

    /// Stop tracking a sensor.
    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError>;

    /// Persist a mutated sensor so later reads observe it.
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError>;
}

impl<T: StateStore + ?Sized> StateStore for Box<T> {
    fn alarm_status(&self) -> Result<AlarmStatus, StoreError> {
        (**self).alarm_status()
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError> {
        (**self).set_alarm_status(status)
    }

    fn arming_status(&self) -> Result<ArmingStatus, StoreError> {
        (**self).arming_status()
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError> {
        (**self).set_arming_status(status)
    }

    fn sensors(&self) -> Result<Vec<Sensor>, StoreError> {
        (**self).sensors()
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError> {
        (**self).add_sensor(sensor)
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        (**self).remove_sensor(sensor)
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        (**self).update_sensor(sensor)
    }
}
