//! In-process store.

use super::{StateStore, StoreError};
use crate::core::{AlarmStatus, ArmingStatus};
use crate::sensor::{Sensor, SensorId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A [`StateStore`] that keeps everything in memory.
///
/// Starts at `NoAlarm` / `Disarmed` with no sensors. Handy for hosts that
/// don't need durability and for tests.
///
/// # Example
///
/// ```rust
/// use catpoint::sensor::{Sensor, SensorType};
/// use catpoint::store::{MemoryStore, StateStore};
///
/// let mut store = MemoryStore::new();
/// store.add_sensor(Sensor::new("Porch", SensorType::Motion)).unwrap();
/// assert_eq!(store.sensors().unwrap().len(), 1);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    alarm_status: AlarmStatus,
    arming_status: ArmingStatus,
    sensors: BTreeMap<SensorId, Sensor>,
}

impl MemoryStore {
    /// Empty store at `NoAlarm` and `Disarmed`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an initial set of sensors.
    pub fn with_sensors(sensors: impl IntoIterator<Item = Sensor>) -> Self {
        Self {
            sensors: sensors.into_iter().map(|s| (s.id(), s)).collect(),
            ..Self::default()
        }
    }

    /// Look up a single sensor by id.
    pub fn sensor(&self, id: SensorId) -> Option<&Sensor> {
        self.sensors.get(&id)
    }
}

impl StateStore for MemoryStore {
    fn alarm_status(&self) -> Result<AlarmStatus, StoreError> {
        Ok(self.alarm_status)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError> {
        self.alarm_status = status;
        Ok(())
    }

    fn arming_status(&self) -> Result<ArmingStatus, StoreError> {
        Ok(self.arming_status)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError> {
        self.arming_status = status;
        Ok(())
    }

    fn sensors(&self) -> Result<Vec<Sensor>, StoreError> {
        let mut sensors: Vec<Sensor> = self.sensors.values().cloned().collect();
        sensors.sort();
        Ok(sensors)
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError> {
        self.sensors.insert(sensor.id(), sensor);
        Ok(())
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        self.sensors
            .remove(&sensor.id())
            .map(|_| ())
            .ok_or(StoreError::UnknownSensor(sensor.id()))
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        let stored = self
            .sensors
            .get_mut(&sensor.id())
            .ok_or(StoreError::UnknownSensor(sensor.id()))?;
        *stored = sensor.clone();
        Ok(())
    }
}
