//! Sensors known to the security system.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// Stable identity of a sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorId(Uuid);

impl SensorId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SensorId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SensorId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Kind of physical sensor. Opaque to the alarm rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

/// A binary contact or motion detector.
///
/// The `active` flag is only authoritative once persisted through a
/// [`StateStore`](crate::store::StateStore).
///
/// # Example
///
/// ```rust
/// use catpoint::sensor::{Sensor, SensorType};
///
/// let sensor = Sensor::new("Front Door", SensorType::Door);
/// assert!(!sensor.is_active());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sensor {
    id: SensorId,
    name: String,
    sensor_type: SensorType,
    active: bool,
}

impl Sensor {
    /// Create an inactive sensor with a fresh id.
    pub fn new(name: impl Into<String>, sensor_type: SensorType) -> Self {
        Self::with_id(SensorId::new(), name, sensor_type)
    }

    /// Create an inactive sensor with a known id.
    pub fn with_id(id: SensorId, name: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            id,
            name: name.into(),
            sensor_type,
            active: false,
        }
    }

    /// Stable identity.
    pub fn id(&self) -> SensorId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of sensor.
    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    /// Whether the sensor currently reports activity.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Set the activity flag. Not persisted until the store is updated.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

// Sensors list alphabetically; the id breaks ties between equal names.
impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.sensor_type.cmp(&other.sensor_type))
            .then_with(|| self.active.cmp(&other.active))
    }
}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
