//! Catpoint: alarm state engine for a home security controller
//!
//! Catpoint decides whether the premises are quiet, pending, or in alarm
//! from three inputs: sensor activity, the arming mode, and an optional
//! camera that reports whether it sees a cat. Interested observers are
//! told every time the alarm level is set.
//!
//! The engine follows a "pure core, imperative shell" split. The rules
//! are a pure, ordered table of named guards; the controller is the thin
//! shell that reads the store, evaluates the table and writes back.
//!
//! # Core Concepts
//!
//! - **Status**: `AlarmStatus` and `ArmingStatus`, plain `Copy` values
//! - **Rules**: named rows of a `TransitionTable`, each a guard plus outcome
//! - **Collaborators**: a `StateStore` holds the data, a `CatDetector`
//!   classifies images, `StatusListener`s observe changes
//! - **History**: immutable record of every alarm level change
//!
//! # Example
//!
//! ```rust
//! use catpoint::{AlarmController, AlarmStatus, ArmingStatus, CatDetector, DetectorError};
//! use catpoint::sensor::{Sensor, SensorType};
//! use catpoint::store::MemoryStore;
//! use std::sync::Arc;
//!
//! struct NoCamera;
//!
//! impl CatDetector for NoCamera {
//!     type Image = ();
//!
//!     fn contains_cat(&self, _: &(), _: f32) -> Result<bool, DetectorError> {
//!         Ok(false)
//!     }
//! }
//!
//! let mut door = Sensor::new("Front Door", SensorType::Door);
//! let store = MemoryStore::with_sensors([door.clone()]);
//! let mut controller = AlarmController::new(store, NoCamera);
//! controller.add_status_listener(Arc::new(|status: AlarmStatus| {
//!     println!("alarm is now {status}");
//! }));
//!
//! controller.set_arming_status(ArmingStatus::ArmedAway)?;
//! controller.set_sensor_activation(&mut door, true)?;
//! assert_eq!(controller.alarm_status()?, AlarmStatus::PendingAlarm);
//!
//! controller.set_arming_status(ArmingStatus::Disarmed)?;
//! assert_eq!(controller.alarm_status()?, AlarmStatus::NoAlarm);
//! # Ok::<(), catpoint::SecurityError>(())
//! ```

pub mod config;
pub mod controller;
pub mod core;
pub mod detector;
pub mod error;
pub mod listener;
pub mod rules;
pub mod sensor;
pub mod store;

// Re-export commonly used types
pub use config::ControllerConfig;
pub use controller::{AlarmController, SharedController};
pub use crate::core::{AlarmStatus, ArmingStatus, State};
pub use detector::{CatDetector, DetectorError};
pub use error::{Result, SecurityError};
pub use listener::StatusListener;
pub use store::{MemoryStore, StateStore, StoreError};
