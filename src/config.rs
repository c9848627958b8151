//! Controller configuration.
//!
//! Validation uses Stillwater's `Validation` so a bad config reports every
//! problem at once rather than the first one found.

use crate::detector::DEFAULT_CONFIDENCE_THRESHOLD;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Default number of alarm status changes kept in history.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// A single problem with a [`ControllerConfig`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("Confidence threshold must be a finite number, got {0}")]
    ThresholdNotFinite(f32),

    #[error("Confidence threshold must be within 0..=100, got {0}")]
    ThresholdOutOfRange(f32),
}

/// Every violation found in a config.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Invalid controller config: {}", list(.violations))]
pub struct ConfigError {
    pub violations: Vec<ConfigViolation>,
}

fn list(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Tunables for an [`AlarmController`](crate::controller::AlarmController).
///
/// # Example
///
/// ```rust
/// use catpoint::config::ControllerConfig;
///
/// let config = ControllerConfig {
///     confidence_threshold: 70.0,
///     ..ControllerConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Percent confidence passed to the cat detector.
    pub confidence_threshold: f32,
    /// Alarm status changes kept in history. `0` disables history.
    pub history_limit: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ControllerConfig {
    /// Check every field, accumulating ALL violations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.confidence_threshold;
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        checks.push(if threshold.is_finite() {
            Validation::success(())
        } else {
            Validation::fail(ConfigViolation::ThresholdNotFinite(threshold))
        });

        checks.push(if threshold.is_nan() || (0.0..=100.0).contains(&threshold) {
            Validation::success(())
        } else {
            Validation::fail(ConfigViolation::ThresholdOutOfRange(threshold))
        });

        match Validation::all_vec(checks).map(|_| ()) {
            Validation::Success(()) => Ok(()),
            Validation::Failure(errors) => Err(ConfigError {
                violations: errors.iter().cloned().collect(),
            }),
        }
    }
}
