//! Errors surfaced by the controller.
//!
//! The controller has no failure modes of its own. Anything a collaborator
//! reports is wrapped once and handed back to the caller untouched.

use crate::config::ConfigError;
use crate::detector::DetectorError;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecurityError {
    #[error("State store failed")]
    Store(#[from] StoreError),

    #[error("Cat detector failed")]
    Detector(#[from] DetectorError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, SecurityError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn store_error_is_kept_as_source() {
        let err = SecurityError::from(StoreError::Unavailable("disk full".into()));

        assert_eq!(err.to_string(), "State store failed");
        assert_eq!(
            err.source().map(ToString::to_string),
            Some("Store unavailable: disk full".to_string())
        );
    }

    #[test]
    fn detector_error_is_kept_as_source() {
        let err = SecurityError::from(DetectorError::Failed("model missing".into()));
        assert!(matches!(
            err,
            SecurityError::Detector(DetectorError::Failed(_))
        ));
    }
}
