//! Camera-based cat detection seam.
//!
//! The classification itself is external. The controller only needs a
//! yes/no answer for an image at a given confidence threshold.

use thiserror::Error;

/// Confidence threshold, in percent, the controller asks detectors to use.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 50.0;

/// Errors a detector can report. Propagated to callers unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DetectorError {
    #[error("Image could not be read: {0}")]
    Unreadable(String),

    #[error("Detection failed: {0}")]
    Failed(String),
}

/// Judges whether an image shows a cat.
///
/// Calls are blocking and have no timeout; a detector that hangs stalls
/// the controller that owns it.
///
/// # Example
///
/// ```rust
/// use catpoint::detector::{CatDetector, DetectorError};
///
/// /// Treats any frame brighter than the threshold as a cat.
/// struct Brightness;
///
/// impl CatDetector for Brightness {
///     type Image = [u8];
///
///     fn contains_cat(&self, image: &[u8], threshold: f32) -> Result<bool, DetectorError> {
///         if image.is_empty() {
///             return Err(DetectorError::Unreadable("empty frame".into()));
///         }
///         let mean = image.iter().map(|&p| f32::from(p)).sum::<f32>() / image.len() as f32;
///         Ok(mean / 255.0 * 100.0 > threshold)
///     }
/// }
///
/// assert_eq!(Brightness.contains_cat(&[255, 255], 50.0), Ok(true));
/// ```
pub trait CatDetector {
    /// Image representation understood by this detector.
    type Image: ?Sized;

    fn contains_cat(
        &self,
        image: &Self::Image,
        confidence_threshold: f32,
    ) -> Result<bool, DetectorError>;
}

impl<T: CatDetector + ?Sized> CatDetector for Box<T> {
    type Image = T::Image;

    fn contains_cat(
        &self,
        image: &Self::Image,
        confidence_threshold: f32,
    ) -> Result<bool, DetectorError> {
        (**self).contains_cat(image, confidence_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Threshold;

    impl CatDetector for Threshold {
        type Image = f32;

        fn contains_cat(&self, score: &f32, threshold: f32) -> Result<bool, DetectorError> {
            if score.is_nan() {
                return Err(DetectorError::Unreadable("score is NaN".into()));
            }
            Ok(*score >= threshold)
        }
    }

    #[test]
    fn boxed_detector_delegates() {
        let detector: Box<Threshold> = Box::new(Threshold);
        assert_eq!(
            detector.contains_cat(&75.0, DEFAULT_CONFIDENCE_THRESHOLD),
            Ok(true)
        );
        assert_eq!(
            detector.contains_cat(&10.0, DEFAULT_CONFIDENCE_THRESHOLD),
            Ok(false)
        );
    }

    #[test]
    fn detector_errors_carry_reason() {
        let err = Threshold.contains_cat(&f32::NAN, 50.0).unwrap_err();
        assert_eq!(err.to_string(), "Image could not be read: score is NaN");
    }
}
