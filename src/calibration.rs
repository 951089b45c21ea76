//! Distance sensor calibration functions

use crate::math::{CONFIDENCE_DOMAIN, ERROR_READING, MM_TO_INCH};
use crate::types::Distance;

/// Converts a raw distance in millimetres to inches
///
/// # Example
/// ```
/// use wall_reset::calibration::calibrate_distance;
///
/// let inches = calibrate_distance(254);
/// assert!((inches - 10.0).abs() < 1e-3);
/// ```
pub fn calibrate_distance(raw_mm: i32) -> f32 {
    raw_mm as f32 * MM_TO_INCH
}

/// Scales a raw sensor confidence into a probability
///
/// # Example
/// ```
/// use wall_reset::calibration::calibrate_confidence;
///
/// assert_eq!(calibrate_confidence(63), 1.0);
/// assert_eq!(calibrate_confidence(0), 0.0);
/// ```
pub fn calibrate_confidence(raw_confidence: i32) -> f32 {
    raw_confidence as f32 / CONFIDENCE_DOMAIN
}

/// Applies unit calibration to a raw `(distance, confidence)` sample
///
/// A raw distance equal to [`ERROR_READING`] is passed through untranslated
/// with zero confidence, so downstream code only ever has to look at the
/// confidence.
pub fn calibrate_reading(raw_mm: i32, raw_confidence: i32) -> Distance {
    if is_error_reading(raw_mm) {
        return Distance::untrusted(ERROR_READING as f32);
    }

    Distance::new(calibrate_distance(raw_mm), calibrate_confidence(raw_confidence))
}

/// Whether a raw distance is the sensor's "no object detected" value
pub fn is_error_reading(raw_mm: i32) -> bool {
    raw_mm == ERROR_READING
}
