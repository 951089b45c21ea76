//! Wall-facing distance sensor

use log::trace;

use crate::calibration::{calibrate_reading, is_error_reading};
use crate::hardware::DistanceHardware;
use crate::math::axis_deviation;
use crate::offset::MountingOffset;
use crate::types::Distance;

/// Distance sensor used for wall resets
///
/// Couples a hardware handle with the sensor's fixed mounting offset.
pub struct ResetSensor<H> {
    offset: MountingOffset,
    hardware: H,
}

impl<H: DistanceHardware> ResetSensor<H> {
    /// Create a sensor from its mounting offset and hardware handle
    ///
    /// # Arguments
    /// * `offset` - Mounting offset in inches, parallel then perpendicular
    /// * `hardware` - Raw distance sensor access
    pub fn new(offset: MountingOffset, hardware: H) -> Self {
        Self { offset, hardware }
    }

    /// Calibrated reading without heading compensation
    ///
    /// Returns inches and a confidence in `[0, 1]`. When the sensor reports its
    /// error value, that value is returned as-is with zero confidence.
    pub fn read(&self) -> Distance {
        let raw = self.hardware.raw_distance();
        let reading = calibrate_reading(raw, self.hardware.raw_confidence());
        if is_error_reading(raw) {
            trace!("Distance sensor error reading");
        }
        reading
    }

    /// Calibrated reading projected onto the wall normal
    ///
    /// Compensates for the robot's deviation from the wall axis and for the
    /// mounting offset (see [`MountingOffset::project`]). Error readings skip
    /// the projection entirely.
    ///
    /// # Arguments
    /// * `heading` - Robot heading in degrees, normalized to `[0, 360]`
    pub fn read_at(&self, heading: f32) -> Distance {
        let raw = self.hardware.raw_distance();
        let reading = calibrate_reading(raw, self.hardware.raw_confidence());
        if is_error_reading(raw) {
            trace!("Distance sensor error reading at heading {:.2}", heading);
            return reading;
        }

        let projected = self.offset.project(reading.value(), axis_deviation(heading));
        Distance::new(projected, reading.confidence())
    }

    /// Mounting offset of the sensor
    pub fn offset(&self) -> MountingOffset {
        self.offset
    }

    /// Underlying hardware handle
    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    /// Mutable access to the underlying hardware handle
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }
}
