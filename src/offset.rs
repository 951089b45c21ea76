//! Sensor mounting offset compensation

use nalgebra::Vector2;

use crate::math::DEG_TO_RAD;

/// Mounting offset of a distance sensor from the robot's tracking centre
///
/// Stored as a 2D vector in inches:
/// - `x` is the parallel offset, along the direction the sensor faces
/// - `y` is the perpendicular offset, to the side of that direction
///
/// Fixed at construction and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountingOffset {
    offset: Vector2<f32>,
}

impl MountingOffset {
    /// Create an offset from its parallel and perpendicular components
    ///
    /// # Example
    /// ```
    /// use wall_reset::MountingOffset;
    ///
    /// let offset = MountingOffset::new(6.5, -2.0);
    /// assert_eq!(offset.parallel(), 6.5);
    /// assert_eq!(offset.perpendicular(), -2.0);
    /// ```
    pub fn new(parallel: f32, perpendicular: f32) -> Self {
        Self {
            offset: Vector2::new(parallel, perpendicular),
        }
    }

    /// Sensor mounted at the tracking centre
    pub fn zero() -> Self {
        Self {
            offset: Vector2::zeros(),
        }
    }

    /// Offset along the sensing direction, in inches
    pub fn parallel(&self) -> f32 {
        self.offset.x
    }

    /// Offset across the sensing direction, in inches
    pub fn perpendicular(&self) -> f32 {
        self.offset.y
    }

    /// Offset as a vector
    pub fn as_vector(&self) -> Vector2<f32> {
        self.offset
    }

    /// Project a calibrated reading onto the wall normal
    ///
    /// With `d` the deviation of the robot from the wall axis:
    ///
    /// `cos(d)·reading + cos(d)·parallel + sin(d)·perpendicular`
    ///
    /// The perpendicular term is always added; a sensor mounted on the other
    /// side of the sensing axis takes a negative perpendicular offset.
    ///
    /// # Arguments
    /// * `reading` - Calibrated distance in inches
    /// * `deviation` - Deviation from the wall axis in degrees (see
    ///   [`axis_deviation`](crate::axis_deviation))
    ///
    /// # Example
    /// ```
    /// use wall_reset::MountingOffset;
    ///
    /// let offset = MountingOffset::new(5.0, 0.0);
    /// // Square to the wall: the reading is shifted by the parallel offset
    /// assert!((offset.project(20.0, 0.0) - 25.0).abs() < 1e-5);
    /// ```
    pub fn project(&self, reading: f32, deviation: f32) -> f32 {
        let (sin, cos) = (deviation * DEG_TO_RAD).sin_cos();

        cos * reading + cos * self.offset.x + sin * self.offset.y
    }
}

impl Default for MountingOffset {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Vector2<f32>> for MountingOffset {
    fn from(offset: Vector2<f32>) -> Self {
        Self { offset }
    }
}
