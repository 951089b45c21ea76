//! Hardware seams consumed by the reset engine
//!
//! The engine never talks to a device driver directly. Anything that can
//! produce a raw distance sample, report and set a heading, or read and
//! write a pose can be plugged in by implementing these traits.

use crate::types::Pose;

/// Raw access to a distance sensor
///
/// Distances are in millimetres. A distance equal to
/// [`ERROR_READING`](crate::ERROR_READING) means no object was detected.
/// Confidence is on the sensor's native scale, `0..=63`.
pub trait DistanceHardware {
    /// Raw distance in millimetres
    fn raw_distance(&self) -> i32;

    /// Raw confidence of the last distance sample
    fn raw_confidence(&self) -> i32;
}

/// Inertial sensor heading access
pub trait InertialHardware {
    /// Current heading in degrees
    fn heading(&self) -> f32;

    /// Overwrite the current heading, in degrees
    fn set_heading(&mut self, heading: f32);
}

/// Pose storage of an odometry-tracked drivebase
///
/// Any odometry backend works as long as it can report and accept a pose.
///
/// # Example
/// ```
/// use wall_reset::{Drivebase, Pose};
///
/// struct Odometry {
///     pose: Pose,
/// }
///
/// impl Drivebase for Odometry {
///     fn pose(&self) -> Pose {
///         self.pose
///     }
///
///     fn set_pose(&mut self, pose: Pose) {
///         self.pose = pose;
///     }
/// }
/// ```
pub trait Drivebase {
    /// Current tracked pose
    fn pose(&self) -> Pose;

    /// Replace the tracked pose
    fn set_pose(&mut self, pose: Pose);
}

impl<T: DistanceHardware + ?Sized> DistanceHardware for Box<T> {
    fn raw_distance(&self) -> i32 {
        (**self).raw_distance()
    }

    fn raw_confidence(&self) -> i32 {
        (**self).raw_confidence()
    }
}

impl<T: InertialHardware + ?Sized> InertialHardware for Box<T> {
    fn heading(&self) -> f32 {
        (**self).heading()
    }

    fn set_heading(&mut self, heading: f32) {
        (**self).set_heading(heading)
    }
}

impl<T: Drivebase + ?Sized> Drivebase for Box<T> {
    fn pose(&self) -> Pose {
        (**self).pose()
    }

    fn set_pose(&mut self, pose: Pose) {
        (**self).set_pose(pose)
    }
}
