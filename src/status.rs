//! Status report for on-robot displays
//!
//! A [`StatusReport`] is a read-only snapshot produced by
//! [`ResetChassis::status`](crate::ResetChassis::status). Its `Display`
//! implementation renders six short lines sized for a small text screen:
//!
//! ```text
//! SQ: POS_POS, POS_POS
//! SU: N 1, E 1, S 0, W 0
//! SR: N 20.00, E 15.00, S 40.00, W 30.00
//! SC: N 0.33, E 0.33, S 0.33, W 0.33
//! PS: X: 55.21,Y: 50.21,H: 0.00,C: 0.33
//! LC: X: 40.00,Y: 40.00,H: 0.00,S: 1
//! ```

use core::fmt;

use crate::fusion::SensorReadings;
use crate::types::{ActiveSensors, ConfidencePair, Distance, Pose, Quadrant, Sensor};

/// Snapshot of the reset engine's view of the robot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    /// Field quadrant of the tracked pose
    pub position_quadrant: Quadrant,
    /// Heading band of the tracked pose
    pub heading_octant: Quadrant,
    /// Sensors used by the estimate below
    pub active: ActiveSensors,
    /// Normalized inertial heading the sensors were read at
    pub heading: f32,
    /// Heading-compensated sensor readings
    pub readings: SensorReadings,
    /// Fused estimate for the current quadrant
    pub estimate: ConfidencePair<Pose>,
    /// Tracked odometry pose
    pub odometry: Pose,
    /// Whether a reset without override would be applied now
    pub reset_applies: bool,
}

impl StatusReport {
    /// Rendered display lines
    pub fn lines(&self) -> Vec<String> {
        self.to_string().lines().map(str::to_owned).collect()
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SQ: {}, {}", self.position_quadrant, self.heading_octant)?;
        writeln!(f, "SU: {}", self.active)?;

        write!(f, "SR: ")?;
        write_per_sensor(f, &self.readings, |reading| reading.value())?;
        writeln!(f)?;

        write!(f, "SC: ")?;
        write_per_sensor(f, &self.readings, |reading| reading.confidence())?;
        writeln!(f)?;

        let estimate = self.estimate.value();
        writeln!(
            f,
            "PS: X: {:.2},Y: {:.2},H: {:.2},C: {:.2}",
            estimate.x,
            estimate.y,
            self.heading,
            self.estimate.confidence()
        )?;
        write!(
            f,
            "LC: X: {:.2},Y: {:.2},H: {:.2},S: {}",
            self.odometry.x,
            self.odometry.y,
            self.odometry.z,
            u8::from(self.reset_applies)
        )
    }
}

fn write_per_sensor(
    f: &mut fmt::Formatter<'_>,
    readings: &SensorReadings,
    field: impl Fn(Distance) -> f32,
) -> fmt::Result {
    for (i, sensor) in Sensor::ALL.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{} {:.2}", sensor.label(), field(readings.get(sensor)))?;
    }
    Ok(())
}
