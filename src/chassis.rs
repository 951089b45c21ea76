//! Distance sensor reset engine

use core::cell::Cell;

use log::{debug, info};

use crate::fusion::{FusedPosition, SensorReadings, fuse};
use crate::hardware::{DistanceHardware, Drivebase, InertialHardware};
use crate::math::normalize_heading;
use crate::quadrant::{heading_octant, position_quadrant};
use crate::sensor::ResetSensor;
use crate::status::StatusReport;
use crate::types::{ActiveSensors, ConfidencePair, Pose, Quadrant, ResetSettings, ResetVerdict, Sensor};

/// Robot chassis equipped for distance sensor resets
///
/// Owns the four wall-facing sensors, the inertial sensor and the drivebase
/// whose tracked pose gets corrected. Everything is bound at construction;
/// every reading and estimate is recomputed on each call.
///
/// # Example
/// ```
/// use wall_reset::{
///     DistanceHardware, Drivebase, InertialHardware, MountingOffset, Pose, Quadrant,
///     ResetChassis, ResetSensor, ResetSettings,
/// };
///
/// struct Wall(i32);
/// impl DistanceHardware for Wall {
///     fn raw_distance(&self) -> i32 { self.0 }
///     fn raw_confidence(&self) -> i32 { 63 }
/// }
///
/// struct Imu(f32);
/// impl InertialHardware for Imu {
///     fn heading(&self) -> f32 { self.0 }
///     fn set_heading(&mut self, heading: f32) { self.0 = heading; }
/// }
///
/// struct Odometry(Pose);
/// impl Drivebase for Odometry {
///     fn pose(&self) -> Pose { self.0 }
///     fn set_pose(&mut self, pose: Pose) { self.0 = pose; }
/// }
///
/// let sensors = [508, 381, 2540, 2540]
///     .map(|mm| ResetSensor::new(MountingOffset::zero(), Wall(mm)));
/// let mut chassis = ResetChassis::new(
///     ResetSettings::default(),
///     Imu(0.0),
///     Odometry(Pose::new(50.0, 50.0, 0.0)),
///     sensors,
/// );
///
/// // Fully confident sensors exceed the trust threshold, so override it
/// assert!(chassis.perform_reset(true));
/// let pose = chassis.drivebase().pose();
/// assert!((pose.x - 55.208).abs() < 1e-2);
/// assert!((pose.y - 50.208).abs() < 1e-2);
/// ```
pub struct ResetChassis<D, I, S> {
    /// Reset settings
    settings: ResetSettings,
    /// Inertial sensor providing the heading
    imu: I,
    /// Drivebase holding the tracked pose
    drivebase: D,
    /// Sensors in north, east, south, west order
    sensors: [ResetSensor<S>; 4],
    /// Sensors used by the most recent fused estimate
    active_sensors: Cell<ActiveSensors>,
}

impl<D, I, S> ResetChassis<D, I, S>
where
    D: Drivebase,
    I: InertialHardware,
    S: DistanceHardware,
{
    /// Create a chassis from its settings and devices
    ///
    /// # Arguments
    /// * `settings` - Reset settings
    /// * `imu` - Inertial sensor
    /// * `drivebase` - Drivebase whose pose gets corrected
    /// * `sensors` - Distance sensors in north, east, south, west order
    pub fn new(settings: ResetSettings, imu: I, drivebase: D, sensors: [ResetSensor<S>; 4]) -> Self {
        Self {
            settings,
            imu,
            drivebase,
            sensors,
            active_sensors: Cell::new(ActiveSensors::NONE),
        }
    }

    /// Reset settings
    pub fn settings(&self) -> ResetSettings {
        self.settings
    }

    /// Inertial sensor
    pub fn imu(&self) -> &I {
        &self.imu
    }

    /// Drivebase
    pub fn drivebase(&self) -> &D {
        &self.drivebase
    }

    /// Mutable drivebase, for odometry updates between resets
    pub fn drivebase_mut(&mut self) -> &mut D {
        &mut self.drivebase
    }

    /// Distance sensor mounted in the given role
    pub fn sensor(&self, sensor: Sensor) -> &ResetSensor<S> {
        &self.sensors[sensor.index()]
    }

    /// Field quadrant of the drivebase's current pose
    pub fn quadrant(&self) -> Quadrant {
        position_quadrant(&self.drivebase.pose())
    }

    /// Heading band of the drivebase's current heading
    pub fn sensor_relevancy(&self) -> Quadrant {
        heading_octant(normalize_heading(self.drivebase.pose().z))
    }

    /// Heading-compensated readings of all four sensors
    pub fn readings(&self, heading: f32) -> SensorReadings {
        let heading = normalize_heading(heading);
        SensorReadings::new(self.sensors.each_ref().map(|sensor| sensor.read_at(heading)))
    }

    /// Fused position estimate at the drivebase's current heading
    pub fn position_calculation(&self, quadrant: Quadrant) -> ConfidencePair<Pose> {
        self.position_calculation_at(quadrant, self.drivebase.pose().z)
    }

    /// Fused position estimate at an explicit heading
    ///
    /// Records the sensors used in [`active_sensors`](Self::active_sensors).
    pub fn position_calculation_at(&self, quadrant: Quadrant, heading: f32) -> ConfidencePair<Pose> {
        self.fuse_at(quadrant, heading).estimate
    }

    /// Weigh the current estimate against the trust threshold without
    /// touching the drivebase
    ///
    /// The estimate is withheld when its confidence is above
    /// [`ResetSettings::sensor_trust`] and `trust_override` is false.
    pub fn evaluate_reset(&self, quadrant: Quadrant, trust_override: bool) -> ResetVerdict {
        let estimate = self.position_calculation(quadrant);
        let withheld = estimate.confidence() > self.settings.sensor_trust && !trust_override;

        ResetVerdict {
            estimate,
            apply: !withheld,
        }
    }

    /// Reset the tracked position using the quadrant of the current pose
    ///
    /// Returns whether the pose was overwritten.
    pub fn perform_reset(&mut self, trust_override: bool) -> bool {
        let quadrant = self.quadrant();
        self.perform_reset_for_quadrant(quadrant, trust_override)
    }

    /// Reset the tracked position assuming the robot is in `quadrant`
    ///
    /// Fuses at the current heading. If the estimate is withheld by the trust
    /// threshold the pose is left untouched and `false` is returned. Otherwise
    /// x and y are overwritten together, the heading is kept, and `true` is
    /// returned.
    pub fn perform_reset_for_quadrant(&mut self, quadrant: Quadrant, trust_override: bool) -> bool {
        let verdict = self.evaluate_reset(quadrant, trust_override);
        let estimate = verdict.estimate;

        if !verdict.apply {
            debug!(
                "Reset withheld in {}: confidence {:.2} above trust {:.2}",
                quadrant,
                estimate.confidence(),
                self.settings.sensor_trust
            );
            return false;
        }

        let mut pose = self.drivebase.pose();
        pose.x = estimate.value().x;
        pose.y = estimate.value().y;
        self.drivebase.set_pose(pose);

        info!(
            "Reset applied in {}: ({:.2}, {:.2}) confidence {:.2}",
            quadrant,
            pose.x,
            pose.y,
            estimate.confidence()
        );
        true
    }

    /// Initialize the pose from the sensors at the start of a run
    ///
    /// Sets the inertial heading, zeroes the pose at that heading, then
    /// overwrites x and y with the fused estimate regardless of confidence.
    pub fn perform_reset_init(&mut self, quadrant: Quadrant, heading: f32) {
        self.imu.set_heading(heading);
        self.drivebase.set_pose(Pose::new(0.0, 0.0, heading));

        let estimate = self.position_calculation_at(quadrant, heading);
        let pose = Pose::new(estimate.value().x, estimate.value().y, heading);
        self.drivebase.set_pose(pose);

        info!(
            "Initial reset in {} at {:.2}: ({:.2}, {:.2}) confidence {:.2}",
            quadrant,
            heading,
            pose.x,
            pose.y,
            estimate.confidence()
        );
    }

    /// Sensors used by the most recent fused estimate
    pub fn active_sensors(&self) -> ActiveSensors {
        self.active_sensors.get()
    }

    /// Whether the sensor was used by the most recent fused estimate
    pub fn is_sensor_used(&self, sensor: Sensor) -> bool {
        self.active_sensors.get().contains(sensor)
    }

    /// Diagnostic snapshot for status displays
    ///
    /// Reads the sensors at the inertial heading and evaluates a reset for the
    /// current quadrant without applying it.
    pub fn status(&self) -> StatusReport {
        let heading = normalize_heading(self.imu.heading());
        let readings = self.readings(heading);
        let verdict = self.evaluate_reset(self.quadrant(), false);

        StatusReport {
            position_quadrant: self.quadrant(),
            heading_octant: self.sensor_relevancy(),
            active: self.active_sensors(),
            heading,
            readings,
            estimate: verdict.estimate,
            odometry: self.drivebase.pose(),
            reset_applies: verdict.apply,
        }
    }

    fn fuse_at(&self, quadrant: Quadrant, heading: f32) -> FusedPosition {
        let heading = normalize_heading(heading);
        let fused = fuse(quadrant, heading, &self.readings(heading));
        self.active_sensors.set(fused.active);
        fused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offset::MountingOffset;

    struct Sample(i32, i32);

    impl DistanceHardware for Sample {
        fn raw_distance(&self) -> i32 {
            self.0
        }

        fn raw_confidence(&self) -> i32 {
            self.1
        }
    }

    struct Imu(f32);

    impl InertialHardware for Imu {
        fn heading(&self) -> f32 {
            self.0
        }

        fn set_heading(&mut self, heading: f32) {
            self.0 = heading;
        }
    }

    struct Odometry(Pose);

    impl Drivebase for Odometry {
        fn pose(&self) -> Pose {
            self.0
        }

        fn set_pose(&mut self, pose: Pose) {
            self.0 = pose;
        }
    }

    fn chassis(trust: f32, confidence: i32, pose: Pose) -> ResetChassis<Odometry, Imu, Sample> {
        let sensors = [508, 381, 1016, 762]
            .map(|mm| ResetSensor::new(MountingOffset::zero(), Sample(mm, confidence)));
        ResetChassis::new(
            ResetSettings { sensor_trust: trust },
            Imu(pose.z),
            Odometry(pose),
            sensors,
        )
    }

    #[test]
    fn test_quadrant_follows_pose() {
        let chassis = chassis(0.5, 63, Pose::new(-10.0, -10.0, 100.0));
        assert_eq!(chassis.quadrant(), Quadrant::NegNeg);
        assert_eq!(chassis.sensor_relevancy(), Quadrant::NegPos);
    }

    #[test]
    fn test_reset_withheld_above_trust() {
        let start = Pose::new(40.0, 40.0, 10.0);
        let mut chassis = chassis(0.5, 63, start);

        assert!(!chassis.perform_reset(false));
        assert_eq!(chassis.drivebase().pose(), start);
    }

    #[test]
    fn test_reset_applied_at_or_below_trust() {
        let start = Pose::new(40.0, 40.0, 10.0);
        let mut chassis = chassis(0.5, 21, start);

        assert!(chassis.perform_reset(false));
        let pose = chassis.drivebase().pose();
        assert_ne!((pose.x, pose.y), (start.x, start.y));
        assert_eq!(pose.z, 10.0);
    }

    #[test]
    fn test_override_applies_confident_reset() {
        let mut chassis = chassis(0.5, 63, Pose::new(40.0, 40.0, 0.0));
        assert!(chassis.perform_reset_for_quadrant(Quadrant::PosPos, true));
        assert!(chassis.is_sensor_used(Sensor::North));
        assert!(chassis.is_sensor_used(Sensor::East));
        assert!(!chassis.is_sensor_used(Sensor::South));
    }

    #[test]
    fn test_reset_init_sets_heading_and_position() {
        let mut chassis = chassis(0.0, 0, Pose::new(3.0, 4.0, 17.0));
        chassis.perform_reset_init(Quadrant::PosPos, 90.0);

        assert_eq!(chassis.imu().heading(), 90.0);
        let pose = chassis.drivebase().pose();
        assert_eq!(pose.z, 90.0);
        assert_ne!((pose.x, pose.y), (3.0, 4.0));
    }

    #[test]
    fn test_status_does_not_move_pose() {
        let start = Pose::new(40.0, 40.0, 0.0);
        let chassis = chassis(0.5, 21, start);
        let status = chassis.status();

        assert!(status.reset_applies);
        assert_eq!(chassis.drivebase().pose(), start);
        assert_eq!(status.active.count(), 2);
    }
}
