//! Two-sensor position fusion
//!
//! For every combination of field quadrant and heading band exactly two of the
//! four distance sensors face the walls bounding the robot's quadrant. The
//! table below names them and the sign needed to turn a distance-from-wall
//! into a field coordinate:
//!
//! `coordinate = sign · (WALL_COORD − distance)`
//!
//! The remaining two readings are ignored whatever their confidence.

use log::debug;

use crate::math::{WALL_COORD, normalize_heading};
use crate::quadrant::heading_octant;
use crate::types::Sensor::{East as E, North as N, South as S, West as W};
use crate::types::{ActiveSensors, ConfidencePair, Distance, Pose, Quadrant, Sensor};

/// Which sensors produce x and y, and with which sign
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionEntry {
    /// Sensor measuring distance to the x wall
    pub x: Sensor,
    /// Sensor measuring distance to the y wall
    pub y: Sensor,
    /// Sign applied to `WALL_COORD - distance` for x
    pub sign_x: f32,
    /// Sign applied to `WALL_COORD - distance` for y
    pub sign_y: f32,
}

impl FusionEntry {
    const fn new(x: Sensor, y: Sensor, sign_x: f32, sign_y: f32) -> Self {
        Self { x, y, sign_x, sign_y }
    }

    /// Sensors contributing to this entry
    pub fn active(&self) -> ActiveSensors {
        ActiveSensors::pair(self.x, self.y)
    }
}

const POS: f32 = 1.0;
const NEG: f32 = -1.0;

/// Fusion table indexed by `[position quadrant][heading band]`
const TABLE: [[FusionEntry; 4]; 4] = [
    // PosPos
    [
        FusionEntry::new(E, N, POS, POS),
        FusionEntry::new(N, W, POS, POS),
        FusionEntry::new(W, S, POS, POS),
        FusionEntry::new(S, E, POS, POS),
    ],
    // NegPos
    [
        FusionEntry::new(W, N, NEG, POS),
        FusionEntry::new(S, W, NEG, POS),
        FusionEntry::new(E, S, NEG, POS),
        FusionEntry::new(N, E, NEG, POS),
    ],
    // NegNeg
    [
        FusionEntry::new(W, S, NEG, NEG),
        FusionEntry::new(S, E, NEG, NEG),
        FusionEntry::new(E, N, NEG, NEG),
        FusionEntry::new(N, W, NEG, NEG),
    ],
    // PosNeg
    [
        FusionEntry::new(E, S, POS, NEG),
        FusionEntry::new(N, E, POS, NEG),
        FusionEntry::new(W, N, POS, NEG),
        FusionEntry::new(S, W, POS, NEG),
    ],
];

/// Look up the fusion entry for a position quadrant and heading band
///
/// # Example
/// ```
/// use wall_reset::{Quadrant, Sensor, table_entry};
///
/// let entry = table_entry(Quadrant::PosPos, Quadrant::PosPos);
/// assert_eq!((entry.x, entry.y), (Sensor::East, Sensor::North));
/// ```
pub fn table_entry(position: Quadrant, octant: Quadrant) -> FusionEntry {
    TABLE[position.index()][octant.index()]
}

/// Heading-compensated readings of all four sensors
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorReadings {
    pub north: Distance,
    pub east: Distance,
    pub south: Distance,
    pub west: Distance,
}

impl SensorReadings {
    /// Readings in north, east, south, west order
    pub fn new(readings: [Distance; 4]) -> Self {
        let [north, east, south, west] = readings;
        Self {
            north,
            east,
            south,
            west,
        }
    }

    /// Reading of one sensor
    pub fn get(&self, sensor: Sensor) -> Distance {
        match sensor {
            Sensor::North => self.north,
            Sensor::East => self.east,
            Sensor::South => self.south,
            Sensor::West => self.west,
        }
    }

    /// Readings in north, east, south, west order
    pub fn to_array(&self) -> [Distance; 4] {
        [self.north, self.east, self.south, self.west]
    }
}

/// Result of a fusion call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusedPosition {
    /// Fused `(x, y, heading)` and its confidence
    pub estimate: ConfidencePair<Pose>,
    /// Heading band the table was indexed with
    pub octant: Quadrant,
    /// The two sensors that produced the estimate
    pub active: ActiveSensors,
}

/// Fuse four sensor readings into a field position
///
/// Selects the table entry for `position` and the band of `heading`, converts
/// the two selected wall distances into coordinates and averages their
/// confidences. The heading of the estimate is the normalized input heading.
///
/// # Arguments
/// * `position` - Field quadrant the robot is believed to be in
/// * `heading` - Robot heading in degrees
/// * `readings` - Heading-compensated readings of all four sensors
///
/// # Example
/// ```
/// use wall_reset::{Distance, Quadrant, SensorReadings, fuse};
///
/// let readings = SensorReadings::new([
///     Distance::new(20.0, 0.9),
///     Distance::new(15.0, 0.8),
///     Distance::new(100.0, 0.1),
///     Distance::new(100.0, 0.1),
/// ]);
/// let fused = fuse(Quadrant::PosPos, 0.0, &readings);
/// let pose = fused.estimate.value();
///
/// assert!((pose.x - 55.208).abs() < 1e-3);
/// assert!((pose.y - 50.208).abs() < 1e-3);
/// assert!((fused.estimate.confidence() - 0.85).abs() < 1e-6);
/// ```
pub fn fuse(position: Quadrant, heading: f32, readings: &SensorReadings) -> FusedPosition {
    let heading = normalize_heading(heading);
    let octant = heading_octant(heading);
    let entry = table_entry(position, octant);

    let x_reading = readings.get(entry.x);
    let y_reading = readings.get(entry.y);

    let x = entry.sign_x * (WALL_COORD - x_reading.value());
    let y = entry.sign_y * (WALL_COORD - y_reading.value());
    let pose = Pose::new(x, y, heading);

    let mut confidence = conf_avg(x_reading, y_reading);
    if !can_position_exist(&pose) {
        confidence = 0.0;
    }

    debug!(
        "Fused {} in band {} using {}{}: ({:.2}, {:.2}) at {:.2}",
        position,
        octant,
        entry.x.label(),
        entry.y.label(),
        x,
        y,
        confidence
    );

    FusedPosition {
        estimate: ConfidencePair::new(pose, confidence),
        octant,
        active: entry.active(),
    }
}

/// Unweighted mean confidence of two readings
pub fn conf_avg(first: Distance, second: Distance) -> f32 {
    (first.confidence() + second.confidence()) / 2.0
}

/// Plausibility hook for a fused position
///
/// Always reports the position as possible; a reachability check (field
/// elements, robot footprint) plugs in here.
pub fn can_position_exist(_pose: &Pose) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings(distances: [f32; 4], confidences: [f32; 4]) -> SensorReadings {
        let mut pairs = [Distance::default(); 4];
        for i in 0..4 {
            pairs[i] = Distance::new(distances[i], confidences[i]);
        }
        SensorReadings::new(pairs)
    }

    #[test]
    fn test_every_entry_uses_one_axis_pair() {
        for position in Quadrant::ALL {
            for octant in Quadrant::ALL {
                let entry = table_entry(position, octant);
                assert_ne!(entry.x, entry.y);
                assert_eq!(entry.active().count(), 2);

                // One north/south sensor and one east/west sensor
                let ns = [Sensor::North, Sensor::South];
                assert!(ns.contains(&entry.x) != ns.contains(&entry.y));
            }
        }
    }

    #[test]
    fn test_signs_follow_quadrant_row() {
        for octant in Quadrant::ALL {
            let pp = table_entry(Quadrant::PosPos, octant);
            let np = table_entry(Quadrant::NegPos, octant);
            let nn = table_entry(Quadrant::NegNeg, octant);
            let pn = table_entry(Quadrant::PosNeg, octant);
            assert_eq!((pp.sign_x, pp.sign_y), (POS, POS));
            assert_eq!((np.sign_x, np.sign_y), (NEG, POS));
            assert_eq!((nn.sign_x, nn.sign_y), (NEG, NEG));
            assert_eq!((pn.sign_x, pn.sign_y), (POS, NEG));
        }
    }

    #[test]
    fn test_fuse_pos_pos_facing_forward() {
        let readings = readings([20.0, 15.0, 90.0, 90.0], [0.9, 0.8, 0.2, 0.2]);
        let fused = fuse(Quadrant::PosPos, 0.0, &readings);

        let pose = fused.estimate.value();
        assert!((pose.x - 55.208).abs() < 1e-3);
        assert!((pose.y - 50.208).abs() < 1e-3);
        assert_eq!(pose.z, 0.0);
        assert!((fused.estimate.confidence() - 0.85).abs() < 1e-6);
        assert_eq!(fused.active, ActiveSensors::pair(Sensor::North, Sensor::East));
        assert_eq!(fused.octant, Quadrant::PosPos);
    }

    #[test]
    fn test_fuse_negative_quadrant_signs() {
        let readings = readings([10.0, 20.0, 30.0, 40.0], [1.0, 1.0, 1.0, 1.0]);
        let fused = fuse(Quadrant::NegNeg, 180.0, &readings);

        // NegNeg at 180°: x from east, y from north
        let pose = fused.estimate.value();
        assert!((pose.x - -(WALL_COORD - 20.0)).abs() < 1e-4);
        assert!((pose.y - -(WALL_COORD - 10.0)).abs() < 1e-4);
        assert_eq!(pose.z, 180.0);
    }

    #[test]
    fn test_fuse_normalizes_heading() {
        let readings = readings([10.0, 10.0, 10.0, 10.0], [1.0, 1.0, 1.0, 1.0]);
        let fused = fuse(Quadrant::PosPos, -90.0, &readings);

        assert!((fused.estimate.value().z - 270.0).abs() < 1e-4);
        assert_eq!(fused.octant, Quadrant::PosNeg);
    }

    #[test]
    fn test_error_reading_halves_confidence() {
        let readings = readings([9999.0, 15.0, 30.0, 30.0], [0.0, 0.8, 1.0, 1.0]);
        let fused = fuse(Quadrant::PosPos, 10.0, &readings);

        assert!((fused.estimate.confidence() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_conf_avg() {
        let avg = conf_avg(Distance::new(1.0, 0.2), Distance::new(2.0, 0.6));
        assert!((avg - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_can_position_exist_is_permissive() {
        assert!(can_position_exist(&Pose::new(1000.0, -1000.0, 0.0)));
    }
}
