//! Core types and conventions for wall resets

use core::fmt;

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Field pose as `(x, y, heading)`
///
/// X and Y are in inches from the field origin, heading is in degrees and
/// stored in the `z` component.
pub type Pose = Vector3<f32>;

/// Value paired with a trust probability in `[0, 1]`
///
/// A confidence of zero means the value must not be trusted. Confidences are
/// only ever combined by arithmetic averaging.
///
/// # Example
/// ```
/// use wall_reset::ConfidencePair;
///
/// let reading = ConfidencePair::new(24.0_f32, 0.9);
/// assert_eq!(reading.value(), 24.0);
/// assert_eq!(reading.confidence(), 0.9);
///
/// let untrusted = ConfidencePair::<f32>::default();
/// assert_eq!(untrusted.confidence(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConfidencePair<T> {
    value: T,
    confidence: f32,
}

impl<T: Copy> ConfidencePair<T> {
    /// Create a pair from a value and its confidence
    pub fn new(value: T, confidence: f32) -> Self {
        Self { value, confidence }
    }

    /// Create a pair that carries a value but no trust
    pub fn untrusted(value: T) -> Self {
        Self::new(value, 0.0)
    }

    /// The principal value
    pub fn value(&self) -> T {
        self.value
    }

    /// The trust probability of the value
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Same value, different confidence
    pub fn with_confidence(self, confidence: f32) -> Self {
        Self { confidence, ..self }
    }
}

/// Calibrated distance reading in inches
pub type Distance = ConfidencePair<f32>;

/// Four-valued quadrant classification
///
/// Used for two distinct things that must not be mixed up by callers:
/// - the sign pattern of the robot's field position, and
/// - the 90°-wide heading band centred on one of the four axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Quadrant {
    PosPos,
    NegPos,
    NegNeg,
    PosNeg,
}

impl Quadrant {
    /// All quadrants in table order
    pub const ALL: [Quadrant; 4] = [
        Quadrant::PosPos,
        Quadrant::NegPos,
        Quadrant::NegNeg,
        Quadrant::PosNeg,
    ];

    /// Display string used on status screens
    pub fn as_str(self) -> &'static str {
        match self {
            Quadrant::PosPos => "POS_POS",
            Quadrant::NegPos => "NEG_POS",
            Quadrant::NegNeg => "NEG_NEG",
            Quadrant::PosNeg => "POS_NEG",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cardinal mounting role of a distance sensor on the chassis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sensor {
    North,
    East,
    South,
    West,
}

impl Sensor {
    /// All sensors in mounting order
    pub const ALL: [Sensor; 4] = [Sensor::North, Sensor::East, Sensor::South, Sensor::West];

    /// Bit used for this sensor in [`ActiveSensors`]
    pub fn bit(self) -> u8 {
        match self {
            Sensor::North => 1,
            Sensor::East => 2,
            Sensor::South => 4,
            Sensor::West => 8,
        }
    }

    /// Single-letter label
    pub fn label(self) -> char {
        match self {
            Sensor::North => 'N',
            Sensor::East => 'E',
            Sensor::South => 'S',
            Sensor::West => 'W',
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Bitmask of the sensors used by the most recent fused estimate
///
/// North is 1, east 2, south 4 and west 8. Diagnostics only; nothing in the
/// reset path reads it back.
///
/// # Example
/// ```
/// use wall_reset::{ActiveSensors, Sensor};
///
/// let active = ActiveSensors::pair(Sensor::North, Sensor::East);
/// assert_eq!(active.bits(), 3);
/// assert!(active.contains(Sensor::East));
/// assert!(!active.contains(Sensor::West));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActiveSensors(u8);

impl ActiveSensors {
    /// No sensors
    pub const NONE: ActiveSensors = ActiveSensors(0);

    /// Mask holding exactly the two given sensors
    pub fn pair(first: Sensor, second: Sensor) -> Self {
        Self(first.bit() | second.bit())
    }

    /// Mask from raw bits; bits above west are dropped
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0x0f)
    }

    /// Raw bits
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether the sensor is part of the mask
    pub fn contains(self, sensor: Sensor) -> bool {
        self.0 & sensor.bit() != 0
    }

    /// Number of sensors in the mask
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Sensors in the mask, in mounting order
    pub fn iter(self) -> impl Iterator<Item = Sensor> {
        Sensor::ALL.into_iter().filter(move |sensor| self.contains(*sensor))
    }
}

impl fmt::Display for ActiveSensors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sensor in Sensor::ALL {
            let used = if self.contains(sensor) { 1 } else { 0 };
            if sensor != Sensor::North {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", sensor.label(), used)?;
        }
        Ok(())
    }
}

/// Wall reset settings
///
/// # Example
/// ```
/// use wall_reset::ResetSettings;
///
/// let settings = ResetSettings {
///     sensor_trust: 0.7,
/// };
/// assert_eq!(ResetSettings::default().sensor_trust, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResetSettings {
    /// Confidence threshold in `[0, 1]` checked before overwriting the pose
    ///
    /// A fused estimate whose confidence exceeds this value is withheld unless
    /// the caller overrides the check.
    pub sensor_trust: f32,
}

impl Default for ResetSettings {
    fn default() -> Self {
        Self { sensor_trust: 0.5 }
    }
}

/// Outcome of weighing a fused estimate against the trust threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResetVerdict {
    /// The fused estimate the decision was made on
    pub estimate: ConfidencePair<Pose>,
    /// Whether the estimate would be written to the drivebase
    pub apply: bool,
}
