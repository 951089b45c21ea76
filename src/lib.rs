//! Wall Reset - distance sensor position resets for field robots
//!
//! Odometry drifts. This library corrects a robot's tracked position by
//! measuring the distance to the field walls with four fixed distance sensors
//! (one per side of the chassis) and fusing the two that face the walls
//! bounding the robot's current quadrant.
//!
//! # Features
//!
//! - Heading compensation of every reading for sensor mounting offset and
//!   deviation from the wall axis
//! - Fixed two-sensor selection table per field quadrant and heading band
//! - Confidence averaging with a configurable trust threshold
//! - Forced initial reset that also sets the inertial heading
//! - Status report and background location recording for diagnostics
//! - Hardware-agnostic: devices plug in through three small traits
//!
//! # Quick Start
//!
//! ```rust
//! use wall_reset::{Distance, Quadrant, SensorReadings, fuse};
//!
//! // Heading-compensated readings, north, east, south, west
//! let readings = SensorReadings::new([
//!     Distance::new(20.0, 0.9),
//!     Distance::new(15.0, 0.8),
//!     Distance::new(120.0, 0.3),
//!     Distance::new(125.0, 0.3),
//! ]);
//!
//! // Facing forward in the positive quadrant, north and east see the walls
//! let fused = fuse(Quadrant::PosPos, 0.0, &readings);
//! let pose = fused.estimate.value();
//! println!("x: {:.2}, y: {:.2}, confidence: {:.2}", pose.x, pose.y, fused.estimate.confidence());
//! ```
//!
//! With real devices, implement [`DistanceHardware`], [`InertialHardware`] and
//! [`Drivebase`], then drive resets through [`ResetChassis`].
//!
//! # Cargo features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`ResetSettings`], [`Quadrant`]
//!   and [`Sensor`]

pub mod calibration;
mod chassis;
mod error;
pub mod fusion;
mod hardware;
mod math;
pub mod offset;
mod quadrant;
pub mod recorder;
mod sensor;
pub mod status;
mod types;

// Re-export all public types and functions
pub use chassis::ResetChassis;
pub use error::{Error, Result};
pub use fusion::{FusedPosition, FusionEntry, SensorReadings, can_position_exist, conf_avg, fuse, table_entry};
pub use hardware::{DistanceHardware, Drivebase, InertialHardware};
pub use math::{
    CONFIDENCE_DOMAIN, DEG_TO_RAD, ERROR_READING, MM_TO_INCH, RAD_TO_DEG, SQUARE_TO_WALL_DEVIATION,
    WALL_COORD, axis_deviation, axis_deviation_closed_form, normalize_heading,
};
pub use offset::MountingOffset;
pub use quadrant::{heading_octant, position_quadrant};
pub use recorder::{LocationRecorder, RecorderSettings};
pub use sensor::ResetSensor;
pub use status::StatusReport;
pub use types::*;
