//! Simulated devices shared by the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};

use wall_reset::{
    DistanceHardware, Drivebase, InertialHardware, MountingOffset, Pose, ResetChassis, ResetSensor,
    ResetSettings,
};

/// Distance sensor whose sample can be changed after it is mounted
pub struct SimDistance {
    distance: AtomicI32,
    confidence: AtomicI32,
}

impl SimDistance {
    pub fn new(distance: i32, confidence: i32) -> Self {
        Self {
            distance: AtomicI32::new(distance),
            confidence: AtomicI32::new(confidence),
        }
    }

    pub fn set(&self, distance: i32, confidence: i32) {
        self.distance.store(distance, Ordering::Relaxed);
        self.confidence.store(confidence, Ordering::Relaxed);
    }
}

impl DistanceHardware for SimDistance {
    fn raw_distance(&self) -> i32 {
        self.distance.load(Ordering::Relaxed)
    }

    fn raw_confidence(&self) -> i32 {
        self.confidence.load(Ordering::Relaxed)
    }
}

/// Inertial sensor storing its heading bits
pub struct SimImu {
    heading: AtomicU32,
}

impl SimImu {
    pub fn new(heading: f32) -> Self {
        Self {
            heading: AtomicU32::new(heading.to_bits()),
        }
    }
}

impl InertialHardware for SimImu {
    fn heading(&self) -> f32 {
        f32::from_bits(self.heading.load(Ordering::Relaxed))
    }

    fn set_heading(&mut self, heading: f32) {
        self.heading.store(heading.to_bits(), Ordering::Relaxed);
    }
}

/// Drivebase counting pose writes
pub struct SimDrivebase {
    pub pose: Pose,
    pub writes: usize,
}

impl SimDrivebase {
    pub fn new(pose: Pose) -> Self {
        Self { pose, writes: 0 }
    }
}

impl Drivebase for SimDrivebase {
    fn pose(&self) -> Pose {
        self.pose
    }

    fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
        self.writes += 1;
    }
}

pub type SimChassis = ResetChassis<SimDrivebase, SimImu, SimDistance>;

/// Millimetres for a distance in inches
pub fn mm(inches: f32) -> i32 {
    (inches / wall_reset::MM_TO_INCH).round() as i32
}

/// Chassis with zero mounting offsets
///
/// `samples` are `(mm, raw confidence)` in north, east, south, west order.
pub fn chassis(trust: f32, pose: Pose, samples: [(i32, i32); 4]) -> SimChassis {
    let sensors = samples.map(|(distance, confidence)| {
        ResetSensor::new(MountingOffset::zero(), SimDistance::new(distance, confidence))
    });

    ResetChassis::new(
        ResetSettings { sensor_trust: trust },
        SimImu::new(pose.z),
        SimDrivebase::new(pose),
        sensors,
    )
}
