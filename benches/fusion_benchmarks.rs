use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::prelude::*;
use rand_pcg::Pcg64;
use wall_reset::{
    Distance, DistanceHardware, Drivebase, InertialHardware, MountingOffset, Pose, Quadrant,
    ResetChassis, ResetSensor, ResetSettings, SensorReadings, axis_deviation, fuse,
};

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

// Pre-generated headings and readings to keep RNG out of the timed loop
struct PreGeneratedData {
    samples: Vec<(f32, SensorReadings)>,
    index: usize,
}

impl PreGeneratedData {
    fn new(count: usize, seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let samples = (0..count)
            .map(|_| {
                let heading: f32 = rng.random_range(0.0..360.0);
                let readings = SensorReadings::new(
                    [(); 4].map(|_| Distance::new(rng.random_range(2.0..120.0), rng.random_range(0.0..1.0))),
                );
                (heading, readings)
            })
            .collect();

        Self { samples, index: 0 }
    }

    fn next(&mut self) -> (f32, SensorReadings) {
        let sample = self.samples[self.index];
        self.index = (self.index + 1) % self.samples.len();
        sample
    }
}

fn chassis() -> ResetChassis<Odometry, Imu, Sample> {
    let sensors = [(508, 60), (381, 55), (2540, 20), (2540, 20)]
        .map(|(mm, conf)| ResetSensor::new(MountingOffset::new(5.5, -2.0), Sample(mm, conf)));

    ResetChassis::new(
        ResetSettings::default(),
        Imu(12.0),
        Odometry(Pose::new(40.0, 40.0, 12.0)),
        sensors,
    )
}

fn bench_axis_deviation(c: &mut Criterion) {
    c.bench_function("axis_deviation", |b| {
        let mut heading = 0.0_f32;
        b.iter(|| {
            heading = (heading + 7.3) % 720.0;
            black_box(axis_deviation(black_box(heading)))
        })
    });
}

fn bench_fuse(c: &mut Criterion) {
    let mut data = PreGeneratedData::new(1000, 42);

    c.bench_function("fuse", |b| {
        b.iter(|| {
            let (heading, readings) = data.next();
            black_box(fuse(Quadrant::PosPos, heading, &readings))
        })
    });
}

fn bench_fuse_all_quadrants(c: &mut Criterion) {
    let mut data = PreGeneratedData::new(1000, 7);

    c.bench_function("fuse_all_quadrants", |b| {
        b.iter(|| {
            let (heading, readings) = data.next();
            for quadrant in Quadrant::ALL {
                black_box(fuse(quadrant, heading, &readings));
            }
        })
    });
}

fn bench_position_calculation(c: &mut Criterion) {
    let chassis = chassis();

    c.bench_function("position_calculation", |b| {
        b.iter(|| black_box(chassis.position_calculation(black_box(Quadrant::PosPos))))
    });
}

fn bench_perform_reset(c: &mut Criterion) {
    let mut chassis = chassis();

    c.bench_function("perform_reset", |b| {
        b.iter(|| black_box(chassis.perform_reset(black_box(true))))
    });
}

fn bench_status(c: &mut Criterion) {
    let chassis = chassis();

    c.bench_function("status", |b| b.iter(|| black_box(chassis.status())));
}

criterion_group!(
    benches,
    bench_axis_deviation,
    bench_fuse,
    bench_fuse_all_quadrants,
    bench_position_calculation,
    bench_perform_reset,
    bench_status
);
criterion_main!(benches);
