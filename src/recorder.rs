//! Background location recording
//!
//! Periodically appends the drivebase's tracked pose and the distance sensor
//! estimate to two text files, so the two can be compared after a run.
//! Each recording session starts with a timestamp header:
//!
//! ```text
//!
//! Timestamp: 2024-03-02 14:05:10 1709388310123
//! 55.208, 50.208, 0
//! 55.31, 50.11, 0.4
//! ```
//!
//! # Example
//!
//! ```no_run
//! # use std::sync::{Arc, Mutex};
//! # use wall_reset::{Drivebase, DistanceHardware, InertialHardware, ResetChassis};
//! # fn run<D, I, S>(chassis: Arc<Mutex<ResetChassis<D, I, S>>>) -> wall_reset::Result<()>
//! # where
//! #     D: Drivebase + Send + 'static,
//! #     I: InertialHardware + Send + 'static,
//! #     S: DistanceHardware + Send + 'static,
//! # {
//! use wall_reset::{LocationRecorder, RecorderSettings};
//!
//! let mut recorder = LocationRecorder::new(RecorderSettings::default());
//! recorder.start(chassis.clone(), "2024-03-02", "14:05:10")?;
//! // ... run the routine ...
//! recorder.stop();
//! # Ok(())
//! # }
//! ```

use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use log::{info, warn};

use crate::chassis::ResetChassis;
use crate::error::{Error, Result};
use crate::hardware::{DistanceHardware, Drivebase, InertialHardware};
use crate::types::Pose;

/// Location recorder settings
#[derive(Debug, Clone, PartialEq)]
pub struct RecorderSettings {
    /// File receiving the tracked odometry pose
    pub odometry_path: PathBuf,
    /// File receiving the distance sensor estimate
    pub estimate_path: PathBuf,
    /// Time between samples
    pub period: Duration,
}

impl Default for RecorderSettings {
    fn default() -> Self {
        Self {
            odometry_path: PathBuf::from("odom_data.txt"),
            estimate_path: PathBuf::from("dist_data.txt"),
            period: Duration::from_millis(50),
        }
    }
}

/// Running recording task
struct RecordingTask {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Periodic recorder of odometry versus sensor-estimated pose
///
/// Holds at most one recording task. Starting a new recording stops and joins
/// the previous one first, so two tasks never append to the same files.
pub struct LocationRecorder {
    settings: RecorderSettings,
    task: Option<RecordingTask>,
}

impl LocationRecorder {
    /// Create an idle recorder
    pub fn new(settings: RecorderSettings) -> Self {
        Self {
            settings,
            task: None,
        }
    }

    /// Recorder settings
    pub fn settings(&self) -> &RecorderSettings {
        &self.settings
    }

    /// Whether a recording task is running
    pub fn is_running(&self) -> bool {
        self.task
            .as_ref()
            .is_some_and(|task| !task.handle.is_finished())
    }

    /// Start recording
    ///
    /// Opens both output files in append mode, writes the session header and
    /// spawns the sampling task. The chassis lock is held only while one
    /// sample is taken.
    ///
    /// # Arguments
    /// * `chassis` - Shared chassis to sample
    /// * `date` - Date written in the session header
    /// * `time` - Time of day written in the session header
    ///
    /// # Errors
    /// Returns [`Error::Io`] if a file cannot be opened or the header cannot be
    /// written, and [`Error::TaskSpawn`] if the task cannot be started.
    pub fn start<D, I, S>(
        &mut self,
        chassis: Arc<Mutex<ResetChassis<D, I, S>>>,
        date: &str,
        time: &str,
    ) -> Result<()>
    where
        D: Drivebase + Send + 'static,
        I: InertialHardware + Send + 'static,
        S: DistanceHardware + Send + 'static,
    {
        self.stop();

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        let header = format!("\nTimestamp: {} {} {}\n", date, time, millis);

        let mut odometry = open_append(&self.settings.odometry_path)?;
        let mut estimate = open_append(&self.settings.estimate_path)?;
        for writer in [&mut odometry, &mut estimate] {
            writer.write_all(header.as_bytes())?;
            writer.flush()?;
        }

        let stop = Arc::new(AtomicBool::new(false));
        let task_stop = stop.clone();
        let period = self.settings.period;

        let handle = thread::Builder::new()
            .name("location-recorder".into())
            .spawn(move || {
                record_loop(&chassis, &task_stop, period, &mut odometry, &mut estimate);
            })
            .map_err(Error::TaskSpawn)?;

        info!(
            "Location recording started ({} / {})",
            self.settings.odometry_path.display(),
            self.settings.estimate_path.display()
        );
        self.task = Some(RecordingTask { stop, handle });
        Ok(())
    }

    /// Stop recording and wait for the task to finish
    ///
    /// Does nothing when no task is running.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.stop.store(true, Ordering::Release);
            task.handle.thread().unpark();
            if task.handle.join().is_err() {
                warn!("Location recording task panicked");
            }
            info!("Location recording stopped");
        }
    }
}

impl Drop for LocationRecorder {
    fn drop(&mut self) {
        self.stop();
    }
}

fn open_append(path: &Path) -> Result<BufWriter<File>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BufWriter::new(file))
}

fn record_loop<D, I, S>(
    chassis: &Mutex<ResetChassis<D, I, S>>,
    stop: &AtomicBool,
    period: Duration,
    odometry: &mut BufWriter<File>,
    estimate: &mut BufWriter<File>,
) where
    D: Drivebase,
    I: InertialHardware,
    S: DistanceHardware,
{
    while !stop.load(Ordering::Acquire) {
        let (tracked, estimated) = match chassis.lock() {
            Ok(chassis) => {
                let estimated = chassis.position_calculation(chassis.quadrant()).value();
                (chassis.drivebase().pose(), estimated)
            }
            Err(_) => {
                warn!("Chassis lock poisoned, location recording stopped");
                return;
            }
        };

        let written = write_pose(odometry, &tracked).and_then(|()| write_pose(estimate, &estimated));
        if let Err(e) = written {
            warn!("Location recording write failed: {}", e);
            return;
        }

        thread::park_timeout(period);
    }
}

fn write_pose(writer: &mut BufWriter<File>, pose: &Pose) -> std::io::Result<()> {
    writeln!(writer, "{}, {}, {}", pose.x, pose.y, pose.z)?;
    writer.flush()
}
