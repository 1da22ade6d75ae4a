use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

pub const XYZ_AXIS_COUNT: usize = 3;

/// Spatial axis of a rate triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; XYZ_AXIS_COUNT] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Raw sensor counts for one cycle, one value per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSample(pub [i32; XYZ_AXIS_COUNT]);

impl RateSample {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self([x, y, z])
    }
}

impl Index<Axis> for RateSample {
    type Output = i32;

    fn index(&self, axis: Axis) -> &i32 {
        &self.0[axis.index()]
    }
}

impl IndexMut<Axis> for RateSample {
    fn index_mut(&mut self, axis: Axis) -> &mut i32 {
        &mut self.0[axis.index()]
    }
}

/// Learned per-axis zero bias, in raw counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationOffset(pub [i32; XYZ_AXIS_COUNT]);

impl Index<Axis> for CalibrationOffset {
    type Output = i32;

    fn index(&self, axis: Axis) -> &i32 {
        &self.0[axis.index()]
    }
}

impl IndexMut<Axis> for CalibrationOffset {
    fn index_mut(&mut self, axis: Axis) -> &mut i32 {
        &mut self.0[axis.index()]
    }
}

/// Final rate vector handed to the rate and attitude controllers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishedRate {
    /// Filter output rounded to the nearest integer.
    pub rounded: [i32; XYZ_AXIS_COUNT],
    /// Filter output at full precision.
    pub filtered: [f32; XYZ_AXIS_COUNT],
}

/// What a single `update` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Sensor had no sample; the published rate is unchanged.
    Skipped,
    /// Sample consumed by an active calibration window.
    Calibrating,
    /// Motion was detected on the final cycle and the window started over.
    CalibrationRestarted,
    /// Offsets committed; calibration is complete from now on.
    CalibrationCompleted,
    /// Offset-corrected, filtered rate published.
    Published,
}

/// Common error type for pipeline setup.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GyroError {
    #[error("sampling period must be nonzero")]
    ZeroSamplingPeriod,
    #[error("sampling period is not known yet")]
    SamplingPeriodUnknown,
    #[error("notch {stage}: cutoff {cutoff_hz} Hz must be nonzero and below center {center_hz} Hz")]
    InvalidNotch {
        stage: usize,
        center_hz: u16,
        cutoff_hz: u16,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type GyroResult<T> = Result<T, GyroError>;

/// A single-input, single-output filter applied once per cycle.
pub trait FilterStage {
    fn apply(&mut self, input: f32) -> f32;
    fn reset(&mut self);
}
