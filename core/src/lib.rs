//! Gyro signal-conditioning core for flight-controller firmware.
//!
//! Each control cycle turns one raw angular-rate sample into a calibrated,
//! filtered rate: axis alignment, zero-bias calibration with motion detection,
//! offset removal, then a low-pass and dual-notch filter cascade.

pub mod config;
pub mod interface;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use config::{GyroConfig, LowPassType, CALIBRATING_GYRO_CYCLES};
pub use prelude::{
    Axis, CalibrationOffset, CycleOutcome, GyroError, GyroResult, PublishedRate, RateSample,
};
pub use processing::{CycleContext, Gyro};
