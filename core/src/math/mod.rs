pub mod fft;
pub mod rounding;
pub mod stats;

pub use fft::FftHelper;
pub use rounding::{round_to_nearest, rounded_mean};
pub use stats::{RunningDeviation, StatsHelper};
