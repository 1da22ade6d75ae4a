pub mod binding;
pub mod calibration;
pub mod filter_bank;
pub mod filters;
pub mod gyro;

pub use binding::{FilterSettings, NotchSettings};
pub use calibration::{calibration_window, CalibrationEngine, CalibrationStep};
pub use filter_bank::FilterBank;
pub use gyro::{CycleContext, Gyro};
