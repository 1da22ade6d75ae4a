//! Collaborators the pipeline talks to but does not own.

pub mod alignment;
pub mod debug;
pub mod notify;
pub mod sensor;

pub use alignment::{AxisAlignment, SensorAlignment, StandardAlignment};
pub use debug::{DebugChannel, DebugMode, StageObserver};
pub use notify::{CalibrationNotifier, SilentNotifier};
pub use sensor::RateSensor;
