/// Fire-and-forget signal raised once per successful calibration,
/// typically wired to a beeper or status LED.
pub trait CalibrationNotifier {
    fn calibration_complete(&mut self);
}

/// Notifier for builds without an indicator.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl CalibrationNotifier for SilentNotifier {
    fn calibration_complete(&mut self) {}
}
