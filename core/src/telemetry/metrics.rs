use serde::Serialize;

/// Cycle counters kept by the pipeline. Single writer, so no locking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CycleMetrics {
    pub processed: u64,
    pub skipped: u64,
    pub calibration_restarts: u64,
    pub calibrations_completed: u64,
}

impl CycleMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_processed(&mut self) {
        self.processed += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn record_restart(&mut self) {
        self.calibration_restarts += 1;
    }

    pub fn record_completed(&mut self) {
        self.calibrations_completed += 1;
    }
}
