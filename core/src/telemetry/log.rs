use log::{debug, info, warn};

const TARGET: &str = "gyro";

pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!(target: TARGET, "{}", message);
    }

    pub fn warn(&self, message: &str) {
        warn!(target: TARGET, "{}", message);
    }

    pub fn trace_event(&self, message: &str) {
        debug!(target: TARGET, "{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
