use gyrocore::telemetry::CycleMetrics;
use gyrocore::{CalibrationOffset, PublishedRate};
use serde::{Deserialize, Serialize};

use crate::workflow::config::WorkflowConfig;
use crate::workflow::runner::WorkflowResult;

/// JSON summary of one offline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub config: WorkflowConfig,
    pub calibration: CalibrationSummary,
    pub metrics: CycleMetrics,
    pub vibration: VibrationSummary,
    pub residual_rms: [f32; 3],
    pub final_rate: PublishedRate,
    pub debug_values: [i32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationSummary {
    pub complete: bool,
    pub completed_at_cycle: Option<usize>,
    pub offset: CalibrationOffset,
    pub notifications: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VibrationSummary {
    pub frequency_hz: f32,
    pub raw_amplitude: f32,
    pub filtered_amplitude: f32,
}

impl RunReport {
    pub fn new(config: &WorkflowConfig, result: &WorkflowResult) -> Self {
        Self {
            config: config.clone(),
            calibration: CalibrationSummary {
                complete: result.calibration_complete,
                completed_at_cycle: result.calibration_completed_at,
                offset: result.offset,
                notifications: result.notifications,
            },
            metrics: result.metrics,
            vibration: VibrationSummary {
                frequency_hz: config.generator.vibration_hz,
                raw_amplitude: result.raw_vibration,
                filtered_amplitude: result.filtered_vibration,
            },
            residual_rms: result.residual_rms,
            final_rate: result.final_rate,
            debug_values: result.debug_values,
        }
    }
}
