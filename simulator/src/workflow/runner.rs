use crate::generator::profile::SyntheticSensor;
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use gyrocore::interface::{
    CalibrationNotifier, DebugChannel, RateSensor, StandardAlignment,
};
use gyrocore::math::{FftHelper, StatsHelper};
use gyrocore::telemetry::CycleMetrics;
use gyrocore::{CalibrationOffset, CycleContext, CycleOutcome, Gyro, PublishedRate, RateSample};

pub struct WorkflowResult {
    pub offset: CalibrationOffset,
    pub calibration_complete: bool,
    /// Cycle index on which calibration completed, if it did.
    pub calibration_completed_at: Option<usize>,
    pub notifications: u32,
    pub metrics: CycleMetrics,
    /// Vibration amplitude on X before and after conditioning, once calibrated.
    pub raw_vibration: f32,
    pub filtered_vibration: f32,
    pub residual_rms: [f32; 3],
    pub final_rate: PublishedRate,
    pub debug_values: [i32; 3],
}

/// Stands in for the beeper.
#[derive(Default)]
struct Beeper {
    beeps: u32,
}

impl CalibrationNotifier for Beeper {
    fn calibration_complete(&mut self) {
        self.beeps += 1;
        log::info!("beep: gyro calibrated");
    }
}

/// Remembers the last raw reading handed to the pipeline.
struct Recorder<S> {
    inner: S,
    last: Option<RateSample>,
}

impl<S: RateSensor> RateSensor for Recorder<S> {
    fn read_sample(&mut self) -> Option<RateSample> {
        self.last = self.inner.read_sample();
        self.last
    }
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        self.config.validate().context("validating workflow")?;
        let period_us = self.config.sampling_period_us;

        let mut gyro = Gyro::configure(self.config.gyro.clone());
        gyro.initialize_filters(period_us)
            .context("initializing gyro filters")?;
        gyro.trigger_calibration()
            .context("starting gyro calibration")?;

        let mut sensor = Recorder {
            inner: SyntheticSensor::new(&self.config.generator, period_us),
            last: None,
        };
        let mut beeper = Beeper::default();
        let mut debug = DebugChannel::new(self.config.debug_mode);

        let mut completed_at = None;
        let mut raw_trace = Vec::new();
        let mut filtered_trace: [Vec<f32>; 3] = Default::default();

        for cycle in 0..self.config.cycles {
            let outcome = {
                let mut ctx = CycleContext::new(&mut sensor, &StandardAlignment, &mut beeper)
                    .with_observer(&mut debug);
                gyro.update(&mut ctx)
            };

            match outcome {
                CycleOutcome::CalibrationCompleted => completed_at = Some(cycle),
                CycleOutcome::Published => {
                    if let Some(raw) = sensor.last {
                        raw_trace.push(raw.0[0] as f32);
                    }
                    for (trace, value) in filtered_trace.iter_mut().zip(gyro.rate().filtered) {
                        trace.push(value);
                    }
                }
                _ => {}
            }
        }

        let sample_rate_hz = self.config.sample_rate_hz();
        let vibration_hz = self.config.generator.vibration_hz;
        let (raw_vibration, filtered_vibration) = if raw_trace.is_empty() {
            (0.0, 0.0)
        } else {
            let mut fft = FftHelper::new(raw_trace.len());
            (
                fft.amplitude_at(&raw_trace, sample_rate_hz, vibration_hz),
                fft.amplitude_at(&filtered_trace[0], sample_rate_hz, vibration_hz),
            )
        };

        Ok(WorkflowResult {
            offset: gyro.offset(),
            calibration_complete: gyro.is_calibration_complete(),
            calibration_completed_at: completed_at,
            notifications: beeper.beeps,
            metrics: *gyro.metrics(),
            raw_vibration,
            filtered_vibration,
            residual_rms: filtered_trace.each_ref().map(|trace| StatsHelper::rms(trace)),
            final_rate: *gyro.rate(),
            debug_values: debug.values(),
        })
    }
}
