use std::num::NonZeroU32;

use crate::config::GyroConfig;
use crate::interface::{AxisAlignment, CalibrationNotifier, RateSensor, StageObserver};
use crate::math::rounding::round_to_nearest;
use crate::prelude::{
    Axis, CalibrationOffset, CycleOutcome, GyroError, GyroResult, PublishedRate, RateSample,
};
use crate::processing::binding::FilterSettings;
use crate::processing::calibration::{calibration_window, CalibrationEngine, CalibrationStep};
use crate::processing::filter_bank::FilterBank;
use crate::telemetry::{CycleMetrics, LogManager};

/// Collaborators borrowed for one update cycle.
pub struct CycleContext<'a> {
    pub sensor: &'a mut dyn RateSensor,
    pub alignment: &'a dyn AxisAlignment,
    pub notifier: &'a mut dyn CalibrationNotifier,
    pub observer: Option<&'a mut dyn StageObserver>,
}

impl<'a> CycleContext<'a> {
    pub fn new(
        sensor: &'a mut dyn RateSensor,
        alignment: &'a dyn AxisAlignment,
        notifier: &'a mut dyn CalibrationNotifier,
    ) -> Self {
        Self {
            sensor,
            alignment,
            notifier,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: &'a mut dyn StageObserver) -> Self {
        self.observer = Some(observer);
        self
    }
}

/// Gyro conditioning pipeline: alignment, calibration, offset removal and
/// the filter cascade, producing one [`PublishedRate`] per cycle.
///
/// Setup is two-phase. [`Gyro::configure`] binds the tunables;
/// [`Gyro::initialize_filters`] builds the filters once the loop period is
/// known and may be called again whenever it changes.
///
/// The pipeline holds all of its state and is driven by a single caller.
/// Sharing one instance between threads requires the caller to serialise
/// access to `update`.
pub struct Gyro {
    config: GyroConfig,
    filters: FilterBank,
    calibration: CalibrationEngine,
    offset: CalibrationOffset,
    rate: PublishedRate,
    sampling_period_us: Option<NonZeroU32>,
    metrics: CycleMetrics,
    logger: LogManager,
}

impl Gyro {
    pub fn configure(config: GyroConfig) -> Self {
        let logger = LogManager::new();
        let filters = FilterBank::new(FilterSettings::bind(&config, &logger));
        Self {
            calibration: CalibrationEngine::new(config.movement_calibration_threshold),
            config,
            filters,
            offset: CalibrationOffset::default(),
            rate: PublishedRate::default(),
            sampling_period_us: None,
            metrics: CycleMetrics::new(),
            logger,
        }
    }

    /// Rebinds the tunables. Filters are rebuilt right away if the sampling
    /// period is already known; the learned offset and any open calibration
    /// window are kept.
    pub fn reconfigure(&mut self, config: GyroConfig) {
        self.filters = FilterBank::new(FilterSettings::bind(&config, &self.logger));
        self.calibration
            .set_movement_threshold(config.movement_calibration_threshold);
        self.config = config;
        if let Some(period) = self.sampling_period_us {
            self.filters.initialize(period);
        }
    }

    /// Second setup phase. A zero period is rejected and leaves the pipeline untouched.
    pub fn initialize_filters(&mut self, sampling_period_us: u32) -> GyroResult<()> {
        let Some(period) = NonZeroU32::new(sampling_period_us) else {
            self.logger
                .warn("filter init skipped: sampling period is zero");
            return Err(GyroError::ZeroSamplingPeriod);
        };

        self.sampling_period_us = Some(period);
        self.filters.initialize(period);
        self.logger.record(&format!(
            "filters initialized: period {} us, lpf {:?} {} Hz, notches {:?}",
            period,
            self.filters.settings().lpf_type,
            self.filters.settings().lpf_hz,
            self.filters.settings().notch
        ));
        Ok(())
    }

    /// Opens a fresh calibration window, restarting any window in progress.
    ///
    /// Filter history is cleared so the window publishes exact zeros.
    pub fn trigger_calibration(&mut self) -> GyroResult<()> {
        let Some(period) = self.sampling_period_us else {
            self.logger
                .warn("calibration not started: sampling period unknown");
            return Err(GyroError::SamplingPeriodUnknown);
        };

        let window = calibration_window(self.config.calibration_cycles, period);
        if self.config.calibration_cycles / period.get() == 0 {
            self.logger.warn(&format!(
                "calibration window constant {} shorter than period {} us, using {} cycle",
                self.config.calibration_cycles, period, window
            ));
        }
        self.calibration.start(window);
        self.filters.reset();
        Ok(())
    }

    pub fn is_calibration_complete(&self) -> bool {
        self.calibration.is_complete()
    }

    pub fn calibration_cycles_remaining(&self) -> u32 {
        self.calibration.remaining()
    }

    pub fn calibration_window(&self) -> u32 {
        self.calibration.window()
    }

    pub fn offset(&self) -> CalibrationOffset {
        self.offset
    }

    pub fn rate(&self) -> &PublishedRate {
        &self.rate
    }

    pub fn sampling_period_us(&self) -> Option<u32> {
        self.sampling_period_us.map(NonZeroU32::get)
    }

    pub fn config(&self) -> &GyroConfig {
        &self.config
    }

    pub fn filters(&self) -> &FilterBank {
        &self.filters
    }

    pub fn metrics(&self) -> &CycleMetrics {
        &self.metrics
    }

    /// Runs one acquisition cycle.
    pub fn update(&mut self, ctx: &mut CycleContext<'_>) -> CycleOutcome {
        let Some(raw) = ctx.sensor.read_sample() else {
            self.metrics.record_skipped();
            return CycleOutcome::Skipped;
        };

        let mut sample = ctx.alignment.align(raw, self.config.alignment);
        let mut outcome = CycleOutcome::Published;

        if !self.calibration.is_complete() {
            outcome = match self.calibration.step(&mut sample, &mut self.offset) {
                CalibrationStep::Idle | CalibrationStep::Accumulating => CycleOutcome::Calibrating,
                CalibrationStep::Restarted { deviation } => {
                    self.metrics.record_restart();
                    self.logger.trace_event(&format!(
                        "calibration restarted, deviation {:?} above {}",
                        deviation, self.config.movement_calibration_threshold
                    ));
                    CycleOutcome::CalibrationRestarted
                }
                CalibrationStep::Completed(offset) => {
                    self.metrics.record_completed();
                    self.logger
                        .record(&format!("calibration complete, offset {:?}", offset.0));
                    ctx.notifier.calibration_complete();
                    CycleOutcome::CalibrationCompleted
                }
            };
        }

        // The offset committed this cycle applies from the next sample on.
        let applied = if outcome == CycleOutcome::CalibrationCompleted {
            CalibrationOffset::default()
        } else {
            self.offset
        };
        let corrected =
            RateSample(std::array::from_fn(|i| sample.0[i].saturating_sub(applied.0[i])));

        for axis in Axis::ALL {
            let value = corrected[axis];
            let i = axis.index();
            if self.filters.settings().is_bypassed() {
                self.rate.filtered[i] = value as f32;
                self.rate.rounded[i] = value;
            } else {
                let filtered = self
                    .filters
                    .apply(axis, value, ctx.observer.as_deref_mut());
                self.rate.filtered[i] = filtered;
                self.rate.rounded[i] = round_to_nearest(filtered);
            }
        }

        self.metrics.record_processed();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LowPassType;
    use crate::interface::{
        DebugChannel, DebugMode, SensorAlignment, SilentNotifier, StandardAlignment,
    };
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Option<RateSample>>);

    impl RateSensor for Scripted {
        fn read_sample(&mut self) -> Option<RateSample> {
            self.0.pop_front().flatten()
        }
    }

    #[derive(Default)]
    struct Beeper(u32);

    impl CalibrationNotifier for Beeper {
        fn calibration_complete(&mut self) {
            self.0 += 1;
        }
    }

    fn cycle(gyro: &mut Gyro, sample: Option<RateSample>, beeper: &mut Beeper) -> CycleOutcome {
        let mut sensor = Scripted(VecDeque::from(vec![sample]));
        let mut ctx = CycleContext::new(&mut sensor, &StandardAlignment, beeper);
        gyro.update(&mut ctx)
    }

    // (50 / 25) * 50 = 100 cycle window
    const PERIOD_US: u32 = 25;

    fn short_window_config() -> GyroConfig {
        GyroConfig {
            calibration_cycles: 50,
            ..Default::default()
        }
    }

    #[test]
    fn filters_need_nonzero_period() {
        let mut gyro = Gyro::configure(GyroConfig::default());
        assert_eq!(gyro.initialize_filters(0), Err(GyroError::ZeroSamplingPeriod));
        assert!(!gyro.filters().is_initialized());
        assert_eq!(gyro.sampling_period_us(), None);
        assert!(gyro.initialize_filters(1000).is_ok());
        assert!(gyro.filters().is_initialized());
        assert!(gyro.initialize_filters(500).is_ok());
        assert_eq!(gyro.sampling_period_us(), Some(500));
    }

    #[test]
    fn calibration_needs_sampling_period() {
        let mut gyro = Gyro::configure(GyroConfig::default());
        assert_eq!(
            gyro.trigger_calibration(),
            Err(GyroError::SamplingPeriodUnknown)
        );
        assert!(gyro.is_calibration_complete());
    }

    #[test]
    fn missing_sample_keeps_previous_rate() {
        let mut gyro = Gyro::configure(GyroConfig {
            lpf_hz: 0,
            ..Default::default()
        });
        gyro.initialize_filters(1000).unwrap();
        let mut beeper = Beeper::default();
        cycle(&mut gyro, Some(RateSample::new(5, 6, 7)), &mut beeper);
        let before = *gyro.rate();
        assert_eq!(cycle(&mut gyro, None, &mut beeper), CycleOutcome::Skipped);
        assert_eq!(*gyro.rate(), before);
        assert_eq!(gyro.metrics().skipped, 1);
    }

    #[test]
    fn calibration_cycle_publishes_zero_then_applies_offset() {
        let mut gyro = Gyro::configure(short_window_config());
        gyro.initialize_filters(PERIOD_US).unwrap();
        gyro.trigger_calibration().unwrap();
        assert_eq!(gyro.calibration_window(), 100);

        let mut beeper = Beeper::default();
        let stationary = RateSample::new(20, -8, 3);
        for _ in 0..99 {
            assert_eq!(
                cycle(&mut gyro, Some(stationary), &mut beeper),
                CycleOutcome::Calibrating
            );
            assert_eq!(gyro.rate().rounded, [0; 3]);
        }
        assert_eq!(
            cycle(&mut gyro, Some(stationary), &mut beeper),
            CycleOutcome::CalibrationCompleted
        );
        assert_eq!(gyro.rate().rounded, [0; 3]);
        assert_eq!(beeper.0, 1);
        assert_eq!(gyro.offset(), CalibrationOffset([20, -8, 3]));

        for _ in 0..50 {
            assert_eq!(
                cycle(&mut gyro, Some(stationary), &mut beeper),
                CycleOutcome::Published
            );
            assert_eq!(gyro.rate().rounded, [0; 3]);
        }
        assert_eq!(beeper.0, 1);
    }

    #[test]
    fn completion_cycle_does_not_publish_negated_offset() {
        let mut gyro = Gyro::configure(GyroConfig {
            lpf_hz: 0,
            ..short_window_config()
        });
        gyro.initialize_filters(PERIOD_US).unwrap();
        gyro.trigger_calibration().unwrap();
        let mut beeper = Beeper::default();
        let stationary = RateSample::new(40, -25, 9);
        for _ in 0..99 {
            cycle(&mut gyro, Some(stationary), &mut beeper);
        }

        // The zeroed sample of the final cycle is published as is. Subtracting
        // the fresh offset from it would emit (-40, 25, -9) for one cycle.
        assert_eq!(
            cycle(&mut gyro, Some(stationary), &mut beeper),
            CycleOutcome::CalibrationCompleted
        );
        assert_eq!(gyro.rate().rounded, [0; 3]);
        assert_eq!(gyro.rate().filtered, [0.0; 3]);

        cycle(&mut gyro, Some(RateSample::new(41, -25, 0)), &mut beeper);
        assert_eq!(gyro.rate().rounded, [1, 0, -9]);
    }

    #[test]
    fn extreme_samples_saturate_instead_of_overflowing() {
        let mut gyro = Gyro::configure(GyroConfig {
            lpf_hz: 0,
            alignment: SensorAlignment::Cw180,
            ..short_window_config()
        });
        gyro.initialize_filters(PERIOD_US).unwrap();
        gyro.trigger_calibration().unwrap();

        let mut notifier = SilentNotifier;
        let mut readings = vec![Some(RateSample::new(1, 1, 1)); 100];
        readings.push(Some(RateSample::new(i32::MIN, i32::MAX, i32::MIN)));
        let mut sensor = Scripted(VecDeque::from(readings));
        let mut ctx = CycleContext::new(&mut sensor, &StandardAlignment, &mut notifier);
        for _ in 0..100 {
            gyro.update(&mut ctx);
        }
        // Cw180 negates x and y
        assert_eq!(gyro.offset(), CalibrationOffset([-1, -1, 1]));

        assert_eq!(gyro.update(&mut ctx), CycleOutcome::Published);
        assert_eq!(gyro.rate().rounded, [i32::MAX, i32::MIN + 2, i32::MIN]);
    }

    #[test]
    fn extreme_samples_keep_filtered_output_finite() {
        let mut gyro = Gyro::configure(GyroConfig {
            alignment: SensorAlignment::Cw270Flip,
            ..Default::default()
        });
        gyro.initialize_filters(1000).unwrap();
        let mut notifier = SilentNotifier;
        let extremes = [i32::MIN, i32::MAX];
        let mut sensor = Scripted(
            (0..200)
                .map(|i| Some(RateSample::new(extremes[i % 2], extremes[(i + 1) % 2], i32::MIN)))
                .collect(),
        );
        let mut ctx = CycleContext::new(&mut sensor, &StandardAlignment, &mut notifier);
        for _ in 0..200 {
            assert_eq!(gyro.update(&mut ctx), CycleOutcome::Published);
            assert!(gyro.rate().filtered.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn motion_keeps_calibration_open() {
        let mut gyro = Gyro::configure(GyroConfig {
            movement_calibration_threshold: 5,
            ..short_window_config()
        });
        gyro.initialize_filters(PERIOD_US).unwrap();
        gyro.trigger_calibration().unwrap();
        let mut beeper = Beeper::default();

        let mut restarts = 0;
        for i in 0..300 {
            let wobble = if i % 2 == 0 { 200 } else { -200 };
            if cycle(&mut gyro, Some(RateSample::new(wobble, 0, 0)), &mut beeper)
                == CycleOutcome::CalibrationRestarted
            {
                restarts += 1;
                assert_eq!(gyro.calibration_cycles_remaining(), 100);
            }
            assert_eq!(gyro.rate().rounded, [0; 3]);
        }
        assert_eq!(restarts, 3);
        assert!(!gyro.is_calibration_complete());
        assert_eq!(beeper.0, 0);
        assert_eq!(gyro.metrics().calibration_restarts, 3);
    }

    #[test]
    fn retrigger_mid_flight_zeroes_output() {
        let mut gyro = Gyro::configure(GyroConfig {
            lpf_type: LowPassType::Pt1,
            ..short_window_config()
        });
        gyro.initialize_filters(PERIOD_US).unwrap();
        let mut beeper = Beeper::default();
        for _ in 0..20 {
            cycle(&mut gyro, Some(RateSample::new(400, 400, 400)), &mut beeper);
        }
        assert_ne!(gyro.rate().rounded, [0; 3]);

        gyro.trigger_calibration().unwrap();
        cycle(&mut gyro, Some(RateSample::new(400, 400, 400)), &mut beeper);
        assert_eq!(gyro.rate().rounded, [0; 3]);
        assert_eq!(gyro.rate().filtered, [0.0; 3]);
        assert_eq!(gyro.offset(), CalibrationOffset::default());
    }

    #[test]
    fn alignment_happens_before_offset_removal() {
        let mut gyro = Gyro::configure(GyroConfig {
            lpf_hz: 0,
            alignment: SensorAlignment::Cw90,
            ..short_window_config()
        });
        gyro.initialize_filters(PERIOD_US).unwrap();
        gyro.trigger_calibration().unwrap();
        let mut beeper = Beeper::default();
        for _ in 0..100 {
            cycle(&mut gyro, Some(RateSample::new(10, 30, 0)), &mut beeper);
        }
        // sensor (10, 30) is vehicle (30, -10)
        assert_eq!(gyro.offset(), CalibrationOffset([30, -10, 0]));
        cycle(&mut gyro, Some(RateSample::new(11, 30, 2)), &mut beeper);
        assert_eq!(gyro.rate().rounded, [0, -1, 2]);
        assert_eq!(gyro.rate().filtered, [0.0, -1.0, 2.0]);
    }

    #[test]
    fn observer_is_optional() {
        let mut gyro = Gyro::configure(GyroConfig::default());
        gyro.initialize_filters(1000).unwrap();
        let mut beeper = Beeper::default();
        let mut debug = DebugChannel::new(DebugMode::Gyro);
        let mut sensor = Scripted(VecDeque::from(vec![Some(RateSample::new(1, 2, 3))]));
        let mut ctx = CycleContext::new(&mut sensor, &StandardAlignment, &mut beeper)
            .with_observer(&mut debug);
        assert_eq!(gyro.update(&mut ctx), CycleOutcome::Published);
        assert_eq!(debug.values(), [1, 2, 3]);
    }

    #[test]
    fn reconfigure_rebuilds_filters_with_known_period() {
        let mut gyro = Gyro::configure(GyroConfig {
            lpf_hz: 0,
            ..Default::default()
        });
        gyro.initialize_filters(1000).unwrap();
        assert!(!gyro.filters().is_initialized());
        gyro.reconfigure(GyroConfig::default());
        assert!(gyro.filters().is_initialized());
        assert_eq!(gyro.config().lpf_hz, 90);
    }
}
