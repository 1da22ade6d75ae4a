use std::num::NonZeroU32;

use crate::config::LowPassType;
use crate::interface::StageObserver;
use crate::prelude::{Axis, FilterStage, XYZ_AXIS_COUNT};
use crate::processing::binding::{FilterSettings, NotchSettings};
use crate::processing::filters::{BiquadFilter, LowPassFilter};
use crate::telemetry::log::LogManager;

/// Nyquist frequency for a loop period in microseconds.
fn nyquist_hz(period_us: NonZeroU32) -> f32 {
    500_000.0 / period_us.get() as f32
}

/// Stages that are numerically usable at one sampling period.
///
/// A biquad tuned at or above Nyquist has poles outside the unit circle,
/// so such a stage is dropped and its input passed on unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveStages {
    low_pass: Option<LowPassType>,
    notch: [Option<NotchSettings>; 2],
}

impl ActiveStages {
    fn resolve(settings: &FilterSettings, period_us: NonZeroU32, logger: &LogManager) -> Self {
        let nyquist = nyquist_hz(period_us);

        let low_pass = if settings.lpf_type == LowPassType::Biquad
            && f32::from(settings.lpf_hz) >= nyquist
        {
            logger.warn(&format!(
                "biquad low-pass disabled: cutoff {} Hz not below Nyquist {:.1} Hz at {} us",
                settings.lpf_hz, nyquist, period_us
            ));
            None
        } else {
            Some(settings.lpf_type)
        };

        let mut notch = settings.notch;
        for (stage, slot) in notch.iter_mut().enumerate() {
            if let Some(n) = *slot {
                if f32::from(n.center_hz) >= nyquist {
                    logger.warn(&format!(
                        "notch {} disabled: center {} Hz not below Nyquist {:.1} Hz at {} us",
                        stage + 1,
                        n.center_hz,
                        nyquist,
                        period_us
                    ));
                    *slot = None;
                }
            }
        }

        Self { low_pass, notch }
    }
}

/// Filter chain for a single axis: low-pass, then up to two notches.
#[derive(Debug, Clone)]
pub struct AxisFilters {
    low_pass: Option<LowPassFilter>,
    notch: [Option<BiquadFilter>; 2],
}

impl AxisFilters {
    fn new(settings: &FilterSettings, stages: &ActiveStages, period_us: u32) -> Self {
        let cutoff_hz = f32::from(settings.lpf_hz);
        Self {
            low_pass: stages
                .low_pass
                .map(|kind| LowPassFilter::new(kind, cutoff_hz, period_us)),
            notch: stages.notch.map(|notch| {
                notch.map(|n| BiquadFilter::notch(f32::from(n.center_hz), period_us, n.q))
            }),
        }
    }

    fn apply(
        &mut self,
        axis: Axis,
        value: i32,
        observer: Option<&mut (dyn StageObserver + '_)>,
    ) -> f32 {
        let mut filtered = value as f32;
        if let Some(low_pass) = self.low_pass.as_mut() {
            filtered = low_pass.apply(filtered);
        }

        if let Some(observer) = observer {
            observer.pre_filter(axis, value);
            observer.post_low_pass(axis, filtered);
        }

        for notch in self.notch.iter_mut().flatten() {
            filtered = notch.apply(filtered);
        }
        filtered
    }

    fn reset(&mut self) {
        if let Some(low_pass) = self.low_pass.as_mut() {
            low_pass.reset();
        }
        for notch in self.notch.iter_mut().flatten() {
            notch.reset();
        }
    }
}

/// Per-axis filter cascade. Until [`FilterBank::initialize`] succeeds, or when
/// no low-pass cutoff is configured, values pass through unchanged.
#[derive(Debug, Clone)]
pub struct FilterBank {
    settings: FilterSettings,
    axes: Option<[AxisFilters; XYZ_AXIS_COUNT]>,
}

impl FilterBank {
    pub fn new(settings: FilterSettings) -> Self {
        Self {
            settings,
            axes: None,
        }
    }

    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    /// (Re)builds every stage for the given sampling period, clearing filter history.
    ///
    /// Biquad stages tuned at or above Nyquist are left out with a warning.
    pub fn initialize(&mut self, period_us: NonZeroU32) {
        if self.settings.is_bypassed() {
            self.axes = None;
            return;
        }
        let settings = &self.settings;
        let stages = ActiveStages::resolve(settings, period_us, &LogManager::new());
        self.axes = Some(std::array::from_fn(|_| {
            AxisFilters::new(settings, &stages, period_us.get())
        }));
    }

    pub fn is_initialized(&self) -> bool {
        self.axes.is_some()
    }

    pub fn reset(&mut self) {
        if let Some(axes) = self.axes.as_mut() {
            axes.iter_mut().for_each(AxisFilters::reset);
        }
    }

    /// Filters one offset-corrected sample for `axis`.
    pub fn apply(
        &mut self,
        axis: Axis,
        value: i32,
        observer: Option<&mut (dyn StageObserver + '_)>,
    ) -> f32 {
        match self.axes.as_mut() {
            Some(axes) => axes[axis.index()].apply(axis, value, observer),
            None => value as f32,
        }
    }
}
