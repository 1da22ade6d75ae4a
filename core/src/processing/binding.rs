use crate::config::{notch_pair_is_valid, GyroConfig, LowPassType};
use crate::processing::filters::notch_q;
use crate::telemetry::log::LogManager;

/// One enabled notch stage with its derived quality factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotchSettings {
    pub center_hz: u16,
    pub q: f32,
}

/// Filter tuning derived from a [`GyroConfig`], independent of the sampling period.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSettings {
    pub lpf_type: LowPassType,
    pub lpf_hz: u8,
    pub notch: [Option<NotchSettings>; 2],
}

impl FilterSettings {
    /// Derives notch Q factors from the configured center/cutoff pairs.
    ///
    /// A notch whose cutoff is zero or not below its center cannot produce a
    /// usable Q; that stage is disabled rather than rejected.
    pub fn bind(config: &GyroConfig, logger: &LogManager) -> Self {
        let notch = config.notch_pairs().map(|(stage, center_hz, cutoff_hz)| {
            if center_hz == 0 {
                None
            } else if !notch_pair_is_valid(center_hz, cutoff_hz) {
                logger.warn(&format!(
                    "notch {} disabled: cutoff {} Hz must be below center {} Hz",
                    stage, cutoff_hz, center_hz
                ));
                None
            } else {
                Some(NotchSettings {
                    center_hz,
                    q: notch_q(center_hz, cutoff_hz),
                })
            }
        });

        Self {
            lpf_type: config.lpf_type,
            lpf_hz: config.lpf_hz,
            notch,
        }
    }

    /// No low-pass cutoff means the whole bank, notches included, is bypassed.
    pub fn is_bypassed(&self) -> bool {
        self.lpf_hz == 0
    }
}
