use serde::{Deserialize, Serialize};

use crate::interface::SensorAlignment;
use crate::prelude::{GyroError, GyroResult};

/// Default calibration window constant. The effective window in cycles is
/// `(CALIBRATING_GYRO_CYCLES / period_us) * CALIBRATING_GYRO_CYCLES`.
pub const CALIBRATING_GYRO_CYCLES: u32 = 1000;

/// Low-pass variant run ahead of the notch stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LowPassType {
    Pt1,
    #[default]
    Biquad,
    FirDenoise,
}

impl LowPassType {
    /// Maps a stored numeric tag; unknown tags fall back to the FIR denoiser.
    pub fn from_raw(tag: u8) -> Self {
        match tag {
            0 => LowPassType::Pt1,
            1 => LowPassType::Biquad,
            _ => LowPassType::FirDenoise,
        }
    }
}

/// Tunable parameters of the gyro pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GyroConfig {
    /// Maximum standard deviation (counts) tolerated over a calibration
    /// window. Zero disables motion detection.
    pub movement_calibration_threshold: u8,
    pub lpf_type: LowPassType,
    /// Low-pass cutoff in Hz. Zero bypasses the whole filter bank.
    pub lpf_hz: u8,
    pub notch_hz_1: u16,
    pub notch_cutoff_1: u16,
    pub notch_hz_2: u16,
    pub notch_cutoff_2: u16,
    pub calibration_cycles: u32,
    pub alignment: SensorAlignment,
}

impl Default for GyroConfig {
    fn default() -> Self {
        Self {
            movement_calibration_threshold: 32,
            lpf_type: LowPassType::default(),
            lpf_hz: 90,
            notch_hz_1: 0,
            notch_cutoff_1: 0,
            notch_hz_2: 0,
            notch_cutoff_2: 0,
            calibration_cycles: CALIBRATING_GYRO_CYCLES,
            alignment: SensorAlignment::default(),
        }
    }
}

impl GyroConfig {
    /// `(stage, center_hz, cutoff_hz)` for both notch stages.
    pub fn notch_pairs(&self) -> [(usize, u16, u16); 2] {
        [
            (1, self.notch_hz_1, self.notch_cutoff_1),
            (2, self.notch_hz_2, self.notch_cutoff_2),
        ]
    }

    /// Strict check for configuration loaded from storage or files.
    pub fn validate(&self) -> GyroResult<()> {
        for (stage, center_hz, cutoff_hz) in self.notch_pairs() {
            if !notch_pair_is_valid(center_hz, cutoff_hz) {
                return Err(GyroError::InvalidNotch {
                    stage,
                    center_hz,
                    cutoff_hz,
                });
            }
        }
        if self.calibration_cycles == 0 {
            return Err(GyroError::InvalidConfig(
                "calibration_cycles must be nonzero".into(),
            ));
        }
        Ok(())
    }
}

/// A disabled notch (center 0) is always valid.
pub(crate) fn notch_pair_is_valid(center_hz: u16, cutoff_hz: u16) -> bool {
    center_hz == 0 || (cutoff_hz != 0 && cutoff_hz < center_hz)
}
