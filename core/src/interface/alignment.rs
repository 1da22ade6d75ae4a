use serde::{Deserialize, Serialize};

use crate::prelude::RateSample;

/// Physical mounting of the sensor relative to the vehicle frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorAlignment {
    #[default]
    Cw0,
    Cw90,
    Cw180,
    Cw270,
    Cw0Flip,
    Cw90Flip,
    Cw180Flip,
    Cw270Flip,
}

impl SensorAlignment {
    /// Remaps a sensor-frame sample into the vehicle frame.
    ///
    /// Inversion saturates, so `i32::MIN` maps to `i32::MAX`.
    pub fn apply(self, sample: RateSample) -> RateSample {
        let [x, y, z] = sample.0;
        let (nx, ny, nz) = (x.saturating_neg(), y.saturating_neg(), z.saturating_neg());
        let remapped = match self {
            SensorAlignment::Cw0 => [x, y, z],
            SensorAlignment::Cw90 => [y, nx, z],
            SensorAlignment::Cw180 => [nx, ny, z],
            SensorAlignment::Cw270 => [ny, x, z],
            SensorAlignment::Cw0Flip => [nx, y, nz],
            SensorAlignment::Cw90Flip => [y, x, nz],
            SensorAlignment::Cw180Flip => [x, ny, nz],
            SensorAlignment::Cw270Flip => [ny, nx, nz],
        };
        RateSample(remapped)
    }
}

/// Axis remapping collaborator. Pure, never fails.
pub trait AxisAlignment {
    fn align(&self, sample: RateSample, mode: SensorAlignment) -> RateSample;
}

/// Board alignment using the fixed 90-degree rotations only.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardAlignment;

impl AxisAlignment for StandardAlignment {
    fn align(&self, sample: RateSample, mode: SensorAlignment) -> RateSample {
        mode.apply(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cw0_is_identity() {
        let sample = RateSample::new(1, -2, 3);
        assert_eq!(StandardAlignment.align(sample, SensorAlignment::Cw0), sample);
    }

    #[test]
    fn cw90_swaps_and_inverts_x() {
        let aligned = SensorAlignment::Cw90.apply(RateSample::new(10, 20, 30));
        assert_eq!(aligned, RateSample::new(20, -10, 30));
    }

    #[test]
    fn inversion_saturates_at_range_limits() {
        let aligned = SensorAlignment::Cw180Flip.apply(RateSample::new(7, i32::MIN, i32::MAX));
        assert_eq!(aligned, RateSample::new(7, i32::MAX, -i32::MAX));
        let aligned = SensorAlignment::Cw270.apply(RateSample::new(i32::MIN, i32::MIN, 0));
        assert_eq!(aligned, RateSample::new(i32::MAX, i32::MIN, 0));
    }

    #[test]
    fn flipped_mounts_invert_yaw() {
        for mode in [
            SensorAlignment::Cw0Flip,
            SensorAlignment::Cw90Flip,
            SensorAlignment::Cw180Flip,
            SensorAlignment::Cw270Flip,
        ] {
            assert_eq!(mode.apply(RateSample::new(1, 2, 3)).0[2], -3);
        }
    }

    #[test]
    fn four_quarter_turns_return_to_start() {
        let sample = RateSample::new(7, -11, 5);
        let turned = (0..4).fold(sample, |acc, _| SensorAlignment::Cw90.apply(acc));
        assert_eq!(turned, sample);
    }
}
