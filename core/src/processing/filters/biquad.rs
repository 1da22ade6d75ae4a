use std::f32::consts::{FRAC_1_SQRT_2, PI};

use crate::prelude::FilterStage;

/// Butterworth Q used for the biquad low-pass.
pub const BIQUAD_Q: f32 = FRAC_1_SQRT_2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiquadKind {
    LowPass,
    Notch,
}

/// Quality factor of a notch from its center and lower cutoff frequency.
///
/// The caller guarantees `0 < cutoff_hz < center_hz`.
pub fn notch_q(center_hz: u16, cutoff_hz: u16) -> f32 {
    let octaves = (center_hz as f32 / cutoff_hz as f32).log2() * 2.0;
    let span = 2f32.powf(octaves);
    span.sqrt() / (span - 1.0)
}

/// Second-order section in transposed direct form II.
#[derive(Debug, Clone, Default)]
pub struct BiquadFilter {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    d1: f32,
    d2: f32,
}

impl BiquadFilter {
    pub fn new(kind: BiquadKind, filter_hz: f32, period_us: u32, q: f32) -> Self {
        let period_s = period_us as f32 * 1e-6;
        let omega = 2.0 * PI * filter_hz * period_s;
        let (sn, cs) = omega.sin_cos();
        let alpha = sn / (2.0 * q);

        let (b0, b1, b2) = match kind {
            BiquadKind::LowPass => ((1.0 - cs) / 2.0, 1.0 - cs, (1.0 - cs) / 2.0),
            BiquadKind::Notch => (1.0, -2.0 * cs, 1.0),
        };
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cs;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
            d1: 0.0,
            d2: 0.0,
        }
    }

    pub fn low_pass(cutoff_hz: f32, period_us: u32) -> Self {
        Self::new(BiquadKind::LowPass, cutoff_hz, period_us, BIQUAD_Q)
    }

    pub fn notch(center_hz: f32, period_us: u32, q: f32) -> Self {
        Self::new(BiquadKind::Notch, center_hz, period_us, q)
    }
}

impl FilterStage for BiquadFilter {
    fn apply(&mut self, input: f32) -> f32 {
        let result = self.b0 * input + self.d1;
        self.d1 = self.b1 * input - self.a1 * result + self.d2;
        self.d2 = self.b2 * input - self.a2 * result;
        result
    }

    fn reset(&mut self) {
        self.d1 = 0.0;
        self.d2 = 0.0;
    }
}
