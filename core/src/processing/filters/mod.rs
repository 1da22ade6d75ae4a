pub mod biquad;
pub mod fir;
pub mod pt1;

pub use biquad::{notch_q, BiquadFilter, BiquadKind};
pub use fir::FirDenoise;
pub use pt1::Pt1Filter;

use crate::config::LowPassType;
use crate::prelude::FilterStage;

/// Low-pass variant selected once at initialisation time.
#[derive(Debug, Clone)]
pub enum LowPassFilter {
    Biquad(BiquadFilter),
    Pt1(Pt1Filter),
    FirDenoise(FirDenoise),
}

impl LowPassFilter {
    pub fn new(kind: LowPassType, cutoff_hz: f32, period_us: u32) -> Self {
        match kind {
            LowPassType::Biquad => {
                LowPassFilter::Biquad(BiquadFilter::low_pass(cutoff_hz, period_us))
            }
            LowPassType::Pt1 => LowPassFilter::Pt1(Pt1Filter::new(cutoff_hz, period_us)),
            LowPassType::FirDenoise => {
                LowPassFilter::FirDenoise(FirDenoise::new(cutoff_hz, period_us))
            }
        }
    }
}

impl FilterStage for LowPassFilter {
    fn apply(&mut self, input: f32) -> f32 {
        match self {
            LowPassFilter::Biquad(filter) => filter.apply(input),
            LowPassFilter::Pt1(filter) => filter.apply(input),
            LowPassFilter::FirDenoise(filter) => filter.apply(input),
        }
    }

    fn reset(&mut self) {
        match self {
            LowPassFilter::Biquad(filter) => filter.reset(),
            LowPassFilter::Pt1(filter) => filter.reset(),
            LowPassFilter::FirDenoise(filter) => filter.reset(),
        }
    }
}
