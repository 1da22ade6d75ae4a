use std::f32::consts::PI;

use crate::prelude::FilterStage;

/// First-order RC low-pass.
#[derive(Debug, Clone, Default)]
pub struct Pt1Filter {
    state: f32,
    k: f32,
}

impl Pt1Filter {
    pub fn new(cutoff_hz: f32, period_us: u32) -> Self {
        let rc = 1.0 / (2.0 * PI * cutoff_hz);
        let dt = period_us as f32 * 1e-6;
        Self {
            state: 0.0,
            k: dt / (rc + dt),
        }
    }

    pub fn gain(&self) -> f32 {
        self.k
    }
}

impl FilterStage for Pt1Filter {
    fn apply(&mut self, input: f32) -> f32 {
        self.state += self.k * (input - self.state);
        self.state
    }

    fn reset(&mut self) {
        self.state = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_follows_rc_time_constant() {
        let filter = Pt1Filter::new(90.0, 1000);
        let rc = 1.0 / (2.0 * PI * 90.0);
        assert!((filter.gain() - 0.001 / (rc + 0.001)).abs() < 1e-6);
    }

    #[test]
    fn step_response_approaches_target() {
        let mut filter = Pt1Filter::new(90.0, 1000);
        let first = filter.apply(100.0);
        assert!(first > 0.0 && first < 100.0);
        let mut out = first;
        for _ in 0..200 {
            out = filter.apply(100.0);
        }
        assert!((out - 100.0).abs() < 1e-2);
    }
}
