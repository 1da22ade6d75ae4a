use crate::prelude::FilterStage;

pub const MAX_FIR_DENOISE_WINDOW_SIZE: usize = 120;

/// Moving-average denoiser whose length tracks the requested cutoff.
#[derive(Debug, Clone)]
pub struct FirDenoise {
    state: [f32; MAX_FIR_DENOISE_WINDOW_SIZE],
    window: usize,
    index: usize,
    filled: usize,
    moving_sum: f32,
}

impl FirDenoise {
    pub fn new(cutoff_hz: f32, period_us: u32) -> Self {
        let sample_rate_hz = 1.0 / (period_us as f32 * 1e-6);
        let window = (sample_rate_hz / cutoff_hz).round();
        let window = if window.is_finite() {
            (window as usize).clamp(1, MAX_FIR_DENOISE_WINDOW_SIZE)
        } else {
            MAX_FIR_DENOISE_WINDOW_SIZE
        };
        Self {
            state: [0.0; MAX_FIR_DENOISE_WINDOW_SIZE],
            window,
            index: 0,
            filled: 0,
            moving_sum: 0.0,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl FilterStage for FirDenoise {
    fn apply(&mut self, input: f32) -> f32 {
        if self.filled == self.window {
            self.moving_sum -= self.state[self.index];
        } else {
            self.filled += 1;
        }
        self.state[self.index] = input;
        self.moving_sum += input;
        self.index = (self.index + 1) % self.window;

        self.moving_sum / self.filled as f32
    }

    fn reset(&mut self) {
        self.state = [0.0; MAX_FIR_DENOISE_WINDOW_SIZE];
        self.index = 0;
        self.filled = 0;
        self.moving_sum = 0.0;
    }
}
