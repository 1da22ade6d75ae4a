use num_complex::Complex32;
use rustfft::{num_traits::Zero, Fft, FftPlanner};

/// Helper that wraps the `rustfft` planner for reuse.
pub struct FftHelper {
    fft: std::sync::Arc<dyn Fft<f32>>,
    scratch: Vec<Complex32>,
    size: usize,
}

impl FftHelper {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex32::zero(); fft.get_inplace_scratch_len()];
        Self { fft, scratch, size }
    }

    /// Forward transform of a real signal, zero padded or truncated to the plan size.
    pub fn forward(&mut self, input: &[f32]) -> Vec<Complex32> {
        let mut buffer: Vec<Complex32> = input
            .iter()
            .take(self.size)
            .map(|&value| Complex32::new(value, 0.0))
            .collect();
        buffer.resize(self.size, Complex32::zero());

        self.fft.process_with_scratch(&mut buffer, &mut self.scratch);
        buffer
    }

    /// Single-sided amplitude of the bin closest to `frequency_hz`.
    pub fn amplitude_at(&mut self, input: &[f32], sample_rate_hz: f32, frequency_hz: f32) -> f32 {
        if sample_rate_hz <= 0.0 {
            return 0.0;
        }
        let spectrum = self.forward(input);
        let bin = (frequency_hz * self.size as f32 / sample_rate_hz).round() as usize;
        spectrum
            .get(bin.min(self.size / 2))
            .map(|c| 2.0 * c.norm() / self.size as f32)
            .unwrap_or(0.0)
    }
}
