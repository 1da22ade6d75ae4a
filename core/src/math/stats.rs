pub struct StatsHelper;

impl StatsHelper {
    pub fn rms(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f32 = samples.iter().map(|&v| v * v).sum();
        (sum_sq / samples.len() as f32).sqrt()
    }
}

/// Streaming mean/variance accumulator (Welford).
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningDeviation {
    count: u32,
    mean: f32,
    m2: f32,
}

impl RunningDeviation {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn push(&mut self, value: f32) {
        self.count += 1;
        if self.count == 1 {
            self.mean = value;
            self.m2 = 0.0;
        } else {
            let delta = value - self.mean;
            self.mean += delta / self.count as f32;
            self.m2 += delta * (value - self.mean);
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn mean(&self) -> f32 {
        self.mean
    }

    /// Sample variance; zero until at least two values were pushed.
    pub fn variance(&self) -> f32 {
        if self.count > 1 {
            self.m2 / (self.count - 1) as f32
        } else {
            0.0
        }
    }

    pub fn standard_deviation(&self) -> f32 {
        self.variance().sqrt()
    }
}
