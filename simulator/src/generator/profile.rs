use gyrocore::interface::RateSensor;
use gyrocore::{Axis, RateSample};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::generator::template::tone;

/// Frequency of the hand-held wobble injected during `motion_cycles`.
const MOTION_HZ: f32 = 2.0;

/// Configuration for generating a synthetic raw gyro stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Zero-rate bias in sensor counts, per axis.
    pub bias: [i32; 3],
    /// Peak uniform noise in counts.
    pub noise: f32,
    /// Frame vibration tone; zero disables it.
    pub vibration_hz: f32,
    pub vibration_amplitude: f32,
    /// Cycles at the start during which the vehicle is being moved.
    pub motion_cycles: usize,
    pub motion_amplitude: f32,
    /// Chance that the sensor has no sample ready on a given cycle.
    pub dropout_probability: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            bias: [12, -7, 3],
            noise: 2.0,
            vibration_hz: 180.0,
            vibration_amplitude: 20.0,
            motion_cycles: 0,
            motion_amplitude: 200.0,
            dropout_probability: 0.0,
            seed: 0,
        }
    }
}

/// Seeded sensor model implementing the pipeline's sensor interface.
pub struct SyntheticSensor {
    config: GeneratorConfig,
    period_us: u32,
    rng: StdRng,
    cycle: usize,
}

impl SyntheticSensor {
    pub fn new(config: &GeneratorConfig, period_us: u32) -> Self {
        Self {
            config: config.clone(),
            period_us,
            rng: StdRng::seed_from_u64(config.seed),
            cycle: 0,
        }
    }

    fn axis_value(&mut self, axis: Axis, cycle: usize) -> i32 {
        let vibration =
            self.config.vibration_amplitude * tone(cycle, self.config.vibration_hz, self.period_us);
        let motion = if cycle < self.config.motion_cycles {
            self.config.motion_amplitude * tone(cycle, MOTION_HZ, self.period_us)
        } else {
            0.0
        };
        let jitter = if self.config.noise > 0.0 {
            self.rng.gen_range(-self.config.noise..self.config.noise)
        } else {
            0.0
        };
        self.config.bias[axis.index()] + (vibration + motion + jitter).round() as i32
    }
}

impl RateSensor for SyntheticSensor {
    fn read_sample(&mut self) -> Option<RateSample> {
        let cycle = self.cycle;
        self.cycle += 1;

        let dropout = self.config.dropout_probability.clamp(0.0, 1.0);
        if dropout > 0.0 && self.rng.gen_bool(dropout) {
            return None;
        }

        let mut sample = RateSample::default();
        for axis in Axis::ALL {
            sample[axis] = self.axis_value(axis, cycle);
        }
        Some(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> GeneratorConfig {
        GeneratorConfig {
            noise: 0.0,
            vibration_hz: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn quiet_sensor_reports_bias() {
        let mut sensor = SyntheticSensor::new(&quiet(), 1000);
        for _ in 0..10 {
            assert_eq!(sensor.read_sample(), Some(RateSample::new(12, -7, 3)));
        }
    }

    #[test]
    fn same_seed_replays_same_stream() {
        let config = GeneratorConfig {
            seed: 7,
            dropout_probability: 0.2,
            ..Default::default()
        };
        let mut a = SyntheticSensor::new(&config, 1000);
        let mut b = SyntheticSensor::new(&config, 1000);
        for _ in 0..200 {
            assert_eq!(a.read_sample(), b.read_sample());
        }
    }

    #[test]
    fn full_dropout_never_delivers() {
        let config = GeneratorConfig {
            dropout_probability: 1.0,
            ..quiet()
        };
        let mut sensor = SyntheticSensor::new(&config, 1000);
        assert!((0..50).all(|_| sensor.read_sample().is_none()));
    }

    #[test]
    fn motion_stops_after_configured_cycles() {
        let config = GeneratorConfig {
            motion_cycles: 100,
            ..quiet()
        };
        let mut sensor = SyntheticSensor::new(&config, 1000);
        let moving: Vec<RateSample> = (0..100).filter_map(|_| sensor.read_sample()).collect();
        assert!(moving.iter().any(|s| s.0[0] != 12));
        assert_eq!(sensor.read_sample(), Some(RateSample::new(12, -7, 3)));
    }
}
