use std::f32::consts::PI;

/// Value of a unit sine tone at cycle `index` for a loop running every `period_us`.
pub fn tone(index: usize, frequency_hz: f32, period_us: u32) -> f32 {
    let t = index as f64 * f64::from(period_us) * 1e-6;
    // phase folded in f64 so long runs keep their precision
    let phase = (t * f64::from(frequency_hz)).fract() as f32;
    (2.0 * PI * phase).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_repeats_every_period() {
        // 250 Hz at 1 kHz: four samples per cycle
        let values: Vec<f32> = (0..8).map(|i| tone(i, 250.0, 1000)).collect();
        assert!(values[0].abs() < 1e-6);
        assert!((values[1] - 1.0).abs() < 1e-6);
        assert!((values[5] - 1.0).abs() < 1e-5);
        assert!((values[3] + 1.0).abs() < 1e-5);
    }

    #[test]
    fn zero_frequency_is_silent() {
        assert_eq!(tone(1234, 0.0, 125), 0.0);
    }
}
