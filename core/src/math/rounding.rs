//! The two rounding rules used by the pipeline. They are deliberately kept
//! separate: filter output rounds ties to even, the calibration mean rounds
//! ties away from zero.

/// Rounds a filter output to the nearest count, ties to even.
pub fn round_to_nearest(value: f32) -> i32 {
    value.round_ties_even() as i32
}

/// Integer mean of `count` accumulated samples, rounding half away from zero
/// by biasing the sum with half the window before dividing.
///
/// `count` must be nonzero.
pub fn rounded_mean(sum: i64, count: u32) -> i32 {
    let count = i64::from(count);
    let half = count / 2;
    let biased = if sum >= 0 { sum + half } else { sum - half };
    (biased / count) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_rounding_ties_to_even() {
        assert_eq!(round_to_nearest(2.5), 2);
        assert_eq!(round_to_nearest(3.5), 4);
        assert_eq!(round_to_nearest(-2.5), -2);
        assert_eq!(round_to_nearest(-2.6), -3);
        assert_eq!(round_to_nearest(0.49), 0);
    }

    #[test]
    fn mean_rounds_half_away_from_zero() {
        assert_eq!(rounded_mean(5, 2), 3);
        assert_eq!(rounded_mean(-5, 2), -3);
        assert_eq!(rounded_mean(4, 3), 1);
        assert_eq!(rounded_mean(-4, 3), -1);
    }

    #[test]
    fn mean_of_constant_window_is_exact() {
        assert_eq!(rounded_mean(-5 * 4000, 4000), -5);
        assert_eq!(rounded_mean(12 * 4000, 4000), 12);
    }
}
