use serde::{Deserialize, Serialize};

use crate::math::rounding::round_to_nearest;
use crate::prelude::{Axis, XYZ_AXIS_COUNT};

/// Optional hook invoked between filter stages. Never needed for correctness.
pub trait StageObserver {
    /// Offset-corrected value entering the low-pass stage.
    fn pre_filter(&mut self, _axis: Axis, _value: i32) {}
    /// Low-pass output, before any notch stage.
    fn post_low_pass(&mut self, _axis: Axis, _value: f32) {}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugMode {
    #[default]
    None,
    Gyro,
    Notch,
}

/// Per-axis debug slots, filled according to the selected mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugChannel {
    mode: DebugMode,
    values: [i32; XYZ_AXIS_COUNT],
}

impl DebugChannel {
    pub fn new(mode: DebugMode) -> Self {
        Self {
            mode,
            values: [0; XYZ_AXIS_COUNT],
        }
    }

    pub fn mode(&self) -> DebugMode {
        self.mode
    }

    pub fn values(&self) -> [i32; XYZ_AXIS_COUNT] {
        self.values
    }
}

impl StageObserver for DebugChannel {
    fn pre_filter(&mut self, axis: Axis, value: i32) {
        if self.mode == DebugMode::Gyro {
            self.values[axis.index()] = value;
        }
    }

    fn post_low_pass(&mut self, axis: Axis, value: f32) {
        if self.mode == DebugMode::Notch {
            self.values[axis.index()] = round_to_nearest(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gyro_mode_keeps_pre_filter_values_only() {
        let mut channel = DebugChannel::new(DebugMode::Gyro);
        channel.pre_filter(Axis::Y, 42);
        channel.post_low_pass(Axis::Y, 7.0);
        assert_eq!(channel.values(), [0, 42, 0]);
    }

    #[test]
    fn notch_mode_rounds_low_pass_output() {
        let mut channel = DebugChannel::new(DebugMode::Notch);
        channel.pre_filter(Axis::Z, 42);
        channel.post_low_pass(Axis::Z, -3.6);
        assert_eq!(channel.values(), [0, 0, -4]);
    }

    #[test]
    fn disabled_channel_stays_zero() {
        let mut channel = DebugChannel::default();
        channel.pre_filter(Axis::X, 1);
        channel.post_low_pass(Axis::X, 1.0);
        assert_eq!(channel.mode(), DebugMode::None);
        assert_eq!(channel.values(), [0; 3]);
    }
}
