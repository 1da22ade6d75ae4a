use std::num::NonZeroU32;

use crate::math::rounding::rounded_mean;
use crate::math::stats::RunningDeviation;
use crate::prelude::{Axis, CalibrationOffset, RateSample, XYZ_AXIS_COUNT};

/// Number of cycles in one calibration window for the given loop period.
///
/// Integer arithmetic on purpose: a period longer than the window constant
/// yields zero, which is clamped to a single cycle.
pub fn calibration_window(cycles_constant: u32, period_us: NonZeroU32) -> u32 {
    (cycles_constant / period_us.get())
        .saturating_mul(cycles_constant)
        .max(1)
}

/// Result of feeding one sample to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationStep {
    /// Engine is complete; the sample was not touched.
    Idle,
    /// Sample accumulated, window still open.
    Accumulating,
    /// Final cycle saw too much spread; a fresh window has begun.
    Restarted { deviation: [f32; XYZ_AXIS_COUNT] },
    /// Offsets committed, engine is now idle.
    Completed(CalibrationOffset),
}

/// Zero-bias estimator for a stationary vehicle.
///
/// Active while `remaining > 0`. Every active cycle accumulates the raw sample
/// and zeroes both the sample and the offset, so nothing uncalibrated leaks to
/// consumers. On the last cycle the per-axis spread decides between committing
/// the rounded mean and starting the window over.
#[derive(Debug, Clone, Default)]
pub struct CalibrationEngine {
    remaining: u32,
    window: u32,
    movement_threshold: u8,
    sums: [i64; XYZ_AXIS_COUNT],
    deviation: [RunningDeviation; XYZ_AXIS_COUNT],
}

impl CalibrationEngine {
    pub fn new(movement_threshold: u8) -> Self {
        Self {
            movement_threshold,
            ..Default::default()
        }
    }

    pub fn set_movement_threshold(&mut self, movement_threshold: u8) {
        self.movement_threshold = movement_threshold;
    }

    /// Opens a fresh window of `window` cycles, discarding any partial one.
    pub fn start(&mut self, window: u32) {
        self.window = window.max(1);
        self.remaining = self.window;
        self.sums = [0; XYZ_AXIS_COUNT];
        self.deviation.iter_mut().for_each(RunningDeviation::clear);
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    pub fn step(
        &mut self,
        sample: &mut RateSample,
        offset: &mut CalibrationOffset,
    ) -> CalibrationStep {
        if self.is_complete() {
            return CalibrationStep::Idle;
        }

        for axis in Axis::ALL {
            let i = axis.index();
            self.sums[i] += i64::from(sample[axis]);
            self.deviation[i].push(sample[axis] as f32);
            sample[axis] = 0;
            offset[axis] = 0;
        }

        if self.remaining > 1 {
            self.remaining -= 1;
            return CalibrationStep::Accumulating;
        }

        let deviation = self.deviation.map(|dev| dev.standard_deviation());
        if self.movement_threshold != 0
            && deviation
                .iter()
                .any(|&dev| dev > f32::from(self.movement_threshold))
        {
            self.start(self.window);
            return CalibrationStep::Restarted { deviation };
        }

        for axis in Axis::ALL {
            offset[axis] = rounded_mean(self.sums[axis.index()], self.window);
        }
        self.remaining = 0;
        CalibrationStep::Completed(*offset)
    }
}
