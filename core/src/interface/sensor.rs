use crate::prelude::RateSample;

/// Source of raw angular-rate samples.
///
/// Implementations must not block: a sensor that has nothing new this cycle
/// returns `None` and the pipeline keeps the previously published rate.
pub trait RateSensor {
    fn read_sample(&mut self) -> Option<RateSample>;
}
