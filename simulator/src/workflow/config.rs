use anyhow::{bail, Context};
use gyrocore::interface::DebugMode;
use gyrocore::GyroConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::generator::profile::GeneratorConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Control-loop period in microseconds.
    pub sampling_period_us: u32,
    pub cycles: usize,
    pub debug_mode: DebugMode,
    pub gyro: GyroConfig,
    pub generator: GeneratorConfig,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            sampling_period_us: 1000,
            cycles: 3000,
            debug_mode: DebugMode::None,
            gyro: GyroConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        config
            .validate()
            .with_context(|| format!("validating workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(sampling_period_us: u32, cycles: usize, seed: u64) -> Self {
        Self {
            sampling_period_us,
            cycles,
            generator: GeneratorConfig {
                seed,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.sampling_period_us == 0 {
            bail!("sampling_period_us must be nonzero");
        }
        self.gyro.validate()?;
        Ok(())
    }

    pub fn sample_rate_hz(&self) -> f32 {
        1_000_000.0 / self.sampling_period_us.max(1) as f32
    }
}
