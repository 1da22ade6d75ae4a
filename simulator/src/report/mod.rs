pub mod model;

use anyhow::Context;
use std::fs;
use std::path::Path;

pub use model::RunReport;

/// Writes the report as pretty-printed JSON, creating parent directories.
pub fn write_report<P: AsRef<Path>>(path: P, report: &RunReport) -> anyhow::Result<()> {
    let path_ref = path.as_ref();
    if let Some(parent) = path_ref.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report).context("serializing run report")?;
    fs::write(path_ref, json)
        .with_context(|| format!("writing report {}", path_ref.display()))?;
    Ok(())
}
