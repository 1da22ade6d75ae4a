use clap::Parser;
use report::{write_report, RunReport};
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline driver for the gyro conditioning pipeline")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Control-loop period in microseconds
    #[arg(long, default_value_t = 1000)]
    period_us: u32,
    #[arg(long, default_value_t = 3000)]
    cycles: usize,
    /// Seed for the synthetic sensor
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Write a JSON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.period_us, args.cycles, args.seed)
    };

    let runner = Runner::new(workflow_config.clone());
    let result = runner.execute()?;

    match result.calibration_completed_at {
        Some(cycle) => println!(
            "Calibration complete at cycle {} -> offset {:?} ({} restarts)",
            cycle, result.offset.0, result.metrics.calibration_restarts
        ),
        None => println!(
            "Calibration still running after {} cycles ({} restarts)",
            workflow_config.cycles, result.metrics.calibration_restarts
        ),
    }
    println!(
        "Cycles processed {}, skipped {}, residual rms {:?}",
        result.metrics.processed, result.metrics.skipped, result.residual_rms
    );
    println!(
        "Vibration @ {:.1} Hz: raw {:.3} -> filtered {:.3}",
        workflow_config.generator.vibration_hz, result.raw_vibration, result.filtered_vibration
    );

    if let Some(path) = args.report {
        let report = RunReport::new(&workflow_config, &result);
        write_report(&path, &report)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}
