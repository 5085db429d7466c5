use clap::Parser;
use generator::profile::{build_dataset, GeneratorConfig};
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline driver for the spatial RSP scan core")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Points in the synthetic embedding
    #[arg(long, default_value_t = 2000)]
    points: usize,
    /// Signals in the synthetic panel
    #[arg(long, default_value_t = 50)]
    signals: usize,
    #[arg(long, default_value_t = 16)]
    sectors: usize,
    #[arg(long, default_value_t = 10)]
    thresholds: usize,
    #[arg(long, default_value_t = 1000)]
    permutations: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Write the scored table as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.sectors, args.thresholds, args.permutations, args.seed)
    };

    let dataset = build_dataset(&GeneratorConfig {
        points: args.points,
        signals: args.signals,
        seed: args.seed,
        ..Default::default()
    })?;

    let runner = Runner::new(workflow_config);
    let summary = runner.execute(&dataset)?;

    println!(
        "Scan run -> {} signals: {} scored, {} degenerate, {} failed",
        summary.table.len(),
        summary.scored,
        summary.degenerate,
        summary.failed
    );

    if let Some(path) = args.output {
        report::write_json(&path, &summary.table)?;
        println!("Result table written to {}", path.display());
    }

    Ok(())
}
