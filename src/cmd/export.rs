use crate::reports;
use clap::Args;
use entrylab::aggregate::{aggregate, AggregateOptions};
use entrylab::config::AnalysisConfig;
use entrylab::error::EntryResult;
use entrylab::trial::TrialSet;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub config: AnalysisConfig,

    /// Output directory; created if missing.
    #[arg(short, long, default_value = "Reports")]
    pub out: PathBuf,
}

pub fn run(args: &ExportArgs, set: &TrialSet, config: &AnalysisConfig) -> EntryResult<()> {
    let stats = aggregate(set, &AggregateOptions::from(config))?;
    fs::create_dir_all(&args.out)?;

    let summary_path = args.out.join("summary.csv");
    reports::write_summary_csv(&summary_path, &stats)?;
    info!("💾 Wrote {:?}", summary_path);

    let challenges_path = args.out.join("challenges.csv");
    reports::write_challenges_csv(&challenges_path, &stats)?;
    info!("💾 Wrote {:?}", challenges_path);

    let positions_path = args.out.join("positions.csv");
    reports::write_positions_csv(&positions_path, &stats)?;
    info!("💾 Wrote {:?}", positions_path);

    let json_path = args.out.join("summary.json");
    let writer = BufWriter::new(File::create(&json_path)?);
    serde_json::to_writer_pretty(writer, &stats)?;
    info!("💾 Wrote {:?}", json_path);

    println!(
        "Exported {} layouts / {} challenges to {}",
        stats.layouts.len(),
        stats.per_challenge.len(),
        args.out.display()
    );
    Ok(())
}
