use crate::reports;
use clap::Args;
use entrylab::aggregate::{aggregate, AggregateOptions};
use entrylab::config::AnalysisConfig;
use entrylab::error::EntryResult;
use entrylab::trial::{Layout, TrialSet};
use strum::IntoEnumIterator;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub config: AnalysisConfig,

    /// Only report layouts whose name contains this text.
    #[arg(short, long)]
    pub layout: Option<String>,
}

pub fn run(args: &SummaryArgs, set: &TrialSet, config: &AnalysisConfig) -> EntryResult<()> {
    let mut stats = aggregate(set, &AggregateOptions::from(config))?;

    if let Some(ref filter) = args.layout {
        let needle = filter.to_lowercase();
        let wanted: Vec<Layout> = Layout::iter()
            .filter(|layout| layout.to_string().to_lowercase().contains(&needle))
            .collect();
        if wanted.is_empty() {
            warn!("⚠️  '{}' matches no known layout", filter);
        }
        stats.layouts.retain(|layout, _| wanted.contains(layout));
    }

    println!(
        "\n🔎 === TRIAL SUMMARY: {} challenges, outlier m = {} === 🔎",
        stats.per_challenge.len(),
        config.outlier_m
    );

    if stats.layouts.is_empty() {
        println!("No layouts found matching criteria.");
        return Ok(());
    }

    reports::print_speed_report(&stats);
    reports::print_travel_report(&stats);
    reports::print_error_report(&stats);

    Ok(())
}
