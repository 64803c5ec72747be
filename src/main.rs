use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use entrylab::config::AnalysisConfig;
use entrylab::error::EntryResult;
use entrylab::trial::{self, DirStore, TrialSet};
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the trial-*.yaml records.
    #[arg(global = true, short = 'd', long, default_value = "Results")]
    trials: String,

    /// Record ids (file stems) to load. Loads every record when omitted.
    #[arg(global = true, short = 't', long = "trial")]
    trial_ids: Vec<String>,

    /// JSON analysis config. Explicit command-line flags win over its values.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Summary(cmd::summary::SummaryArgs),
    Export(cmd::export::ExportArgs),
    Inspect(cmd::inspect::InspectArgs),
}

fn load_trials(cli: &Cli) -> EntryResult<TrialSet> {
    let store = DirStore::new(&cli.trials);
    info!("📂 Loading trials from: {}", cli.trials);

    let mut sets = if cli.trial_ids.is_empty() {
        trial::load_all(&store)?
    } else {
        cli.trial_ids
            .iter()
            .map(|id| trial::load_trial(&store, id))
            .collect::<EntryResult<Vec<_>>>()?
    };

    if sets.is_empty() {
        warn!("⚠️  No trial records found in '{}'", cli.trials);
    }

    let set = if sets.len() == 1 {
        sets.remove(0)
    } else {
        trial::merge(sets)
    };

    if set.skipped > 0 {
        warn!("⚠️  {} malformed entries were skipped", set.skipped);
    }
    Ok(set)
}

fn run(cli: Cli, matches: &clap::ArgMatches) -> EntryResult<()> {
    let sub_matches = matches.subcommand().map(|(_, m)| m).unwrap_or(matches);

    let cli_config = match &cli.command {
        Commands::Summary(args) => &args.config,
        Commands::Export(args) => &args.config,
        Commands::Inspect(args) => &args.config,
    };

    let config = if let Some(path) = &cli.config {
        info!("⚖️  Loading analysis config from: {}", path);
        let mut file_config = AnalysisConfig::load_from_file(path)?;
        file_config.merge_from_cli(cli_config, sub_matches);
        file_config
    } else {
        cli_config.clone()
    };
    config.validate()?;

    let set = load_trials(&cli)?;

    match &cli.command {
        Commands::Summary(args) => cmd::summary::run(args, &set, &config),
        Commands::Export(args) => cmd::export::run(args, &set, &config),
        Commands::Inspect(args) => cmd::inspect::run(args, &set, &config),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing EntryLab...");

    if let Err(e) = run(cli, &matches) {
        error!("❌ FATAL: {}", e);
        process::exit(1);
    }
}
