use anyhow::Context;
use clap::Parser;
use generator::profile::CurlProfile;
use repcore::history::browser::NO_HISTORY_MESSAGE;
use repcore::history::HistoryStore;
use std::fs;
use std::path::PathBuf;
use workflow::config::ReplayConfig;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Headless replay driver for the Get Fit curl counter")]
struct Args {
    /// Load a replay config from YAML; the profile flags below are ignored
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 3)]
    reps: usize,
    #[arg(long, default_value_t = 15)]
    frames_per_half: usize,
    /// Peak angle jitter in degrees
    #[arg(long, default_value_t = 2.0)]
    noise: f32,
    /// Chance of a frame without landmarks after each sample
    #[arg(long, default_value_t = 0.0)]
    dropout: f32,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Overrides the history directory
    #[arg(long)]
    history_dir: Option<PathBuf>,
    /// Write the replay summary as JSON
    #[arg(long)]
    report: Option<PathBuf>,
    /// Print the captions of archived sessions and exit
    #[arg(long, default_value_t = false)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut replay_config = if let Some(path) = &args.workflow {
        ReplayConfig::load(path)?
    } else {
        let profile = CurlProfile {
            reps: args.reps,
            frames_per_half: args.frames_per_half,
            noise: args.noise,
            dropout: args.dropout,
            seed: args.seed,
            ..Default::default()
        };
        ReplayConfig::from_args(profile, None)
    };
    if let Some(dir) = args.history_dir {
        replay_config.tracker.history_dir = dir;
    }

    if args.list {
        let store = HistoryStore::new(replay_config.tracker.history_dir.clone());
        let entries = store
            .list()
            .with_context(|| format!("listing {}", store.dir().display()))?;
        if entries.is_empty() {
            println!("{NO_HISTORY_MESSAGE}");
        }
        for entry in entries {
            println!("{}", entry.caption());
        }
        return Ok(());
    }

    let result = Runner::new(replay_config).execute()?;
    println!(
        "Replay -> curls {}, ticks {}, samples {}, saved {}",
        result.count,
        result.ticks,
        result.samples,
        result
            .saved
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "nothing".to_string())
    );

    if let Some(report_path) = args.report {
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let report = serde_json::to_string_pretty(&result).context("serializing replay report")?;
        fs::write(&report_path, report)
            .with_context(|| format!("writing report {}", report_path.display()))?;
    }

    Ok(())
}
