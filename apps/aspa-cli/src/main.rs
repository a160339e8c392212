//! aspa - spike train analysis from the command line
//!
//! Every subcommand reads whitespace-separated numbers on stdin and writes
//! its results to stdout. Logs go to stderr.

mod commands;

use std::io;
use std::path::PathBuf;

use aspa_spike::SegmentationConfig;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Spike train analysis and goodness-of-fit tests
#[derive(Parser, Debug)]
#[command(name = "aspa", version, about, long_about = None)]
struct Cli {
    /// TOML file with segmentation parameters; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug messages (RUST_LOG takes precedence)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Segment raw spike times into trials and print the inter-spike intervals
    Isi(SegmentationArgs),
    /// Trial count, rate and inter-spike interval statistics of raw spike times
    Stats(SegmentationArgs),
    /// Goodness-of-fit tests of the time-rescaled intervals
    Gof(GofArgs),
    /// Histogram of a column of numbers
    Hist(HistArgs),
    /// Choose a histogram bin count by cross-validation
    HistBw(HistBwArgs),
}

/// Acquisition and protocol parameters
#[derive(Args, Debug, Clone, Default)]
pub struct SegmentationArgs {
    /// Samples per second of the raw timestamps [default: 15000]
    #[arg(long)]
    pub sample2second: Option<f64>,

    /// Time between the starts of successive trials (s)
    #[arg(long)]
    pub inter_trial_interval: Option<f64>,

    /// Recorded length of each trial (s)
    #[arg(long)]
    pub trial_duration: Option<f64>,

    /// Stimulus onset within a trial (s)
    #[arg(long)]
    pub stim_onset: Option<f64>,

    /// Stimulus offset within a trial (s)
    #[arg(long)]
    pub stim_offset: Option<f64>,

    /// Pool every trial into one before computing intervals
    #[arg(long, default_value_t = false)]
    pub aggregate: bool,
}

impl SegmentationArgs {
    /// Apply the flags given on the command line over `base`
    pub fn resolve(&self, base: SegmentationConfig) -> SegmentationConfig {
        SegmentationConfig {
            sample2second: self.sample2second.unwrap_or(base.sample2second),
            inter_trial_interval: self
                .inter_trial_interval
                .unwrap_or(base.inter_trial_interval),
            trial_duration: self.trial_duration.unwrap_or(base.trial_duration),
            stim_onset: self.stim_onset.unwrap_or(base.stim_onset),
            stim_offset: self.stim_offset.unwrap_or(base.stim_offset),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct GofArgs {
    /// Input is raw spike times rather than a column of intervals
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Apply Durbin's modification before testing
    #[arg(long, default_value_t = false)]
    pub durbin: bool,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[command(flatten)]
    pub segmentation: SegmentationArgs,
}

#[derive(Args, Debug, Clone)]
pub struct HistArgs {
    /// Number of bins
    #[arg(short, long)]
    pub n_bins: usize,

    /// Bins equally spaced in log
    #[arg(short, long, default_value_t = false)]
    pub log: bool,

    /// Divide counts by n times the bin width
    #[arg(short, long, default_value_t = false)]
    pub prob: bool,
}

#[derive(Args, Debug, Clone)]
pub struct HistBwArgs {
    /// Smallest bin count explored
    #[arg(long, default_value_t = 2)]
    pub from: usize,

    /// Largest bin count explored; below --from means 2 to n/10
    #[arg(long, default_value_t = 0)]
    pub to: usize,

    /// Bins equally spaced in log
    #[arg(short, long, default_value_t = false)]
    pub log: bool,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let base = match &cli.config {
        Some(path) => SegmentationConfig::from_toml_file(path)?,
        None => SegmentationConfig::default(),
    };
    tracing::debug!(?base, command = ?cli.command, "starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    commands::run(&cli.command, base, stdin.lock(), &mut stdout.lock())
}
