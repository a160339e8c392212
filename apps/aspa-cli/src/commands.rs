//! Subcommand implementations
//!
//! Each command reads from a `BufRead` and writes to a `Write` so that it
//! can be driven from tests without touching stdin or stdout.

use std::error::Error;
use std::io::{BufRead, Write};

use aspa_gof::{durbin_modification, GofReport};
use aspa_spike::{
    counting_process_uniforms, lagged_spearman, read_column, read_raw_spike_times,
    select_bin_count, spearman_interval, BinScale, DescriptiveStats, FiveNumberSummary,
    Histogram, SegmentationConfig, SpikeTrains,
};
use tracing::{info, warn};

use crate::{Command, GofArgs, HistArgs, HistBwArgs, SegmentationArgs};

type CommandResult = Result<(), Box<dyn Error>>;

/// Two-sided 95% normal quantile
const Z_95: f64 = 1.96;

/// Dispatch a parsed subcommand
pub fn run<R: BufRead, W: Write>(
    command: &Command,
    base: SegmentationConfig,
    input: R,
    out: &mut W,
) -> CommandResult {
    match command {
        Command::Isi(args) => isi(args, base, input, out),
        Command::Stats(args) => stats(args, base, input, out),
        Command::Gof(args) => gof(args, base, input, out),
        Command::Hist(args) => hist(args, input, out),
        Command::HistBw(args) => hist_bw(args, input, out),
    }
}

/// Read raw spike times and segment them, aggregating on request
fn load_trains<R: BufRead>(
    args: &SegmentationArgs,
    base: SegmentationConfig,
    input: R,
) -> Result<SpikeTrains, Box<dyn Error>> {
    let config = args.resolve(base);
    let times = read_raw_spike_times(input, config.sample2second)?;
    let trains = SpikeTrains::from_raw(&times, &config)?;
    Ok(if args.aggregate {
        trains.aggregate()
    } else {
        trains
    })
}

fn isi<R: BufRead, W: Write>(
    args: &SegmentationArgs,
    base: SegmentationConfig,
    input: R,
    out: &mut W,
) -> CommandResult {
    let trains = load_trains(args, base, input)?;
    for interval in trains.isi() {
        writeln!(out, "{}", interval)?;
    }
    Ok(())
}

fn stats<R: BufRead, W: Write>(
    args: &SegmentationArgs,
    base: SegmentationConfig,
    input: R,
    out: &mut W,
) -> CommandResult {
    let trains = load_trains(args, base, input)?;
    let isi = trains.isi();

    if trains.n_aggregated() == 1 {
        writeln!(out, "Data from {} trials.", trains.n_trials())?;
    } else {
        writeln!(out, "Data from {} aggregated trials.", trains.n_aggregated())?;
    }
    writeln!(out, "The mean rate is: {:.4} Hz.", trains.rate())?;
    writeln!(out, "The inter spike interval statistics are:")?;
    writeln!(out, "{}", FiveNumberSummary::from_data(&isi)?)?;

    let moments = DescriptiveStats::from_data(&isi)?;
    writeln!(
        out,
        "mean: {:.6}  SD: {:.6}  CV: {:.4}",
        moments.mean,
        moments.std_dev,
        moments.cv()
    )?;

    match lagged_spearman(&isi, 1) {
        Ok(rho) => {
            let (lo, hi) = spearman_interval(rho, isi.len(), Z_95);
            writeln!(
                out,
                "A 95% confidence interval for the lag 1 Spearman rank correlation is: [{:.4}, {:.4}].",
                lo, hi
            )?;
        }
        Err(err) => warn!(%err, "lag 1 Spearman correlation skipped"),
    }
    Ok(())
}

fn gof<R: BufRead, W: Write>(
    args: &GofArgs,
    base: SegmentationConfig,
    input: R,
    out: &mut W,
) -> CommandResult {
    let isi = if args.raw {
        load_trains(&args.segmentation, base, input)?.isi()
    } else {
        read_column(input)?
    };
    info!(n_isi = isi.len(), "time rescaling");

    let mut sample = counting_process_uniforms(&isi)?;
    if args.durbin {
        sample = durbin_modification(&sample)?;
    }
    let report = GofReport::from_uniform_sample(&sample, true)?;

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "{}", report)?;
    }
    Ok(())
}

fn scale(log: bool) -> BinScale {
    if log {
        BinScale::Log
    } else {
        BinScale::Linear
    }
}

fn hist<R: BufRead, W: Write>(args: &HistArgs, input: R, out: &mut W) -> CommandResult {
    let data = read_column(input)?;
    info!(n = data.len(), log = args.log, "sample size");
    let histogram = Histogram::build(&data, args.n_bins, scale(args.log))?;
    for (left, right, value) in histogram.rows(args.prob) {
        writeln!(out, "{} {} {}", left, right, value)?;
    }
    Ok(())
}

fn hist_bw<R: BufRead, W: Write>(args: &HistBwArgs, input: R, out: &mut W) -> CommandResult {
    let data = read_column(input)?;
    info!(n = data.len(), log = args.log, "sample size");
    let selection = select_bin_count(&data, args.from, args.to, scale(args.log))?;
    for (m, score) in &selection.scores {
        writeln!(out, "{} {}", m, score)?;
    }
    Ok(())
}
