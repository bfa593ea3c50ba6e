//! R10K simulator CLI.
//!
//! `r10k-sim run --image <path> [--data <path>] [--sim-threshold N] [--idle-threshold N] [--trace]`
//! loads a hex word image (and, optionally, a separate data image), runs the
//! core to a terminator or to timeout, and prints a final statistics summary.
//! Exit code is `0` on a terminator reached within budget, `2` on timeout.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use r10k_core::config::Config;
use r10k_core::sim::loader::load_hex;
use r10k_core::{RunOutcome, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "r10k-sim",
    author,
    version,
    about = "Cycle-accurate, out-of-order, register-renaming RV32IM core simulator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Loads a hex image and runs it to a terminator or to timeout.
    Run {
        /// Path to the instruction hex image.
        #[arg(long)]
        image: PathBuf,

        /// Path to a data hex image (defaults to an empty data memory).
        #[arg(long)]
        data: Option<PathBuf>,

        /// Overrides the hard cycle budget before a run is declared a timeout.
        #[arg(long)]
        sim_threshold: Option<u64>,

        /// Overrides the consecutive-idle-cycle budget before a run is declared stalled.
        #[arg(long)]
        idle_threshold: Option<u64>,

        /// Emits one commit-log line (with a full register dump) per retired instruction.
        #[arg(long)]
        trace: bool,
    },
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            image,
            data,
            sim_threshold,
            idle_threshold,
            trace,
        } => cmd_run(&image, data.as_deref(), sim_threshold, idle_threshold, trace),
    }
}

fn cmd_run(
    image: &Path,
    data: Option<&Path>,
    sim_threshold: Option<u64>,
    idle_threshold: Option<u64>,
    trace: bool,
) {
    let imem = load_hex(image).unwrap_or_else(|err| {
        eprintln!("error: {err}");
        process::exit(1);
    });
    let dmem = match data {
        Some(path) => load_hex(path).unwrap_or_else(|err| {
            eprintln!("error: {err}");
            process::exit(1);
        }),
        None => Vec::new(),
    };

    let mut config = Config::default();
    if let Some(threshold) = sim_threshold {
        config.sim_threshold = threshold;
    }
    if let Some(threshold) = idle_threshold {
        config.idle_threshold = threshold;
    }
    config.trace = trace;

    let mut sim = Simulator::new(config, imem, dmem);
    let outcome = sim.run();
    sim.stats().print();

    match outcome {
        RunOutcome::Completed {
            cycles,
            retire_count,
            x10,
        } => {
            println!("Completed: cycles={cycles} retire_count={retire_count} x10={x10:#x}");
            process::exit(0);
        }
        RunOutcome::Timeout => {
            eprintln!("Timeout: simulation did not reach a terminator within budget");
            process::exit(2);
        }
    }
}
