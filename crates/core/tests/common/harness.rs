//! Runs a hand-assembled instruction image against a fresh `Simulator` and
//! reports its outcome alongside the final architectural register file.

use r10k_core::{Config, RunOutcome, Simulator};

pub struct RunResult {
    pub outcome: RunOutcome,
    pub regs: [u32; 32],
}

/// Runs `imem` (and optionally `dmem`) to a terminator or to timeout, under a
/// generous default cycle budget so a stalled pipeline fails loudly instead
/// of hanging the test suite.
pub fn run_program(imem: Vec<u32>, dmem: Vec<u32>) -> RunResult {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let config = Config {
        sim_threshold: 10_000,
        idle_threshold: 1_000,
        ..Config::default()
    };
    let mut sim = Simulator::new(config, imem, dmem);
    let outcome = sim.run();
    let regs = sim.architectural_regs();
    RunResult { outcome, regs }
}
