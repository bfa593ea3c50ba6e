//! Simulation configuration.
//!
//! A single flat `Config` struct: the reset PC fetch starts from, the two cycle
//! budgets that bound a run (`sim_threshold` for a hard timeout, `idle_threshold`
//! for a stalled-pipeline detector distinct from it), and the trace flag that
//! gates the per-retirement commit-log line. Structural sizing (physical register
//! count, queue depths) is compile-time (`common::constants`) rather than
//! configured here, since every structural array in this design is a fixed-size
//! `CircularQueue<T, N>` — there is no runtime-resizable hardware to parameterize.

use crate::common::constants::{DEFAULT_IDLE_THRESHOLD, DEFAULT_SIM_THRESHOLD};

/// Default configuration constants for the simulator.
mod defaults {
    /// Reset value of the program counter.
    pub const RESET_PC: u32 = 0;

    /// Maximum cycle count before a run is declared a timeout.
    pub const SIM_THRESHOLD: u64 = super::DEFAULT_SIM_THRESHOLD;

    /// Consecutive idle cycles (no retirement, empty Active List) before a run
    /// is declared stalled.
    pub const IDLE_THRESHOLD: u64 = super::DEFAULT_IDLE_THRESHOLD;

    /// Whether a commit-log line is emitted per retired instruction.
    pub const TRACE: bool = false;
}

/// Root configuration for one simulation run.
///
/// # Examples
///
/// ```
/// use r10k_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.reset_pc, 0);
/// assert!(!config.trace);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Initial value of the PC at reset.
    pub reset_pc: u32,
    /// Hard cycle budget; exceeding it without a terminator is a timeout.
    pub sim_threshold: u64,
    /// Consecutive cycles with an empty Active List and no retirement before
    /// the run is declared stalled.
    pub idle_threshold: u64,
    /// Emit one commit-log line (with a full register dump) per retirement.
    pub trace: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reset_pc: defaults::RESET_PC,
            sim_threshold: defaults::SIM_THRESHOLD,
            idle_threshold: defaults::IDLE_THRESHOLD,
            trace: defaults::TRACE,
        }
    }
}
