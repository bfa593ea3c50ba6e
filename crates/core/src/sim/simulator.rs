//! `Simulator`: owns a `Core` and the cycle loop that drives it to completion.

use crate::config::Config;
use crate::core::pipeline::engine::Core;
use crate::stats::SimStats;

/// How a run ended.
#[derive(Debug, Clone, Copy)]
pub enum RunOutcome {
    /// The terminator instruction (`EBREAK`) retired within budget.
    Completed {
        /// Cycles elapsed.
        cycles: u64,
        /// Instructions retired.
        retire_count: u64,
        /// `x10`'s final architectural value.
        x10: u32,
    },
    /// Neither the hard cycle budget nor the idle-stall detector let the run
    /// reach a terminator.
    Timeout,
}

/// Owns the core plus its configuration and statistics, and runs it to
/// completion or timeout.
pub struct Simulator {
    core: Core,
    config: Config,
    stats: SimStats,
}

impl Simulator {
    /// Builds a simulator with the given instruction and data memory images.
    #[must_use]
    pub fn new(config: Config, imem: Vec<u32>, dmem: Vec<u32>) -> Self {
        Self {
            core: Core::new(config.reset_pc, imem, dmem),
            config,
            stats: SimStats::default(),
        }
    }

    /// Runs until the terminator retires, the hard cycle budget is exceeded, or
    /// the pipeline goes idle for `idle_threshold` consecutive cycles.
    pub fn run(&mut self) -> RunOutcome {
        let mut idle_cycles = 0u64;

        loop {
            let outcome = self.core.tick(&mut self.stats);

            if outcome.retired {
                idle_cycles = 0;
                if self.config.trace {
                    self.log_commit(&outcome);
                }
                if outcome.terminated {
                    return RunOutcome::Completed {
                        cycles: self.stats.cycles,
                        retire_count: self.stats.instructions_retired,
                        x10: outcome.x10,
                    };
                }
            } else if self.core.is_idle() {
                idle_cycles += 1;
                if idle_cycles >= self.config.idle_threshold {
                    return RunOutcome::Timeout;
                }
            }

            if self.stats.cycles >= self.config.sim_threshold {
                return RunOutcome::Timeout;
            }
        }
    }

    /// The run's statistics so far (final, once `run` has returned).
    #[must_use]
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// The full committed architectural register file (`x0..x31`).
    #[must_use]
    pub fn architectural_regs(&self) -> [u32; crate::common::constants::N_LOGICAL] {
        self.core.architectural_regs()
    }

    fn log_commit(&self, outcome: &crate::core::pipeline::commit::CommitOutcome) {
        eprintln!(
            "Cycle @{}: [Commit] PC={:#010x}, x10={:#x}, retire_count={}",
            self.stats.cycles, outcome.pc, outcome.x10, self.stats.instructions_retired
        );
        let regs = self.core.architectural_regs();
        for (arch, value) in regs.iter().enumerate() {
            eprintln!("  x{arch:<2} = {value:#010x}");
        }
    }
}
