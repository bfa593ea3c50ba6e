//! Simulation statistics.
//!
//! Plain public counters bumped directly by the commit stage, plus a handful of
//! derived accessors (`ipc`, `branch_accuracy`). No cache/privilege-mode/FP
//! counters survive here — this core has no cache hierarchy, no privilege
//! modes, and no floating point.

/// Simulation statistics: cycle count, retirement count, and instruction mix.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimStats {
    /// Total cycles the core has run.
    pub cycles: u64,
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,

    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch/jump instructions retired.
    pub inst_branch: u64,
    /// Count of ALU (non-load/store/branch) instructions retired.
    pub inst_alu: u64,

    /// Number of branches whose outcome matched the prediction.
    pub branch_predictions: u64,
    /// Number of branches that triggered a pipeline flush.
    pub branch_mispredictions: u64,
}

impl SimStats {
    /// Instructions retired per cycle. `0.0` for a zero-cycle run.
    #[must_use]
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Fraction of resolved branches that were predicted correctly, in `[0, 1]`.
    /// `0.0` if no branches have retired.
    #[must_use]
    pub fn branch_accuracy(&self) -> f64 {
        let total = self.branch_predictions + self.branch_mispredictions;
        if total == 0 {
            0.0
        } else {
            self.branch_predictions as f64 / total as f64
        }
    }

    /// Prints a summary to stdout: cycles, retirement count, IPC, and the
    /// instruction mix.
    pub fn print(&self) {
        println!("==========================================================");
        println!("R10K SIMULATION STATISTICS");
        println!("==========================================================");
        println!("cycles                 {}", self.cycles);
        println!("instructions_retired    {}", self.instructions_retired);
        println!("ipc                     {:.4}", self.ipc());
        println!("----------------------------------------------------------");
        println!("op.alu                  {}", self.inst_alu);
        println!("op.load                 {}", self.inst_load);
        println!("op.store                {}", self.inst_store);
        println!("op.branch               {}", self.inst_branch);
        println!("----------------------------------------------------------");
        println!("branch.predictions      {}", self.branch_predictions);
        println!("branch.mispredictions   {}", self.branch_mispredictions);
        println!("branch.accuracy         {:.2}%", self.branch_accuracy() * 100.0);
        println!("==========================================================");
    }
}
