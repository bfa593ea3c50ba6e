//! `Core`: wires every pipeline stage into one per-cycle [`Core::tick`].
//!
//! Each call visits the stages in a fixed order — commit, execute/writeback,
//! then fetch/rename — so that a flush a commit raises this cycle is visible
//! to rename before it dispatches anything, and a scheduler result this cycle
//! is visible to commit only on the *next* call (it reads the Active List
//! entry writeback already marked ready in a prior cycle). This matches the
//! Map Table's commit-then-flush-then-rename update ordering across the two
//! independent `tick()` calls rename and commit each make into it.

use tracing::{debug, trace};

use crate::core::branch_predictor::{AlwaysTaken, BranchPredictor};
use crate::core::freelist::FreeList;
use crate::core::maptable::MapTable;
use crate::core::pipeline::activelist::ActiveList;
use crate::core::pipeline::aluqueue::AluQueue;
use crate::core::pipeline::commit::{commit_stage, CommitOutcome, CommitResources};
use crate::core::pipeline::fetch::{Fetch, FetchedInstruction};
use crate::core::pipeline::lsq::Lsq;
use crate::core::pipeline::rename::{rename_stage, RenameResources};
use crate::core::pipeline::scheduler::Scheduler;
use crate::core::pipeline::speculation::SpeculationState;
use crate::core::pipeline::writeback::writeback_stage;
use crate::core::prf::PhysicalRegisterFile;
use crate::core::regready::RegisterReadyVector;
use crate::core::units::lsu::DataMemory;
use crate::stats::SimStats;

/// The out-of-order core: every structural component plus the instruction and
/// data memories it executes against.
pub struct Core {
    fetch: Fetch,
    map_table: MapTable,
    free_list: FreeList,
    reg_ready: RegisterReadyVector,
    prf: PhysicalRegisterFile,
    active_list: ActiveList,
    alu_queue: AluQueue,
    lsq: Lsq,
    scheduler: Scheduler,
    speculation: SpeculationState,
    predictor: Box<dyn BranchPredictor>,
    imem: Vec<u32>,
    dmem: DataMemory,
    /// Fetched but not yet renamed — held here, not re-fetched, across a
    /// rename stall so a structural hazard never silently drops or
    /// re-fetches an instruction.
    pending_fetch: Option<FetchedInstruction>,
}

impl Core {
    #[must_use]
    pub fn new(reset_pc: u32, imem: Vec<u32>, dmem: Vec<u32>) -> Self {
        Self {
            fetch: Fetch::new(reset_pc),
            map_table: MapTable::new(),
            free_list: FreeList::new(),
            reg_ready: RegisterReadyVector::new(),
            prf: PhysicalRegisterFile::new(),
            active_list: ActiveList::new(),
            alu_queue: AluQueue::new(),
            lsq: Lsq::new(),
            scheduler: Scheduler::new(),
            speculation: SpeculationState::new(),
            predictor: Box::new(AlwaysTaken),
            imem,
            dmem: DataMemory::new(dmem),
            pending_fetch: None,
        }
    }

    /// Is the Active List empty — i.e. nothing in flight? Used by the sim
    /// driver to decide whether a terminator has fully drained the pipeline.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.active_list.is_empty()
    }

    /// The full committed architectural register file (`x0..x31`), for the
    /// commit-log trace and end-of-run diffing against a reference simulator.
    #[must_use]
    pub fn architectural_regs(&self) -> [u32; crate::common::constants::N_LOGICAL] {
        std::array::from_fn(|arch| self.prf.read(self.map_table.read_commit(arch)))
    }

    /// Runs one cycle: commit, then execute/writeback, then fetch/rename.
    pub fn tick(&mut self, stats: &mut SimStats) -> CommitOutcome {
        let mut commit_res = CommitResources {
            active_list: &mut self.active_list,
            map_table: &mut self.map_table,
            free_list: &mut self.free_list,
            reg_ready: &mut self.reg_ready,
            alu_queue: &mut self.alu_queue,
            lsq: &mut self.lsq,
            scheduler: &mut self.scheduler,
            speculation: &mut self.speculation,
            fetch: &mut self.fetch,
            predictor: self.predictor.as_mut(),
            stats,
        };
        let outcome = commit_stage(&mut commit_res, &self.prf);
        if outcome.flushed {
            debug!(pc = outcome.pc, "pipeline flush");
            self.pending_fetch = None;
        }

        let results = self.scheduler.tick(
            &mut self.alu_queue,
            &mut self.lsq,
            &self.active_list,
            &self.reg_ready,
            &self.prf,
            &mut self.dmem,
        );
        for result in results {
            writeback_stage(result, &mut self.prf, &mut self.reg_ready, &mut self.active_list);
        }

        if self.pending_fetch.is_none() {
            self.pending_fetch = Some(self.fetch.fetch(&self.imem, self.predictor.as_mut()));
        }
        if let Some(fetched) = self.pending_fetch.clone() {
            let mut rename_res = RenameResources {
                map_table: &mut self.map_table,
                free_list: &mut self.free_list,
                reg_ready: &mut self.reg_ready,
                active_list: &mut self.active_list,
                alu_queue: &mut self.alu_queue,
                lsq: &mut self.lsq,
                speculation: &mut self.speculation,
            };
            if rename_stage(&fetched, &mut rename_res) {
                self.pending_fetch = None;
            } else {
                trace!(pc = fetched.pc, "rename stall");
            }
        }

        stats.cycles += 1;
        outcome
    }
}
