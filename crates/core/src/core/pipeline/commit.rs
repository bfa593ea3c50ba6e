//! Commit stage: retires the Active List head once it is ready, in program
//! order.
//!
//! Retirement frees the old physical register, writes the architectural map,
//! and pops the instruction's twin out of whichever issue queue held it — the
//! ALU Issue Queue for a plain ALU/mul-div op, the LSQ for a load or store
//! (feeding a retiring store into the store buffer). For a mispredicted
//! branch or a resolved `JALR`, retirement also triggers a structural flush:
//! the Active List, ALU Issue Queue, and LSQ are cleared, the speculative map
//! reloads from the committed one, the Register-Ready Vector is forced
//! all-ready, the Free List rolls back to this entry's rename-time snapshot,
//! and fetch is redirected to the resolved target. A plain `JAL` never
//! triggers this: its target was already folded into the very next fetched
//! PC, so nothing downstream needs correcting.

use crate::core::branch_predictor::BranchPredictor;
use crate::core::freelist::FreeList;
use crate::core::maptable::{CommitWrite, MapTable};
use crate::core::pipeline::activelist::ActiveList;
use crate::core::pipeline::aluqueue::AluQueue;
use crate::core::pipeline::fetch::Fetch;
use crate::core::pipeline::lsq::Lsq;
use crate::core::pipeline::scheduler::Scheduler;
use crate::core::pipeline::speculation::SpeculationState;
use crate::core::prf::PhysicalRegisterFile;
use crate::core::regready::RegisterReadyVector;
use crate::stats::SimStats;

/// Architectural register `x10` (`a0`), the return-value register the commit
/// log and the end-of-run summary both report.
const X10: usize = 10;

/// Resources commit reads from and writes into, each cycle.
pub struct CommitResources<'a> {
    pub active_list: &'a mut ActiveList,
    pub map_table: &'a mut MapTable,
    pub free_list: &'a mut FreeList,
    pub reg_ready: &'a mut RegisterReadyVector,
    pub alu_queue: &'a mut AluQueue,
    pub lsq: &'a mut Lsq,
    pub scheduler: &'a mut Scheduler,
    pub speculation: &'a mut SpeculationState,
    pub fetch: &'a mut Fetch,
    pub predictor: &'a mut dyn BranchPredictor,
    pub stats: &'a mut SimStats,
}

/// What happened at commit this cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitOutcome {
    /// An instruction retired this cycle.
    pub retired: bool,
    /// The retired instruction was `EBREAK` — the run should stop.
    pub terminated: bool,
    /// A structural flush was triggered (mispredicted branch or resolved `JALR`).
    /// Anything fetched but not yet renamed this cycle is stale and must be discarded.
    pub flushed: bool,
    /// The retired instruction's fetch PC, valid iff `retired`.
    pub pc: u32,
    /// `x10`'s architectural value immediately after this retirement.
    pub x10: u32,
}

/// Retires the Active List head if it is ready. Does nothing if the list is
/// empty or the head hasn't finished executing.
pub fn commit_stage(res: &mut CommitResources<'_>, prf: &PhysicalRegisterFile) -> CommitOutcome {
    let Some(head) = res.active_list.head() else {
        return CommitOutcome::default();
    };
    if !head.ready {
        return CommitOutcome::default();
    }
    // A store can't retire into a full store buffer: its move off the LSQ
    // and into memory-visibility happens only here, at commit, so it must
    // wait for the buffer to drain rather than stalling nothing and losing
    // the write.
    if head.is_store && res.lsq.store_buffer_full() {
        return CommitOutcome::default();
    }
    let head = head.clone();

    let mispredict = head.is_branch && head.predicted_taken != head.actual_taken;
    let needs_flush = mispredict || (head.is_jump && head.is_jalr);

    if head.is_branch {
        res.predictor.update(head.pc, head.actual_taken);
    }

    let commit_write = head.has_dest.then(|| CommitWrite {
        arch: head.dest_logical,
        committed_phys: head.dest_new_physical,
    });
    res.map_table.tick(commit_write, needs_flush, None);

    res.free_list.tick(
        head.has_dest.then_some(head.dest_old_physical),
        false,
        needs_flush.then_some(head.free_list_snapshot),
    );

    res.reg_ready.tick(None, needs_flush);

    let _ = res.active_list.retire_head();
    if head.is_load || head.is_store {
        res.lsq.retire_head();
    } else if !head.is_terminator {
        res.alu_queue.retire_head();
    }
    if needs_flush {
        res.active_list.flush();
        res.alu_queue.flush();
        res.lsq.flush_queue();
        res.scheduler.flush();
        res.fetch.set_pc(head.actual_target);
    }
    // Rename raised this bit when the branch entered the pipeline; clear it
    // now that the same branch has retired, freeing rename to dispatch a new one.
    res.speculation.tick(false, head.is_branch);

    res.stats.instructions_retired += 1;
    if head.is_branch {
        res.stats.inst_branch += 1;
        if mispredict {
            res.stats.branch_mispredictions += 1;
        } else {
            res.stats.branch_predictions += 1;
        }
    } else if head.is_load {
        res.stats.inst_load += 1;
    } else if head.is_store {
        res.stats.inst_store += 1;
    } else {
        res.stats.inst_alu += 1;
    }

    let committed_x10 = prf.read(res.map_table.read_commit(X10));

    CommitOutcome {
        retired: true,
        terminated: head.is_terminator,
        flushed: needs_flush,
        pc: head.pc,
        x10: committed_x10,
    }
}
