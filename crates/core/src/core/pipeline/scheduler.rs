//! Scheduler: the execution stage. Each cycle it picks at most one ready ALU
//! Issue Queue entry and drives the Load/Store Queue's address generation,
//! memory issue, and store-buffer drain.
//!
//! The ALU, multiplier, and divider share a single issue port — mirroring the
//! one `AluQueueEntry` chosen per cycle — so a multi-cycle divide occupies
//! that port for its full latency: no new ALU/mul/div entry is chosen while
//! [`Scheduler::is_div_busy`]. The LSQ's address generation and memory issue
//! run on a separate port and are unaffected by divider occupancy.

use crate::core::maptable::PhysReg;
use crate::core::pipeline::activelist::{ActiveList, ActiveListEntry, ActiveListTag};
use crate::core::pipeline::aluqueue::AluQueue;
use crate::core::pipeline::lsq::Lsq;
use crate::core::pipeline::writeback::ExecutionResult;
use crate::core::prf::PhysicalRegisterFile;
use crate::core::regready::RegisterReadyVector;
use crate::core::units::alu;
use crate::core::units::lsu::{format_load, DataMemory};
use crate::core::units::muldiv::{self, Divider};
use crate::isa::decode::{AluOp, OperandSource};

/// A divide in flight, occupying the shared ALU/mul-div issue port.
#[derive(Debug, Clone, Copy)]
struct PendingDivide {
    tag: ActiveListTag,
    dest: PhysReg,
    has_dest: bool,
    divider: Divider,
}

/// Execution stage state carried across cycles: just the in-flight divide, if any.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending_divide: Option<PendingDivide>,
}

fn operand_value(from: OperandSource, reg: PhysReg, imm: i32, pc: u32, prf: &PhysicalRegisterFile) -> u32 {
    match from {
        OperandSource::Rs1 | OperandSource::Rs2 => prf.read(reg),
        OperandSource::Imm => imm as u32,
        OperandSource::Pc => pc,
        OperandSource::Four => 4,
        OperandSource::Zero => 0,
    }
}

/// Resolves a non-mul/div ALU Issue Queue entry into a result: plain integer
/// op, or branch/jump target+outcome when the Active List entry says so.
fn resolve_alu_entry(
    tag: ActiveListTag,
    op: AluOp,
    al_entry: Option<&ActiveListEntry>,
    a: u32,
    b: u32,
    pc: u32,
) -> ExecutionResult {
    let Some(e) = al_entry else {
        return ExecutionResult {
            tag,
            dest: 0,
            has_dest: false,
            value: alu::execute(op, a, b),
            resolves_control_flow: false,
            actual_taken: false,
            actual_target: 0,
        };
    };

    if e.is_branch {
        let taken = alu::evaluate_branch(e.branch_cond.expect("is_branch implies branch_cond"), a, b);
        let target = if taken {
            pc.wrapping_add(e.imm as u32)
        } else {
            pc.wrapping_add(4)
        };
        ExecutionResult {
            tag,
            dest: 0,
            has_dest: false,
            value: 0,
            resolves_control_flow: true,
            actual_taken: taken,
            actual_target: target,
        }
    } else if e.is_jalr {
        let target = a.wrapping_add(b) & !1u32;
        ExecutionResult {
            tag,
            dest: e.dest_new_physical,
            has_dest: e.has_dest,
            value: pc.wrapping_add(4),
            resolves_control_flow: true,
            actual_taken: true,
            actual_target: target,
        }
    } else if e.is_jump {
        ExecutionResult {
            tag,
            dest: e.dest_new_physical,
            has_dest: e.has_dest,
            value: pc.wrapping_add(4),
            resolves_control_flow: true,
            actual_taken: true,
            actual_target: pc.wrapping_add(e.imm as u32),
        }
    } else {
        ExecutionResult {
            tag,
            dest: e.dest_new_physical,
            has_dest: e.has_dest,
            value: alu::execute(op, a, b),
            resolves_control_flow: false,
            actual_taken: false,
            actual_target: 0,
        }
    }
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending_divide: None,
        }
    }

    /// Whether the shared issue port is occupied by an in-flight divide.
    #[must_use]
    pub const fn is_div_busy(&self) -> bool {
        self.pending_divide.is_some()
    }

    /// Discards in-flight execution state (flush).
    pub fn flush(&mut self) {
        self.pending_divide = None;
    }

    /// Advances one cycle, returning every [`ExecutionResult`] produced —
    /// at most one from the ALU/mul/div port and at most one from the LSQ.
    pub fn tick(
        &mut self,
        alu_queue: &mut AluQueue,
        lsq: &mut Lsq,
        active_list: &ActiveList,
        reg_ready: &RegisterReadyVector,
        prf: &PhysicalRegisterFile,
        dmem: &mut DataMemory,
    ) -> Vec<ExecutionResult> {
        let mut results = Vec::new();

        if let Some(pending) = &mut self.pending_divide {
            pending.divider.step();
            if pending.divider.is_done() {
                let pending = self.pending_divide.take().expect("checked Some above");
                results.push(ExecutionResult {
                    tag: pending.tag,
                    dest: pending.dest,
                    has_dest: pending.has_dest,
                    value: pending.divider.result(),
                    resolves_control_flow: false,
                    actual_taken: false,
                    actual_target: 0,
                });
            }
        } else if let Some(entry) = alu_queue.choose_ready(|p| reg_ready.is_ready(p)) {
            let al_entry = active_list.entry(entry.tag);
            let pc = al_entry.map_or(0, |e| e.pc);
            let a = operand_value(entry.operand1_from, entry.src1, entry.imm, pc, prf);
            let b = operand_value(entry.operand2_from, entry.src2, entry.imm, pc, prf);

            if entry.op.is_div() {
                let (dest, has_dest) = al_entry.map_or((0, false), |e| (e.dest_new_physical, e.has_dest));
                self.pending_divide = Some(PendingDivide {
                    tag: entry.tag,
                    dest,
                    has_dest,
                    divider: Divider::start(entry.op, a, b),
                });
            } else if entry.op.is_mul() {
                let (dest, has_dest) = al_entry.map_or((0, false), |e| (e.dest_new_physical, e.has_dest));
                results.push(ExecutionResult {
                    tag: entry.tag,
                    dest,
                    has_dest,
                    value: muldiv::multiply(entry.op, a, b),
                    resolves_control_flow: false,
                    actual_taken: false,
                    actual_target: 0,
                });
            } else {
                results.push(resolve_alu_entry(entry.tag, entry.op, al_entry, a, b, pc));
            }
        }

        lsq.generate_address(|p| reg_ready.is_ready(p), |p| prf.read(p));

        // A valid Store Buffer has priority over dispatching any LSQ load
        // this cycle: both would otherwise contend for the single LSU port.
        if lsq.store_buffer_full() {
            if let Some(store) = lsq.drain_store_buffer() {
                dmem.write_word(store.addr, store.data);
            }
        } else if let Some(entry) = lsq.choose_issue() {
            let raw = dmem.read_word(entry.addr.unwrap_or(0));
            results.push(ExecutionResult {
                tag: entry.tag,
                dest: entry.dest,
                has_dest: true,
                value: format_load(entry.width, raw),
                resolves_control_flow: false,
                actual_taken: false,
                actual_target: 0,
            });
        }

        // A store with known address/data is ready to commit, but stays
        // queued and memory-invisible until Commit actually retires it. This
        // signal is independent of the LSU dispatch above.
        if let Some(tag) = lsq.ready_store() {
            results.push(ExecutionResult {
                tag,
                dest: 0,
                has_dest: false,
                value: 0,
                resolves_control_flow: false,
                actual_taken: false,
                actual_target: 0,
            });
        }

        results
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
