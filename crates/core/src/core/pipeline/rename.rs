//! Fetch/decode/rename: turns one [`FetchedInstruction`] into entries in the
//! Active List and, depending on instruction class, the ALU Issue Queue or
//! the Load/Store Queue.
//!
//! Source operands are captured from the speculative Map Table *before* the
//! destination rename write lands, so an instruction reading its own
//! destination (`addi x5, x5, 16`) still sees the previous producer of `x5`,
//! not itself. All structural resource checks (Active List slot, a queue slot
//! for the instruction's class, a free physical register if it writes one)
//! happen up front — rename either fully dispatches an instruction or stalls
//! it entirely, never partially.
//!
//! A branch also sets the [`SpeculationState`] bit on dispatch, and stalls
//! behind it if it's already set: this model tracks only one in-flight,
//! unresolved branch at a time, and commit clears the bit when that branch
//! retires.

use crate::core::freelist::FreeList;
use crate::core::maptable::{MapTable, RenameWrite};
use crate::core::pipeline::activelist::{ActiveList, ActiveListEntry};
use crate::core::pipeline::aluqueue::{AluQueue, AluQueueEntry};
use crate::core::pipeline::fetch::FetchedInstruction;
use crate::core::pipeline::lsq::{Lsq, LsqEntry};
use crate::core::pipeline::speculation::SpeculationState;
use crate::core::regready::RegisterReadyVector;

/// Resources rename reads from and writes into, each cycle.
pub struct RenameResources<'a> {
    pub map_table: &'a mut MapTable,
    pub free_list: &'a mut FreeList,
    pub reg_ready: &'a mut RegisterReadyVector,
    pub active_list: &'a mut ActiveList,
    pub alu_queue: &'a mut AluQueue,
    pub lsq: &'a mut Lsq,
    pub speculation: &'a mut SpeculationState,
}

/// Attempts to rename and dispatch one fetched instruction. Returns `true` if
/// it was dispatched; `false` means a structural hazard stalled it and the
/// caller must not advance fetch past it.
pub fn rename_stage(fetched: &FetchedInstruction, res: &mut RenameResources<'_>) -> bool {
    let args = &fetched.args;

    let needs_alu = !args.is_load && !args.is_store && !args.is_terminator;
    let needs_lsq = args.is_load || args.is_store;
    let needs_phys = args.has_rd && args.rd != 0;

    // Only one branch's worth of speculation is tracked at a time: a second
    // branch must wait for the first to retire.
    if args.is_branch && res.speculation.is_flushing() {
        return false;
    }
    if res.active_list.is_full() {
        return false;
    }
    if needs_alu && res.alu_queue.is_full() {
        return false;
    }
    if needs_lsq && res.lsq.is_full() {
        return false;
    }
    if needs_phys && res.free_list.is_empty() {
        return false;
    }

    let src1 = res.map_table.read_spec(args.rs1);
    let src2 = res.map_table.read_spec(args.rs2);
    let dest_old_physical = res.map_table.read_spec(args.rd);

    let dest_new_physical = if needs_phys {
        res.free_list
            .tick(None, true, None)
            .expect("checked free_list.is_empty() above")
    } else {
        dest_old_physical
    };

    if needs_phys {
        res.map_table.tick(
            None,
            false,
            Some(RenameWrite {
                arch: args.rd,
                new_phys: dest_new_physical,
            }),
        );
        res.reg_ready.mark_not_ready(dest_new_physical);
    }

    let entry = ActiveListEntry {
        pc: fetched.pc,
        dest_logical: args.rd,
        dest_new_physical,
        dest_old_physical,
        has_dest: needs_phys,
        ready: args.is_terminator,
        is_branch: args.is_branch,
        branch_cond: args.branch_cond,
        is_jump: args.is_jal || args.is_jalr,
        is_jalr: args.is_jalr,
        is_load: args.is_load,
        is_store: args.is_store,
        mem_width: args.mem_width,
        is_terminator: args.is_terminator,
        predicted_taken: fetched.predicted_taken,
        imm: args.imm,
        src1,
        src2,
        actual_taken: false,
        actual_target: 0,
        free_list_snapshot: res.free_list.snapshot(),
    };

    let tag = res
        .active_list
        .dispatch(entry)
        .expect("checked active_list.is_full() above");

    if needs_alu {
        let _ = res.alu_queue.dispatch(AluQueueEntry {
            tag,
            op: args.alu_op,
            src1,
            src2,
            imm: args.imm,
            operand1_from: args.operand1_from,
            operand2_from: args.operand2_from,
            issued: false,
        });
    }

    if needs_lsq {
        let _ = res.lsq.dispatch(LsqEntry {
            tag,
            is_load: args.is_load,
            width: args.mem_width,
            base: src1,
            data_src: src2,
            imm: args.imm,
            addr: None,
            store_data: None,
            dest: dest_new_physical,
            issued: false,
        });
    }

    if args.is_branch {
        res.speculation.tick(true, false);
    }

    true
}
