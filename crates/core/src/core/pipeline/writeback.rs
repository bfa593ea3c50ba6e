//! Writeback stage: publishes one execution result to the Physical Register
//! File, marks the destination ready, and records the outcome in the Active
//! List entry so commit can detect mispredicts.

use crate::core::maptable::PhysReg;
use crate::core::pipeline::activelist::{ActiveList, ActiveListTag};
use crate::core::prf::PhysicalRegisterFile;
use crate::core::regready::RegisterReadyVector;

/// One functional unit's completed result, ready to publish this cycle.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionResult {
    pub tag: ActiveListTag,
    pub dest: PhysReg,
    pub has_dest: bool,
    pub value: u32,
    /// Set for branches/jumps: did it actually resolve taken, and to where?
    pub resolves_control_flow: bool,
    pub actual_taken: bool,
    pub actual_target: u32,
}

/// Applies one execution result: PRF write, ready-bit set, Active List update.
pub fn writeback_stage(
    result: ExecutionResult,
    prf: &mut PhysicalRegisterFile,
    reg_ready: &mut RegisterReadyVector,
    active_list: &mut ActiveList,
) {
    if result.has_dest {
        prf.write(result.dest, result.value);
        reg_ready.mark_ready(result.dest);
    }
    if let Some(entry) = active_list.entry_mut(result.tag) {
        entry.ready = true;
        if result.resolves_control_flow {
            entry.actual_taken = result.actual_taken;
            entry.actual_target = result.actual_target;
        }
    }
}
