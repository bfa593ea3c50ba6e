//! Out-of-order pipeline implementation.
//!
//! This module contains the register-renaming, out-of-order execution engine:
//! 1. **Fetch/Rename:** PC generation, branch prediction, and register renaming.
//! 2. **Active List:** The reorder buffer tracking every in-flight instruction.
//! 3. **ALU Issue Queue / LSQ:** Out-of-order scheduling windows.
//! 4. **Scheduler:** Picks ready instructions for issue each cycle.
//! 5. **Writeback:** Publishes execution results to the register file and ROB.
//! 6. **Commit:** Retires completed instructions in program order.
//! 7. **Speculation:** Tracks in-flight mispredict/flush state.

/// ALU Issue Queue: holds ALU/mul-div instructions awaiting operand readiness.
pub mod aluqueue;

/// Active List (reorder buffer): in-flight instructions, in program order.
pub mod activelist;

/// Commit stage: in-order retirement from the Active List head.
pub mod commit;

/// Top-level pipeline engine wiring every stage into one `tick()`.
pub mod engine;

/// Fetch stage: PC generation, instruction memory read, branch prediction.
pub mod fetch;

/// Load/Store Queue and single-entry store buffer.
pub mod lsq;

/// Fetch/decode/rename stage.
pub mod rename;

/// Scheduler: dispatches ready queue entries to execution units each cycle.
pub mod scheduler;

/// Speculation state: tracks pending flush/recovery across the pipeline.
pub mod speculation;

/// Writeback stage: publishes execution results to the PRF and Active List.
pub mod writeback;
