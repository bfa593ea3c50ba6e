//! Core processor implementation.
//!
//! Contains the register-renaming data structures (Map Table, Free List,
//! Register-Ready Vector, Physical Register File), the out-of-order pipeline,
//! execution units, and the `Core` orchestrator that wires them into a single
//! per-cycle `tick()`.

/// Branch prediction.
pub mod branch_predictor;

/// Free List: pool of unmapped physical registers.
pub mod freelist;

/// Map Table: architectural-to-physical register mapping (speculative + committed).
pub mod maptable;

/// Out-of-order pipeline stages.
pub mod pipeline;

/// Physical Register File.
pub mod prf;

/// Register-Ready Vector: per-physical-register readiness bitset.
pub mod regready;

/// Execution units (ALU, multiplier/divider, LSU).
pub mod units;

pub use pipeline::engine::Core;
