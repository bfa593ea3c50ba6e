//! Execution units.
//!
//! The functional units a scheduled instruction actually runs on: the
//! single-cycle integer ALU, the multi-cycle multiply/divide unit, and the
//! load/store unit.

/// Single-cycle Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Load/Store Unit for data memory access.
pub mod lsu;

/// Multi-cycle integer multiplier and divider.
pub mod muldiv;
