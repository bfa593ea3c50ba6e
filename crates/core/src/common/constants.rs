//! Global system constants.
//!
//! Mirrors the spec's default parameterization: 64 physical registers, 32
//! architectural registers, and queue/ROB depths of 32.

/// Number of physical registers (fits exactly in one `u64` ready-bit vector).
pub const N_PHYS: usize = 64;

/// Number of architectural integer registers (`x0`..`x31`).
pub const N_LOGICAL: usize = 32;

/// Active List (ROB) depth.
pub const ACTIVE_LIST_DEPTH: usize = 32;

/// ALU issue queue depth.
pub const ALU_QUEUE_DEPTH: usize = 32;

/// Load/store queue depth.
pub const LSQ_DEPTH: usize = 32;

/// Store buffer depth (fixed at 1 entry per the spec).
pub const STORE_BUFFER_DEPTH: usize = 1;

/// Width of the divider's quotient/remainder accumulator in bits, and so the
/// maximum number of steps its iterative loop can take. Actual latency is
/// `DIVIDER_STEPS - dividend.leading_zeros()`, since the step counter starts
/// at the dividend's leading-zero count rather than zero.
pub const DIVIDER_STEPS: u32 = 32;

/// Block size used by the hybrid carry-lookahead/ripple adder.
pub const ADDER_BLOCK_SIZE: usize = 4;

/// Default maximum cycle count before a run is declared a timeout.
pub const DEFAULT_SIM_THRESHOLD: u64 = 1_000_000;

/// Default number of consecutive cycles with no retirement before a run is
/// declared stalled (distinct from the hard cycle timeout).
pub const DEFAULT_IDLE_THRESHOLD: u64 = 10_000;

/// Bit mask for extracting the opcode field (bits 0-6) from an instruction word.
pub const OPCODE_MASK: u32 = 0x7F;

/// Bit mask for the destination register (rd) field.
pub const RD_MASK: u32 = 0x1F;

/// Bit position shift for the destination register (rd) field.
pub const RD_SHIFT: u32 = 7;
