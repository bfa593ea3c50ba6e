//! Common utilities and types shared across the simulator.
//!
//! 1. **Constants:** crate-wide sizing and threshold constants.
//! 2. **Queue:** the generic `CircularQueue<T, N>` backing every structural array.
//! 3. **Error Handling:** the hex-image loader's typed error.

/// Common constants used throughout the simulator.
pub mod constants;

/// Generic fixed-capacity circular queue container.
pub mod queue;

/// Error types for the hex-image loading boundary.
pub mod error;

pub use error::LoadError;
pub use queue::CircularQueue;
