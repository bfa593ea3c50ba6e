//! Simulation driver: hex-image loading and the top-level run loop.

/// Hex word image loader, the simulator's one fallible boundary.
pub mod loader;
/// `Simulator`: owns a `Core` and drives its cycle loop to completion or timeout.
pub mod simulator;
