//! Branch Predictor interface.
//!
//! Defines the trait all branch prediction implementations must satisfy. The
//! reference implementation is [`AlwaysTaken`]: the spec's feedback hook is wired
//! through to [`BranchPredictor::update`] but genuinely unused by it — a different
//! implementation could train on it, `AlwaysTaken` simply doesn't.

/// Trait for branch prediction algorithms.
pub trait BranchPredictor {
    /// Predicts whether the branch at `pc` will be taken.
    fn predict(&mut self, pc: u32) -> bool;

    /// Feeds back the actual outcome of a resolved branch, for predictors that train.
    fn update(&mut self, pc: u32, taken: bool);
}

/// Reference predictor: every branch is predicted taken. Feedback is accepted but
/// has no effect on future predictions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysTaken;

impl BranchPredictor for AlwaysTaken {
    fn predict(&mut self, _pc: u32) -> bool {
        true
    }

    fn update(&mut self, _pc: u32, _taken: bool) {}
}
