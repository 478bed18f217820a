//! Sequence error types.

/// Errors produced when building or reducing a [`Step`](crate::Step).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    /// `reduce1` was called on a sequence with no elements.
    #[error("cannot reduce an empty sequence without an initial value")]
    EmptySequence,

    /// A counter was built with a step of zero.
    #[error("step must be non-zero")]
    ZeroStep,
}
