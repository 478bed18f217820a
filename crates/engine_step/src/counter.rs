//! Arithmetic progressions.
//!
//! [`Counter`] yields `start, start + step, start + 2·step, ...` until it
//! passes `end`. It is generic over [`StepValue`], so the same code drives
//! `i32` loops and [`BigInt`](num_bigint::BigInt) sums.
//!
//! The free functions mirror the engine's traditional helpers:
//!
//! | helper                         | values                  |
//! |--------------------------------|-------------------------|
//! | `iota(a, b)`                   | `a, a+1, ..., b-1`      |
//! | `iota_to(n)`                   | `0, 1, ..., n-1`        |
//! | `iota_by(a, b, s)`             | `a, a+s, ...` while `< b` (or `> b` for `s < 0`) |
//! | `range(a, b)`                  | `a, a+1, ..., b`        |
//! | `range_by(a, b, s)`            | `a, a+s, ...` while `<= b` (or `>= b` for `s < 0`) |
//! | `step(a, n, s)`                | exactly `n` values      |
//! | `step_backward(n)`             | `n-1, ..., 1, 0`        |

use num_traits::{CheckedAdd, One, Zero};

use crate::error::StepError;
use crate::step::Step;

/// An integer type that can drive a [`Counter`].
///
/// Blanket-implemented for every ordered type with checked addition, which
/// covers the primitive integers and [`BigInt`](num_bigint::BigInt).
pub trait StepValue: Clone + PartialOrd + Zero + One + CheckedAdd {}

impl<T> StepValue for T where T: Clone + PartialOrd + Zero + One + CheckedAdd {}

/// Whether the end value of a [`Counter`] is part of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Stop before `end`.
    Exclusive,
    /// Yield `end` if the progression lands on it.
    Inclusive,
}

/// A lazy arithmetic progression bounded by an end value.
///
/// When the next value would overflow a fixed-width integer the counter
/// stops instead of wrapping around.
#[derive(Debug, Clone)]
pub struct Counter<T> {
    /// The value returned by the next call to `next`, or `None` once exhausted.
    next: Option<T>,
    end: T,
    step: T,
    bound: Bound,
    /// Cached sign of `step`.
    ascending: bool,
}

impl<T: StepValue> Counter<T> {
    /// Create a counter from `start` towards `end` in increments of `step`.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::ZeroStep`] if `step` is zero.
    pub fn new(start: T, end: T, step: T, bound: Bound) -> Result<Self, StepError> {
        if step.is_zero() {
            return Err(StepError::ZeroStep);
        }
        let ascending = step > T::zero();
        Ok(Self {
            next: Some(start),
            end,
            step,
            bound,
            ascending,
        })
    }

    /// Create a counter that increments by one.
    #[must_use]
    pub fn unit(start: T, end: T, bound: Bound) -> Self {
        Self {
            next: Some(start),
            end,
            step: T::one(),
            bound,
            ascending: true,
        }
    }

    fn in_bounds(&self, value: &T) -> bool {
        match (self.ascending, self.bound) {
            (true, Bound::Exclusive) => *value < self.end,
            (true, Bound::Inclusive) => *value <= self.end,
            (false, Bound::Exclusive) => *value > self.end,
            (false, Bound::Inclusive) => *value >= self.end,
        }
    }
}

impl<T: StepValue> Iterator for Counter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.next.take()?;
        if !self.in_bounds(&current) {
            return None;
        }
        self.next = current.checked_add(&self.step);
        Some(current)
    }
}

impl<T: StepValue> std::iter::FusedIterator for Counter<T> {}

/// `start, start + 1, ..., end - 1`.
pub fn iota<T: StepValue>(start: T, end: T) -> Step<Counter<T>> {
    Step::new(Counter::unit(start, end, Bound::Exclusive))
}

/// `0, 1, ..., end - 1`.
pub fn iota_to<T: StepValue>(end: T) -> Step<Counter<T>> {
    iota(T::zero(), end)
}

/// `start, start + step, ...` stopping before `end`.
///
/// # Errors
///
/// Returns [`StepError::ZeroStep`] if `step` is zero.
pub fn iota_by<T: StepValue>(start: T, end: T, step: T) -> Result<Step<Counter<T>>, StepError> {
    Counter::new(start, end, step, Bound::Exclusive).map(Step::new)
}

/// `start, start + 1, ..., end`.
pub fn range<T: StepValue>(start: T, end: T) -> Step<Counter<T>> {
    Step::new(Counter::unit(start, end, Bound::Inclusive))
}

/// `start, start + step, ...` up to and including `end`.
///
/// # Errors
///
/// Returns [`StepError::ZeroStep`] if `step` is zero.
pub fn range_by<T: StepValue>(start: T, end: T, step: T) -> Result<Step<Counter<T>>, StepError> {
    Counter::new(start, end, step, Bound::Inclusive).map(Step::new)
}

/// Exactly `count` values starting at `start`, `step` apart.
///
/// A zero step repeats `start`. A fixed-width counter that would overflow
/// ends early.
pub fn step<T: StepValue>(start: T, count: usize, step: T) -> Step<impl Iterator<Item = T>> {
    Step::new(std::iter::successors(Some(start), move |value| value.checked_add(&step)).take(count))
}

/// `count - 1, count - 2, ..., 0`.
pub fn step_backward(count: usize) -> Step<std::iter::Rev<std::ops::Range<usize>>> {
    Step::new((0..count).rev())
}
