//! # engine_step
//!
//! Lazy integer sequences for the engine. A [`Step`] wraps any iterator and
//! adds the combinators the engine uses for quick numeric work: `map`,
//! `filter`, `append`, `reduce1`, `reduce`, and `join`.
//!
//! Sequences are produced by [`iota`], [`range`], and [`step`] and work with
//! the primitive integers as well as [`BigInt`], so long sums and products
//! never overflow.
//!
//! ```rust
//! use engine_step::{range, BigInt};
//!
//! let sum = range(1, 100).reduce1(|a, b| a + b).unwrap();
//! assert_eq!(sum, 5050);
//!
//! let factorial = range(1, 20).map(BigInt::from).reduce1(|a, b| a * b).unwrap();
//! assert_eq!(factorial.to_string(), "2432902008176640000");
//! ```

pub mod counter;
pub mod error;
pub mod step;

pub use counter::{
    Bound, Counter, StepValue, iota, iota_by, iota_to, range, range_by, step, step_backward,
};
pub use error::StepError;
pub use step::Step;

// Re-export the arbitrary-precision integer used throughout the engine.
pub use num_bigint::BigInt;
