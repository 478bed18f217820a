//! The lazy [`Step`] sequence wrapper.

use std::fmt::Display;
use std::iter::{Chain, Filter, Map};

use crate::error::StepError;

/// A lazily evaluated sequence.
///
/// `Step` wraps any iterator. The adapters (`map`, `filter`, `append`) only
/// build up the pipeline; nothing runs until a terminal operation such as
/// [`Step::reduce1`] or [`Step::join`] pulls the elements through.
///
/// `Step` is itself an [`Iterator`], so the standard adapters remain
/// available when the engine-specific ones are not enough.
#[derive(Debug, Clone)]
#[must_use = "steps are lazy and do nothing unless consumed"]
pub struct Step<I> {
    inner: I,
}

impl<I: Iterator> Step<I> {
    /// Wrap an existing collection or iterator.
    pub fn new<T>(items: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            inner: items.into_iter(),
        }
    }

    /// Lazily transform every element.
    ///
    /// The closure runs once per element, in order, when the element is
    /// pulled. It may carry state between calls.
    pub fn map<B, F>(self, f: F) -> Step<Map<I, F>>
    where
        F: FnMut(I::Item) -> B,
    {
        Step {
            inner: self.inner.map(f),
        }
    }

    /// Lazily keep only the elements matching `predicate`.
    pub fn filter<P>(self, predicate: P) -> Step<Filter<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Step {
            inner: self.inner.filter(predicate),
        }
    }

    /// Lazily concatenate `other` after this sequence.
    pub fn append<J>(self, other: J) -> Step<Chain<I, J::IntoIter>>
    where
        J: IntoIterator<Item = I::Item>,
    {
        Step {
            inner: self.inner.chain(other),
        }
    }

    /// Fold the sequence using its first element as the initial accumulator.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::EmptySequence`] if the sequence has no elements.
    pub fn reduce1<F>(mut self, op: F) -> Result<I::Item, StepError>
    where
        F: FnMut(I::Item, I::Item) -> I::Item,
    {
        let first = self.inner.next().ok_or(StepError::EmptySequence)?;
        Ok(self.inner.fold(first, op))
    }

    /// Fold the sequence starting from `init`.
    pub fn reduce<B, F>(self, op: F, init: B) -> B
    where
        F: FnMut(B, I::Item) -> B,
    {
        self.inner.fold(init, op)
    }

    /// Returns `true` if any element equals `value`.
    pub fn includes(mut self, value: &I::Item) -> bool
    where
        I::Item: PartialEq,
    {
        self.inner.any(|item| item == *value)
    }

    /// Collect the elements into a vector.
    pub fn to_vec(self) -> Vec<I::Item> {
        self.inner.collect()
    }

    /// Render the sequence as `{a,b,c}`.
    pub fn join(self) -> String
    where
        I::Item: Display,
    {
        self.join_with(",", "{", "}")
    }

    /// Render the sequence with a custom separator and delimiters.
    pub fn join_with(self, separator: &str, open: &str, close: &str) -> String
    where
        I::Item: Display,
    {
        let mut out = String::from(open);
        for (i, item) in self.inner.enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push_str(&item.to_string());
        }
        out.push_str(close);
        out
    }
}

impl<I: Iterator> Iterator for Step<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
