//! Stack based balanced merge of natural runs.
//!
//! Runs are cloned out of the input as they are found and folded into a stack of owned buffers.
//! A new buffer absorbs the top of the stack for as long as it is at least as large, so every
//! buffer left on the stack is strictly larger than the one above it. Runs of similar length fold
//! like a binary counter, keeping the stack logarithmic in the number of runs.
//!
//! The caller's slice is only written once, after the final merge, which keeps it intact if `Ord`
//! panics half way through.

use crate::merge::merge_two;
use crate::runs::OwnedRuns;

sort_impl!("rust_balanced_unstable");

#[inline]
pub fn sort<T>(v: &mut [T]) -> &mut [T]
where
    T: Ord + Clone,
{
    if v.len() < 2 {
        // These inputs are always sorted.
        return v;
    }

    let mut stack = RunStack::new();
    for run in OwnedRuns::new(v) {
        stack.push(run);
    }

    log::trace!(
        "balanced merge of {} elements, max stack depth {}",
        v.len(),
        stack.max_depth()
    );

    let sorted = stack.finish();
    debug_assert_eq!(sorted.len(), v.len());
    v.clone_from_slice(&sorted);

    v
}

/// Stack of owned ascending buffers, each one the merge of one or more adjacent runs.
pub struct RunStack<T> {
    buffers: Vec<Vec<T>>,
    max_depth: usize,
}

impl<T: Ord> RunStack<T> {
    pub fn new() -> Self {
        Self {
            buffers: Vec::new(),
            max_depth: 0,
        }
    }

    /// Adds the next run, which must directly follow everything pushed so far.
    pub fn push(&mut self, run: Vec<T>) {
        let mut current = run;

        while let Some(top) = self.buffers.pop() {
            if current.len() < top.len() {
                self.buffers.push(top);
                break;
            }

            current = merge_two(top, current);
        }

        self.buffers.push(current);
        self.max_depth = self.max_depth.max(self.buffers.len());
    }

    /// Number of buffers currently on the stack.
    pub fn depth(&self) -> usize {
        self.buffers.len()
    }

    /// Largest depth the stack has reached so far.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Collapses the stack into a single ascending buffer.
    ///
    /// Pairs are merged with the top buffer as the left input and the one below it as the right
    /// input, so equal elements from different runs are not guaranteed to keep their input order.
    pub fn finish(mut self) -> Vec<T> {
        let Some(mut merged) = self.buffers.pop() else {
            return Vec::new();
        };

        while let Some(below) = self.buffers.pop() {
            merged = merge_two(merged, below);
        }

        merged
    }
}

impl<T: Ord> Default for RunStack<T> {
    fn default() -> Self {
        Self::new()
    }
}
