//! K-way merge of natural runs through a min-heap of run cursors.
//!
//! The runs are never materialized. Each run is represented by a cursor pointing into the original
//! slice, and the heap always yields the cursor with the smallest current value. Equal values are
//! taken from the run with the lower index first. Ascending runs keep the input order of their
//! equal elements and descending runs have none, which makes the merge stable.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::iter::FusedIterator;

use crate::runs::{detect_runs, Direction, Run};

sort_impl!("rust_kway_stable");

#[inline]
pub fn sort<T>(v: &mut [T]) -> &mut [T]
where
    T: Ord + Clone,
{
    if v.len() < 2 {
        // These inputs are always sorted.
        return v;
    }

    // The original slice stays untouched until every element has been read.
    let sorted = KWayIter::new(v).cloned().collect::<Vec<T>>();
    debug_assert_eq!(sorted.len(), v.len());
    v.clone_from_slice(&sorted);

    v
}

/// Snapshot of one run's next unconsumed element.
///
/// Cursors are immutable, advancing a run pops its cursor and pushes a new one.
#[derive(Debug)]
pub struct Cursor<'a, T> {
    pub value: &'a T,
    pub run_index: usize,
    pub position: usize,
    pub direction: Direction,
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Cursor<'a, T> {}

impl<'a, T: Ord> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<'a, T: Ord> Eq for Cursor<'a, T> {}

impl<'a, T: Ord> PartialOrd for Cursor<'a, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a, T: Ord> Ord for Cursor<'a, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(other.value)
            .then_with(|| self.run_index.cmp(&other.run_index))
    }
}

/// Lazily yields the elements of a slice in non-decreasing order.
///
/// Construction detects the runs in a single pass, every `next` costs `O(log k)` for `k` runs.
/// Taking a prefix of the iterator answers top-k queries without sorting the rest.
pub struct KWayIter<'a, T> {
    v: &'a [T],
    runs: Vec<Run>,
    heap: BinaryHeap<Reverse<Cursor<'a, T>>>,
    remaining: usize,
}

impl<'a, T: Ord> KWayIter<'a, T> {
    pub fn new(v: &'a [T]) -> Self {
        let runs = detect_runs(v);
        Self::from_runs(v, runs)
    }

    /// Builds the iterator from previously detected runs of `v`.
    ///
    /// The runs must partition `v` and each one must be non-decreasing when read from `start`
    /// towards `end`, as produced by [`detect_runs`].
    pub fn from_runs(v: &'a [T], runs: Vec<Run>) -> Self {
        debug_assert_eq!(runs.iter().map(Run::len).sum::<usize>(), v.len());

        let heap = runs
            .iter()
            .enumerate()
            .map(|(run_index, run)| {
                Reverse(Cursor {
                    value: &v[run.start],
                    run_index,
                    position: run.start,
                    direction: run.direction(),
                })
            })
            .collect::<BinaryHeap<_>>();

        Self {
            v,
            runs,
            heap,
            remaining: v.len(),
        }
    }

    /// Number of natural runs the input was split into.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// The runs being merged, in input order.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }
}

impl<'a, T: Ord> Iterator for KWayIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let Reverse(cursor) = self.heap.pop()?;
        self.remaining -= 1;

        let run = self.runs[cursor.run_index];
        if let Some(next) = cursor.position.checked_add_signed(cursor.direction.step()) {
            if run.contains_step(next) {
                self.heap.push(Reverse(Cursor {
                    value: &self.v[next],
                    position: next,
                    ..cursor
                }));
            }
        }

        Some(cursor.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: Ord> ExactSizeIterator for KWayIter<'a, T> {}

impl<'a, T: Ord> FusedIterator for KWayIter<'a, T> {}
