//! Adaptive sorts built on natural runs.
//!
//! The input is split into maximal non-decreasing or strictly decreasing runs, which are then
//! combined by one of three engines:
//!
//! - [`sort_balanced`] folds owned copies of the runs on a size balanced stack.
//! - [`sort_kway`] merges all runs at once through a min-heap of run cursors.
//! - [`sort_block_merge`] folds the runs in place with a bounded scratch buffer.
//!
//! [`sorted_iter`] exposes the k-way merge as a lazy iterator, useful for top-k queries.

macro_rules! sort_impl {
    ($name:expr) => {
        pub struct SortImpl;

        impl sort_test_tools::Sort for SortImpl {
            fn name() -> String {
                $name.into()
            }

            #[inline]
            fn sort<T>(arr: &mut [T])
            where
                T: Ord + Clone,
            {
                sort(arr);
            }
        }
    };
}

pub mod balanced;
pub mod block_merge;
pub mod kway;
pub mod merge;
pub mod runs;

pub use kway::KWayIter;
pub use runs::{detect_runs, Direction, Run};

/// Sorts `v` by folding its natural runs on a balanced stack of owned buffers.
///
/// Returns `v` for chaining.
#[inline]
pub fn sort_balanced<T: Ord + Clone>(v: &mut [T]) -> &mut [T] {
    balanced::sort(v)
}

/// Sorts `v` with a k-way merge over its natural runs. Stable.
///
/// Returns `v` for chaining.
#[inline]
pub fn sort_kway<T: Ord + Clone>(v: &mut [T]) -> &mut [T] {
    kway::sort(v)
}

/// Sorts `v` in place by folding its natural runs with a bounded scratch buffer. Stable.
///
/// Returns `v` for chaining.
#[inline]
pub fn sort_block_merge<T: Ord>(v: &mut [T]) -> &mut [T] {
    block_merge::sort(v)
}

/// Returns an iterator over the elements of `v` in non-decreasing order.
#[inline]
pub fn sorted_iter<T: Ord>(v: &[T]) -> KWayIter<'_, T> {
    KWayIter::new(v)
}

/// Returns true if every element is less than or equal to its successor.
pub fn is_sorted<T: Ord>(v: &[T]) -> bool {
    v.windows(2).all(|w| w[0] <= w[1])
}
