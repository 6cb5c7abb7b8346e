//! In-place balanced merge of natural runs with a bounded scratch buffer.
//!
//! Same folding rule as [`crate::balanced`], but the stack holds index ranges of the input instead
//! of owned buffers. Adjacent ranges are merged in place: linearly through the scratch buffer when
//! the shorter side fits, otherwise by SymMerge, which rotates the ranges around a split point and
//! recurses until the pieces fit. The earlier range is always the left input, which makes the sort
//! stable.

use std::mem;
use std::ptr;

use crate::runs::next_run_in_place;

/// Lower bound of the scratch buffer, in elements.
pub const BLOCK_BUFFER_MIN: usize = 256;

/// Upper bound of the scratch buffer, in elements.
pub const BLOCK_BUFFER_MAX: usize = 4096;

sort_impl!("rust_block_merge_stable");

#[inline]
pub fn sort<T>(v: &mut [T]) -> &mut [T]
where
    T: Ord,
{
    if mem::size_of::<T>() == 0 {
        // Sorting has no meaningful behavior on zero-sized types. Do nothing.
        return v;
    }

    let buf_len = buffer_len(v.len());
    block_merge_sort(v, buf_len);

    v
}

/// Scratch buffer length for an input of `len` elements, `sqrt(len)` clamped to
/// [`BLOCK_BUFFER_MIN`]..=[`BLOCK_BUFFER_MAX`] and never more than half the input.
pub fn buffer_len(len: usize) -> usize {
    let sqrt_len = (len as f64).sqrt() as usize;

    sqrt_len
        .clamp(BLOCK_BUFFER_MIN, BLOCK_BUFFER_MAX)
        .min(len / 2 + 1)
}

#[derive(Copy, Clone, Debug)]
struct BlockRun {
    start: usize,
    len: usize,
}

fn block_merge_sort<T: Ord>(v: &mut [T], buf_len: usize) {
    debug_assert!(mem::size_of::<T>() != 0);

    let len = v.len();
    if len < 2 {
        // These inputs are always sorted.
        return;
    }

    // Only ever used as raw storage, `buf` keeps a length of 0 and drops nothing.
    let mut buf = Vec::<T>::with_capacity(buf_len.max(1));
    let buf_ptr = buf.as_mut_ptr();
    let buf_cap = buf.capacity();

    let mut runs: Vec<BlockRun> = Vec::new();
    let mut max_depth = 0;
    let mut start = 0;

    while start < len {
        let run_len = next_run_in_place(&mut v[start..]);
        let mut current = BlockRun {
            start,
            len: run_len,
        };
        start += run_len;

        while let Some(&top) = runs.last() {
            if current.len < top.len {
                break;
            }

            runs.pop();
            // SAFETY: `buf_ptr` points to `buf_cap` elements of uninitialized storage.
            unsafe {
                merge_ranges(
                    &mut v[top.start..current.start + current.len],
                    top.len,
                    buf_ptr,
                    buf_cap,
                );
            }
            current = BlockRun {
                start: top.start,
                len: top.len + current.len,
            };
        }

        runs.push(current);
        max_depth = max_depth.max(runs.len());
    }

    // The earlier range stays the left input while collapsing.
    while runs.len() > 1 {
        let top = runs[runs.len() - 1];
        let below = runs[runs.len() - 2];
        runs.truncate(runs.len() - 2);

        // SAFETY: See above.
        unsafe {
            merge_ranges(
                &mut v[below.start..top.start + top.len],
                below.len,
                buf_ptr,
                buf_cap,
            );
        }
        runs.push(BlockRun {
            start: below.start,
            len: below.len + top.len,
        });
    }

    debug_assert!(runs.len() == 1 && runs[0].start == 0 && runs[0].len == len);

    log::trace!(
        "block merge of {len} elements, buffer {buf_cap} elements, max stack depth {max_depth}"
    );
}

/// Merges the non-decreasing ranges `v[..mid]` and `v[mid..]` in place.
///
/// # Safety
///
/// `buf` must be valid for writes of `buf_cap` elements and must not overlap `v`.
unsafe fn merge_ranges<T: Ord>(v: &mut [T], mid: usize, buf: *mut T, buf_cap: usize) {
    let len = v.len();
    if mid == 0 || mid >= len {
        return;
    }

    if !(v[mid] < v[mid - 1]) {
        // Already in order.
        return;
    }

    if mid.min(len - mid) <= buf_cap {
        // SAFETY: The shorter side fits into `buf`, which is a separate allocation.
        unsafe {
            merge_buffered(v, mid, buf);
        }
        return;
    }

    // SymMerge. Everything in the right range that is strictly less than the pivot from the middle
    // of the left range is rotated in front of it.
    let mid1 = mid / 2;
    let mid2 = mid + v[mid..].partition_point(|x| x < &v[mid1]);
    let new_mid = mid1 + (mid2 - mid);

    v[mid1..mid2].rotate_left(mid - mid1);

    unsafe {
        merge_ranges(&mut v[..new_mid], mid1, buf, buf_cap);
        merge_ranges(&mut v[new_mid + 1..], mid2 - new_mid - 1, buf, buf_cap);
    }
}

/// Merges non-decreasing runs `v[..mid]` and `v[mid..]` using `buf` as temporary storage for the
/// shorter one.
///
/// # Safety
///
/// `0 < mid < v.len()`, `buf` must be valid for writes of `min(mid, v.len() - mid)` elements and
/// must not overlap `v`. `T` must not be a zero-sized type.
unsafe fn merge_buffered<T: Ord>(v: &mut [T], mid: usize, buf: *mut T) {
    let len = v.len();
    assert!(mid > 0 && mid < len);

    let v_ptr = v.as_mut_ptr();

    // Whatever is left in `buf` always fits exactly into the gap starting at `hole.dest`, also if
    // a comparison panics. Dropping `hole` closes the gap.
    let mut hole;

    if mid <= len - mid {
        // The left run is shorter, merge forwards.
        unsafe {
            ptr::copy_nonoverlapping(v_ptr, buf, mid);
            hole = MergeHole {
                start: buf,
                end: buf.add(mid),
                dest: v_ptr,
            };

            let mut right = v_ptr.add(mid);
            let v_end = v_ptr.add(len);

            while hole.start < hole.end && right < v_end {
                // If equal, prefer the left run to maintain stability.
                if *right < *hole.start {
                    ptr::copy_nonoverlapping(right, hole.dest, 1);
                    right = right.add(1);
                } else {
                    ptr::copy_nonoverlapping(hole.start, hole.dest, 1);
                    hole.start = hole.start.add(1);
                }
                hole.dest = hole.dest.add(1);
            }
        }
    } else {
        // The right run is shorter, merge backwards. `hole.dest` tracks the end of the unconsumed
        // left run and `hole.end` the end of the unconsumed buffered right run.
        unsafe {
            ptr::copy_nonoverlapping(v_ptr.add(mid), buf, len - mid);
            hole = MergeHole {
                start: buf,
                end: buf.add(len - mid),
                dest: v_ptr.add(mid),
            };

            let mut out = v_ptr.add(len);

            while v_ptr < hole.dest && buf < hole.end {
                let left = hole.dest.sub(1);
                let right = hole.end.sub(1);
                out = out.sub(1);

                // If equal, prefer the right run to maintain stability.
                if *right < *left {
                    ptr::copy_nonoverlapping(left, out, 1);
                    hole.dest = left;
                } else {
                    ptr::copy_nonoverlapping(right, out, 1);
                    hole.end = right;
                }
            }
        }
    }

    // When dropped, copies the range `start..end` into `dest..`.
    struct MergeHole<T> {
        start: *mut T,
        end: *mut T,
        dest: *mut T,
    }

    impl<T> Drop for MergeHole<T> {
        fn drop(&mut self) {
            // SAFETY: `start..end` is the unconsumed part of the buffer and `dest` the start of a
            // gap of the same length in `v`.
            unsafe {
                let len = self.end.offset_from(self.start) as usize;
                ptr::copy_nonoverlapping(self.start, self.dest, len);
            }
        }
    }
}
