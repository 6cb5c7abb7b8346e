//! Natural run detection.
//!
//! A run is a maximal contiguous range that is either non-decreasing or strictly decreasing. Equal
//! neighbours always extend an ascending run and always end a descending one, so reversing a
//! descending run never reorders equal elements.

/// Traversal direction of a run over the original index space.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Signed step that moves a cursor one element further along the run.
    #[inline]
    pub fn step(self) -> isize {
        match self {
            Direction::Ascending => 1,
            Direction::Descending => -1,
        }
    }
}

/// Index-only run descriptor, bounds are inclusive.
///
/// A descending run is stored with reversed bounds, `start` is the highest index and `end` the
/// lowest, so reading from `start` towards `end` always yields non-decreasing values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub end: usize,
}

impl Run {
    #[inline]
    pub fn direction(&self) -> Direction {
        if self.start <= self.end {
            Direction::Ascending
        } else {
            Direction::Descending
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.start.abs_diff(self.end) + 1
    }

    /// Lowest original index covered by the run.
    #[inline]
    pub fn low(&self) -> usize {
        self.start.min(self.end)
    }

    /// Returns true if `pos` has not walked past `end` in the run's direction.
    #[inline]
    pub fn contains_step(&self, pos: usize) -> bool {
        match self.direction() {
            Direction::Ascending => pos <= self.end,
            Direction::Descending => pos >= self.end,
        }
    }
}

/// Finds the run starting at `v[0]`. Returns the length of the run and whether it is strictly
/// descending.
///
/// Runs of length 1 are reported as ascending.
pub fn find_run<T: Ord>(v: &[T]) -> (usize, bool) {
    let len = v.len();

    if len < 2 {
        return (len, false);
    }

    let mut end = 2;

    if v[1] < v[0] {
        while end < len && v[end] < v[end - 1] {
            end += 1;
        }

        (end, true)
    } else {
        while end < len && !(v[end] < v[end - 1]) {
            end += 1;
        }

        (end, false)
    }
}

/// Splits `v` into its natural runs, listed in increasing order of their lowest index.
///
/// Every index belongs to exactly one run. An empty slice has no runs.
pub fn detect_runs<T: Ord>(v: &[T]) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut start = 0;

    while start < v.len() {
        let (run_len, was_reversed) = find_run(&v[start..]);
        let last = start + run_len - 1;

        runs.push(if was_reversed {
            Run { start: last, end: start }
        } else {
            Run { start, end: last }
        });

        start += run_len;
    }

    log::trace!("detected {} runs over {} elements", runs.len(), v.len());

    runs
}

/// Iterator over the natural runs of a slice, each one cloned into an owned ascending buffer.
///
/// Runs are produced lazily, left to right, so a consumer can fold them while scanning.
pub struct OwnedRuns<'a, T> {
    v: &'a [T],
    pos: usize,
}

impl<'a, T: Ord + Clone> OwnedRuns<'a, T> {
    pub fn new(v: &'a [T]) -> Self {
        Self { v, pos: 0 }
    }
}

impl<'a, T: Ord + Clone> Iterator for OwnedRuns<'a, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        let rest = &self.v[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let (run_len, was_reversed) = find_run(rest);
        self.pos += run_len;

        let run = &rest[..run_len];
        if was_reversed {
            Some(run.iter().rev().cloned().collect())
        } else {
            Some(run.to_vec())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.v.len() - self.pos;
        ((remaining != 0) as usize, Some(remaining))
    }
}

/// Detects the run starting at `v[0]` and reverses it in place if it was descending. Returns the
/// length of the now ascending run.
pub fn next_run_in_place<T: Ord>(v: &mut [T]) -> usize {
    let (run_len, was_reversed) = find_run(v);
    if was_reversed {
        v[..run_len].reverse();
    }

    run_len
}
