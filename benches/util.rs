use std::cell::Cell;
use std::cmp::Ordering;
use std::env;

use criterion::{black_box, BatchSize, Criterion};
use once_cell::sync::OnceCell;
use regex::Regex;

/// Returns true if `name` matches the `BENCH_REGEX` env var, or if no filter was set.
pub fn should_run_benchmark(name: &str) -> bool {
    static FILTER_REGEX: OnceCell<Option<Regex>> = OnceCell::new();

    let filter_regex = FILTER_REGEX.get_or_init(|| {
        env::var("BENCH_REGEX")
            .ok()
            .map(|filter_regex| Regex::new(&filter_regex).unwrap())
    });

    filter_regex
        .as_ref()
        .map(|reg| reg.is_match(name))
        .unwrap_or(true)
}

#[inline(never)]
#[allow(clippy::too_many_arguments)]
pub fn bench_fn<T: Ord + std::fmt::Debug>(
    c: &mut Criterion,
    test_len: usize,
    transform_name: &str,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
    bench_name: &str,
    test_fn: impl Fn(&mut [T]),
) {
    let batch_size = if test_len > 30 {
        BatchSize::LargeInput
    } else {
        BatchSize::SmallInput
    };

    let bench_name_hot = format!("{bench_name}-hot-{transform_name}-{pattern_name}-{test_len}");
    if should_run_benchmark(&bench_name_hot) {
        c.bench_function(&bench_name_hot, |b| {
            b.iter_batched_ref(
                || transform(pattern_provider(test_len)),
                |test_data| {
                    test_fn(black_box(test_data.as_mut_slice()));
                    black_box(test_data); // side-effect
                },
                batch_size,
            )
        });
    }

    #[cfg(feature = "cold_benchmarks")]
    {
        let bench_name_cold =
            format!("{bench_name}-cold-{transform_name}-{pattern_name}-{test_len}");
        if should_run_benchmark(&bench_name_cold) {
            c.bench_function(&bench_name_cold, |b| {
                b.iter_batched_ref(
                    || {
                        let mut test_ints = pattern_provider(test_len);

                        if test_ints.is_empty() {
                            return vec![];
                        }

                        // Try as best as possible to trash all prediction state in the CPU, to
                        // simulate calling the benchmark function as part of a larger program.
                        // Caveat, memory caches. We don't want to benchmark how expensive it is to
                        // load something from main memory.
                        let first_val = black_box(crate::trash_prediction::trash_prediction_state(
                            black_box(test_ints[0]),
                        ));

                        // Limit the optimizer in getting rid of trash_prediction_state,
                        // by tying its output to the test input.
                        test_ints[0] = first_val;

                        transform(test_ints)
                    },
                    |test_data| {
                        test_fn(black_box(test_data.as_mut_slice()));
                        black_box(test_data); // side-effect
                    },
                    BatchSize::PerIteration,
                )
            });
        }
    }
}

thread_local! {
    static COMP_COUNT: Cell<u64> = Cell::new(0);
}

/// Wraps a value and counts every comparison made through it on the current thread.
///
/// The engines only see `Ord`, so instrumenting the type is the only way to observe how often
/// they compare.
#[derive(Clone, Debug)]
pub struct Counted<T>(pub T);

impl<T: Ord> PartialEq for Counted<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for Counted<T> {}

impl<T: Ord> PartialOrd for Counted<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for Counted<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        COMP_COUNT.with(|c| c.set(c.get() + 1));
        self.0.cmp(&other.0)
    }
}

pub fn reset_comp_count() {
    COMP_COUNT.with(|c| c.set(0));
}

pub fn comp_count() -> u64 {
    COMP_COUNT.with(|c| c.get())
}
