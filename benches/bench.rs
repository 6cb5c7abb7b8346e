use std::env;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sort_test_tools::patterns;
use sort_test_tools::types::{OneKiloByte, F128};
use sort_test_tools::Sort;

mod util;

struct StdStable;

impl Sort for StdStable {
    fn name() -> String {
        "rust_std_stable".into()
    }

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Clone,
    {
        arr.sort();
    }
}

fn measure_comp_count<S: Sort, T: Ord + Clone>(
    name: &str,
    test_len: usize,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_provider: &fn(usize) -> Vec<i32>,
) {
    // Measure how many comparisons are performed by a specific implementation and input
    // combination.
    let run_count: usize = if test_len <= 20 {
        100_000
    } else if test_len < 10_000 {
        3000
    } else if test_len < 100_000 {
        1000
    } else if test_len < 1_000_000 {
        100
    } else {
        10
    };

    util::reset_comp_count();

    for _ in 0..run_count {
        let mut test_data = transform(pattern_provider(test_len))
            .into_iter()
            .map(util::Counted)
            .collect::<Vec<_>>();
        S::sort(black_box(test_data.as_mut_slice()));
    }

    // If there is on average less than a single comparison this will be wrong.
    // But that's such a corner case I don't care about it.
    let total = util::comp_count() / (run_count as u64);
    println!("{name}: mean comparisons: {total}");
}

#[inline(never)]
fn bench_impl<S: Sort, T: Ord + Clone + std::fmt::Debug>(
    c: &mut Criterion,
    test_len: usize,
    transform_name: &str,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
) {
    let bench_name = S::name();

    if env::var("MEASURE_COMP").is_ok() {
        let name = format!("{bench_name}-comp-{transform_name}-{pattern_name}-{test_len}");

        if util::should_run_benchmark(&name) {
            measure_comp_count::<S, T>(&name, test_len, transform, pattern_provider);
        }
    } else {
        util::bench_fn(
            c,
            test_len,
            transform_name,
            transform,
            pattern_name,
            pattern_provider,
            &bench_name,
            S::sort,
        );
    }
}

fn split_len(size: usize, part_a_percent: f64) -> (usize, usize) {
    let len_a = ((size as f64 / 100.0) * part_a_percent).round() as usize;
    let len_b = size - len_a;

    (len_a, len_b)
}

fn bench_patterns<T: Ord + Clone + std::fmt::Debug>(
    c: &mut Criterion,
    test_len: usize,
    transform_name: &str,
    transform: fn(Vec<i32>) -> Vec<T>,
) {
    if test_len > 100_000 && !(transform_name == "i32" || transform_name == "u64") {
        // These are just too expensive.
        return;
    }

    let mut pattern_providers: Vec<(&'static str, fn(usize) -> Vec<i32>)> = vec![
        ("random", patterns::random),
        ("random_d20", |len| patterns::random_uniform(len, 0..20)),
        ("random_z1", |len| patterns::random_zipf(len, 1.0)),
        ("random_s95", |len| patterns::random_sorted(len, 95.0)),
        ("ascending", patterns::ascending),
        ("descending", patterns::descending),
        ("saws_long", |len| {
            patterns::saw_mixed(len, ((len as f64).log2().round()) as usize)
        }),
        ("saws_short", |len| patterns::saw_mixed_range(len, 20..70)),
        ("pipe_organ", patterns::pipe_organ),
    ];

    // Run structures that stress the merge stack and the cursor heap.
    let mut extra_pattern_providers: Vec<(&'static str, fn(usize) -> Vec<i32>)> = vec![
        ("all_equal", patterns::all_equal),
        ("alternating_pairs", patterns::alternating_pairs),
        ("plateaus", |len| patterns::runs_with_plateaus(len, 8)),
        ("90_sorted_10_random", |len| {
            let (len_90, len_10) = split_len(len, 90.0);
            patterns::ascending(len_90)
                .into_iter()
                .chain(patterns::random(len_10))
                .collect()
        }),
        ("saw_ascending", |len| {
            patterns::saw_ascending(len, ((len as f64).log2().round()) as usize)
        }),
        ("saw_descending", |len| {
            patterns::saw_descending(len, ((len as f64).log2().round()) as usize)
        }),
    ];

    if env::var("EXTRA_PATTERNS").is_ok() {
        pattern_providers.append(&mut extra_pattern_providers);
    }

    macro_rules! bench_inst {
        ($sort_impl:ty, $pattern_name:expr, $pattern_provider:expr) => {
            bench_impl::<$sort_impl, T>(
                c,
                test_len,
                transform_name,
                &transform,
                $pattern_name,
                $pattern_provider,
            )
        };
    }

    for (pattern_name, pattern_provider) in pattern_providers.iter() {
        if test_len < 3 && *pattern_name != "random" {
            continue;
        }

        bench_inst!(StdStable, pattern_name, pattern_provider);
        bench_inst!(runmerge::balanced::SortImpl, pattern_name, pattern_provider);
        bench_inst!(runmerge::kway::SortImpl, pattern_name, pattern_provider);
        bench_inst!(runmerge::block_merge::SortImpl, pattern_name, pattern_provider);
    }
}

fn ensure_true_random() {
    // Ensure that random vecs are actually different.
    let random_vec_a = patterns::random(5);
    let random_vec_b = patterns::random(5);

    // A fixed seed here would make every random pattern identical across iterations.
    assert_ne!(random_vec_a, random_vec_b);
}

fn criterion_benchmark(c: &mut Criterion) {
    let test_lens = [
        0, 1, 2, 3, 5, 8, 16, 20, 36, 50, 101, 200, 500, 1_000, 2_048, 10_000, 100_000, 1_000_000,
    ];

    patterns::use_random_seed_each_time();
    ensure_true_random();

    for test_len in test_lens {
        // Basic type often used to test sorting algorithms.
        bench_patterns(c, test_len, "i32", |values| values);

        // Common type for usize on 64-bit machines.
        // Sorting indices is very common.
        bench_patterns(c, test_len, "u64", |values| {
            values
                .iter()
                .map(|val| -> u64 {
                    // Extends the value into the 64 bit range,
                    // while preserving input order.
                    let x = ((*val as i64) + (i32::MAX as i64) + 1) as u64;
                    x.checked_mul(i32::MAX as u64).unwrap()
                })
                .collect()
        });

        // Larger type that is not Copy and does heap access. Strings are compared
        // lexicographically, so they are zero extended to maintain the input order.
        bench_patterns(c, test_len, "string", |values| {
            values
                .iter()
                .map(|val| format!("{:010}", val.saturating_abs()))
                .collect()
        });

        // Very large stack value.
        bench_patterns(c, test_len, "1k", |values| {
            values.iter().map(|val| OneKiloByte::new(*val)).collect()
        });

        // 16 byte stack value that is Copy but has a relatively expensive cmp implementation.
        bench_patterns(c, test_len, "f128", |values| {
            values.iter().map(|val| F128::new(*val)).collect()
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
