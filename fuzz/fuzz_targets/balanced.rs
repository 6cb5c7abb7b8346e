#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    runmerge_fuzz::check_against_std(data, |v| {
        runmerge::sort_balanced(v);
    });
});
