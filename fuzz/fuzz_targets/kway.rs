#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    runmerge_fuzz::check_against_std(data, |v| {
        runmerge::sort_kway(v);
    });

    // The lazy iterator must agree with the eager sort and stay exact sized.
    let keys = runmerge_fuzz::u8_as_u16(data);
    let iter = runmerge::sorted_iter(&keys);
    assert_eq!(iter.len(), keys.len());
    let lazy = iter.copied().collect::<Vec<_>>();
    let mut eager = keys.clone();
    runmerge::sort_kway(&mut eager);
    assert_eq!(lazy, eager);
});
