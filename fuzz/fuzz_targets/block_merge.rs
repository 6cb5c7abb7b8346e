#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    runmerge_fuzz::check_against_std(data, |v| {
        runmerge::sort_block_merge(v);
    });

    // Only the key takes part in the comparison, so equal keys must keep their input order.
    let keys = runmerge_fuzz::u8_as_u16(data);
    let mut keyed = runmerge_fuzz::with_positions(&keys)
        .into_iter()
        .map(|(key, pos)| KeyOnly(key, pos))
        .collect::<Vec<_>>();
    runmerge::sort_block_merge(&mut keyed);
    assert!(keyed.windows(2).all(|w| (w[0].0, w[0].1) <= (w[1].0, w[1].1)));
});

#[derive(Debug)]
struct KeyOnly(u16, usize);

impl PartialEq for KeyOnly {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for KeyOnly {}

impl PartialOrd for KeyOnly {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyOnly {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}
