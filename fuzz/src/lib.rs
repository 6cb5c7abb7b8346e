/// Reads `data` as little endian `u16` keys, a trailing odd byte is ignored.
///
/// Two byte keys give the fuzzer long runs and many duplicates to play with.
pub fn u8_as_u16(data: &[u8]) -> Vec<u16> {
    data.chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect()
}

/// Pairs every key with its input position, so that stability can be checked after sorting by
/// key alone.
pub fn with_positions(keys: &[u16]) -> Vec<(u16, usize)> {
    keys.iter().copied().zip(0..).collect()
}

/// Sorts a copy of `data` with `sort` and asserts it matches the standard library sort.
pub fn check_against_std(data: &[u8], sort: impl Fn(&mut [u16])) {
    let mut v = u8_as_u16(data);
    let mut expected = v.clone();
    expected.sort();

    sort(&mut v);
    assert_eq!(v, expected);
    assert!(runmerge::is_sorted(&v));
}
