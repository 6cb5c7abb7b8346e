use std::cell::Cell;
use std::cmp::Ordering;

// Very large stack value, expensive to move and clone.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct OneKiloByte {
    values: [i64; 128],
}

impl OneKiloByte {
    pub fn new(val: i32) -> Self {
        let mut values = [0i64; 128];
        let mut val_i64 = val as i64;

        for elem in &mut values {
            *elem = val_i64;
            val_i64 = std::hint::black_box(val_i64 + 1);
        }
        Self { values }
    }

    fn as_i64(&self) -> i64 {
        self.values[11] + self.values[55] + self.values[77]
    }
}

impl PartialOrd for OneKiloByte {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OneKiloByte {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_i64().cmp(&other.as_i64())
    }
}

// 16 byte Copy value with a relatively expensive comparison.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct F128 {
    x: f64,
    y: f64,
}

impl F128 {
    pub fn new(val: i32) -> Self {
        let val_f = (val as f64) + (i32::MAX as f64) + 10.0;

        let x = val_f + 0.1;
        let y = val_f.log(4.1);

        assert!(y < x);
        assert!(x.is_normal() && y.is_normal());

        Self { x, y }
    }
}

// Only normal floats are ever constructed.
impl Eq for F128 {}

impl PartialOrd for F128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for F128 {
    fn cmp(&self, other: &Self) -> Ordering {
        let this_div = self.x / self.y;
        let other_div = other.x / other.y;

        this_div.total_cmp(&other_div)
    }
}

/// Orders only by `key`. `seq` records the position among equal keys in the input, so a stable
/// sort must leave `seq` ascending within every group of equal keys.
#[derive(Debug, Clone, Copy)]
pub struct Keyed {
    pub key: i32,
    pub seq: u32,
}

impl PartialEq for Keyed {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Keyed {}

impl PartialOrd for Keyed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyed {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Builds `Keyed` values from `keys`, numbering equal keys in input order.
pub fn keyed_with_seq(keys: &[i32]) -> Vec<Keyed> {
    let mut seen = std::collections::HashMap::<i32, u32>::new();

    keys.iter()
        .map(|&key| {
            let seq = seen.entry(key).or_insert(0);
            *seq += 1;
            Keyed { key, seq: *seq }
        })
        .collect()
}

thread_local! {
    static COMP_BUDGET: Cell<Option<u64>> = Cell::new(None);
    static COMP_COUNT: Cell<u64> = Cell::new(0);
}

/// Value whose comparison counts itself and panics once a per-thread budget is used up.
///
/// Holds a heap allocation, so a duplicated or leaked element shows up under miri and in
/// multiset checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragile {
    pub val: Box<i32>,
}

impl Fragile {
    pub fn new(val: i32) -> Self {
        Self { val: Box::new(val) }
    }

    /// Panic on the comparison after `budget` successful ones, `None` disables the panic.
    pub fn set_budget(budget: Option<u64>) {
        COMP_BUDGET.with(|b| b.set(budget));
        COMP_COUNT.with(|c| c.set(0));
    }

    /// Comparisons performed on this thread since the last `set_budget`.
    pub fn comp_count() -> u64 {
        COMP_COUNT.with(|c| c.get())
    }
}

impl PartialOrd for Fragile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fragile {
    fn cmp(&self, other: &Self) -> Ordering {
        let count = COMP_COUNT.with(|c| c.get());
        if let Some(budget) = COMP_BUDGET.with(|b| b.get()) {
            if count >= budget {
                panic!("Explicit panic after {count} comparisons");
            }
        }
        COMP_COUNT.with(|c| c.set(count + 1));

        self.val.cmp(&other.val)
    }
}
