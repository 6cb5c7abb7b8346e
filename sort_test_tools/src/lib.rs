/// A sort implementation that can be driven by the shared tests and benchmarks.
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Clone;
}

pub mod patterns;
pub mod types;
