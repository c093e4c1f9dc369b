//! Index-range fan-out that runs on Rayon when the `parallel` feature is on.
//!
//! Work items are pure functions of their index and results are collected in
//! index order, so sequential and parallel runs produce identical output.

/// Controls whether a fan-out runs sequentially or with Rayon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ParallelOptions {
    enabled: bool,
    min_items_for_parallel: usize,
}

impl ParallelOptions {
    /// Construct explicit options.
    pub fn new(enabled: bool, min_items_for_parallel: usize) -> Self {
        Self {
            enabled,
            min_items_for_parallel: min_items_for_parallel.max(1),
        }
    }

    /// Disable parallel execution regardless of item count.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            min_items_for_parallel: usize::MAX,
        }
    }

    /// Returns true when a fan-out over `item_count` items should use Rayon.
    pub fn should_parallelize(&self, item_count: usize) -> bool {
        cfg!(feature = "parallel") && self.enabled && item_count >= self.min_items_for_parallel
    }

    /// Update the minimum item threshold for parallel execution.
    pub fn with_min_items(mut self, min_items: usize) -> Self {
        self.min_items_for_parallel = min_items.max(1);
        self
    }
}

impl Default for ParallelOptions {
    fn default() -> Self {
        Self {
            enabled: cfg!(feature = "parallel"),
            min_items_for_parallel: 2,
        }
    }
}

/// Evaluate `f(i)` for `i in 0..count`, returning results in index order.
pub fn map_indexed<R, F>(count: usize, options: ParallelOptions, f: F) -> Vec<R>
where
    R: Send,
    F: Fn(usize) -> R + Sync + Send,
{
    if options.should_parallelize(count) {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            return (0..count).into_par_iter().map(f).collect();
        }
    }
    (0..count).map(f).collect()
}

/// Fill disjoint `chunk_len`-sized chunks of `out` with `f(chunk_index, chunk)`.
pub fn for_each_chunk_mut<V, F>(out: &mut [V], chunk_len: usize, options: ParallelOptions, f: F)
where
    V: Send,
    F: Fn(usize, &mut [V]) + Sync + Send,
{
    if chunk_len == 0 {
        return;
    }
    let chunks = out.len().div_ceil(chunk_len);
    if options.should_parallelize(chunks) {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            out.par_chunks_mut(chunk_len)
                .enumerate()
                .for_each(|(i, chunk)| f(i, chunk));
            return;
        }
    }
    out.chunks_mut(chunk_len)
        .enumerate()
        .for_each(|(i, chunk)| f(i, chunk));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_preserves_index_order() {
        let par = map_indexed(100, ParallelOptions::default(), |i| i * i);
        let seq = map_indexed(100, ParallelOptions::disabled(), |i| i * i);
        assert_eq!(par, seq);
        assert_eq!(par[7], 49);
    }

    #[test]
    fn chunks_write_disjoint_slots() {
        let mut out = vec![0usize; 10];
        for_each_chunk_mut(&mut out, 3, ParallelOptions::default(), |i, chunk| {
            for v in chunk.iter_mut() {
                *v = i;
            }
        });
        assert_eq!(out, vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 3]);
    }

    #[test]
    fn threshold_gates_parallelism() {
        let opts = ParallelOptions::new(true, 50);
        assert!(!opts.should_parallelize(10));
        assert_eq!(opts.should_parallelize(50), cfg!(feature = "parallel"));
        assert!(!ParallelOptions::disabled().should_parallelize(1_000));
    }
}
