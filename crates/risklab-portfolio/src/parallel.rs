//! Optional fan-out of per-scenario work.
//!
//! Batches of scenarios are independent, so they may be evaluated on the
//! rayon pool when the crate is built with `parallel`.

use crate::types::RiskConfig;

/// Applies `f` to every item and returns the outputs in input order.
///
/// The work goes to rayon only if the `parallel` feature is compiled in and
/// [`RiskConfig::should_parallelize`] accepts the batch size; otherwise it
/// runs on the calling thread.
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &RiskConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_preserves_order() {
        let items: Vec<u32> = (0..100).collect();
        let config = RiskConfig::new().with_threshold(4);

        let doubled = maybe_parallel_map(&items, &config, |x| x * 2);
        assert_eq!(doubled, (0..100).map(|x| x * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_sequential_config() {
        let items = [1.0_f64, 4.0, 9.0];
        let roots = maybe_parallel_map(&items, &RiskConfig::sequential(), |x| x.sqrt());
        assert_eq!(roots, vec![1.0, 2.0, 3.0]);
    }
}
