//! Optional parallel job execution.

use anyhow::Result;
use rayon::prelude::*;

/// Run `op` over `items`, on the rayon pool when `parallel` is set.
///
/// Results keep input order. The first error stops the batch; in parallel
/// mode jobs already started still run to completion.
pub fn try_map_ordered<T, R, F>(items: &[T], parallel: bool, op: F) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R> + Sync + Send,
{
    if parallel {
        items.par_iter().map(op).collect()
    } else {
        items.iter().map(op).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::bail;

    use super::*;

    #[test]
    fn test_order_is_preserved() {
        let items: Vec<u32> = (0..64).collect();
        for parallel in [false, true] {
            let doubled = try_map_ordered(&items, parallel, |n| Ok(n * 2)).unwrap();
            assert_eq!(doubled, items.iter().map(|n| n * 2).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_sequential_stops_at_first_error() {
        let calls = AtomicUsize::new(0);
        let result = try_map_ordered(&[1, 2, 3], false, |n| {
            calls.fetch_add(1, Ordering::Relaxed);
            if *n == 2 {
                bail!("job {n} failed");
            }
            Ok(*n)
        });

        assert_eq!(result.unwrap_err().to_string(), "job 2 failed");
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_parallel_reports_error() {
        let result = try_map_ordered(&[1, 2, 3], true, |n| {
            if *n == 3 {
                bail!("job {n} failed");
            }
            Ok(*n)
        });
        assert!(result.is_err());
    }
}
