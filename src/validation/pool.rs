use futures::{StreamExt, stream};
use std::future::Future;

/// Run `f` over `items` with at most `limit` futures in flight.
///
/// Futures complete in whatever order the I/O allows; each result is written
/// into the slot of the item that produced it, so the returned vector lines
/// up with `items` one to one. A `limit` of zero is treated as one.
pub async fn map_bounded<T, R, F, Fut>(items: Vec<T>, limit: usize, f: F) -> Vec<R>
where
    F: Fn(usize, T) -> Fut,
    Fut: Future<Output = R>,
{
    let total = items.len();
    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(total).collect();

    let f = &f;
    let mut in_flight = stream::iter(items.into_iter().enumerate())
        .map(|(index, item)| async move { (index, f(index, item).await) })
        .buffer_unordered(limit.max(1));

    while let Some((index, result)) = in_flight.next().await {
        slots[index] = Some(result);
    }

    // Every index is yielded exactly once by the stream above.
    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::{Duration, sleep};

    #[tokio::test]
    async fn test_map_bounded_preserves_order_under_reversed_delays() {
        let items: Vec<u64> = (0..8).collect();

        // First item is slowest, last item finishes first.
        let results = map_bounded(items.clone(), 8, |_, item| async move {
            sleep(Duration::from_millis((8 - item) * 15)).await;
            item * 10
        })
        .await;

        assert_eq!(results, vec![0, 10, 20, 30, 40, 50, 60, 70]);
    }

    #[tokio::test]
    async fn test_map_bounded_passes_matching_index() {
        let items = vec!["a", "b", "c"];

        let results = map_bounded(items, 2, |index, item| async move { format!("{index}{item}") })
            .await;

        assert_eq!(results, vec!["0a", "1b", "2c"]);
    }

    #[tokio::test]
    async fn test_map_bounded_respects_limit() {
        let current = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let results = map_bounded((0..20).collect::<Vec<_>>(), 3, |_, item| {
            let current = current.clone();
            let peak = peak.clone();
            async move {
                let now = current.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                sleep(Duration::from_millis(5)).await;
                current.fetch_sub(1, Ordering::SeqCst);
                item
            }
        })
        .await;

        assert_eq!(results.len(), 20);
        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert!(peak.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_map_bounded_empty_input() {
        let results: Vec<u8> = map_bounded(Vec::<u8>::new(), 4, |_, item| async move { item }).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_map_bounded_zero_limit_still_runs() {
        let results = map_bounded(vec![1, 2, 3], 0, |_, item| async move { item + 1 }).await;
        assert_eq!(results, vec![2, 3, 4]);
    }
}
