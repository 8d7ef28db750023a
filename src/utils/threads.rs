use futures::StreamExt;
use futures::stream;
use std::future::Future;

/// 受限并发执行一组future，返回全部结果。
/// 完成顺序不保证与提交顺序一致，调用方自行按需排序。
pub async fn do_parallel_with_limit<F, T>(futures: Vec<F>, limit: usize) -> Vec<T>
where
    F: Future<Output = T>,
{
    let limit = limit.max(1);
    stream::iter(futures)
        .buffer_unordered(limit)
        .collect::<Vec<T>>()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_all_futures_complete() {
        let futures: Vec<_> = (0..10).map(|i| async move { i * 2 }).collect();
        let mut results = do_parallel_with_limit(futures, 3).await;
        results.sort();
        assert_eq!(results, (0..10).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let futures: Vec<_> = (0..8)
            .map(|_| {
                let in_flight = in_flight.clone();
                let peak = peak.clone();
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                }
            })
            .collect();

        do_parallel_with_limit(futures, 2).await;
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_zero_limit_clamped() {
        let futures: Vec<_> = (0..3).map(|i| async move { i }).collect();
        let results = do_parallel_with_limit(futures, 0).await;
        assert_eq!(results.len(), 3);
    }
}
