//! Trailing-edge debounce of change signals.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Async callback run once per burst of changes.
pub type ChangeCallback = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Wait for change signals and run `on_change` once `quiet` has passed
/// without a new signal. Every signal restarts the timer.
///
/// Returns when `cancel` fires or every sender is gone. A pending timer or
/// a running callback is dropped on cancellation.
pub async fn debounce_loop(
    mut signals: mpsc::Receiver<()>,
    quiet: Duration,
    cancel: CancellationToken,
    on_change: ChangeCallback,
) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            signal = signals.recv() => {
                if signal.is_none() {
                    return;
                }
            }
        }

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => return,
                signal = signals.recv() => {
                    if signal.is_none() {
                        return;
                    }
                    tracing::trace!("Change during quiet period, debounce restarted");
                }
                () = tokio::time::sleep(quiet) => break,
            }
        }

        tracing::info!("File changes detected, triggering refresh");
        tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            () = on_change() => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_callback() -> (ChangeCallback, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let callback: ChangeCallback = Arc::new(move || -> BoxFuture<'static, ()> {
            let counter = Arc::clone(&counter);
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        });
        (callback, count)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_one_callback() {
        let (tx, rx) = mpsc::channel(1);
        let (callback, count) = counting_callback();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(debounce_loop(
            rx,
            Duration::from_millis(500),
            cancel.clone(),
            callback,
        ));

        for _ in 0..5 {
            tx.send(()).await.unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_fire_separately() {
        let (tx, rx) = mpsc::channel(1);
        let (callback, count) = counting_callback();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(debounce_loop(
            rx,
            Duration::from_millis(200),
            cancel.clone(),
            callback,
        ));

        tx.send(()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        tx.send(()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(count.load(Ordering::SeqCst), 2);
        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_timer() {
        let (tx, rx) = mpsc::channel(1);
        let (callback, count) = counting_callback();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(debounce_loop(
            rx,
            Duration::from_millis(500),
            cancel.clone(),
            callback,
        ));

        tx.send(()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();
        task.await.unwrap();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_channel_ends_loop() {
        let (tx, rx) = mpsc::channel(1);
        let (callback, count) = counting_callback();
        let task = tokio::spawn(debounce_loop(
            rx,
            Duration::from_millis(50),
            CancellationToken::new(),
            callback,
        ));

        drop(tx);
        task.await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
