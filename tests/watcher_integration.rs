//! Integration tests for the debounced file watcher on a real filesystem.

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use claudeshelf::watcher::FileWatcher;
use tempfile::TempDir;

fn counter() -> (Arc<AtomicUsize>, impl Fn() -> std::future::Ready<()> + Send + Sync) {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = Arc::clone(&count);
    let callback = move || {
        handle.fetch_add(1, Ordering::SeqCst);
        std::future::ready(())
    };
    (count, callback)
}

/// A burst of writes inside the quiet interval yields one callback.
#[tokio::test]
async fn test_rapid_writes_trigger_once() {
    let tmp = TempDir::new().unwrap();
    let (count, callback) = counter();
    let mut watcher = FileWatcher::new(Duration::from_millis(400));
    watcher.start(&[tmp.path().to_path_buf()], callback).unwrap();

    for i in 0..5 {
        fs::write(tmp.path().join("CLAUDE.md"), format!("edit {i}")).unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
    }

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
    watcher.stop();
}

/// The callback waits for a full quiet interval after the last change.
#[tokio::test]
async fn test_callback_waits_for_quiet_interval() {
    let tmp = TempDir::new().unwrap();
    let (count, callback) = counter();
    let mut watcher = FileWatcher::new(Duration::from_millis(800));
    watcher.start(&[tmp.path().to_path_buf()], callback).unwrap();

    fs::write(tmp.path().join("settings.json"), "{}").unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(1600)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
    watcher.stop();
}

/// Changes in nested directories are observed.
#[tokio::test]
async fn test_nested_changes_are_observed() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join(".claude/commands");
    fs::create_dir_all(&nested).unwrap();

    let (count, callback) = counter();
    let mut watcher = FileWatcher::new(Duration::from_millis(200));
    watcher.start(&[tmp.path().to_path_buf()], callback).unwrap();

    fs::write(nested.join("deploy.md"), "steps").unwrap();
    tokio::time::sleep(Duration::from_millis(1200)).await;

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

/// Stopping drops a pending callback.
#[tokio::test]
async fn test_stop_cancels_pending_callback() {
    let tmp = TempDir::new().unwrap();
    let (count, callback) = counter();
    let mut watcher = FileWatcher::new(Duration::from_millis(500));
    watcher.start(&[tmp.path().to_path_buf()], callback).unwrap();

    fs::write(tmp.path().join("CLAUDE.md"), "x").unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    watcher.stop();

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

/// Restarting replaces the watched set; the old directory is ignored.
#[tokio::test]
async fn test_restart_replaces_watched_dirs() {
    let old_dir = TempDir::new().unwrap();
    let new_dir = TempDir::new().unwrap();
    let (count, callback) = counter();
    let callback = Arc::new(callback);

    let mut watcher = FileWatcher::new(Duration::from_millis(200));
    let first = Arc::clone(&callback);
    watcher
        .start(&[old_dir.path().to_path_buf()], move || (*first)())
        .unwrap();
    let second = Arc::clone(&callback);
    watcher
        .start(&[new_dir.path().to_path_buf()], move || (*second)())
        .unwrap();

    fs::write(old_dir.path().join("CLAUDE.md"), "old").unwrap();
    tokio::time::sleep(Duration::from_millis(800)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    fs::write(new_dir.path().join("CLAUDE.md"), "new").unwrap();
    tokio::time::sleep(Duration::from_millis(800)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}
