//! Cross-instance preference change notification
//!
//! The terminal analogue of the browser storage event: a background task
//! polls the preference file and reports which keys changed. Delivery is
//! asynchronous; consumers must not assume a change arrives before their
//! next tick.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::{self, MissedTickBehavior};

use super::store::PrefKey;

/// Spawn a watcher over the preference file. Changed keys arrive on the
/// returned channel; the task exits when the receiver is dropped.
pub fn spawn_watcher(path: PathBuf, period: Duration) -> UnboundedReceiver<PrefKey> {
    let (tx, rx) = mpsc::unbounded_channel();

    // Snapshot before handing off so writes racing the spawn are not missed
    let mut last = snapshot(&path);

    tokio::spawn(async move {
        let mut timer = time::interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            timer.tick().await;
            let current = snapshot(&path);

            for key in PrefKey::ALL {
                if last.get(key.as_str()) != current.get(key.as_str())
                    && tx.send(key).is_err()
                {
                    return;
                }
            }

            last = current;
        }
    });

    rx
}

/// Best-effort read; unreadable or unparseable files count as empty
fn snapshot(path: &Path) -> HashMap<String, String> {
    fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::PrefStore;
    use tempfile::TempDir;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_watcher_reports_external_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        let mut store = PrefStore::open(path.clone()).unwrap();
        store.set(PrefKey::SnakeSkin, "green").unwrap();

        let mut rx = spawn_watcher(path, Duration::from_millis(10));
        store.set(PrefKey::SnakeSkin, "purple").unwrap();

        let key = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("watcher should notice the write")
            .expect("watcher channel closed");
        assert_eq!(key, PrefKey::SnakeSkin);
    }

    #[tokio::test]
    async fn test_watcher_is_quiet_without_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        let mut store = PrefStore::open(path.clone()).unwrap();
        store.set(PrefKey::FoodSkin, "cherry").unwrap();

        let mut rx = spawn_watcher(path, Duration::from_millis(10));

        let outcome = timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(outcome.is_err());
    }
}
