// src/watch/watcher.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::runtime::RuntimeEvent;
use crate::watch::rules::{relative_str, ReloadRules};

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive
/// for as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher that observes the given `root` directory
/// recursively and sends `RuntimeEvent::ChangeDetected` for paths matching
/// either reload rule.
///
/// - `root` is the project root against which both glob rules are evaluated.
/// - `runtime_tx` is the channel into the main runtime loop.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    rules: ReloadRules,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let root = root.into();
    let root = root.canonicalize().unwrap_or_else(|_| root.clone()); // best-effort

    let rules = Arc::new(rules);

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    // Closure called synchronously by notify whenever an event arrives.
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    // We can't log via tracing here easily, so fallback to stderr.
                    eprintln!("livewatch: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("livewatch: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!("file watcher started on {:?}", root);

    // Async task that consumes notify events and forwards reload triggers to
    // the runtime.
    let async_root = root.clone();
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!("received notify event: {:?}", event);

            for path in &event.paths {
                if !forward_if_match(&async_root, path, &rules, &runtime_tx).await {
                    // Runtime channel closed; no point keeping the loop alive.
                    return;
                }
            }
        }

        debug!("file watcher loop ended");
    });

    Ok(WatcherHandle { _inner: watcher })
}

/// Relativize `path`, check it against the rules, and forward a change event.
///
/// Returns false only when the runtime channel is closed.
async fn forward_if_match(
    root: &Path,
    path: &Path,
    rules: &ReloadRules,
    runtime_tx: &mpsc::Sender<RuntimeEvent>,
) -> bool {
    let Some(rel) = relative_str(root, path) else {
        warn!("could not relativize path {:?} against root {:?}", path, root);
        return true;
    };

    if !rules.matches(&rel) {
        return true;
    }

    debug!(path = %rel, "watch match -> triggering reload pass");

    if let Err(err) = runtime_tx
        .send(RuntimeEvent::ChangeDetected {
            path: PathBuf::from(rel),
        })
        .await
    {
        warn!("failed to send RuntimeEvent::ChangeDetected: {err}");
        return false;
    }

    true
}
