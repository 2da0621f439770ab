// src/reload/trigger.rs

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::reload::message::ReloadMessage;
use crate::watch::rules::{relative_str, ReloadRules};

/// The notify-once unit.
///
/// Expands *both* watch rules against `root`, reads every matching file and
/// broadcasts one [`ReloadMessage`] per file. Invoked once per detected
/// change (or once total with `--once`); a single matching change always
/// re-emits the full pair of globs.
///
/// A file-read failure propagates to the caller; there is no retry and no
/// partial-failure reporting. Returns the number of emitted notifications.
pub fn trigger(
    root: &Path,
    rules: &ReloadRules,
    sender: &broadcast::Sender<ReloadMessage>,
) -> Result<usize> {
    let files = rules.expand(root);
    info!("trigger reload ({} files)", files.len());

    for path in &files {
        // Assets are not guaranteed to be UTF-8; only a failed read is fatal.
        let bytes =
            fs::read(path).with_context(|| format!("reading changed file {:?}", path))?;
        let contents = String::from_utf8_lossy(&bytes).into_owned();

        let rel = relative_str(root, path)
            .unwrap_or_else(|| path.to_string_lossy().replace('\\', "/"));

        debug!(path = %rel, "emitting reload notification");

        // Fire-and-forget: an error just means no client is connected.
        let _ = sender.send(ReloadMessage::reload(rel, contents));
    }

    Ok(files.len())
}
