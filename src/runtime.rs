// src/runtime.rs

//! The main event loop.
//!
//! A single consumer over one event channel, fed by the file watcher and the
//! Ctrl-C handler. Each event runs to completion before the next is
//! dispatched, so reload passes never overlap.

use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use crate::reload::{trigger, ReloadMessage};
use crate::watch::ReloadRules;

/// Events sent into the runtime from the watcher or external signals.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A watched file changed; `path` is root-relative with forward slashes.
    ChangeDetected { path: PathBuf },
    ShutdownRequested,
}

/// The watch-and-notify runtime.
///
/// Owns the rule table and the reload sender for its whole lifetime; there is
/// no concurrent writer, so no locking is needed. There is no transition back
/// to idle: the loop runs until shutdown is requested or a trigger error
/// propagates out and terminates the process.
pub struct Runtime {
    root: PathBuf,
    rules: ReloadRules,
    reload_tx: broadcast::Sender<ReloadMessage>,
    events_rx: mpsc::Receiver<RuntimeEvent>,
}

impl Runtime {
    pub fn new(
        root: PathBuf,
        rules: ReloadRules,
        reload_tx: broadcast::Sender<ReloadMessage>,
        events_rx: mpsc::Receiver<RuntimeEvent>,
    ) -> Self {
        Self {
            root,
            rules,
            reload_tx,
            events_rx,
        }
    }

    /// Main event loop.
    ///
    /// Should be called from `lib.rs` after the reload listener is bound and
    /// the watcher has been spawned with a clone of the event sender.
    pub async fn run(mut self) -> Result<()> {
        info!("livewatch runtime started");

        while let Some(event) = self.events_rx.recv().await {
            debug!(?event, "runtime received event");

            match event {
                RuntimeEvent::ChangeDetected { path } => {
                    info!(path = %path.display(), "change detected");
                    trigger(&self.root, &self.rules, &self.reload_tx)?;
                }
                RuntimeEvent::ShutdownRequested => {
                    info!("shutdown requested, stopping runtime");
                    break;
                }
            }
        }

        info!("livewatch runtime exiting");
        Ok(())
    }
}
