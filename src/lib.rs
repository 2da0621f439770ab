// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod reload;
pub mod runtime;
pub mod ui;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::reload::{trigger, ReloadServer};
use crate::runtime::{Runtime, RuntimeEvent};
use crate::watch::ReloadRules;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the reload listener
/// - the runtime loop
/// - (unless `--once`) the file watcher
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    let rules = ReloadRules::from_config(&cfg.watch)?;
    let root = config_root_dir(&config_path);

    // Idle -> watching: the listener socket opens exactly once, at startup.
    // A bind failure is fatal.
    let server = ReloadServer::bind(&cfg.reload.listen).await?;
    let reload_tx = server.sender();

    if args.once {
        // Single notify pass, no watch registration.
        let emitted = trigger(&root, &rules, &reload_tx)?;
        info!(emitted, "single reload pass complete");
        return Ok(());
    }

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    // File watcher; the handle must stay alive for the whole run.
    let _watcher_handle = watch::spawn_watcher(root.clone(), rules.clone(), rt_tx.clone())?;

    // Ctrl-C -> graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    let runtime = Runtime::new(root, rules, reload_tx, rt_rx);
    runtime.run().await
}

/// Figure out a sensible project root for watching.
/// Currently: directory containing the config file, or `.`.
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_root_falls_back_to_cwd() {
        assert_eq!(
            config_root_dir(Path::new("Livewatch.toml")),
            PathBuf::from(".")
        );
        assert_eq!(
            config_root_dir(Path::new("deploy/Livewatch.toml")),
            PathBuf::from("deploy")
        );
    }
}
