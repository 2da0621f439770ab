// src/config/validate.rs

use std::net::SocketAddr;

use anyhow::{anyhow, Context, Result};
use globset::Glob;

use crate::config::model::ConfigFile;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - `[reload].listen` parses as a socket address
/// - both `[watch]` patterns compile as globs and are non-empty
///
/// It does **not** check that any matching file currently exists; an
/// unmatched glob simply emits nothing, the same as "no changes yet".
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_listen_addr(cfg)?;
    validate_watch_patterns(cfg)?;
    Ok(())
}

fn validate_listen_addr(cfg: &ConfigFile) -> Result<()> {
    cfg.reload
        .listen
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid [reload].listen address: {}", cfg.reload.listen))?;
    Ok(())
}

fn validate_watch_patterns(cfg: &ConfigFile) -> Result<()> {
    for (field, pattern) in [
        ("stylesheet", &cfg.watch.stylesheet),
        ("templates", &cfg.watch.templates),
    ] {
        if pattern.trim().is_empty() {
            return Err(anyhow!("[watch].{field} must not be empty"));
        }
        Glob::new(pattern)
            .with_context(|| format!("invalid [watch].{field} glob pattern: {pattern}"))?;
    }
    Ok(())
}
