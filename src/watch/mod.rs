// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Compiling the two reload glob rules (stylesheet + templates).
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//! - Expanding the rules to the set of currently matching files.
//!
//! It does **not** know about the reload stream; it only turns filesystem
//! changes into runtime-level change events.

pub mod rules;
pub mod watcher;

pub use rules::ReloadRules;
pub use watcher::{spawn_watcher, WatcherHandle};
