// src/watch/rules.rs

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use walkdir::WalkDir;

use crate::config::WatchSection;

/// The fixed two-entry watch rule table, compiled.
///
/// Rule one is the single compiled stylesheet file; rule two is the recursive
/// template glob. Patterns are evaluated against root-relative paths with
/// forward slashes (e.g. `"app/templates/account/login.html"`).
#[derive(Clone)]
pub struct ReloadRules {
    stylesheet: GlobMatcher,
    templates: GlobMatcher,
}

impl fmt::Debug for ReloadRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReloadRules")
            .field("stylesheet", &self.stylesheet.glob().glob())
            .field("templates", &self.templates.glob().glob())
            .finish()
    }
}

impl ReloadRules {
    /// Compile the two patterns from the `[watch]` config section.
    pub fn from_config(watch: &WatchSection) -> Result<Self> {
        Ok(Self {
            stylesheet: compile(&watch.stylesheet)?,
            templates: compile(&watch.templates)?,
        })
    }

    /// Returns true if a change to the given path (relative to project root)
    /// should trigger a reload pass.
    pub fn matches(&self, rel_path: &str) -> bool {
        self.stylesheet.is_match(rel_path) || self.templates.is_match(rel_path)
    }

    /// Expand both rules against the filesystem under `root`.
    ///
    /// Returns every currently existing regular file matching either rule,
    /// stylesheet matches first, then templates, each group sorted. This is
    /// the emission order of the trigger unit: a single matching change
    /// always re-emits the full pair of globs.
    pub fn expand(&self, root: &Path) -> Vec<PathBuf> {
        let mut stylesheets = Vec::new();
        let mut templates = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(rel) = relative_str(root, entry.path()) else {
                continue;
            };
            if self.stylesheet.is_match(&rel) {
                stylesheets.push(entry.into_path());
            } else if self.templates.is_match(&rel) {
                templates.push(entry.into_path());
            }
        }

        stylesheets.sort();
        templates.sort();
        stylesheets.extend(templates);
        stylesheets
    }
}

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// Returns `None` if the path is not under `root` and cannot be relativized.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let s = rel.to_string_lossy().replace('\\', "/");
    Some(s)
}

fn compile(pattern: &str) -> Result<GlobMatcher> {
    let glob =
        Glob::new(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;
    Ok(glob.compile_matcher())
}
