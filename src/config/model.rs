// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [reload]
/// listen = "127.0.0.1:35729"
///
/// [watch]
/// stylesheet = "app/static/styles/app.css"
/// templates = "app/templates/**/*.html"
/// ```
///
/// All sections are optional; the defaults above are what a missing file or
/// empty section resolves to.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// Reload listener settings from `[reload]`.
    #[serde(default)]
    pub reload: ReloadSection,

    /// The two watch rules from `[watch]`.
    #[serde(default)]
    pub watch: WatchSection,
}

/// `[reload]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReloadSection {
    /// Socket address the reload stream listens on.
    ///
    /// 35729 is the conventional livereload port.
    #[serde(default = "default_listen")]
    pub listen: String,
}

fn default_listen() -> String {
    "127.0.0.1:35729".to_string()
}

impl Default for ReloadSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

/// `[watch]` section: the fixed two-entry rule table.
///
/// Both patterns are evaluated relative to the working directory. Any change
/// matching either pattern re-emits the full file set for *both*.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// The single compiled stylesheet file.
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,

    /// Recursive glob over the templates directory tree.
    #[serde(default = "default_templates")]
    pub templates: String,
}

fn default_stylesheet() -> String {
    "app/static/styles/app.css".to_string()
}

fn default_templates() -> String {
    "app/templates/**/*.html".to_string()
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            stylesheet: default_stylesheet(),
            templates: default_templates(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_resolves_to_defaults() {
        let cfg: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(cfg.reload.listen, "127.0.0.1:35729");
        assert_eq!(cfg.watch.stylesheet, "app/static/styles/app.css");
        assert_eq!(cfg.watch.templates, "app/templates/**/*.html");
    }

    #[test]
    fn sections_override_independently() {
        let cfg: ConfigFile = toml::from_str(
            r#"
            [watch]
            stylesheet = "dist/site.css"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.watch.stylesheet, "dist/site.css");
        // Untouched fields keep their defaults.
        assert_eq!(cfg.watch.templates, "app/templates/**/*.html");
        assert_eq!(cfg.reload.listen, "127.0.0.1:35729");
    }
}
