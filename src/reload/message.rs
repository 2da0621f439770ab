// src/reload/message.rs

use std::path::Path;

use serde::{Deserialize, Serialize};

/// One reload notification, serialized as a single JSON line on the wire.
///
/// Carries both the changed file's path (relative to the project root, with
/// forward slashes) and its current contents, mirroring the way the asset
/// pipeline pushes whole files into the reload stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReloadMessage {
    pub command: String,
    pub path: String,
    pub contents: String,
}

impl ReloadMessage {
    pub fn reload(path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        Self {
            command: "reload".to_string(),
            path: path.as_ref().to_string_lossy().replace('\\', "/"),
            contents: contents.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_single_json_object() {
        let msg = ReloadMessage::reload("app/templates/index.html", "<html></html>");
        let line = serde_json::to_string(&msg).unwrap();
        assert!(line.contains("\"command\":\"reload\""));
        assert!(line.contains("app/templates/index.html"));
        assert!(!line.contains('\n'));
    }
}
