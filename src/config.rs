//! Optional project configuration loaded from `.eolfix.yaml`.

use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Config file names probed in the first target's directory.
const CONFIG_FILES: &[&str] = &[".eolfix.yaml", ".eolfix.yml"];

/// Defaults that CLI flags override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default extension filter applied when the CLI gives none.
    pub extensions: Vec<String>,
    /// Follow symbolic links while walking directories.
    pub follow_symlinks: bool,
    /// Worker thread count.
    pub threads: Option<usize>,
}

impl Config {
    /// Load configuration from the project directory.
    ///
    /// A missing file yields defaults; an unreadable or malformed file is
    /// logged and also yields defaults, never a hard failure.
    pub fn load(project_root: Option<&Path>) -> Self {
        let Some(root) = project_root else {
            return Config::default();
        };

        for name in CONFIG_FILES {
            let path = root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Config::default()
    }

    fn from_file(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read config file");
                return Config::default();
            }
        };

        match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse config file");
                Config::default()
            }
        }
    }
}
