use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::db::project_dirs;

/// Runtime settings. Sources, lowest to highest priority: `config.toml` in the user config
/// directory, `TOONSHELF_*` environment variables, command-line flags.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub database_url: Option<String>,
    /// Keep favorites in memory only.
    #[serde(default)]
    pub ephemeral: bool,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Parse a config file. A missing file is an empty config; a malformed one is an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file");
                return Ok(Self::default());
            }
            Err(e) => return Err(e).with_context(|| format!("reading config: {}", path.display())),
        };
        toml::from_str(&text).with_context(|| format!("parsing config: {}", path.display()))
    }

    /// Apply `TOONSHELF_DATABASE_URL` and `TOONSHELF_EPHEMERAL` from `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("TOONSHELF_DATABASE_URL").filter(|s| !s.trim().is_empty()) {
            self.database_url = Some(url);
        }
        if let Some(v) = lookup("TOONSHELF_EPHEMERAL") {
            self.ephemeral = matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
        self
    }

    /// Load from the default file (if any) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        Ok(Self::from_file(&path)?.with_env(|k| std::env::var(k).ok()))
    }
}
