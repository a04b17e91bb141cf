//! Application directory structure for glint-search.
//!
//! Resolves the standard directories and ensures they exist on first launch:
//!
//! - Config: `~/.config/glint-search/`  (human-editable, XDG-style; holds `theme.toml`)
//! - Logs:   `~/Library/Logs/glint-search/` on macOS, `~/.local/share/glint-search/` elsewhere
//!
//! `XDG_CONFIG_HOME` / `XDG_DATA_HOME` take precedence when set.

use std::path::PathBuf;

use tracing::warn;

const APP_NAME: &str = "glint-search";

/// All resolved application directory paths.
#[derive(Debug, Clone)]
pub struct GlintPaths {
    /// Human-editable config: `~/.config/glint-search/`
    pub config: PathBuf,
    /// Application logs
    pub logs: PathBuf,
}

impl GlintPaths {
    /// Resolve the directory layout for the current platform.
    pub fn resolve() -> Self {
        Self {
            config: config_dir(),
            logs: log_dir(),
        }
    }

    /// Create the directories if they do not exist yet. Failure is logged,
    /// not fatal: the app runs fine with defaults and stderr logging.
    pub fn ensure_exist(&self) {
        for dir in [&self.config, &self.logs] {
            if let Err(e) = std::fs::create_dir_all(dir) {
                warn!("could not create {}: {}", dir.display(), e);
            }
        }
    }
}

fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    home().join(".config").join(APP_NAME)
}

pub fn log_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    let home = home();
    #[cfg(target_os = "macos")]
    {
        home.join("Library").join("Logs").join(APP_NAME)
    }
    #[cfg(not(target_os = "macos"))]
    {
        home.join(".local").join("share").join(APP_NAME)
    }
}

fn home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_end_with_app_name() {
        let paths = GlintPaths::resolve();
        assert!(paths.config.ends_with(APP_NAME));
        assert!(paths.logs.ends_with(APP_NAME));
    }
}
