use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Invoice JSON used when a command is given no path.
    pub default_invoice: Option<String>,
    /// Colorize table cells (negative totals, palette swatches).
    pub color_output: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { default_invoice: None, color_output: true }
    }
}

impl AppSettings {
    /// `default_invoice` with a leading `~` resolved to the home directory.
    pub fn default_invoice_path(&self) -> Option<PathBuf> {
        let raw = self.default_invoice.as_deref()?;
        match (raw.strip_prefix('~'), BaseDirs::new()) {
            (Some(rest), Some(dirs)) => Some(dirs.home_dir().join(rest.trim_start_matches(['/', '\\']))),
            _ => Some(PathBuf::from(raw)),
        }
    }
}

pub fn config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "invoice-engine", "app") {
        return proj_dirs.config_dir().join("settings.toml");
    }
    PathBuf::from("settings.toml")
}

/// Missing file means defaults; a file that exists but does not parse is an error.
pub fn load_settings(path: &Path) -> anyhow::Result<AppSettings> {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(AppSettings::default());
    }
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

pub fn save_settings(path: &Path, settings: &AppSettings) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let toml_str = toml::to_string_pretty(settings)?;
    fs::write(path, toml_str).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("invoice-engine-settings-does-not-exist.toml");
        assert_eq!(load_settings(&path).unwrap(), AppSettings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("invoice-engine-test-{}", uuid::Uuid::new_v4()));
        let path = dir.join("settings.toml");
        let settings = AppSettings { default_invoice: Some("/tmp/invoice.json".into()), color_output: false };
        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: AppSettings = toml::from_str("default_invoice = \"a.json\"").unwrap();
        assert!(parsed.color_output);
        assert_eq!(parsed.default_invoice_path(), Some(PathBuf::from("a.json")));
    }

    #[test]
    fn plain_paths_are_not_expanded() {
        let settings = AppSettings { default_invoice: Some("/var/invoices/a.json".into()), color_output: true };
        assert_eq!(settings.default_invoice_path(), Some(PathBuf::from("/var/invoices/a.json")));
    }

    #[test]
    fn tilde_resolves_under_home() {
        let Some(dirs) = BaseDirs::new() else { return };
        let settings = AppSettings { default_invoice: Some("~/invoices/a.json".into()), color_output: true };
        assert_eq!(settings.default_invoice_path(), Some(dirs.home_dir().join("invoices/a.json")));
    }
}
