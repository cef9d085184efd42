// SPDX-License-Identifier: MIT
//
// keyano.toml loading.
//
//   layout = "colemak"   # or "qwerty" (default)
//   log = "debug"        # filter used when KEYANO_LOG and RUST_LOG are unset
//
// Path priority: --config > ./keyano.toml > built-in defaults.

use std::path::Path;

use anyhow::{Context, Result};
use keyano_core::Layout;
use serde::Deserialize;

/// File name looked up in the working directory.
pub const FILE_NAME: &str = "keyano.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Keyboard layout name.
    pub layout: String,
    /// Log filter, same syntax as `KEYANO_LOG`.
    pub log: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: Layout::default().name().to_owned(),
            log: None,
        }
    }
}

impl Config {
    /// Read and deserialize a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load with priority: CLI override > discovered file > defaults.
    pub fn load_with_overrides(cli_override: Option<&Path>, discovered: Option<&Path>) -> Result<Self> {
        if let Some(path) = cli_override {
            return Self::load(path);
        }
        match discovered {
            Some(path) if path.is_file() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// The configured layout.
    pub fn layout(&self) -> Result<Layout> {
        self.layout
            .parse()
            .with_context(|| format!("Invalid layout in {FILE_NAME}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn empty_file_is_default() {
        let (_dir, path) = write("");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn reads_fields() {
        let (_dir, path) = write("layout = \"colemak\"\nlog = \"debug\"\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.layout().unwrap(), Layout::Colemak);
        assert_eq!(config.log.as_deref(), Some("debug"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let (_dir, path) = write("theme = \"dark\"\n");
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn bad_layout_is_reported() {
        let (_dir, path) = write("layout = \"dvorak\"\n");
        let config = Config::load(&path).unwrap();
        let err = config.layout().unwrap_err();
        assert!(format!("{err:#}").contains("dvorak"));
    }

    #[test]
    fn missing_file_errors() {
        let dir = tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn override_beats_discovered() {
        let (_a, explicit) = write("layout = \"colemak\"\n");
        let (_b, found) = write("layout = \"qwerty\"\n");
        let config = Config::load_with_overrides(Some(&explicit), Some(&found)).unwrap();
        assert_eq!(config.layout, "colemak");
    }

    #[test]
    fn missing_discovered_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_with_overrides(None, Some(&dir.path().join(FILE_NAME))).unwrap();
        assert_eq!(config, Config::default());
    }
}
