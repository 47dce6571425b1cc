//! Configuration management for Gallery.
//!
//! Parses `gallery.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! The chapter table is the source of truth for which chapters exist:
//!
//! ```toml
//! [app]
//! title = "Gallery"
//! description = "A collection of interactive chapters"
//!
//! [[chapter]]
//! nav = "tdse-1d"
//! package = "@w3gallery/tdse-1d#^0.1.0"
//!
//! [links]
//! base_file = "links.json"
//!
//! [loader]
//! chapters_dir = "chapters"
//! ```
//!
//! Chapter entries are an array of tables so the gallery's display
//! order follows the file. CLI settings can be applied during load via
//! [`CliSettings`].

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "gallery.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded
/// config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the chapter packages directory.
    pub chapters_dir: Option<PathBuf>,
    /// Override the base links file.
    pub base_links: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application presentation settings.
    pub app: AppConfig,
    /// Chapter table, in display order.
    pub chapter: Vec<ChapterEntry>,
    /// Link seeding configuration.
    pub links: LinksConfig,
    /// Chapter loader configuration.
    pub loader: LoaderConfig,

    /// Directory containing the config file (set after loading).
    #[serde(skip)]
    base_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Application presentation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gallery title, used as the root navigation name.
    pub title: String,
    /// Short gallery description for the loading screen and home page.
    pub description: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Gallery".to_owned(),
            description: String::new(),
        }
    }
}

/// One chapter table entry: navigation key plus package locator.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ChapterEntry {
    /// Navigation key, unique within the gallery by convention.
    pub nav: String,
    /// Versioned package locator (e.g. `@w3gallery/tdse-1d#^0.1.0`).
    pub package: String,
}

/// Link seeding configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Base link JSON document, relative to the config file.
    pub base_file: Option<String>,
}

/// Chapter loader configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory holding chapter packages, relative to the config file.
    pub chapters_dir: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            chapters_dir: "chapters".to_owned(),
        }
    }
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `gallery.toml` in the current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is missing, unparsable or
    /// fails validation.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                path.to_path_buf()
            }
            None => {
                discover(&std::env::current_dir()?).ok_or_else(|| {
                    ConfigError::NotFound(PathBuf::from(CONFIG_FILENAME))
                })?
            }
        };

        let content = std::fs::read_to_string(&path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.base_dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        config.config_path = Some(path);

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a string, resolving paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for parse or validation failures.
    pub fn from_toml(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.base_dir = base_dir.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(dir) = &settings.chapters_dir {
            self.loader.chapters_dir = dir.to_string_lossy().into_owned();
        }
        if let Some(file) = &settings.base_links {
            self.links.base_file = Some(file.to_string_lossy().into_owned());
        }
    }

    /// Validate field contents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for empty navigation keys or
    /// package locators.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for entry in &self.chapter {
            if entry.nav.is_empty() {
                return Err(ConfigError::Validation(
                    "chapter.nav cannot be empty".to_owned(),
                ));
            }
            if entry.nav.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "chapter.nav `{}` must be a single path segment",
                    entry.nav
                )));
            }
            if entry.package.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "chapter `{}` has an empty package locator",
                    entry.nav
                )));
            }
        }
        Ok(())
    }

    /// The chapter table as `(nav key, locator)` pairs, in file order.
    #[must_use]
    pub fn chapter_table(&self) -> Vec<(String, String)> {
        self.chapter
            .iter()
            .map(|entry| (entry.nav.clone(), entry.package.clone()))
            .collect()
    }

    /// Resolved chapter packages directory.
    #[must_use]
    pub fn chapters_dir(&self) -> PathBuf {
        self.base_dir.join(&self.loader.chapters_dir)
    }

    /// Resolved base links file, if configured.
    #[must_use]
    pub fn base_links_path(&self) -> Option<PathBuf> {
        self.links
            .base_file
            .as_ref()
            .map(|file| self.base_dir.join(file))
    }
}

/// Search for the config file in `start` and its parents.
fn discover(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"
[app]
title = "W3 Gallery"
description = "Interactive chapters"

[[chapter]]
nav = "tdse-1d"
package = "@w3gallery/tdse-1d#^0.1.0"

[[chapter]]
nav = "openalea"
package = "@w3gallery/openalea#^0.2.0"

[links]
base_file = "links.json"

[loader]
chapters_dir = "packages"
"#;

    #[test]
    fn test_parse_sample() {
        let config = Config::from_toml(SAMPLE, Path::new("/project")).unwrap();
        assert_eq!(config.app.title, "W3 Gallery");
        assert_eq!(
            config.chapter_table(),
            vec![
                (
                    "tdse-1d".to_owned(),
                    "@w3gallery/tdse-1d#^0.1.0".to_owned()
                ),
                (
                    "openalea".to_owned(),
                    "@w3gallery/openalea#^0.2.0".to_owned()
                ),
            ]
        );
        assert_eq!(config.chapters_dir(), PathBuf::from("/project/packages"));
        assert_eq!(
            config.base_links_path(),
            Some(PathBuf::from("/project/links.json"))
        );
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("", Path::new(".")).unwrap();
        assert_eq!(config.app.title, "Gallery");
        assert!(config.chapter.is_empty());
        assert!(config.base_links_path().is_none());
        assert_eq!(config.chapters_dir(), PathBuf::from("./chapters"));
    }

    #[test]
    fn test_validation_rejects_empty_nav() {
        let content = r#"
[[chapter]]
nav = ""
package = "pkg"
"#;
        let err = Config::from_toml(content, Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_validation_rejects_nav_with_slash() {
        let content = r#"
[[chapter]]
nav = "a/b"
package = "pkg"
"#;
        let err = Config::from_toml(content, Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_from_file_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let settings = CliSettings {
            chapters_dir: Some(PathBuf::from("elsewhere")),
            base_links: None,
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.chapters_dir(), dir.path().join("elsewhere"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/definitely/missing.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_discover_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("gallery.toml"), SAMPLE).unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = discover(&nested).unwrap();
        assert_eq!(found, dir.path().join("gallery.toml"));
    }
}
