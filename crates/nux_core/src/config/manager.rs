//! Config manager for loading, saving, and atomic updates.
//!
//! Key features:
//! - Atomic writes (write to temp file, then rename)
//! - Section-level updates (only modified section is changed)
//! - Cleanup on load (unknown sections dropped, missing keys filled)
//! - Preserves comments and formatting with toml_edit

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml_edit::{DocumentMut, Item};

use super::settings::{ConfigSection, Settings};

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Failed to parse config for editing: {0}")]
    EditParseError(#[from] toml_edit::TomlError),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Manages the persisted settings file.
pub struct ConfigManager {
    /// Path to the config file.
    config_path: PathBuf,
    /// Current settings loaded in memory.
    settings: Settings,
}

impl ConfigManager {
    /// Create a new config manager with the given config file path.
    ///
    /// Does not load the config - call `load()` or `load_or_create()` after.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get a reference to the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get a mutable reference to the current settings.
    ///
    /// Note: Changes made here are only in memory until `save()` or
    /// `update_section()` is called.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Load config from file.
    ///
    /// Returns error if file doesn't exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.settings = toml::from_str(&content)?;
        tracing::debug!("Loaded settings from {}", self.config_path.display());
        Ok(())
    }

    /// Load config from file, creating with defaults if it doesn't exist.
    ///
    /// Also cleans up the file, saving if changes were made.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            let (settings, was_modified) = self.parse_and_clean(&content)?;
            self.settings = settings;

            if was_modified {
                tracing::info!(
                    "Rewriting {} with defaults filled in",
                    self.config_path.display()
                );
                self.save()?;
            }
        } else {
            tracing::info!(
                "No config file found, creating default at {}",
                self.config_path.display()
            );
            self.settings = Settings::default();
            self.save()?;
        }
        Ok(())
    }

    /// Persist whichever sections changed, then replace the in-memory settings.
    ///
    /// Returns the sections that were written. On error the in-memory
    /// settings are left as they were, so a retry writes the same sections.
    pub fn replace(&mut self, settings: Settings) -> ConfigResult<Vec<ConfigSection>> {
        let changed: Vec<ConfigSection> = ConfigSection::ALL
            .into_iter()
            .filter(|section| section.differs(&self.settings, &settings))
            .collect();

        for section in &changed {
            self.write_section(&settings, *section)?;
        }
        self.settings = settings;

        if !changed.is_empty() {
            tracing::info!(
                "Saved settings ({}) to {}",
                changed
                    .iter()
                    .map(|s| s.table_name())
                    .collect::<Vec<_>>()
                    .join(", "),
                self.config_path.display()
            );
        }
        Ok(changed)
    }

    /// Parse and clean up config content.
    ///
    /// Returns the settings and whether any modifications were made.
    fn parse_and_clean(&self, content: &str) -> ConfigResult<(Settings, bool)> {
        let doc: DocumentMut = content.parse()?;

        // Missing keys are filled in by serde defaults
        let settings: Settings = toml::from_str(content)?;

        let valid_sections: Vec<&str> = ConfigSection::ALL
            .iter()
            .map(|section| section.table_name())
            .collect();
        let has_unknown = doc
            .iter()
            .any(|(key, _)| !valid_sections.contains(&key));

        let reserialized = toml::to_string_pretty(&settings)?;
        let was_modified = has_unknown || !same_document(content, &reserialized)?;

        Ok((settings, was_modified))
    }

    /// Save the entire config atomically.
    pub fn save(&self) -> ConfigResult<()> {
        let content = self.generate_config_with_comments()?;
        self.atomic_write(&content)?;
        Ok(())
    }

    /// Update a specific section atomically.
    ///
    /// Re-reads the file from disk, replaces only the given table, and writes
    /// back atomically. Other sections keep their on-disk content.
    pub fn update_section(&mut self, section: ConfigSection) -> ConfigResult<()> {
        self.write_section(&self.settings, section)
    }

    /// Write one section of `settings` into the file on disk.
    fn write_section(&self, settings: &Settings, section: ConfigSection) -> ConfigResult<()> {
        let current_content = if self.config_path.exists() {
            fs::read_to_string(&self.config_path)?
        } else {
            String::new()
        };

        let mut doc: DocumentMut = if current_content.is_empty() {
            DocumentMut::new()
        } else {
            current_content.parse()?
        };

        let section_toml = match section {
            ConfigSection::Nicehash => toml::to_string_pretty(&settings.nicehash)?,
            ConfigSection::Switching => toml::to_string_pretty(&settings.switching)?,
            ConfigSection::Gui => toml::to_string_pretty(&settings.gui)?,
        };

        let section_doc: DocumentMut = section_toml.parse()?;
        let section_table = section_doc.as_table().clone();

        doc[section.table_name()] = Item::Table(section_table);

        self.atomic_write(&doc.to_string())?;
        Ok(())
    }

    /// Generate config content with section comments.
    fn generate_config_with_comments(&self) -> ConfigResult<String> {
        let mut output = String::new();

        output.push_str("# nuxhash settings\n");
        output.push_str(
            "# This file is auto-generated. Comments may be preserved on section updates.\n\n",
        );

        let sections = [
            (
                "# NiceHash pool credentials and worker identity",
                ConfigSection::Nicehash,
                toml::to_string_pretty(&self.settings.nicehash)?,
            ),
            (
                "# Profit switching",
                ConfigSection::Switching,
                toml::to_string_pretty(&self.settings.switching)?,
            ),
            (
                "# Display preferences",
                ConfigSection::Gui,
                toml::to_string_pretty(&self.settings.gui)?,
            ),
        ];

        for (i, (comment, section, body)) in sections.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(comment);
            output.push('\n');
            output.push_str(&format!("[{}]\n", section.table_name()));
            for line in body.lines() {
                output.push_str(line);
                output.push('\n');
            }
        }

        Ok(output)
    }

    /// Write content to config file atomically.
    ///
    /// Writes to a temp file first, then renames.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Same directory so the rename stays on one filesystem
        let temp_path = self.config_path.with_extension("toml.tmp");

        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }
}

/// Compare two TOML documents by value, ignoring comments and layout.
fn same_document(a: &str, b: &str) -> ConfigResult<bool> {
    let a: toml::Table = toml::from_str(a)?;
    let b: toml::Table = toml::from_str(b)?;
    Ok(a == b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_or_create_creates_default() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nuxhash").join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert!(config_path.exists());
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[nicehash]"));
        assert!(content.contains("[switching]"));
        assert!(content.contains("[gui]"));
        assert_eq!(manager.settings(), &Settings::default());
    }

    #[test]
    fn load_or_create_preserves_existing() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        fs::write(&config_path, "[nicehash]\nworkername = \"rig1\"\n").unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert_eq!(manager.settings().nicehash.workername, "rig1");
        assert_eq!(manager.settings().switching.interval, 60);

        // Missing keys were written back
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("interval = 60"));
    }

    #[test]
    fn load_or_create_drops_unknown_sections() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");
        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        let mut content = fs::read_to_string(&config_path).unwrap();
        content.push_str("\n[donate]\nhours = 1\n");
        fs::write(&config_path, content).unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(!content.contains("[donate]"));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let mut manager = ConfigManager::new(dir.path().join("absent.toml"));
        assert!(matches!(manager.load(), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn update_section_only_changes_target() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        // Hand-edit another section on disk
        let content = fs::read_to_string(&config_path).unwrap();
        fs::write(&config_path, content.replace("units = \"mBTC\"", "units = \"BTC\"")).unwrap();

        manager.settings_mut().switching.interval = 120;
        manager.update_section(ConfigSection::Switching).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("interval = 120"));
        // On-disk gui section untouched by the in-memory default
        assert!(content.contains("units = \"BTC\""));
    }

    #[test]
    fn replace_writes_changed_sections() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        let mut settings = manager.settings().clone();
        settings.nicehash.region = "eu".to_string();
        let changed = manager.replace(settings.clone()).unwrap();
        assert_eq!(changed, vec![ConfigSection::Nicehash]);

        let mut reloaded = ConfigManager::new(&config_path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.settings(), &settings);

        assert!(manager.replace(settings).unwrap().is_empty());
    }

    #[test]
    fn failed_replace_is_written_on_retry() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        // A directory at the temp path makes the atomic write fail
        let temp_path = config_path.with_extension("toml.tmp");
        fs::create_dir(&temp_path).unwrap();

        let mut settings = manager.settings().clone();
        settings.switching.interval = 120;
        assert!(manager.replace(settings.clone()).is_err());
        assert_eq!(manager.settings().switching.interval, 60);

        fs::remove_dir(&temp_path).unwrap();
        let changed = manager.replace(settings.clone()).unwrap();
        assert_eq!(changed, vec![ConfigSection::Switching]);

        let mut reloaded = ConfigManager::new(&config_path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.settings().switching.interval, 120);
    }

    #[test]
    fn atomic_write_creates_no_temp_on_success() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        let temp_path = config_path.with_extension("toml.tmp");
        assert!(!temp_path.exists());
    }
}
