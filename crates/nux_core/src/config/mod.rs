//! Settings model and persistence.
//!
//! This module provides:
//! - The `Settings` value with its `nicehash`, `switching` and `gui` sections
//! - TOML-based configuration with atomic file writes
//! - Section-level updates (only changed sections are rewritten)
//!
//! # Example
//!
//! ```no_run
//! use nux_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new(".config/nuxhash/settings.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Worker: {}", config.settings().nicehash.workername);
//!
//! config.settings_mut().switching.interval = 120;
//! config.update_section(ConfigSection::Switching).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, GuiSettings, NicehashSettings, Region, Settings, SwitchingSettings,
    UnknownOption, Units,
};
