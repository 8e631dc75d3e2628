//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Pool connection and identity.
    #[serde(default)]
    pub nicehash: NicehashSettings,

    /// Profit switching tuning.
    #[serde(default)]
    pub switching: SwitchingSettings,

    /// Display preferences.
    #[serde(default)]
    pub gui: GuiSettings,
}

impl Settings {
    /// Resolve the stored region, falling back to the default region.
    pub fn region(&self) -> Region {
        self.nicehash
            .region
            .parse()
            .unwrap_or_else(|_| Region::default())
    }

    /// Resolve the stored display units, falling back to the default units.
    pub fn units(&self) -> Units {
        self.gui.units.parse().unwrap_or_else(|_| Units::default())
    }
}

/// NiceHash pool credentials and worker identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NicehashSettings {
    /// Payout wallet address.
    #[serde(default)]
    pub wallet: String,

    /// Worker name reported to the pool.
    #[serde(default = "default_workername")]
    pub workername: String,

    /// Stratum region. Kept as a string so stale values survive loading.
    #[serde(default = "default_region")]
    pub region: String,

    /// API organization ID.
    #[serde(default)]
    pub api_organization: String,

    /// API key code.
    #[serde(default)]
    pub api_key: String,

    /// API secret key code.
    #[serde(default)]
    pub api_secret: String,
}

fn default_workername() -> String {
    "nuxhash".to_string()
}

fn default_region() -> String {
    Region::default().as_str().to_string()
}

impl Default for NicehashSettings {
    fn default() -> Self {
        Self {
            wallet: String::new(),
            workername: default_workername(),
            region: default_region(),
            api_organization: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
        }
    }
}

/// Profit switching configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchingSettings {
    /// Seconds between profitability checks.
    #[serde(default = "default_interval")]
    pub interval: u32,

    /// Minimum relative gain before switching algorithms (0.1 = 10%).
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_interval() -> u32 {
    60
}

fn default_threshold() -> f64 {
    0.1
}

impl Default for SwitchingSettings {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            threshold: default_threshold(),
        }
    }
}

/// Display preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuiSettings {
    /// Units for displayed balances and revenue.
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_units() -> String {
    Units::default().as_str().to_string()
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            units: default_units(),
        }
    }
}

/// Error returned when a string names no known option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

/// NiceHash stratum region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    Eu,
    #[default]
    Usa,
    Jp,
    Hk,
}

impl Region {
    /// All regions in display order.
    pub const ALL: [Region; 4] = [Region::Eu, Region::Usa, Region::Jp, Region::Hk];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Eu => "eu",
            Region::Usa => "usa",
            Region::Jp => "jp",
            Region::Hk => "hk",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| UnknownOption {
                kind: "region",
                value: s.to_string(),
            })
    }
}

/// Display units for bitcoin amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Units {
    Btc,
    #[default]
    MilliBtc,
}

impl Units {
    /// All units in display order.
    pub const ALL: [Units; 2] = [Units::Btc, Units::MilliBtc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Btc => "BTC",
            Units::MilliBtc => "mBTC",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Units::ALL
            .into_iter()
            .find(|units| units.as_str() == s)
            .ok_or_else(|| UnknownOption {
                kind: "units",
                value: s.to_string(),
            })
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Nicehash,
    Switching,
    Gui,
}

impl ConfigSection {
    /// All sections in file order.
    pub const ALL: [ConfigSection; 3] = [
        ConfigSection::Nicehash,
        ConfigSection::Switching,
        ConfigSection::Gui,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Nicehash => "nicehash",
            ConfigSection::Switching => "switching",
            ConfigSection::Gui => "gui",
        }
    }

    /// Whether this section differs between two settings values.
    pub fn differs(&self, a: &Settings, b: &Settings) -> bool {
        match self {
            ConfigSection::Nicehash => a.nicehash != b.nicehash,
            ConfigSection::Switching => a.switching != b.switching,
            ConfigSection::Gui => a.gui != b.gui,
        }
    }
}
