//! Loadout configuration: which boss, raid level and consumables to simulate

use crate::entity::{validate_invocation, validate_path};
use crate::error::SimError;
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_INVOCATION: u32 = 300;
pub const DEFAULT_PATH: u32 = 2;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid loadout: {0}")]
    Invalid(#[from] SimError),
}

/// The boss being fought
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BossKind {
    #[default]
    Akkha,
    #[value(alias = "ba-ba")]
    Baba,
    Zebak,
}

impl BossKind {
    pub const ALL: [BossKind; 3] = [BossKind::Akkha, BossKind::Baba, BossKind::Zebak];

    pub fn display_name(&self) -> &'static str {
        match self {
            BossKind::Akkha => "Akkha",
            BossKind::Baba => "Ba-Ba",
            BossKind::Zebak => "Zebak",
        }
    }
}

impl fmt::Display for BossKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// Custom deserializer for case-insensitive matching
impl<'de> Deserialize<'de> for BossKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "akkha" => Ok(BossKind::Akkha),
            "baba" | "ba-ba" => Ok(BossKind::Baba),
            "zebak" => Ok(BossKind::Zebak),
            _ => Err(serde::de::Error::unknown_variant(&s, &["akkha", "baba", "ba-ba", "zebak"])),
        }
    }
}

/// Main melee weapon used against Ba-Ba
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MeleeWeapon {
    #[default]
    Fang,
    Scythe,
}

/// One simulated setup, loaded from YAML/JSON or assembled from CLI flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadoutConfig {
    #[serde(default)]
    pub boss: BossKind,
    #[serde(default = "default_invocation")]
    pub invocation: u32,
    #[serde(default = "default_path")]
    pub path: u32,
    #[serde(default)]
    pub lightbearer: bool,
    #[serde(default)]
    pub surge_potions: bool,
    #[serde(default)]
    pub liquid_adrenaline: bool,
    #[serde(default)]
    pub melee: MeleeWeapon,
}

fn default_invocation() -> u32 {
    DEFAULT_INVOCATION
}

fn default_path() -> u32 {
    DEFAULT_PATH
}

impl Default for LoadoutConfig {
    fn default() -> Self {
        Self {
            boss: BossKind::default(),
            invocation: DEFAULT_INVOCATION,
            path: DEFAULT_PATH,
            lightbearer: false,
            surge_potions: false,
            liquid_adrenaline: false,
            melee: MeleeWeapon::default(),
        }
    }
}

impl LoadoutConfig {
    /// Load a config from a YAML or JSON file, chosen by extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path)?;
        let path_str = path.as_ref().to_string_lossy().to_lowercase();

        let config: LoadoutConfig = if path_str.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: LoadoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: LoadoutConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        validate_invocation(self.invocation)?;
        validate_path(self.path)
    }

    /// This loadout with every on/off combination of the three consumable flags
    pub fn flag_combinations(&self) -> Vec<LoadoutConfig> {
        let mut combos = Vec::with_capacity(8);
        for lightbearer in [false, true] {
            for surge_potions in [false, true] {
                for liquid_adrenaline in [false, true] {
                    combos.push(LoadoutConfig {
                        lightbearer,
                        surge_potions,
                        liquid_adrenaline,
                        ..self.clone()
                    });
                }
            }
        }
        combos
    }

    /// Short human-readable label of the consumable flags
    pub fn flags_label(&self) -> String {
        let on_off = |b: bool| if b { "on" } else { "off" };
        format!(
            "lightbearer={} surge={} adrenaline={}",
            on_off(self.lightbearer),
            on_off(self.surge_potions),
            on_off(self.liquid_adrenaline)
        )
    }
}
