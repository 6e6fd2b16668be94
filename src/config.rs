//! Vault configuration module
//!
//! Parses and manages tool configuration from YAML files.
//! Takes the place of the GUI settings store: where the saves live, where the
//! item tables live, and which content variant to assume.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::regen::VariantPolicy;

/// Main vault configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    // ============================================
    // Locations
    // ============================================
    /// Directory holding packed saves and/or unpacked save directories
    pub save_dir: String,

    /// Directory holding itemdat.tsv, unique_itemdat.tsv and the affix tables
    #[serde(default = "default_txtdata_dir")]
    pub txtdata_dir: String,

    // ============================================
    // Save format
    // ============================================
    /// Name of the player record inside packed saves
    #[serde(default = "default_hero_entry")]
    pub hero_entry: String,

    /// auto / diablo / hellfire
    #[serde(default)]
    pub variant: VariantPolicy,
}

// ============================================
// Default value functions
// ============================================

fn default_txtdata_dir() -> String {
    "./txtdata/".to_string()
}

fn default_hero_entry() -> String {
    crate::save::HERO_ENTRY.to_string()
}

impl VaultConfig {
    /// Load configuration from a YAML file
    ///
    /// # Example
    /// ```no_run
    /// use dvault::config::VaultConfig;
    ///
    /// let config = VaultConfig::from_file("conf/vault.yaml")
    ///     .expect("Failed to load config");
    /// println!("saves: {}", config.save_dir);
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: VaultConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML in {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from a YAML string
    pub fn from_str(contents: &str) -> Result<Self> {
        let config: VaultConfig =
            serde_yaml::from_str(contents).context("Failed to parse YAML")?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.save_dir.trim().is_empty(), "save_dir cannot be empty");
        anyhow::ensure!(!self.txtdata_dir.trim().is_empty(), "txtdata_dir cannot be empty");
        anyhow::ensure!(!self.hero_entry.is_empty(), "hero_entry cannot be empty");
        anyhow::ensure!(
            !self.hero_entry.contains(['/', '\\']),
            "hero_entry must be a plain entry name: {}",
            self.hero_entry
        );
        Ok(())
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(&self).context("Failed to serialize config to YAML")?;

        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config to {}", path.as_ref().display()))?;

        Ok(())
    }
}
