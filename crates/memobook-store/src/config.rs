//! # Store Configuration
//!
//! Shop settings and lookup defaults.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MEMOBOOK_SHOP_NAME="RAJ TRADERS"                                   │
//! │     MEMOBOOK_UTC_OFFSET_MINUTES=360                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/memobook/memobook.toml (Linux)                           │
//! │     ~/Library/Application Support/com.memobook.memobook/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     RAJ TRADERS, BDT., UTC+06:00, 10 suggestions                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # memobook.toml
//! [shop]
//! name = "RAJ TRADERS"
//! currency_label = "BDT."
//! utc_offset_minutes = 360
//!
//! [lookup]
//! search_limit = 10
//! ```

use chrono::{FixedOffset, Offset, Utc};
use memobook_core::report::{DEFAULT_CURRENCY_LABEL, DEFAULT_SHOP_NAME};
use memobook_core::ReportSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// Upper bound for `lookup.search_limit`.
pub const MAX_SEARCH_LIMIT: usize = 100;

/// Widest offset accepted, in minutes (just under a day).
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

// =============================================================================
// Shop Settings
// =============================================================================

/// Who the shop is and where its days start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopSettings {
    /// Printed at the top of memo receipts.
    #[serde(default = "default_shop_name")]
    pub name: String,

    /// Placed before amounts, e.g. `BDT. 170.00`.
    #[serde(default = "default_currency_label")]
    pub currency_label: String,

    /// Offset of the shop's wall clock from UTC. Decides which calendar day
    /// a memo belongs to.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

fn default_shop_name() -> String {
    DEFAULT_SHOP_NAME.to_string()
}

fn default_currency_label() -> String {
    DEFAULT_CURRENCY_LABEL.to_string()
}

fn default_utc_offset_minutes() -> i32 {
    6 * 60 // Asia/Dhaka
}

impl Default for ShopSettings {
    fn default() -> Self {
        ShopSettings {
            name: default_shop_name(),
            currency_label: default_currency_label(),
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

// =============================================================================
// Lookup Settings
// =============================================================================

/// Defaults for search-as-you-type lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupSettings {
    /// Suggestions returned when the caller passes no limit.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

fn default_search_limit() -> usize {
    10
}

impl Default for LookupSettings {
    fn default() -> Self {
        LookupSettings {
            search_limit: default_search_limit(),
        }
    }
}

// =============================================================================
// Main Store Configuration
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub shop: ShopSettings,

    #[serde(default)]
    pub lookup: LookupSettings,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (memobook.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document. Missing sections and keys take defaults.
    pub fn from_toml_str(contents: &str) -> StoreResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Store config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.shop.name.trim().is_empty() {
            return Err(StoreError::InvalidConfig("shop.name must not be empty".into()));
        }

        if self.shop.currency_label.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "shop.currency_label must not be empty".into(),
            ));
        }

        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&self.shop.utc_offset_minutes) {
            return Err(StoreError::InvalidConfig(format!(
                "shop.utc_offset_minutes must be within ±{}, got {}",
                MAX_OFFSET_MINUTES, self.shop.utc_offset_minutes
            )));
        }

        if self.lookup.search_limit == 0 || self.lookup.search_limit > MAX_SEARCH_LIMIT {
            return Err(StoreError::InvalidConfig(format!(
                "lookup.search_limit must be between 1 and {}",
                MAX_SEARCH_LIMIT
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = var("MEMOBOOK_SHOP_NAME") {
            debug!(shop = %name, "Overriding shop name from environment");
            self.shop.name = name;
        }

        if let Some(label) = var("MEMOBOOK_CURRENCY") {
            self.shop.currency_label = label;
        }

        if let Some(offset) = var("MEMOBOOK_UTC_OFFSET_MINUTES") {
            match offset.parse::<i32>() {
                Ok(minutes) => {
                    debug!(minutes, "Overriding UTC offset from environment");
                    self.shop.utc_offset_minutes = minutes;
                }
                Err(_) => warn!(value = %offset, "Ignoring non-numeric MEMOBOOK_UTC_OFFSET_MINUTES"),
            }
        }

        if let Some(limit) = var("MEMOBOOK_SEARCH_LIMIT") {
            match limit.parse::<usize>() {
                Ok(n) => self.lookup.search_limit = n,
                Err(_) => warn!(value = %limit, "Ignoring non-numeric MEMOBOOK_SEARCH_LIMIT"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "memobook", "memobook")
            .map(|dirs| dirs.config_dir().join("memobook.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The shop's offset from UTC. Falls back to UTC for an out-of-range value
    /// (which `validate` rejects).
    pub fn utc_offset(&self) -> FixedOffset {
        self.shop
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Settings stamped on every assembled report.
    pub fn report_settings(&self) -> ReportSettings {
        ReportSettings {
            shop_name: self.shop.name.clone(),
            currency_label: self.shop.currency_label.clone(),
            utc_offset: self.utc_offset(),
        }
    }

    /// Clamps a caller-supplied limit, falling back to the configured default.
    pub fn search_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.lookup.search_limit)
            .clamp(1, MAX_SEARCH_LIMIT)
    }
}
