//! Buyback API configuration module.
//!
//! ## Sources (later wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. serde defaults            (service starts with no files at all)    │
//! │  2. config/default.toml       (optional)                               │
//! │  3. config/{RUN_MODE}.toml    (optional, RUN_MODE=development)          │
//! │  4. BUYBACK__SECTION__KEY     (e.g. BUYBACK__SERVER__PORT=8080)        │
//! │  5. UPC_API_KEY               (only when lookup.api_key is empty)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use buyback_core::money::Money;
use buyback_core::pricing::{PricingTier, TierBound, TierName, TierTable};
use buyback_core::ValidationError;
use serde::Deserialize;

/// Value shipped in the sample env file; treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

// =============================================================================
// Settings
// =============================================================================

/// Buyback API configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub lookup: LookupSettings,
    pub database: DatabaseSettings,
    pub inventory: InventorySettings,
    pub admin: AdminSettings,
    pub pricing: PricingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// External product database.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    pub base_url: String,
    /// Empty or the placeholder means lookups answer `NotConfigured`.
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for LookupSettings {
    fn default() -> Self {
        LookupSettings {
            base_url: "https://api.upcdatabase.org".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

impl LookupSettings {
    /// The usable API key, if one is configured.
    pub fn api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        if key.is_empty() || key == PLACEHOLDER_API_KEY {
            None
        } else {
            Some(key)
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// SQLite mirror.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Empty → in-memory only, nothing persisted.
    pub path: String,
}

impl DatabaseSettings {
    pub fn path(&self) -> Option<PathBuf> {
        let path = self.path.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InventorySettings {
    /// Write the demo stock levels at startup.
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
    /// Mount `/admin/inventory`.
    pub enabled: bool,
}

/// Tier table override. Absent or empty → standard table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    pub tiers: Vec<TierSettings>,
}

/// One `[[pricing.tiers]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TierSettings {
    pub name: String,
    /// Omit for an unbounded tier.
    pub max_count: Option<u64>,
    pub price_cents: i64,
}

impl PricingSettings {
    /// Builds the validated tier table.
    ///
    /// ## Example
    /// ```toml
    /// [[pricing.tiers]]
    /// name = "HIGH_DEMAND"
    /// max_count = 5
    /// price_cents = 500
    ///
    /// [[pricing.tiers]]
    /// name = "OVERSUPPLIED"
    /// max_count = 40          # counts above 40 → NOT_ACCEPTING
    /// price_cents = 100
    /// ```
    pub fn tier_table(&self) -> Result<TierTable, ConfigError> {
        if self.tiers.is_empty() {
            return Ok(TierTable::standard());
        }

        let tiers = self
            .tiers
            .iter()
            .map(|tier| {
                let name = TierName::from_name(tier.name.trim())
                    .ok_or_else(|| ConfigError::InvalidValue(format!("pricing.tiers.name = {}", tier.name)))?;
                let upper_bound = match tier.max_count {
                    Some(max) => TierBound::AtMost(max),
                    None => TierBound::Unbounded,
                };
                Ok(PricingTier::new(name, upper_bound, Money::from_cents(tier.price_cents)))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(TierTable::new(tiers)?)
    }
}

// =============================================================================
// Loading
// =============================================================================

impl AppConfig {
    /// Load configuration from files and environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        AppConfig::load_from(env::vars().collect())
    }

    /// Same as [`AppConfig::load`], reading variables from `vars` instead of
    /// the process environment.
    pub fn load_from(vars: config::Map<String, String>) -> Result<Self, ConfigError> {
        let run_mode = vars
            .get("RUN_MODE")
            .cloned()
            .unwrap_or_else(|| "development".into());

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(
                config::Environment::with_prefix("BUYBACK")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            )
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;

        if config.lookup.api_key.trim().is_empty() {
            if let Some(key) = vars.get("UPC_API_KEY") {
                config.lookup.api_key = key.clone();
            }
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error(transparent)]
    InvalidTierTable(#[from] ValidationError),
}
