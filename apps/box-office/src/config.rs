//! # Box Office Configuration
//!
//! Configuration loaded once at startup; read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ENCORE_CURRENCY_SYMBOL=€                                           │
//! │     ENCORE_OUTPUT=json                                                 │
//! │     ENCORE_VOUCHER_RATE=0.20                                           │
//! │     ENCORE_RESERVATION_ID_FLOOR=123455                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or ENCORE_CONFIG, or                              │
//! │     ~/.config/encore/box-office.toml (Linux)                           │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     The demo venue: 35.00 for performance 1, 28.50 otherwise          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # box-office.toml
//! currency_symbol = "€"
//! reservation_id_floor = 123455
//! output = "xml"
//!
//! [pricing]
//! subscriber_discount_percent = "17.5"
//! default_price = "28.50"
//!
//! [[pricing.prices]]
//! performance_id = 1
//! price = "35.00"
//!
//! [voucher]
//! rate = "0.20"
//! valid_until = "2023-04-30T00:00:00Z"
//!
//! [subscriptions]
//! customers = [1]
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use encore_core::validation::{validate_fraction, validate_percent};
use encore_core::{
    Amount, CustomerId, PerformanceId, PricingPolicy, Rate, ReservationId, VoucherProgram,
    DEFAULT_RESERVATION_ID_FLOOR, SUBSCRIBER_DISCOUNT_PERCENT,
};
use encore_store::{FixedPriceCatalog, NoVoucher, SubscriberList, VoucherWindow};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Output Format
// =============================================================================

/// How receipts are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xml,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Xml => f.write_str("xml"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xml" => Ok(OutputFormat::Xml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidValue(format!("output format '{}'", s))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Base price of one performance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformancePrice {
    pub performance_id: PerformanceId,
    pub price: Amount,
}

/// Catalogue prices and the subscriber discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Percent taken off a subscriber's subtotal.
    pub subscriber_discount_percent: Decimal,

    /// Price of performances without an explicit entry.
    pub default_price: Amount,

    pub prices: Vec<PerformancePrice>,
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            subscriber_discount_percent: SUBSCRIBER_DISCOUNT_PERCENT,
            default_price: Amount::from_decimal(Decimal::new(2850, 2)),
            prices: vec![PerformancePrice {
                performance_id: 1,
                price: Amount::from_decimal(Decimal::new(3500, 2)),
            }],
        }
    }
}

/// Voucher window; no voucher at all when `valid_until` is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoucherSettings {
    /// Fraction taken off, `0.20` = 20 % off.
    pub rate: Rate,

    /// The voucher applies to performances starting strictly before this.
    pub valid_until: Option<DateTime<Utc>>,
}

impl Default for VoucherSettings {
    fn default() -> Self {
        VoucherSettings {
            rate: Rate::from_decimal(Decimal::new(20, 2)),
            valid_until: Utc.with_ymd_and_hms(2023, 4, 30, 0, 0, 0).single(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionSettings {
    pub customers: Vec<CustomerId>,
}

impl Default for SubscriptionSettings {
    fn default() -> Self {
        SubscriptionSettings { customers: vec![1] }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete box office configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxOfficeConfig {
    /// Appended to every amount on a receipt.
    pub currency_symbol: String,

    /// The first reservation id is this value plus one.
    pub reservation_id_floor: ReservationId,

    pub output: OutputFormat,

    pub pricing: PricingSettings,

    pub voucher: VoucherSettings,

    pub subscriptions: SubscriptionSettings,
}

impl Default for BoxOfficeConfig {
    fn default() -> Self {
        BoxOfficeConfig {
            currency_symbol: "€".to_string(),
            reservation_id_floor: DEFAULT_RESERVATION_ID_FLOOR,
            output: OutputFormat::Xml,
            pricing: PricingSettings::default(),
            voucher: VoucherSettings::default(),
            subscriptions: SubscriptionSettings::default(),
        }
    }
}

impl BoxOfficeConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file: `config_path`, else `ENCORE_CONFIG`, else the
    ///    platform config directory
    /// 3. Environment variables
    ///
    /// An explicitly named file must exist; the platform default may be
    /// missing.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.or_else(|| std::env::var_os("ENCORE_CONFIG").map(PathBuf::from));

        let mut config = match explicit {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path)),
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading box office config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks ranges that serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_percent(
            "pricing.subscriber_discount_percent",
            self.pricing.subscriber_discount_percent,
        )
        .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        validate_fraction("voucher.rate", self.voucher.rate.as_decimal())
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        if self.reservation_id_floor < 0 || self.reservation_id_floor == ReservationId::MAX {
            return Err(ConfigError::InvalidValue(format!(
                "reservation_id_floor must be between 0 and {}",
                ReservationId::MAX - 1
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `ENCORE_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(symbol) = lookup("ENCORE_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(output) = lookup("ENCORE_OUTPUT") {
            debug!(output = %output, "Overriding output format from environment");
            self.output = output.parse()?;
        }

        if let Some(rate) = lookup("ENCORE_VOUCHER_RATE") {
            self.voucher.rate = rate
                .parse()
                .map_err(|_| ConfigError::InvalidValue("ENCORE_VOUCHER_RATE".to_string()))?;
        }

        if let Some(floor) = lookup("ENCORE_RESERVATION_ID_FLOOR") {
            self.reservation_id_floor = floor.parse().map_err(|_| {
                ConfigError::InvalidValue("ENCORE_RESERVATION_ID_FLOOR".to_string())
            })?;
        }

        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "encore", "encore")
            .map(|dirs| dirs.config_dir().join("box-office.toml"))
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    pub fn price_catalog(&self) -> FixedPriceCatalog {
        self.pricing
            .prices
            .iter()
            .fold(FixedPriceCatalog::new(self.pricing.default_price), |catalog, entry| {
                catalog.with_price(entry.performance_id, entry.price)
            })
    }

    pub fn voucher_program(&self) -> Arc<dyn VoucherProgram> {
        match self.voucher.valid_until {
            Some(valid_until) => Arc::new(VoucherWindow::new(self.voucher.rate, valid_until)),
            None => Arc::new(NoVoucher),
        }
    }

    pub fn subscribers(&self) -> SubscriberList {
        self.subscriptions.customers.iter().copied().collect()
    }

    pub fn pricing_policy(&self) -> PricingPolicy {
        PricingPolicy::with_subscriber_discount_percent(self.pricing.subscriber_discount_percent)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
