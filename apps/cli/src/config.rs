//! # Proposal Configuration
//!
//! Settings for the `avquote` tool: company name, target currency, default
//! margin, tax policy, exchange-rate source and output directory.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --currency INR --margin 12.5 --output ./out                        │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     AVQUOTE_CURRENCY=INR                                               │
//! │     AVQUOTE_RATES_SOURCE=fixed                                         │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/avquote/avquote.toml (Linux)                             │
//! │     ~/Library/Application Support/com.avquote.avquote/avquote.toml     │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     USD, 0% margin, 18% tax (9% + 9% for INR), live rates              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [company]
//! name = "All Wave AV Systems"
//!
//! [pricing]
//! currency = "INR"
//! default_margin = 15
//!
//! [tax]
//! single_rate_bps = 1800
//! split_rate_bps = [900, 900]
//! split_currencies = ["INR"]
//!
//! [rates]
//! source = "http"   # http | fixed | none
//! url = "https://api.exchangerate-api.com/v4/latest/USD"
//! timeout_secs = 10
//!
//! [rates.fixed]
//! INR = 83.0
//!
//! [output]
//! dir = "./proposals"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use avquote_core::currency::normalize_code;
use avquote_core::validation::{validate_currency_code, validate_margin, validate_tax_rate};
use avquote_core::{Margin, TaxPolicy, TaxRate, DEFAULT_SINGLE_TAX_BPS, DEFAULT_SPLIT_TAX_BPS};
use avquote_rates::DEFAULT_RATES_URL;

/// File name used inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "avquote.toml";

// =============================================================================
// Config Errors
// =============================================================================

/// Result type alias for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failures while loading, validating or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file could not be written.
    #[error("Failed to write config {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is present but unusable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No `--config` was given and no platform config directory exists.
    #[error("No config path available")]
    NoConfigPath,
}

// =============================================================================
// Rate Source
// =============================================================================

/// Where exchange rates come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// Public JSON endpoint.
    #[default]
    Http,

    /// The `[rates.fixed]` table.
    Fixed,

    /// No conversion: prices are already in the target currency.
    None,
}

impl std::fmt::Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateSource::Http => write!(f, "http"),
            RateSource::Fixed => write!(f, "fixed"),
            RateSource::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for RateSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" | "live" => Ok(RateSource::Http),
            "fixed" | "static" => Ok(RateSource::Fixed),
            "none" | "off" => Ok(RateSource::None),
            other => Err(ConfigError::Invalid(format!(
                "Unknown rate source: '{}'. Valid options: http, fixed, none",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Company details written into the workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySettings {
    #[serde(default = "default_company_name")]
    pub name: String,
}

fn default_company_name() -> String {
    "All Wave AV Systems".to_string()
}

impl Default for CompanySettings {
    fn default() -> Self {
        CompanySettings {
            name: default_company_name(),
        }
    }
}

/// Target currency and default margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Proposal currency (ISO 4217).
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Margin percent for items without an override.
    #[serde(default)]
    pub default_margin: Decimal,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            currency: default_currency(),
            default_margin: Decimal::ZERO,
        }
    }
}

/// Tax rates and which currencies use the split form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSettings {
    #[serde(default = "default_single_rate")]
    pub single_rate_bps: u32,

    #[serde(default = "default_split_rates")]
    pub split_rate_bps: [u32; 2],

    #[serde(default = "default_split_currencies")]
    pub split_currencies: Vec<String>,
}

fn default_single_rate() -> u32 {
    DEFAULT_SINGLE_TAX_BPS
}

fn default_split_rates() -> [u32; 2] {
    [DEFAULT_SPLIT_TAX_BPS, DEFAULT_SPLIT_TAX_BPS]
}

fn default_split_currencies() -> Vec<String> {
    vec!["INR".to_string()]
}

impl Default for TaxSettings {
    fn default() -> Self {
        TaxSettings {
            single_rate_bps: default_single_rate(),
            split_rate_bps: default_split_rates(),
            split_currencies: default_split_currencies(),
        }
    }
}

impl TaxSettings {
    /// The core tax policy these settings describe.
    pub fn policy(&self) -> TaxPolicy {
        TaxPolicy {
            single_rate: TaxRate::from_bps(self.single_rate_bps),
            split_rates: (
                TaxRate::from_bps(self.split_rate_bps[0]),
                TaxRate::from_bps(self.split_rate_bps[1]),
            ),
            split_currencies: self.split_currencies.clone(),
        }
    }
}

/// Exchange-rate lookup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSettings {
    #[serde(default)]
    pub source: RateSource,

    /// Endpoint for `source = "http"`.
    #[serde(default = "default_rates_url")]
    pub url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries for transient HTTP failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Units per USD, for `source = "fixed"`.
    #[serde(default)]
    pub fixed: BTreeMap<String, Decimal>,
}

fn default_rates_url() -> String {
    DEFAULT_RATES_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}

impl Default for RateSettings {
    fn default() -> Self {
        RateSettings {
            source: RateSource::default(),
            url: default_rates_url(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            fixed: BTreeMap::new(),
        }
    }
}

/// Where proposals are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            dir: default_output_dir(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete `avquote` configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposalConfig {
    #[serde(default)]
    pub company: CompanySettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub tax: TaxSettings,

    #[serde(default)]
    pub rates: RateSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl ProposalConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (avquote.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses one config file without applying overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file and returns the path written.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents = self.to_toml()?;
        std::fs::write(&path, contents).map_err(write_err)?;

        info!(path = %path.display(), "Config saved");
        Ok(path)
    }

    /// Pretty TOML for `config show` and `config init`.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let invalid = |e: avquote_core::ValidationError| ConfigError::Invalid(e.to_string());

        validate_currency_code(&self.pricing.currency).map_err(invalid)?;
        validate_margin(Margin::from_percent(self.pricing.default_margin)).map_err(invalid)?;

        validate_tax_rate(TaxRate::from_bps(self.tax.single_rate_bps)).map_err(invalid)?;
        for bps in self.tax.split_rate_bps {
            validate_tax_rate(TaxRate::from_bps(bps)).map_err(invalid)?;
        }
        for code in &self.tax.split_currencies {
            validate_currency_code(code).map_err(invalid)?;
        }

        if self.rates.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "rates.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.rates.source == RateSource::Http
            && !self.rates.url.starts_with("http://")
            && !self.rates.url.starts_with("https://")
        {
            return Err(ConfigError::Invalid(format!(
                "rates.url must start with http:// or https://, got: '{}'",
                self.rates.url
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Currency
        if let Some(currency) = lookup("AVQUOTE_CURRENCY") {
            debug!(currency = %currency, "Overriding currency from environment");
            self.pricing.currency = normalize_code(&currency);
        }

        // Default margin
        if let Some(margin) = lookup("AVQUOTE_DEFAULT_MARGIN") {
            match margin.trim().parse::<Decimal>() {
                Ok(m) => self.pricing.default_margin = m,
                Err(_) => warn!(margin = %margin, "Ignoring unparseable margin in environment"),
            }
        }

        // Rate source
        if let Some(source) = lookup("AVQUOTE_RATES_SOURCE") {
            match source.parse() {
                Ok(parsed) => {
                    debug!(source = %source, "Overriding rate source from environment");
                    self.rates.source = parsed;
                }
                Err(_) => warn!(source = %source, "Unknown rate source in environment"),
            }
        }

        // Rate URL
        if let Some(url) = lookup("AVQUOTE_RATES_URL") {
            self.rates.url = url;
        }

        // Output directory
        if let Some(dir) = lookup("AVQUOTE_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }

        // Company name
        if let Some(name) = lookup("AVQUOTE_COMPANY_NAME") {
            self.company.name = name;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "avquote", "avquote")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Target currency, upper-cased.
    pub fn currency(&self) -> String {
        normalize_code(&self.pricing.currency)
    }

    pub fn default_margin(&self) -> Margin {
        Margin::from_percent(self.pricing.default_margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    #[test]
    fn test_rate_source_parsing() {
        assert_eq!("http".parse::<RateSource>().unwrap(), RateSource::Http);
        assert_eq!("FIXED".parse::<RateSource>().unwrap(), RateSource::Fixed);
        assert_eq!("off".parse::<RateSource>().unwrap(), RateSource::None);
        assert!("ftp".parse::<RateSource>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ProposalConfig::default();
        assert_eq!(config.currency(), "USD");
        assert_eq!(config.default_margin(), Margin::zero());
        assert_eq!(config.rates.source, RateSource::Http);
        assert_eq!(config.rates.url, DEFAULT_RATES_URL);
        assert_eq!(config.tax.policy(), TaxPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ProposalConfig::default();

        config.pricing.currency = "RUPEES".to_string();
        assert!(config.validate().is_err());
        config.pricing.currency = "INR".to_string();

        config.pricing.default_margin = dec!(-100);
        assert!(config.validate().is_err());
        config.pricing.default_margin = dec!(12.5);

        config.rates.timeout_secs = 0;
        assert!(config.validate().is_err());
        config.rates.timeout_secs = 5;

        config.rates.url = "ftp://rates".to_string();
        assert!(config.validate().is_err());
        config.rates.source = RateSource::Fixed;
        assert!(config.validate().is_ok());

        config.tax.split_rate_bps = [900, 20_000];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: ProposalConfig = toml::from_str(
            r#"
            [pricing]
            currency = "INR"
            default_margin = 15

            [rates]
            source = "fixed"

            [rates.fixed]
            INR = 83.25
            "#,
        )
        .unwrap();

        assert_eq!(config.currency(), "INR");
        assert_eq!(config.pricing.default_margin, dec!(15));
        assert_eq!(config.rates.source, RateSource::Fixed);
        assert_eq!(config.rates.fixed.get("INR"), Some(&dec!(83.25)));
        assert_eq!(config.rates.timeout_secs, 10);
        assert_eq!(config.tax.split_currencies, vec!["INR".to_string()]);
        assert_eq!(config.company.name, "All Wave AV Systems");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("AVQUOTE_CURRENCY", "inr"),
            ("AVQUOTE_DEFAULT_MARGIN", "7.5"),
            ("AVQUOTE_RATES_SOURCE", "none"),
            ("AVQUOTE_OUTPUT_DIR", "/tmp/quotes"),
            ("AVQUOTE_COMPANY_NAME", "Acme AV"),
        ]
        .into_iter()
        .collect();

        let mut config = ProposalConfig::default();
        config.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.pricing.currency, "INR");
        assert_eq!(config.pricing.default_margin, dec!(7.5));
        assert_eq!(config.rates.source, RateSource::None);
        assert_eq!(config.output.dir, PathBuf::from("/tmp/quotes"));
        assert_eq!(config.company.name, "Acme AV");
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let mut config = ProposalConfig::default();
        config.apply_overrides_from(|key| match key {
            "AVQUOTE_DEFAULT_MARGIN" => Some("lots".to_string()),
            "AVQUOTE_RATES_SOURCE" => Some("carrier-pigeon".to_string()),
            _ => None,
        });

        assert_eq!(config.pricing.default_margin, Decimal::ZERO);
        assert_eq!(config.rates.source, RateSource::Http);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = ProposalConfig::default();
        config.pricing.currency = "EUR".to_string();
        config.pricing.default_margin = dec!(12.5);
        config.rates.source = RateSource::Fixed;
        config.rates.fixed.insert("EUR".to_string(), dec!(0.92));

        let written = config.save(Some(path.clone())).unwrap();
        assert_eq!(written, path);

        let loaded = ProposalConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProposalConfig::load_or_default(Some(dir.path().join("absent.toml")));
        assert_eq!(config.pricing.default_margin, ProposalConfig::default().pricing.default_margin);
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = ProposalConfig::default().to_toml().unwrap();
        assert!(toml_str.contains("[pricing]"));
        assert!(toml_str.contains("[rates]"));
        assert!(toml_str.contains("[tax]"));
    }
}
