//! Command handlers and the pricing pipeline they share.

pub mod config;
pub mod currencies;
pub mod export;
pub mod totals;

use std::path::Path;

use anyhow::Context;
use tracing::{debug, info};

use avquote_core::validation::{validate_currency_code, validate_margin, validate_project};
use avquote_core::{ExchangeRate, Margin, PricingContext, Project};
use avquote_rates::{resolve_rate, FixedRateProvider, HttpRateProvider, RateProvider, RateTable};

use crate::cli::PricingArgs;
use crate::config::{ProposalConfig, RateSource};

/// A validated project with the context it will be priced under.
#[derive(Debug)]
pub struct PreparedProject {
    pub config: ProposalConfig,
    pub project: Project,
    pub currency: String,
    pub context: PricingContext,
}

/// Reads a project JSON file.
pub fn load_project(path: &Path) -> anyhow::Result<Project> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read project file {}", path.display()))?;
    let project: Project = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse project file {}", path.display()))?;

    debug!(
        rooms = project.rooms.len(),
        items = project.item_count(),
        "Loaded project"
    );
    Ok(project)
}

/// Loads config and applies command-line overrides on top.
pub fn load_config(args: &PricingArgs) -> anyhow::Result<ProposalConfig> {
    let mut config = ProposalConfig::load(args.config.clone()).context("Failed to load config")?;

    if let Some(currency) = &args.currency {
        validate_currency_code(currency)?;
        config.pricing.currency = currency.trim().to_uppercase();
    }
    if let Some(margin) = args.margin {
        validate_margin(Margin::from_percent(margin))?;
        config.pricing.default_margin = margin;
    }

    Ok(config)
}

/// Rate provider for the configured source. `None` means no conversion.
pub fn build_provider(config: &ProposalConfig) -> anyhow::Result<Option<Box<dyn RateProvider>>> {
    let provider: Box<dyn RateProvider> = match config.rates.source {
        RateSource::None => return Ok(None),
        RateSource::Fixed => Box::new(FixedRateProvider::new(RateTable::new(
            "USD",
            config.rates.fixed.clone(),
        ))),
        RateSource::Http => Box::new(
            HttpRateProvider::new(&config.rates.url, config.rates.timeout_secs)?
                .with_max_retries(config.rates.max_retries),
        ),
    };
    Ok(Some(provider))
}

/// Rate for the configured currency, or 1.0 when conversion is off or fails.
pub async fn exchange_rate(config: &ProposalConfig) -> anyhow::Result<ExchangeRate> {
    let currency = config.currency();
    match build_provider(config)? {
        Some(provider) => Ok(resolve_rate(provider.as_ref(), &currency).await.rate),
        None => {
            debug!(currency = %currency, "Rate conversion disabled");
            Ok(ExchangeRate::identity())
        }
    }
}

/// Loads, validates and sets up pricing for the project in `args`.
pub async fn prepare(args: &PricingArgs) -> anyhow::Result<PreparedProject> {
    let config = load_config(args)?;
    let project = load_project(&args.input)?;
    validate_project(&project)?;

    let currency = config.currency();
    let rate = exchange_rate(&config).await?;
    let context = PricingContext::new(
        rate,
        config.default_margin(),
        config.tax.policy().mode_for(&currency),
    );

    info!(
        currency = %currency,
        rate = %rate.value(),
        margin = %config.default_margin(),
        "Pricing project"
    );

    Ok(PreparedProject {
        config,
        project,
        currency,
        context,
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use avquote_core::{TaxMode, TaxRate};
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_project() {
        let dir = tempfile::tempdir().unwrap();
        let (input, _) = write_fixture(dir.path());

        let project = load_project(&input).unwrap();
        assert_eq!(project.client.project_name, "HQ Fit-out");
        assert_eq!(project.rooms.len(), 2);
        assert_eq!(project.item_count(), 2);
    }

    #[test]
    fn test_load_project_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_project(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_cli_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let (input, config) = write_fixture(dir.path());
        let mut args = pricing_args(input, config, "eur");
        args.margin = Some(dec!(20));

        let config = load_config(&args).unwrap();
        assert_eq!(config.currency(), "EUR");
        assert_eq!(config.default_margin(), Margin::from_units(20));
    }

    #[test]
    fn test_invalid_cli_currency() {
        let dir = tempfile::tempdir().unwrap();
        let (input, config) = write_fixture(dir.path());
        let args = pricing_args(input, config, "RUPEE");
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_no_provider_when_conversion_is_off() {
        let mut config = ProposalConfig::default();
        config.rates.source = RateSource::None;
        assert!(build_provider(&config).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_prepare_with_fixed_rates() {
        let dir = tempfile::tempdir().unwrap();
        let (input, config) = write_fixture(dir.path());

        let prepared = prepare(&pricing_args(input, config, "INR")).await.unwrap();
        assert_eq!(prepared.currency, "INR");
        assert_eq!(prepared.context.rate.value(), dec!(80));
        assert_eq!(
            prepared.context.tax_mode,
            TaxMode::split(TaxRate::from_bps(900), TaxRate::from_bps(900))
        );
    }

    #[tokio::test]
    async fn test_missing_fixed_rate_falls_back_to_identity() {
        let dir = tempfile::tempdir().unwrap();
        let (input, config) = write_fixture(dir.path());

        let prepared = prepare(&pricing_args(input, config, "GBP")).await.unwrap();
        assert!(prepared.context.rate.is_identity());
        assert_eq!(
            prepared.context.tax_mode,
            TaxMode::single(TaxRate::from_bps(1800))
        );
    }

    #[tokio::test]
    async fn test_prepare_rejects_oversized_unit_price() {
        let dir = tempfile::tempdir().unwrap();
        let (_, config) = write_fixture(dir.path());
        let input = dir.path().join("huge.json");
        std::fs::write(
            &input,
            r#"{ "rooms": [ { "name": "Vault", "boq": [
                { "itemDescription": "Gold panel", "quantity": 10,
                  "unitPrice": 50000000000000000000000000000 } ] } ] }"#,
        )
        .unwrap();

        let err = prepare(&pricing_args(input, config, "INR")).await.unwrap_err();
        assert!(err.to_string().contains("Vault"));
        assert!(err.to_string().contains("unit price"));
    }

    #[tokio::test]
    async fn test_prepare_rejects_invalid_items() {
        let dir = tempfile::tempdir().unwrap();
        let (_, config) = write_fixture(dir.path());
        let input = dir.path().join("bad.json");
        std::fs::write(
            &input,
            r#"{ "rooms": [ { "name": "Lab", "boq": [
                { "itemDescription": "Cable", "quantity": -1, "unitPrice": 5 } ] } ] }"#,
        )
        .unwrap();

        let err = prepare(&pricing_args(input, config, "USD")).await.unwrap_err();
        assert!(err.to_string().contains("Lab"));
    }
}
