//! # Rate Resolution
//!
//! The one place where a rate lookup failure is absorbed. Pricing always
//! gets a usable rate: the provider's, or 1.0 with a warning.

use tracing::{info, warn};

use avquote_core::currency::normalize_code;
use avquote_core::ExchangeRate;

use crate::error::RatesResult;
use crate::provider::RateProvider;

/// Where a resolved rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateOrigin {
    /// Returned by the provider.
    Provider,
    /// The lookup failed and 1.0 was used instead.
    Fallback,
}

/// A rate ready for pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRate {
    pub rate: ExchangeRate,
    pub origin: RateOrigin,
}

impl ResolvedRate {
    pub fn is_fallback(&self) -> bool {
        self.origin == RateOrigin::Fallback
    }
}

/// Looks up `currency` and propagates any failure.
pub async fn lookup_rate(provider: &dyn RateProvider, currency: &str) -> RatesResult<ExchangeRate> {
    provider.fetch_rates().await?.rate_for(currency)
}

/// Looks up `currency`, falling back to 1.0 on any failure.
pub async fn resolve_rate(provider: &dyn RateProvider, currency: &str) -> ResolvedRate {
    let code = normalize_code(currency);

    match lookup_rate(provider, &code).await {
        Ok(rate) => {
            info!(provider = provider.name(), currency = %code, rate = %rate.value(), "Resolved exchange rate");
            ResolvedRate {
                rate,
                origin: RateOrigin::Provider,
            }
        }
        Err(err) => {
            warn!(
                provider = provider.name(),
                currency = %code,
                error = %err,
                "Exchange rate unavailable, using 1.0"
            );
            ResolvedRate {
                rate: ExchangeRate::identity(),
                origin: RateOrigin::Fallback,
            }
        }
    }
}
