//! # Rate Provider Trait
//!
//! A provider returns a whole [`RateTable`]; picking the target currency out
//! of it is the table's job, so every provider gets the same lookup rules.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use avquote_core::currency::normalize_code;
use avquote_core::validation::validate_exchange_rate;
use avquote_core::{ExchangeRate, ValidationError};

use crate::error::{RatesError, RatesResult};

// =============================================================================
// Rate Table
// =============================================================================

/// Units of each currency per one unit of `base`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    pub base: String,
    pub rates: BTreeMap<String, Decimal>,
}

impl RateTable {
    /// Builds a table, upper-casing every code.
    pub fn new(base: &str, rates: impl IntoIterator<Item = (String, Decimal)>) -> Self {
        RateTable {
            base: normalize_code(base),
            rates: rates
                .into_iter()
                .map(|(code, rate)| (normalize_code(&code), rate))
                .collect(),
        }
    }

    /// Conversion rate from `base` into `currency`.
    ///
    /// ## Rules
    /// - The base currency always converts at 1, listed or not
    /// - Unknown codes are [`RatesError::MissingCurrency`]
    /// - Zero or negative rates are [`RatesError::NonPositiveRate`]
    /// - Rates above `MAX_EXCHANGE_RATE` are [`RatesError::RateTooLarge`]
    pub fn rate_for(&self, currency: &str) -> RatesResult<ExchangeRate> {
        let code = normalize_code(currency);

        let value = match self.rates.get(&code) {
            Some(value) => *value,
            None if code == self.base => return Ok(ExchangeRate::identity()),
            None => return Err(RatesError::MissingCurrency(code)),
        };

        let rate = ExchangeRate::new(value);
        validate_exchange_rate(rate).map_err(|err| match err {
            ValidationError::MustBePositive { .. } => RatesError::NonPositiveRate {
                currency: code,
                rate: value,
            },
            _ => RatesError::RateTooLarge {
                currency: code,
                rate: value,
            },
        })?;
        Ok(rate)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

// =============================================================================
// Provider Trait
// =============================================================================

/// Source of exchange rates.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Short name for logs ("http", "fixed", ...).
    fn name(&self) -> &str;

    /// Fetches the current table.
    async fn fetch_rates(&self) -> RatesResult<RateTable>;
}
