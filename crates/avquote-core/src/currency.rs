//! # Currency Metadata & Tax Policy
//!
//! Display metadata for supported currencies, and the policy that picks a
//! [`TaxMode`] from the target currency.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tax Mode Selection                               │
//! │                                                                         │
//! │   target currency ──► in split_currencies? ──yes──► SplitDualRate       │
//! │                              │                      (9% + 9%)           │
//! │                              no                                         │
//! │                              ▼                                          │
//! │                         SingleRate (18%)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{TaxMode, TaxRate};
use crate::{DEFAULT_SINGLE_TAX_BPS, DEFAULT_SPLIT_TAX_BPS};

// =============================================================================
// Currency Metadata
// =============================================================================

/// Display metadata for one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyInfo {
    /// ISO 4217 code.
    pub code: &'static str,
    /// Symbol used in money number formats.
    pub symbol: &'static str,
    /// English name.
    pub name: &'static str,
}

/// Currencies the quoting tool knows how to label.
pub const CURRENCIES: &[CurrencyInfo] = &[
    CurrencyInfo { code: "USD", symbol: "$", name: "US Dollar" },
    CurrencyInfo { code: "EUR", symbol: "€", name: "Euro" },
    CurrencyInfo { code: "GBP", symbol: "£", name: "British Pound" },
    CurrencyInfo { code: "INR", symbol: "₹", name: "Indian Rupee" },
    CurrencyInfo { code: "AED", symbol: "د.إ", name: "UAE Dirham" },
    CurrencyInfo { code: "SGD", symbol: "S$", name: "Singapore Dollar" },
    CurrencyInfo { code: "AUD", symbol: "A$", name: "Australian Dollar" },
    CurrencyInfo { code: "CAD", symbol: "C$", name: "Canadian Dollar" },
    CurrencyInfo { code: "JPY", symbol: "¥", name: "Japanese Yen" },
];

/// Upper-cases and trims a currency code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Looks up metadata by code, case-insensitively.
pub fn lookup(code: &str) -> Option<&'static CurrencyInfo> {
    let code = normalize_code(code);
    CURRENCIES.iter().find(|info| info.code == code)
}

/// Symbol for `code`, or an empty string for unknown currencies.
pub fn symbol_for(code: &str) -> &'static str {
    lookup(code).map(|info| info.symbol).unwrap_or("")
}

// =============================================================================
// Tax Policy
// =============================================================================

/// Maps a target currency to the tax mode applied to a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxPolicy {
    /// Rate for currencies not in `split_currencies`.
    pub single_rate: TaxRate,
    /// The two component rates for split-tax currencies.
    pub split_rates: (TaxRate, TaxRate),
    /// Currencies billed with two tax components.
    pub split_currencies: Vec<String>,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        TaxPolicy {
            single_rate: TaxRate::from_bps(DEFAULT_SINGLE_TAX_BPS),
            split_rates: (
                TaxRate::from_bps(DEFAULT_SPLIT_TAX_BPS),
                TaxRate::from_bps(DEFAULT_SPLIT_TAX_BPS),
            ),
            split_currencies: vec!["INR".to_string()],
        }
    }
}

impl TaxPolicy {
    /// Returns true if `code` is billed with split tax.
    pub fn is_split_currency(&self, code: &str) -> bool {
        let code = normalize_code(code);
        self.split_currencies
            .iter()
            .any(|split| normalize_code(split) == code)
    }

    /// Picks the tax mode for a target currency.
    pub fn mode_for(&self, code: &str) -> TaxMode {
        if self.is_split_currency(code) {
            TaxMode::split(self.split_rates.0, self.split_rates.1)
        } else {
            TaxMode::single(self.single_rate)
        }
    }
}
