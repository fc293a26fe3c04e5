//! # Rate Error Types
//!
//! Error types for exchange-rate lookups.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Rate Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Transport     │  │    Response     │  │       Lookup            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Request        │  │  HttpStatus     │  │  MissingCurrency        │ │
//! │  │  Timeout        │  │  Malformed      │  │  NonPositiveRate        │ │
//! │  │                 │  │                 │  │  RateTooLarge           │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  None of these abort an export: resolve_rate logs and uses 1.0         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for rate operations.
pub type RatesResult<T> = Result<T, RatesError>;

/// Everything that can go wrong while looking up a rate.
#[derive(Debug, Error)]
pub enum RatesError {
    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request could not be sent or the body could not be read.
    #[error("Rate request failed: {0}")]
    Request(String),

    /// The rate service did not answer in time.
    #[error("Rate request timed out after {0} seconds")]
    Timeout(u64),

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The rate service answered with a non-success status.
    #[error("Rate service returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// The body was not the expected `{ "rates": { ... } }` shape.
    #[error("Malformed rate response: {0}")]
    Malformed(String),

    // =========================================================================
    // Lookup Errors
    // =========================================================================
    /// The table has no entry for the requested currency.
    #[error("No exchange rate for currency {0}")]
    MissingCurrency(String),

    /// The table has an entry, but it is zero or negative.
    #[error("Exchange rate for {currency} is not positive: {rate}")]
    NonPositiveRate { currency: String, rate: Decimal },

    /// The table has an entry above the accepted maximum.
    #[error("Exchange rate for {currency} is too large: {rate}")]
    RateTooLarge { currency: String, rate: Decimal },
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<serde_json::Error> for RatesError {
    fn from(err: serde_json::Error) -> Self {
        RatesError::Malformed(err.to_string())
    }
}

// =============================================================================
// Error Categorization (for retry logic)
// =============================================================================

impl RatesError {
    /// Returns true if asking again might succeed.
    ///
    /// ## Retryable Errors
    /// - Transport failures and timeouts
    /// - HTTP 429 and 5xx
    ///
    /// ## Non-Retryable Errors
    /// - Other HTTP statuses
    /// - Malformed bodies and lookup failures
    pub fn is_retryable(&self) -> bool {
        match self {
            RatesError::Request(_) | RatesError::Timeout(_) => true,
            RatesError::HttpStatus { status } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(RatesError::Request("connection reset".into()).is_retryable());
        assert!(RatesError::Timeout(10).is_retryable());
        assert!(RatesError::HttpStatus { status: 503 }.is_retryable());
        assert!(RatesError::HttpStatus { status: 429 }.is_retryable());

        assert!(!RatesError::HttpStatus { status: 404 }.is_retryable());
        assert!(!RatesError::Malformed("eof".into()).is_retryable());
        assert!(!RatesError::MissingCurrency("XYZ".into()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = RatesError::NonPositiveRate {
            currency: "INR".into(),
            rate: Decimal::ZERO,
        };
        assert_eq!(err.to_string(), "Exchange rate for INR is not positive: 0");
        assert_eq!(
            RatesError::Timeout(10).to_string(),
            "Rate request timed out after 10 seconds"
        );
    }
}
