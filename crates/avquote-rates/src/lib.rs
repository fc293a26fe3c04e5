//! # avquote-rates: Exchange Rates for AV Quote
//!
//! Supplies the conversion rate from the source price list (USD) into the
//! proposal currency.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   [rates] source = "http"  ──► HttpRateProvider  ──┐                    │
//! │   [rates] source = "fixed" ──► FixedRateProvider ──┤                    │
//! │                                                    ▼                    │
//! │                                           resolve_rate(currency)        │
//! │                                                    │                    │
//! │                          ┌─────────────────────────┴──────────┐         │
//! │                          ▼                                    ▼         │
//! │                   rate > 0 found                  error / missing / ≤ 0 │
//! │                          │                                    │         │
//! │                          ▼                                    ▼         │
//! │                  RateOrigin::Provider            1.0 + warn! (Fallback) │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`provider`] - `RateProvider` trait and `RateTable`
//! - [`http`] - reqwest-backed provider
//! - [`fixed`] - configuration-backed provider
//! - [`resolve`] - lookup with fallback to 1.0
//! - [`error`] - rate error types

pub mod error;
pub mod fixed;
pub mod http;
pub mod provider;
pub mod resolve;

pub use error::{RatesError, RatesResult};
pub use fixed::FixedRateProvider;
pub use http::{HttpRateProvider, DEFAULT_RATES_URL};
pub use provider::{RateProvider, RateTable};
pub use resolve::{lookup_rate, resolve_rate, RateOrigin, ResolvedRate};
