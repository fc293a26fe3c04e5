//! # avquote-core: Pure Pricing Logic for AV Quote
//!
//! This crate is the **heart** of AV Quote. It turns a project (rooms of
//! bill-of-quantities lines) into converted, marked-up, taxed figures, with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        AV Quote Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    avquote CLI (apps/cli)                       │   │
//! │  │    load project.json ──► resolve rate ──► price ──► export      │   │
//! │  └──────────┬──────────────────────┬───────────────────┬──────────┘   │
//! │             │                      │                   │              │
//! │  ┌──────────▼──────────┐           │        ┌──────────▼──────────┐   │
//! │  │   avquote-rates     │           │        │   avquote-export    │   │
//! │  │  HTTP / fixed FX    │           │        │  xlsx proposal      │   │
//! │  └──────────┬──────────┘           │        └──────────┬──────────┘   │
//! │             │                      │                   │              │
//! │  ┌──────────▼──────────────────────▼───────────────────▼──────────┐   │
//! │  │               ★ avquote-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │ LineItem  │  │   Money   │  │ LineResult│  │   rules   │  │   │
//! │  │   │   Room    │  │  Decimal  │  │ RoomTotals│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐                                 │   │
//! │  │   │ currency  │  │ category  │                                 │   │
//! │  │   │ TaxPolicy │  │  ordering │                                 │   │
//! │  │   └───────────┘  └───────────┘                                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO SPREADSHEETS • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, Room, Project, TaxMode, ...)
//! - [`money`] - Exact decimal Money type
//! - [`pricing`] - Line, room and project aggregation
//! - [`currency`] - Currency symbols and the tax-mode policy
//! - [`category`] - BOQ category display order
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same items + same context = same figures
//! 2. **No I/O**: rates are fetched elsewhere and passed in
//! 3. **Exact Money**: `Decimal` arithmetic, rounding only for display
//! 4. **One Fold**: every consumer of room totals goes through [`RoomTotals`]
//!
//! ## Example Usage
//!
//! ```rust
//! use avquote_core::{
//!     aggregate_room, ExchangeRate, LineItem, Margin, Money, PricingContext, TaxMode, TaxRate,
//! };
//!
//! let items = vec![LineItem::new("Display", "65\" panel", Money::from_units(100), 2)];
//! let ctx = PricingContext::new(
//!     ExchangeRate::identity(),
//!     Margin::from_units(10),
//!     TaxMode::single(TaxRate::from_bps(1800)),
//! );
//!
//! let totals = aggregate_room(&items, &ctx);
//! assert_eq!(totals.subtotal, Money::from_units(220));
//! assert_eq!(totals.tax_total, Money::from_cents(3960));
//! assert_eq!(totals.grand_total, Money::from_cents(25960));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod category;
pub mod currency;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use currency::TaxPolicy;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::*;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default single tax rate: 18%.
pub const DEFAULT_SINGLE_TAX_BPS: u32 = 1800;

/// Default rate of each half of a split tax: 9% + 9%.
pub const DEFAULT_SPLIT_TAX_BPS: u32 = 900;

/// Largest accepted margin, in percent.
pub const MAX_MARGIN_PERCENT: i64 = 1000;

/// Maximum quantity of a single BOQ line
///
/// ## Business Reason
/// Catches typos like 1000000 instead of 10 before they reach a client.
pub const MAX_ITEM_QUANTITY: i64 = 99_999;

/// Largest accepted unit price, in whole units of the source currency.
///
/// ## Overflow Bound
/// With every other input at its limit, one line is at most
/// `1e10 × MAX_EXCHANGE_RATE × 11 × MAX_ITEM_QUANTITY × 3` ≈ 3.3e22
/// (margin multiplier 11, two 100% tax halves), far below `Decimal::MAX`
/// (≈ 7.9e28) even when millions of lines are summed.
pub const MAX_UNIT_PRICE: i64 = 10_000_000_000;

/// Largest accepted exchange rate (target units per source unit).
pub const MAX_EXCHANGE_RATE: i64 = 1_000_000;

/// Maximum room-name length, in characters.
pub const MAX_ROOM_NAME_LEN: usize = 200;
