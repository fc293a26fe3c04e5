//! # Domain Types
//!
//! Core domain types used throughout AV Quote.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Project      │   │      Room       │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  client         │──►│  name           │──►│  category       │       │
//! │  │  rooms          │   │  capacity       │   │  unit_price     │       │
//! │  └─────────────────┘   │  boq            │   │  quantity       │       │
//! │                        └─────────────────┘   │  margin (opt)   │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │     Margin      │   │  ExchangeRate   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  percent (dec)  │   │  value (dec)    │       │
//! │  │  1800 = 18%     │   │  10 = +10%      │   │  1 = no change  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Input Format
//! Project files use the camelCase field names of the quoting front-end
//! (`itemDescription`, `unitPrice`, `keyClientPersonnel`, ...). Unknown
//! fields such as `totalPrice` are ignored.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (GST), 900 bps = 9% (each half of CGST/SGST)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage, rounded to the nearest basis point.
    ///
    /// Negative percentages clamp to zero.
    pub fn from_percentage(pct: Decimal) -> Self {
        let bps = (pct * Decimal::ONE_HUNDRED).round().to_u32().unwrap_or(0);
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (1800 bps → 0.18).
    #[inline]
    pub fn as_fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// Returns the rate as a percentage, without trailing zeros (18, 9, 8.25).
    pub fn percentage(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 2).normalize()
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Margin
// =============================================================================

/// A markup percentage applied to a converted unit price before tax.
///
/// `10` means +10%. Zero is allowed; negative values produce a markdown and
/// are computed through without complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Margin(Decimal);

impl Margin {
    /// Creates a margin from a (possibly fractional) percentage.
    #[inline]
    pub const fn from_percent(percent: Decimal) -> Self {
        Margin(percent)
    }

    /// Creates a margin from a whole percentage.
    #[inline]
    pub fn from_units(percent: i64) -> Self {
        Margin(Decimal::from(percent))
    }

    /// No markup.
    #[inline]
    pub const fn zero() -> Self {
        Margin(Decimal::ZERO)
    }

    /// Returns the percentage value.
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Returns `1 + percent / 100`.
    #[inline]
    pub fn multiplier(&self) -> Decimal {
        Decimal::ONE + self.0 / Decimal::ONE_HUNDRED
    }
}

impl Default for Margin {
    fn default() -> Self {
        Margin::zero()
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Exchange Rate
// =============================================================================

/// Multiplier that converts a source-currency amount into the target currency.
///
/// The identity rate (`1`) is what callers substitute when a lookup fails:
/// amounts are then treated as already being in the target currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    /// Wraps a raw rate. Not validated; see
    /// [`crate::validation::validate_exchange_rate`].
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        ExchangeRate(value)
    }

    /// The fallback rate of 1.
    #[inline]
    pub const fn identity() -> Self {
        ExchangeRate(Decimal::ONE)
    }

    /// Returns the raw multiplier.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// True if this is the identity rate.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.0 == Decimal::ONE
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        ExchangeRate::identity()
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

// =============================================================================
// Tax Mode
// =============================================================================

/// How tax is levied on an extended line total.
///
/// ```text
/// SingleRate { 18% }            one consolidated levy        (GST / VAT)
/// SplitDualRate { 9%, 9% }      two co-equal components      (CGST + SGST)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaxMode {
    /// One consolidated tax.
    SingleRate { rate: TaxRate },
    /// Two tax components, each applied to the same extended total.
    SplitDualRate { first: TaxRate, second: TaxRate },
}

impl TaxMode {
    /// Shorthand for [`TaxMode::SingleRate`].
    pub const fn single(rate: TaxRate) -> Self {
        TaxMode::SingleRate { rate }
    }

    /// Shorthand for [`TaxMode::SplitDualRate`].
    pub const fn split(first: TaxRate, second: TaxRate) -> Self {
        TaxMode::SplitDualRate { first, second }
    }

    /// Returns true for the two-component mode.
    pub const fn is_split(&self) -> bool {
        matches!(self, TaxMode::SplitDualRate { .. })
    }

    /// Total effective rate across all components.
    pub const fn combined_rate(&self) -> TaxRate {
        match self {
            TaxMode::SingleRate { rate } => *rate,
            TaxMode::SplitDualRate { first, second } => TaxRate::from_bps(first.bps() + second.bps()),
        }
    }
}

impl Default for TaxMode {
    fn default() -> Self {
        TaxMode::single(TaxRate::from_bps(crate::DEFAULT_SINGLE_TAX_BPS))
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One priced product or service entry in a room's bill of quantities.
///
/// Only `unit_price`, `quantity` and `margin` take part in pricing;
/// the rest is carried through to the rendered BOQ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Grouping label for display ("Display", "Audio - Speakers", ...).
    #[serde(default)]
    pub category: String,

    /// Free-text description of the goods or service.
    #[serde(default, rename = "itemDescription")]
    pub description: String,

    /// Manufacturer.
    #[serde(default)]
    pub brand: String,

    /// Manufacturer model number.
    #[serde(default)]
    pub model: String,

    /// Quantity. Not validated here.
    pub quantity: i64,

    /// Unit price in the source currency.
    pub unit_price: Money,

    /// Per-item margin override; `None` falls back to the project default.
    #[serde(default)]
    pub margin: Option<Margin>,
}

impl LineItem {
    /// Creates a line item with no margin override and no make/model.
    pub fn new(
        category: impl Into<String>,
        description: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Self {
        LineItem {
            category: category.into(),
            description: description.into(),
            brand: String::new(),
            model: String::new(),
            quantity,
            unit_price,
            margin: None,
        }
    }

    /// Sets a per-item margin override.
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = Some(margin);
        self
    }

    /// Sets brand and model.
    pub fn with_make(mut self, brand: impl Into<String>, model: impl Into<String>) -> Self {
        self.brand = brand.into();
        self.model = model.into();
        self
    }

    /// The one coalescing rule for margins: override, else default.
    #[inline]
    pub fn effective_margin(&self, default_margin: Margin) -> Margin {
        self.margin.unwrap_or(default_margin)
    }
}

// =============================================================================
// Room
// =============================================================================

/// A room and its bill of quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Room name / room type.
    pub name: String,

    /// Number of seats, if known.
    #[serde(default)]
    pub capacity: Option<u32>,

    /// Line items; an empty list means the room is not priced.
    #[serde(default)]
    pub boq: Vec<LineItem>,
}

impl Room {
    /// Creates a room with the given items.
    pub fn new(name: impl Into<String>, boq: Vec<LineItem>) -> Self {
        Room {
            name: name.into(),
            capacity: None,
            boq,
        }
    }

    /// True if the room has at least one line item.
    pub fn has_items(&self) -> bool {
        !self.boq.is_empty()
    }
}

// =============================================================================
// Client Details
// =============================================================================

/// Cover-page details. Every field is optional free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientDetails {
    pub project_name: String,
    pub date: String,
    pub design_engineer: String,
    pub account_manager: String,
    pub client_name: String,
    pub key_client_personnel: String,
    pub location: String,
    pub key_comments: String,
}

// =============================================================================
// Project
// =============================================================================

/// Everything needed to build one proposal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub client: ClientDetails,

    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl Project {
    /// Rooms that carry at least one line item.
    pub fn priced_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|room| room.has_items())
    }

    /// Total number of line items across all rooms.
    pub fn item_count(&self) -> usize {
        self.rooms.iter().map(|room| room.boq.len()).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(825);
        assert_eq!(rate.bps(), 825);
        assert_eq!(rate.percentage(), dec!(8.25));
        assert_eq!(rate.as_fraction(), dec!(0.0825));
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(dec!(8.25)).bps(), 825);
        assert_eq!(TaxRate::from_percentage(dec!(18)).bps(), 1800);
        assert_eq!(TaxRate::from_percentage(dec!(-5)).bps(), 0);
    }

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::from_bps(1800).to_string(), "18%");
        assert_eq!(TaxRate::from_bps(900).to_string(), "9%");
        assert_eq!(TaxRate::from_bps(825).to_string(), "8.25%");
    }

    #[test]
    fn test_margin_multiplier() {
        assert_eq!(Margin::from_units(10).multiplier(), dec!(1.1));
        assert_eq!(Margin::zero().multiplier(), Decimal::ONE);
        assert_eq!(Margin::from_percent(dec!(-20)).multiplier(), dec!(0.8));
    }

    #[test]
    fn test_tax_mode_combined_rate() {
        let split = TaxMode::split(TaxRate::from_bps(900), TaxRate::from_bps(900));
        assert!(split.is_split());
        assert_eq!(split.combined_rate(), TaxRate::from_bps(1800));
        assert_eq!(TaxMode::default(), TaxMode::single(TaxRate::from_bps(1800)));
    }

    #[test]
    fn test_effective_margin_coalesces() {
        let item = LineItem::new("Display", "75in panel", Money::from_units(100), 1);
        assert_eq!(item.effective_margin(Margin::from_units(10)), Margin::from_units(10));

        let item = item.with_margin(Margin::zero());
        assert_eq!(item.effective_margin(Margin::from_units(10)), Margin::zero());
    }

    #[test]
    fn test_project_deserializes_front_end_shape() {
        let json = r#"{
            "client": { "projectName": "HQ", "clientName": "Acme" },
            "rooms": [
                { "name": "Board Room", "capacity": 12, "boq": [
                    { "category": "Display", "itemDescription": "75in panel",
                      "brand": "Acme", "model": "X75", "quantity": 2,
                      "unitPrice": 1500, "totalPrice": 3000, "margin": 12.5 }
                ]},
                { "name": "Lobby" }
            ]
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.client.project_name, "HQ");
        assert_eq!(project.client.location, "");
        assert_eq!(project.rooms.len(), 2);
        assert_eq!(project.priced_rooms().count(), 1);

        let item = &project.rooms[0].boq[0];
        assert_eq!(item.description, "75in panel");
        assert_eq!(item.unit_price, Money::from_units(1500));
        assert_eq!(item.margin, Some(Margin::from_percent(dec!(12.5))));
        assert_eq!(project.rooms[0].capacity, Some(12));
    }
}
