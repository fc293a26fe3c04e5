//! # Pricing Aggregator
//!
//! Turns line items into marked-up, taxed prices and rolls them up per room
//! and per project.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Line Price Pipeline                              │
//! │                                                                         │
//! │  unit_price ──► × rate ──► × (1 + margin/100) ──► final_unit_price      │
//! │                                                        │                │
//! │                                                   × quantity            │
//! │                                                        │                │
//! │                                                        ▼                │
//! │                                                 extended_total          │
//! │                                                        │                │
//! │                     ┌──────────────────────────────────┤                │
//! │                     ▼                                  ▼                │
//! │            SingleRate: tax            SplitDualRate: tax_a + tax_b      │
//! │                     │                                  │                │
//! │                     └──────────────► line_total ◄──────┘                │
//! │                                                                         │
//! │  RoomTotals   = fold(line results)                                     │
//! │  ProjectTotal = Σ RoomTotals.grand_total   (rooms with items only)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is total: zero or negative quantities, negative
//! prices and negative margins are computed through without being flagged.
//! Validation is the caller's job (see [`crate::validation`]).
//!
//! ## Example
//! ```rust
//! use avquote_core::money::Money;
//! use avquote_core::pricing::{compute_line_result, PricingContext};
//! use avquote_core::types::{ExchangeRate, LineItem, Margin, TaxMode, TaxRate};
//!
//! let ctx = PricingContext::new(
//!     ExchangeRate::identity(),
//!     Margin::from_units(10),
//!     TaxMode::single(TaxRate::from_bps(1800)),
//! );
//! let item = LineItem::new("Display", "Panel", Money::from_units(100), 2);
//!
//! let line = compute_line_result(&item, &ctx);
//! assert_eq!(line.final_unit_price, Money::from_units(110));
//! assert_eq!(line.extended_total, Money::from_units(220));
//! assert_eq!(line.line_total, Money::from_cents(25960));
//! ```

use serde::Serialize;

use crate::money::Money;
use crate::types::{ExchangeRate, LineItem, Margin, Project, Room, TaxMode};

// =============================================================================
// Pricing Context
// =============================================================================

/// Everything a line needs besides its own fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricingContext {
    /// Source → target currency multiplier.
    pub rate: ExchangeRate,
    /// Margin used when an item has no override.
    pub default_margin: Margin,
    /// Single or split tax, with rates.
    pub tax_mode: TaxMode,
}

impl PricingContext {
    pub fn new(rate: ExchangeRate, default_margin: Margin, tax_mode: TaxMode) -> Self {
        PricingContext {
            rate,
            default_margin,
            tax_mode,
        }
    }
}

// =============================================================================
// Line Result
// =============================================================================

/// Tax levied on one line, shaped by the [`TaxMode`] that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaxBreakdown {
    Single { tax: Money },
    Split { first: Money, second: Money },
}

impl TaxBreakdown {
    /// Sum of all tax components.
    pub fn total(&self) -> Money {
        match self {
            TaxBreakdown::Single { tax } => *tax,
            TaxBreakdown::Split { first, second } => *first + *second,
        }
    }

    /// First (or only) component.
    pub fn first(&self) -> Money {
        match self {
            TaxBreakdown::Single { tax } => *tax,
            TaxBreakdown::Split { first, .. } => *first,
        }
    }

    /// Second component, if the mode has one.
    pub fn second(&self) -> Option<Money> {
        match self {
            TaxBreakdown::Single { .. } => None,
            TaxBreakdown::Split { second, .. } => Some(*second),
        }
    }
}

/// Derived prices for one line item. Recomputed on every call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineResult {
    /// Converted and marked-up price of one unit.
    pub final_unit_price: Money,
    /// `final_unit_price × quantity`, before tax.
    pub extended_total: Money,
    /// Tax component(s) on the extended total.
    pub tax: TaxBreakdown,
    /// Extended total plus all tax components.
    pub line_total: Money,
}

/// Prices one line item.
///
/// ## Steps
/// 1. `converted = unit_price × rate`
/// 2. `final_unit = converted × (1 + effective_margin / 100)`
/// 3. `extended = final_unit × quantity`
/// 4. tax per [`TaxMode`], `line_total = extended + Σ tax`
pub fn compute_line_result(item: &LineItem, ctx: &PricingContext) -> LineResult {
    let margin = item.effective_margin(ctx.default_margin);

    let final_unit_price = item.unit_price.convert(ctx.rate).apply_margin(margin);
    let extended_total = final_unit_price.multiply_quantity(item.quantity);

    let tax = match ctx.tax_mode {
        TaxMode::SingleRate { rate } => TaxBreakdown::Single {
            tax: extended_total.calculate_tax(rate),
        },
        TaxMode::SplitDualRate { first, second } => TaxBreakdown::Split {
            first: extended_total.calculate_tax(first),
            second: extended_total.calculate_tax(second),
        },
    };

    LineResult {
        final_unit_price,
        extended_total,
        tax,
        line_total: extended_total + tax.total(),
    }
}

// =============================================================================
// Room Totals
// =============================================================================

/// Roll-up of a room's line results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoomTotals {
    /// Σ extended totals.
    pub subtotal: Money,
    /// Σ tax components.
    pub tax_total: Money,
    /// Σ line totals.
    pub grand_total: Money,
}

impl RoomTotals {
    /// Adds one line's figures.
    pub fn add_line(&mut self, line: &LineResult) {
        self.subtotal += line.extended_total;
        self.tax_total += line.tax.total();
        self.grand_total += line.line_total;
    }

    /// The fold every room total in the crate goes through.
    pub fn from_results<'a>(lines: impl IntoIterator<Item = &'a LineResult>) -> Self {
        lines.into_iter().fold(RoomTotals::default(), |mut totals, line| {
            totals.add_line(line);
            totals
        })
    }
}

/// Aggregates a room's items. An empty slice gives all-zero totals.
pub fn aggregate_room(items: &[LineItem], ctx: &PricingContext) -> RoomTotals {
    let results: Vec<LineResult> = items.iter().map(|item| compute_line_result(item, ctx)).collect();
    RoomTotals::from_results(&results)
}

/// Sums room grand totals into the project total.
pub fn aggregate_project<'a>(rooms: impl IntoIterator<Item = &'a RoomTotals>) -> Money {
    rooms.into_iter().map(|totals| totals.grand_total).sum()
}

// =============================================================================
// Priced Rooms & Projects
// =============================================================================

/// A line item next to its computed prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedLine<'a> {
    pub item: &'a LineItem,
    pub result: LineResult,
}

/// A room with every line priced and the totals derived from those lines.
///
/// The summary sheet and the room sheet both read `totals` from here, so the
/// two can never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedRoom<'a> {
    pub room: &'a Room,
    /// In input order; display grouping is applied later.
    pub lines: Vec<PricedLine<'a>>,
    pub totals: RoomTotals,
}

/// Prices every line of a room.
pub fn price_room<'a>(room: &'a Room, ctx: &PricingContext) -> PricedRoom<'a> {
    let lines: Vec<PricedLine<'a>> = room
        .boq
        .iter()
        .map(|item| PricedLine {
            item,
            result: compute_line_result(item, ctx),
        })
        .collect();
    let totals = RoomTotals::from_results(lines.iter().map(|line| &line.result));

    PricedRoom { room, lines, totals }
}

/// A fully priced project.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedProject<'a> {
    pub project: &'a Project,
    pub context: PricingContext,
    /// Rooms with at least one item, in input order.
    pub rooms: Vec<PricedRoom<'a>>,
    /// Σ room grand totals.
    pub total: Money,
}

/// Prices all rooms that have items; empty rooms are skipped.
pub fn price_project<'a>(project: &'a Project, ctx: &PricingContext) -> PricedProject<'a> {
    let rooms: Vec<PricedRoom<'a>> = project.priced_rooms().map(|room| price_room(room, ctx)).collect();
    let total = aggregate_project(rooms.iter().map(|room| &room.totals));

    PricedProject {
        project,
        context: *ctx,
        rooms,
        total,
    }
}

impl PricedProject<'_> {
    /// Σ room subtotals (pre-tax).
    pub fn subtotal(&self) -> Money {
        self.rooms.iter().map(|room| room.totals.subtotal).sum()
    }

    /// Σ room tax totals.
    pub fn tax_total(&self) -> Money {
        self.rooms.iter().map(|room| room.totals.tax_total).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaxRate;
    use rust_decimal_macros::dec;

    fn single_18(default_margin: Margin) -> PricingContext {
        PricingContext::new(
            ExchangeRate::identity(),
            default_margin,
            TaxMode::single(TaxRate::from_bps(1800)),
        )
    }

    fn split_9_9(default_margin: Margin) -> PricingContext {
        PricingContext::new(
            ExchangeRate::identity(),
            default_margin,
            TaxMode::split(TaxRate::from_bps(900), TaxRate::from_bps(900)),
        )
    }

    fn panel(price: i64, qty: i64) -> LineItem {
        LineItem::new("Display", "Panel", Money::from_units(price), qty)
    }

    #[test]
    fn test_single_rate_scenario() {
        let line = compute_line_result(&panel(100, 2), &single_18(Margin::from_units(10)));

        assert_eq!(line.final_unit_price.amount(), dec!(110));
        assert_eq!(line.extended_total.amount(), dec!(220));
        assert_eq!(line.tax, TaxBreakdown::Single { tax: Money::new(dec!(39.6)) });
        assert_eq!(line.line_total.amount(), dec!(259.6));
    }

    #[test]
    fn test_split_rate_scenario_matches_single() {
        let split = compute_line_result(&panel(100, 2), &split_9_9(Margin::from_units(10)));
        let single = compute_line_result(&panel(100, 2), &single_18(Margin::from_units(10)));

        assert_eq!(split.tax.first().amount(), dec!(19.8));
        assert_eq!(split.tax.second(), Some(Money::new(dec!(19.8))));
        assert_eq!(split.line_total, single.line_total);
        assert_eq!(split.line_total.amount(), dec!(259.6));
    }

    #[test]
    fn test_item_margin_overrides_default() {
        let item = panel(100, 1).with_margin(Margin::from_units(25));
        let line = compute_line_result(&item, &single_18(Margin::from_units(10)));
        assert_eq!(line.final_unit_price, Money::from_units(125));
    }

    #[test]
    fn test_zero_margin_override_is_respected() {
        // An explicit 0 must not fall back to the default
        let item = panel(100, 1).with_margin(Margin::zero());
        let line = compute_line_result(&item, &single_18(Margin::from_units(10)));
        assert_eq!(line.final_unit_price, Money::from_units(100));
    }

    #[test]
    fn test_conversion_rate_applies_before_margin() {
        let ctx = PricingContext::new(
            ExchangeRate::new(dec!(83)),
            Margin::from_units(10),
            TaxMode::single(TaxRate::zero()),
        );
        let line = compute_line_result(&panel(100, 1), &ctx);
        assert_eq!(line.final_unit_price.amount(), dec!(9130));
        assert_eq!(line.line_total, line.extended_total);
    }

    #[test]
    fn test_degenerate_inputs_compute_through() {
        let ctx = single_18(Margin::zero());

        let zero_qty = compute_line_result(&panel(100, 0), &ctx);
        assert!(zero_qty.line_total.is_zero());

        let negative_qty = compute_line_result(&panel(100, -2), &ctx);
        assert_eq!(negative_qty.line_total.amount(), dec!(-236));

        let markdown = compute_line_result(&panel(100, 1).with_margin(Margin::from_units(-50)), &ctx);
        assert_eq!(markdown.final_unit_price, Money::from_units(50));
    }

    #[test]
    fn test_room_totals() {
        let items = vec![panel(100, 2), panel(50, 1)];
        let totals = aggregate_room(&items, &single_18(Margin::from_units(10)));

        // 220 + 55 = 275 subtotal, 18% = 49.5 tax
        assert_eq!(totals.subtotal.amount(), dec!(275));
        assert_eq!(totals.tax_total.amount(), dec!(49.5));
        assert_eq!(totals.grand_total.amount(), dec!(324.5));
    }

    #[test]
    fn test_split_room_tax_total_sums_both_components() {
        let totals = aggregate_room(&[panel(100, 2)], &split_9_9(Margin::from_units(10)));
        assert_eq!(totals.tax_total.amount(), dec!(39.6));
    }

    #[test]
    fn test_empty_room_is_zero() {
        let totals = aggregate_room(&[], &single_18(Margin::from_units(10)));
        assert_eq!(totals, RoomTotals::default());
    }

    #[test]
    fn test_project_total_scenario() {
        let room_a = RoomTotals {
            grand_total: Money::new(dec!(259.6)),
            ..Default::default()
        };
        let room_b = RoomTotals {
            grand_total: Money::new(dec!(500.0)),
            ..Default::default()
        };
        assert_eq!(aggregate_project([&room_a, &room_b]).amount(), dec!(759.6));
    }

    #[test]
    fn test_price_project_skips_empty_rooms() {
        let project = Project {
            rooms: vec![
                Room::new("Board Room", vec![panel(100, 2)]),
                Room::new("Store", vec![]),
                Room::new("Huddle", vec![panel(500, 1)]),
            ],
            ..Default::default()
        };
        let ctx = single_18(Margin::from_units(10));
        let priced = price_project(&project, &ctx);

        assert_eq!(priced.rooms.len(), 2);
        assert_eq!(priced.rooms[0].room.name, "Board Room");
        assert_eq!(priced.rooms[1].room.name, "Huddle");

        // 259.6 + (550 × 1.18 = 649)
        assert_eq!(priced.total.amount(), dec!(908.6));
        assert_eq!(priced.subtotal() + priced.tax_total(), priced.total);
    }

    #[test]
    fn test_price_room_matches_aggregate_room() {
        let room = Room::new("Board Room", vec![panel(100, 2), panel(33, 3).with_margin(Margin::from_units(7))]);
        let ctx = split_9_9(Margin::from_units(10));

        assert_eq!(price_room(&room, &ctx).totals, aggregate_room(&room.boq, &ctx));
    }
}
