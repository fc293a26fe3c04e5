//! Property-based tests for the pricing aggregator.
//!
//! Run with: `cargo test -p avquote-core --test pricing_properties`

use avquote_core::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ── Strategies ──────────────────────────────────────────────────────────────

/// 0.01 to 99999.99
fn arb_price() -> impl Strategy<Value = Money> {
    (1i64..10_000_000i64).prop_map(Money::from_cents)
}

fn arb_quantity() -> impl Strategy<Value = i64> {
    0i64..500
}

/// -50.00% to 200.00%
fn arb_margin() -> impl Strategy<Value = Margin> {
    (-5_000i64..20_000i64).prop_map(|hundredths| Margin::from_percent(Decimal::new(hundredths, 2)))
}

/// 0.0001 to 200.0000
fn arb_rate() -> impl Strategy<Value = ExchangeRate> {
    (1i64..2_000_000i64).prop_map(|v| ExchangeRate::new(Decimal::new(v, 4)))
}

fn arb_tax_bps() -> impl Strategy<Value = u32> {
    0u32..5_000
}

fn arb_item() -> impl Strategy<Value = LineItem> {
    (arb_price(), arb_quantity(), proptest::option::of(arb_margin())).prop_map(
        |(price, qty, margin)| {
            let item = LineItem::new("Display", "Item", price, qty);
            match margin {
                Some(m) => item.with_margin(m),
                None => item,
            }
        },
    )
}

fn arb_items() -> impl Strategy<Value = Vec<LineItem>> {
    proptest::collection::vec(arb_item(), 0..12)
}

fn ctx(rate: ExchangeRate, margin: Margin, mode: TaxMode) -> PricingContext {
    PricingContext::new(rate, margin, mode)
}

// ── Properties ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn identity_context_leaves_prices_untouched(price in arb_price(), qty in arb_quantity()) {
        let item = LineItem::new("Display", "Item", price, qty);
        let c = ctx(ExchangeRate::identity(), Margin::zero(), TaxMode::single(TaxRate::zero()));

        let line = compute_line_result(&item, &c);
        prop_assert_eq!(line.final_unit_price, price);
        prop_assert_eq!(line.extended_total, price * qty);
        prop_assert_eq!(line.line_total, price * qty);
        prop_assert!(line.tax.total().is_zero());
    }

    #[test]
    fn margin_scales_converted_price(price in arb_price(), rate in arb_rate(), margin in arb_margin()) {
        let item = LineItem::new("Display", "Item", price, 1);
        let tax = TaxMode::single(TaxRate::from_bps(1800));

        let base = compute_line_result(&item, &ctx(rate, Margin::zero(), tax));
        let marked = compute_line_result(&item, &ctx(rate, margin, tax));

        prop_assert_eq!(base.final_unit_price, price.convert(rate));
        prop_assert_eq!(
            marked.final_unit_price.amount(),
            base.final_unit_price.amount() * margin.multiplier()
        );
    }

    #[test]
    fn split_tax_equals_single_tax_at_combined_rate(
        price in arb_price(),
        qty in arb_quantity(),
        a in arb_tax_bps(),
        b in arb_tax_bps(),
    ) {
        let item = LineItem::new("Display", "Item", price, qty);
        let split = ctx(
            ExchangeRate::identity(),
            Margin::from_units(10),
            TaxMode::split(TaxRate::from_bps(a), TaxRate::from_bps(b)),
        );
        let single = ctx(
            ExchangeRate::identity(),
            Margin::from_units(10),
            TaxMode::single(TaxRate::from_bps(a + b)),
        );

        let s = compute_line_result(&item, &split);
        let c = compute_line_result(&item, &single);
        prop_assert_eq!(s.tax.total(), c.tax.total());
        prop_assert_eq!(s.line_total, c.line_total);
    }

    #[test]
    fn room_totals_ignore_item_order(items in arb_items(), rate in arb_rate()) {
        let c = ctx(rate, Margin::from_units(15), TaxMode::split(TaxRate::from_bps(900), TaxRate::from_bps(900)));

        let mut reversed = items.clone();
        reversed.reverse();

        prop_assert_eq!(aggregate_room(&items, &c), aggregate_room(&reversed, &c));
    }

    #[test]
    fn room_grand_total_is_subtotal_plus_tax(items in arb_items()) {
        let c = ctx(ExchangeRate::new(dec!(83.12)), Margin::from_units(20), TaxMode::default());
        let totals = aggregate_room(&items, &c);

        prop_assert_eq!(totals.grand_total, totals.subtotal + totals.tax_total);
    }

    #[test]
    fn empty_rooms_do_not_change_project_total(
        rooms in proptest::collection::vec(arb_items(), 1..5),
        empties in 0usize..4,
    ) {
        let c = ctx(ExchangeRate::identity(), Margin::from_units(10), TaxMode::default());

        let mut project = Project {
            rooms: rooms
                .into_iter()
                .enumerate()
                .map(|(i, items)| Room::new(format!("Room {i}"), items))
                .collect(),
            ..Default::default()
        };
        let before = price_project(&project, &c).total;

        for i in 0..empties {
            project.rooms.push(Room::new(format!("Empty {i}"), vec![]));
        }
        let after = price_project(&project, &c).total;

        prop_assert_eq!(before, after);
    }

    #[test]
    fn project_total_matches_room_folds(rooms in proptest::collection::vec(arb_items(), 0..5)) {
        let c = ctx(ExchangeRate::identity(), Margin::from_units(10), TaxMode::default());
        let project = Project {
            rooms: rooms
                .into_iter()
                .enumerate()
                .map(|(i, items)| Room::new(format!("Room {i}"), items))
                .collect(),
            ..Default::default()
        };

        let priced = price_project(&project, &c);
        let by_room: Vec<RoomTotals> = project.rooms.iter().map(|r| aggregate_room(&r.boq, &c)).collect();

        prop_assert_eq!(priced.total, aggregate_project(&by_room));
        for room in &priced.rooms {
            prop_assert_eq!(room.totals, aggregate_room(&room.room.boq, &c));
        }
    }
}
