use serde::Serialize;

use avquote_core::currency::symbol_for;
use avquote_core::{price_project, Money, PricedProject, RoomTotals};

use crate::cli::TotalsArgs;

/// One room's figures in the totals report.
#[derive(Debug, Serialize)]
pub struct RoomReport {
    pub name: String,
    #[serde(flatten)]
    pub totals: RoomTotals,
}

/// Everything `avquote totals` prints.
#[derive(Debug, Serialize)]
pub struct TotalsReport {
    pub currency: String,
    pub rooms: Vec<RoomReport>,
    pub subtotal: Money,
    pub tax_total: Money,
    pub total: Money,
}

impl TotalsReport {
    pub fn from_priced(currency: &str, priced: &PricedProject<'_>) -> Self {
        TotalsReport {
            currency: currency.to_string(),
            rooms: priced
                .rooms
                .iter()
                .map(|room| RoomReport {
                    name: room.room.name.clone(),
                    totals: room.totals,
                })
                .collect(),
            subtotal: priced.subtotal(),
            tax_total: priced.tax_total(),
            total: priced.total,
        }
    }

    /// Plain-text table, amounts rounded for display.
    pub fn to_table(&self) -> String {
        let symbol = symbol_for(&self.currency);
        let fmt = |m: Money| m.format_with_symbol(symbol);
        let name_width = self
            .rooms
            .iter()
            .map(|room| room.name.chars().count())
            .chain(std::iter::once("Project total".len()))
            .max()
            .unwrap_or_default();

        let mut out = format!(
            "{:<name_width$}  {:>16}  {:>16}  {:>16}\n",
            "Room", "Subtotal", "Tax", "Total"
        );
        for room in &self.rooms {
            out.push_str(&format!(
                "{:<name_width$}  {:>16}  {:>16}  {:>16}\n",
                room.name,
                fmt(room.totals.subtotal),
                fmt(room.totals.tax_total),
                fmt(room.totals.grand_total),
            ));
        }
        out.push_str(&format!(
            "{:<name_width$}  {:>16}  {:>16}  {:>16}\n",
            "Project total",
            fmt(self.subtotal),
            fmt(self.tax_total),
            fmt(self.total),
        ));
        out
    }
}

pub async fn run(args: &TotalsArgs) -> anyhow::Result<TotalsReport> {
    let prepared = super::prepare(&args.pricing).await?;
    let priced = price_project(&prepared.project, &prepared.context);
    Ok(TotalsReport::from_priced(&prepared.currency, &priced))
}

pub async fn execute(args: TotalsArgs) -> anyhow::Result<()> {
    let report = run(&args).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_table());
    }
    Ok(())
}
