//! # Proposal Workbook
//!
//! Lays out a [`PricedProject`] as an xlsx workbook.
//!
//! ## Sheet Order
//! ```text
//! ┌──────────────┬───────────────┬──────────────────┬─────────┬─────────┐
//! │ Cover Page   │ Scope of Work │ Proposal Summary │ Room 1  │ Room N  │
//! │              │               │                  │         │         │
//! │ version +    │ disclaimer,   │ Sr. No │ Room │  │ header, │   ...   │
//! │ contact      │ scope and     │ Total            │ BOQ by  │         │
//! │ details      │ exclusions    │ Grand Total      │ category│         │
//! └──────────────┴───────────────┴──────────────────┴─────────┴─────────┘
//! ```
//!
//! The summary row for a room and the footer of that room's sheet both read
//! the same `PricedRoom::totals`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use rust_xlsxwriter::{DocProperties, Workbook, Worksheet};
use tracing::{debug, info};

use avquote_core::category::group_by_category;
use avquote_core::currency::symbol_for;
use avquote_core::{Money, PricedLine, PricedProject, PricedRoom, TaxBreakdown, TaxMode};

use crate::error::{ExportError, ExportResult};
use crate::filename::proposal_file_name;
use crate::formats::ProposalFormats;
use crate::sheet_name::SheetNamer;
use crate::terms::{DISCLAIMER, SECTIONS};

pub const COVER_SHEET: &str = "Cover Page";
pub const SCOPE_SHEET: &str = "Scope of Work";
pub const SUMMARY_SHEET: &str = "Proposal Summary";

/// First row used by sheet content; rows above are left for logos.
const FIRST_ROW: u32 = 3;

// Room sheet columns (A is a margin).
const COL_SR: u16 = 1;
const COL_DESC: u16 = 2;
const COL_SPEC: u16 = 3;
const COL_MAKE: u16 = 4;
const COL_MODEL: u16 = 5;
const COL_QTY: u16 = 6;
const COL_UNIT: u16 = 7;
const COL_TOTAL: u16 = 8;
const COL_TAX_A: u16 = 9;
const COL_TAX_B: u16 = 10;
const COL_LINE_TOTAL: u16 = 11;
const COL_LAST: u16 = 13;

/// Cell value for an amount. Cells hold doubles; the exact value stays in
/// the priced project.
fn amount(money: Money) -> f64 {
    money.to_f64().unwrap_or_default()
}

/// Renders priced projects into proposal workbooks.
#[derive(Clone, Debug)]
pub struct ProposalRenderer {
    /// Target currency code, shown in column headers.
    pub currency: String,
    /// Symbol used in money number formats.
    pub symbol: String,
    /// Written into the workbook properties.
    pub company_name: String,
    /// Labels for the two components of a split tax.
    pub split_tax_labels: (String, String),
    /// Label for a single tax.
    pub single_tax_label: String,
    /// Used for the file name and blank cover-page dates.
    pub export_date: NaiveDate,
}

impl Default for ProposalRenderer {
    fn default() -> Self {
        Self::new("USD")
    }
}

impl ProposalRenderer {
    /// Renderer for amounts in `currency`, dated today.
    pub fn new(currency: &str) -> Self {
        let currency = currency.trim().to_ascii_uppercase();
        Self {
            symbol: symbol_for(&currency).to_string(),
            currency,
            company_name: String::new(),
            split_tax_labels: ("SGST".to_string(), "CGST".to_string()),
            single_tax_label: "Tax".to_string(),
            export_date: Local::now().date_naive(),
        }
    }

    pub fn company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = name.into();
        self
    }

    pub fn export_date(mut self, date: NaiveDate) -> Self {
        self.export_date = date;
        self
    }

    /// File name this renderer would save `priced` under.
    pub fn file_name(&self, priced: &PricedProject<'_>) -> String {
        proposal_file_name(&priced.project.client.project_name, self.export_date)
    }

    /// Builds the workbook and returns the xlsx bytes.
    pub fn render_to_bytes(&self, priced: &PricedProject<'_>) -> ExportResult<Vec<u8>> {
        let mut workbook = self.build_workbook(priced)?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Builds the workbook and saves it into `dir`, creating it if needed.
    ///
    /// Returns the path of the written file.
    pub fn save(&self, priced: &PricedProject<'_>, dir: &Path) -> ExportResult<PathBuf> {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(self.file_name(priced));
        let mut workbook = self.build_workbook(priced)?;
        workbook.save(&path)?;

        info!(path = %path.display(), rooms = priced.rooms.len(), "Proposal written");
        Ok(path)
    }

    fn build_workbook(&self, priced: &PricedProject<'_>) -> ExportResult<Workbook> {
        let mut workbook = Workbook::new();
        let formats = ProposalFormats::new(&self.symbol);

        let title = match priced.project.client.project_name.trim() {
            "" => "Proposal".to_string(),
            name => format!("Proposal - {name}"),
        };
        let properties = DocProperties::new()
            .set_title(&title)
            .set_author(&self.company_name)
            .set_company(&self.company_name);
        workbook.set_properties(&properties);

        self.add_cover_sheet(workbook.add_worksheet(), priced, &formats)?;
        self.add_scope_sheet(workbook.add_worksheet(), &formats)?;
        self.add_summary_sheet(workbook.add_worksheet(), priced, &formats)?;

        let mut namer = SheetNamer::new();
        for fixed in [COVER_SHEET, SCOPE_SHEET, SUMMARY_SHEET] {
            namer.reserve(fixed);
        }
        for room in &priced.rooms {
            let name = namer.unique_name(&room.room.name);
            debug!(room = %room.room.name, sheet = %name, lines = room.lines.len(), "Adding room sheet");
            self.add_room_sheet(workbook.add_worksheet(), &name, room, priced, &formats)?;
        }

        Ok(workbook)
    }

    // =========================================================================
    // Cover Page
    // =========================================================================

    fn add_cover_sheet(
        &self,
        sheet: &mut Worksheet,
        priced: &PricedProject<'_>,
        f: &ProposalFormats,
    ) -> ExportResult<()> {
        sheet.set_name(COVER_SHEET)?;
        for (col, width) in [(0, 2), (1, 20), (2, 20), (3, 5), (4, 25), (5, 40)] {
            sheet.set_column_width(col, width).ok();
        }

        let client = &priced.project.client;
        let fallback_date = self.export_date.format("%Y-%m-%d").to_string();
        let date = match client.date.trim() {
            "" => fallback_date.as_str(),
            d => d,
        };

        // Version control (B:C)
        let top = FIRST_ROW;
        sheet.merge_range(top, 1, top, 2, "Version Control", &f.green_title)?;
        sheet.write_with_format(top + 1, 1, "Date of First Draft", &f.cell)?;
        sheet.write_with_format(top + 1, 2, "Date of Final Draft", &f.cell)?;
        sheet.write_with_format(top + 2, 1, date, &f.cell)?;
        sheet.write_with_format(top + 2, 2, date, &f.cell)?;
        for row in top + 3..=top + 4 {
            sheet.write_blank(row, 1, &f.cell)?;
            sheet.write_blank(row, 2, &f.cell)?;
        }
        sheet.write_with_format(top + 5, 1, "Version No.", &f.green_label)?;
        sheet.write_with_format(top + 5, 2, "Published Date", &f.green_label)?;
        sheet.write_with_format(top + 6, 1, "1.0", &f.cell)?;
        sheet.write_with_format(top + 6, 2, date, &f.cell)?;

        // Contact details (E:F)
        sheet.merge_range(top, 4, top, 5, "Contact Details", &f.green_title)?;
        let contacts = [
            ("Design Engineer", &client.design_engineer),
            ("Account Manager", &client.account_manager),
            ("Client Name", &client.client_name),
            ("Key Client Personnel", &client.key_client_personnel),
            ("Location", &client.location),
            ("Key Comments for this version", &client.key_comments),
        ];
        for (offset, (label, value)) in (1u32..).zip(contacts) {
            sheet.write_with_format(top + offset, 4, label, &f.green_label)?;
            sheet.write_with_format(top + offset, 5, value.as_str(), &f.cell)?;
        }

        Ok(())
    }

    // =========================================================================
    // Scope of Work
    // =========================================================================

    fn add_scope_sheet(&self, sheet: &mut Worksheet, f: &ProposalFormats) -> ExportResult<()> {
        sheet.set_name(SCOPE_SHEET)?;
        sheet.set_column_width(0, 2).ok();
        sheet.set_column_width(1, 10).ok();
        sheet.set_column_width(2, 100).ok();

        sheet.merge_range(FIRST_ROW, 1, FIRST_ROW + 1, 2, DISCLAIMER, &f.disclaimer)?;

        let mut row = FIRST_ROW + 2;
        for section in SECTIONS {
            row += 1; // spacer
            sheet.merge_range(row, 1, row, 2, section.title, &f.peach_header)?;
            row += 1;
            sheet.write_with_format(row, 1, "Sr. No", &f.peach_header_center)?;
            sheet.write_with_format(row, 2, "Particulars", &f.peach_header_center)?;
            row += 1;

            for (sr, text) in section.items {
                sheet.write_with_format(row, 1, *sr, &f.cell_center)?;
                sheet.write_with_format(row, 2, *text, &f.cell)?;
                row += 1;
            }
        }

        Ok(())
    }

    // =========================================================================
    // Proposal Summary
    // =========================================================================

    fn add_summary_sheet(
        &self,
        sheet: &mut Worksheet,
        priced: &PricedProject<'_>,
        f: &ProposalFormats,
    ) -> ExportResult<()> {
        sheet.set_name(SUMMARY_SHEET)?;
        for (col, width) in [(0, 2), (1, 10), (2, 60), (3, 25)] {
            sheet.set_column_width(col, width).ok();
        }

        sheet.merge_range(FIRST_ROW, 1, FIRST_ROW, 3, SUMMARY_SHEET, &f.green_title)?;
        let head = FIRST_ROW + 1;
        sheet.write_with_format(head, 1, "Sr. No", &f.blue_header)?;
        sheet.write_with_format(head, 2, "Description", &f.blue_header)?;
        sheet.write_with_format(head, 3, "Total", &f.blue_header)?;

        let mut row = head + 1;
        for (sr, room) in (1u32..).zip(&priced.rooms) {
            sheet.write_with_format(row, 1, sr, &f.cell_center)?;
            sheet.write_with_format(row, 2, room.room.name.as_str(), &f.cell)?;
            sheet.write_with_format(row, 3, amount(room.totals.grand_total), &f.money)?;
            row += 1;
        }

        sheet.write_with_format(row, 2, "Grand Total", &f.bold)?;
        sheet.write_with_format(row, 3, amount(priced.total), &f.bold_money)?;

        Ok(())
    }

    // =========================================================================
    // Room BOQ
    // =========================================================================

    fn tax_headers(&self, mode: TaxMode) -> (String, String) {
        match mode {
            TaxMode::SingleRate { rate } => (format!("{} ({rate})", self.single_tax_label), String::new()),
            TaxMode::SplitDualRate { first, second } => (
                format!("{} ({first})", self.split_tax_labels.0),
                format!("{} ({second})", self.split_tax_labels.1),
            ),
        }
    }

    fn add_room_sheet(
        &self,
        sheet: &mut Worksheet,
        sheet_name: &str,
        room: &PricedRoom<'_>,
        priced: &PricedProject<'_>,
        f: &ProposalFormats,
    ) -> ExportResult<()> {
        sheet.set_name(sheet_name)?;
        let widths = [2, 8, 40, 25, 15, 15, 8, 15, 15, 12, 12, 18, 20, 20];
        for (col, width) in (0u16..).zip(widths) {
            sheet.set_column_width(col, width).ok();
        }

        // Room info block
        let seats = room
            .room
            .capacity
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        let info = [
            ("Room Name / Room Type", room.room.name.clone()),
            ("Floor", "-".to_string()),
            ("Number of Seats", seats),
            ("Number of Rooms", "1".to_string()),
        ];
        for (row, (label, value)) in (FIRST_ROW..).zip(info) {
            sheet.write_with_format(row, COL_SR, label, &f.peach_header)?;
            sheet.merge_range(row, COL_DESC, row, COL_LAST, &value, &f.cell)?;
        }

        // Table header
        let header_row = FIRST_ROW + 5;
        let (tax_a, tax_b) = self.tax_headers(priced.context.tax_mode);
        let headers = [
            "Sr. No.".to_string(),
            "Description of Goods / Services".to_string(),
            "Specifications".to_string(),
            "Make".to_string(),
            "Model No.".to_string(),
            "Qty.".to_string(),
            format!("Unit Rate ({})", self.currency),
            "Total".to_string(),
            tax_a,
            tax_b,
            format!("Total ({})", self.currency),
            "Remarks".to_string(),
            "Reference Image".to_string(),
        ];
        for (col, label) in (COL_SR..).zip(&headers) {
            sheet.write_with_format(header_row, col, label.as_str(), &f.blue_header)?;
        }

        // Lines grouped by category
        let mut row = header_row + 1;
        let mut sr = 1u32;
        for group in group_by_category(&room.lines, |line| line.item.category.as_str()) {
            sheet.merge_range(row, COL_SR, row, COL_LAST, &group.name, &f.category)?;
            row += 1;

            for line in group.items {
                self.write_line(sheet, row, sr, line, f)?;
                row += 1;
                sr += 1;
            }
        }

        // Footer
        row += 1;
        sheet.write_with_format(row, COL_DESC, "Total (Basic)", &f.bold)?;
        sheet.write_with_format(row, COL_TOTAL, amount(room.totals.subtotal), &f.bold_money)?;
        row += 1;
        sheet.write_with_format(row, COL_DESC, "Total Tax", &f.bold)?;
        sheet.write_with_format(row, COL_TAX_A, amount(room.totals.tax_total), &f.bold_money)?;
        row += 2;
        sheet.merge_range(row, COL_SR, row, COL_TAX_B, "Grand Total Including Tax:", &f.grand_label)?;
        sheet.write_with_format(row, COL_LINE_TOTAL, amount(room.totals.grand_total), &f.grand_money)?;

        Ok(())
    }

    fn write_line(
        &self,
        sheet: &mut Worksheet,
        row: u32,
        sr: u32,
        line: &PricedLine<'_>,
        f: &ProposalFormats,
    ) -> ExportResult<()> {
        let item = line.item;
        let result = &line.result;

        sheet.write_with_format(row, COL_SR, sr, &f.cell_center)?;
        sheet.write_with_format(row, COL_DESC, item.description.as_str(), &f.cell)?;
        sheet.write_blank(row, COL_SPEC, &f.cell)?;
        sheet.write_with_format(row, COL_MAKE, item.brand.as_str(), &f.cell_center)?;
        sheet.write_with_format(row, COL_MODEL, item.model.as_str(), &f.cell_center)?;
        sheet.write_with_format(row, COL_QTY, item.quantity as f64, &f.cell_center)?;
        sheet.write_with_format(row, COL_UNIT, amount(result.final_unit_price), &f.money)?;
        sheet.write_with_format(row, COL_TOTAL, amount(result.extended_total), &f.money)?;

        match result.tax {
            TaxBreakdown::Single { tax } => {
                sheet.write_with_format(row, COL_TAX_A, amount(tax), &f.money)?;
                sheet.write_blank(row, COL_TAX_B, &f.money)?;
            }
            TaxBreakdown::Split { first, second } => {
                sheet.write_with_format(row, COL_TAX_A, amount(first), &f.money)?;
                sheet.write_with_format(row, COL_TAX_B, amount(second), &f.money)?;
            }
        }

        sheet.write_with_format(row, COL_LINE_TOTAL, amount(result.line_total), &f.money)?;
        sheet.write_blank(row, COL_LINE_TOTAL + 1, &f.cell)?;
        sheet.write_blank(row, COL_LAST, &f.cell)?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
