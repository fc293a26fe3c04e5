//! Cell formats shared by every proposal sheet.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder};

/// Version-control and contact headers.
pub const HEADER_GREEN: u32 = 0x92D050;
/// Scope and room-info headers.
pub const HEADER_PEACH: u32 = 0xF8CBAD;
/// BOQ table headers and the grand-total footer.
pub const HEADER_BLUE: u32 = 0xBDD7EE;
/// Scope-of-work disclaimer box.
pub const DISCLAIMER_GREEN: u32 = 0xC6E0B4;
/// BOQ category rows.
pub const CATEGORY_GREY: u32 = 0xD9D9D9;

/// Excel number format for amounts in `symbol`, e.g. `"₹"#,##0.00`.
pub fn money_num_format(symbol: &str) -> String {
    if symbol.is_empty() {
        "#,##0.00".to_string()
    } else {
        format!("\"{symbol}\"#,##0.00")
    }
}

/// Reusable formats, built once per workbook.
#[derive(Debug, Clone)]
pub struct ProposalFormats {
    pub cell: Format,
    pub cell_center: Format,
    pub bold: Format,
    pub green_title: Format,
    pub green_label: Format,
    pub peach_header: Format,
    pub peach_header_center: Format,
    pub blue_header: Format,
    pub disclaimer: Format,
    pub category: Format,
    pub money: Format,
    pub bold_money: Format,
    pub grand_label: Format,
    pub grand_money: Format,
}

impl ProposalFormats {
    /// Builds the format set for amounts in `currency_symbol`.
    pub fn new(currency_symbol: &str) -> Self {
        let money_fmt = money_num_format(currency_symbol);

        // Arial 10, thin border, top-left, wrapped.
        let cell = Format::new()
            .set_font_name("Arial")
            .set_font_size(10)
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Top)
            .set_align(FormatAlign::Left)
            .set_text_wrap();

        let centered = Format::new()
            .set_font_name("Arial")
            .set_font_size(10)
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::VerticalCenter)
            .set_align(FormatAlign::Center)
            .set_text_wrap();

        Self {
            cell_center: centered.clone(),
            bold: cell.clone().set_bold(),
            green_title: centered.clone().set_bold().set_background_color(HEADER_GREEN),
            green_label: cell.clone().set_background_color(HEADER_GREEN),
            peach_header: cell.clone().set_bold().set_background_color(HEADER_PEACH),
            peach_header_center: centered.clone().set_bold().set_background_color(HEADER_PEACH),
            blue_header: centered.set_bold().set_background_color(HEADER_BLUE),
            disclaimer: cell
                .clone()
                .set_align(FormatAlign::VerticalCenter)
                .set_background_color(DISCLAIMER_GREEN),
            category: cell.clone().set_bold().set_background_color(CATEGORY_GREY),
            money: cell.clone().set_num_format(&money_fmt),
            bold_money: cell.clone().set_bold().set_num_format(&money_fmt),
            grand_label: cell.clone().set_bold().set_background_color(HEADER_BLUE),
            grand_money: cell
                .clone()
                .set_bold()
                .set_background_color(HEADER_BLUE)
                .set_num_format(&money_fmt),
            cell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_num_format() {
        assert_eq!(money_num_format("₹"), "\"₹\"#,##0.00");
        assert_eq!(money_num_format("$"), "\"$\"#,##0.00");
        assert_eq!(money_num_format(""), "#,##0.00");
    }
}
