//! Output file naming: `<project name>_<YYYY-MM-DD>.xlsx`.

use chrono::NaiveDate;

/// Name used when the project has none.
pub const DEFAULT_STEM: &str = "Proposal";

const PATH_ILLEGAL: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// File name for a proposal exported on `date`.
///
/// ## Example
/// ```rust
/// use avquote_export::filename::proposal_file_name;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// assert_eq!(proposal_file_name("HQ Fit-out", date), "HQ Fit-out_2026-10-19.xlsx");
/// assert_eq!(proposal_file_name("", date), "Proposal_2026-10-19.xlsx");
/// ```
pub fn proposal_file_name(project_name: &str, date: NaiveDate) -> String {
    let cleaned: String = project_name
        .chars()
        .map(|c| if PATH_ILLEGAL.contains(&c) || c.is_control() { '_' } else { c })
        .collect();
    let stem = match cleaned.trim() {
        "" => DEFAULT_STEM,
        s => s,
    };

    format!("{stem}_{}.xlsx", date.format("%Y-%m-%d"))
}
