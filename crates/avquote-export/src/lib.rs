//! # avquote-export: Proposal Workbooks for AV Quote
//!
//! Renders a [`avquote_core::PricedProject`] into the multi-sheet xlsx
//! proposal handed to clients.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  PricedProject ──► ProposalRenderer ──► Workbook (rust_xlsxwriter)      │
//! │                        │                     │                          │
//! │                        │                     ├──► render_to_bytes()     │
//! │                        │                     └──► save(dir) ──► path    │
//! │                        │                                                │
//! │                        ├── formats     (colours, Arial 10, borders)     │
//! │                        ├── terms       (Scope of Work text)             │
//! │                        ├── sheet_name  (sanitize + dedupe)              │
//! │                        └── filename    (<project>_<date>.xlsx)          │
//! │                                                                         │
//! │  No figure is computed here: every amount is read from the priced       │
//! │  project, so summary rows and room footers always agree.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod filename;
pub mod formats;
pub mod sheet_name;
pub mod terms;
pub mod workbook;

pub use error::{ExportError, ExportResult};
pub use filename::proposal_file_name;
pub use workbook::{ProposalRenderer, COVER_SHEET, SCOPE_SHEET, SUMMARY_SHEET};
