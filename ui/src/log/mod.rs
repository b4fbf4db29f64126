//! Log page panels: the manual entry form, the history table and exports.

mod entry_form;
mod export;
mod history;

pub use entry_form::EntryForm;
pub use export::{build_csv, ExportPanel};
pub use history::HistoryTable;
